use crate::auth::use_session;
use crate::routes::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let session = use_session();
    let navigator = use_navigator();

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            session.logout();
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };

    let Some(user) = session.user() else {
        return Html::default();
    };

    html! {
        <div class="p-2">
            <h1 class="text-3xl font-semibold mb-4">{"Dashboard"}</h1>
            <p>{format!("Welcome, {}", if user.full_name.is_empty() { &user.username } else { &user.full_name })}</p>
            <p class="text-gray-600">{format!("Username: {}", user.username)}</p>
            if !user.email.is_empty() {
                <p class="text-gray-600">{format!("Email: {}", user.email)}</p>
            }
            <div class="mt-6 grid grid-cols-1 sm:grid-cols-2 gap-4">
                <Link<Route> to={Route::UploadPdf} classes="p-4 bg-white rounded shadow hover:bg-blue-50">{"Upload a PDF"}</Link<Route>>
                <Link<Route> to={Route::PdfList} classes="p-4 bg-white rounded shadow hover:bg-blue-50">{"Browse uploaded PDFs"}</Link<Route>>
                <Link<Route> to={Route::RagChat} classes="p-4 bg-white rounded shadow hover:bg-blue-50">{"Ask your documents"}</Link<Route>>
                <Link<Route> to={Route::PromptEngineer} classes="p-4 bg-white rounded shadow hover:bg-blue-50">{"Prompt playground"}</Link<Route>>
            </div>
            <button
                onclick={on_logout}
                class="mt-6 px-4 py-2 bg-red-600 text-white rounded"
            >
                {"Logout"}
            </button>
        </div>
    }
}
