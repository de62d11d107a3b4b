use crate::auth::use_is_authenticated;
use crate::routes::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let is_authenticated = use_is_authenticated();

    html! {
        <div class="text-center py-16">
            <h1 class="text-4xl font-extrabold tracking-tight">{"DocuChat"}</h1>
            <p class="mt-4 max-w-2xl mx-auto text-lg text-gray-600">
                {"Upload PDFs, review what was extracted from them and ask questions across your documents."}
            </p>
            <div class="mt-8 flex justify-center gap-4">
                if is_authenticated {
                    <Link<Route> to={Route::Dashboard} classes="px-6 py-3 rounded-md text-white bg-blue-600 hover:bg-blue-700">
                        {"Go to Dashboard"}
                    </Link<Route>>
                } else {
                    <Link<Route> to={Route::Login} classes="px-6 py-3 rounded-md text-white bg-blue-600 hover:bg-blue-700">
                        {"Log in"}
                    </Link<Route>>
                    <Link<Route> to={Route::Register} classes="px-6 py-3 rounded-md text-gray-700 bg-white border hover:bg-gray-100">
                        {"Create an account"}
                    </Link<Route>>
                }
            </div>
        </div>
    }
}
