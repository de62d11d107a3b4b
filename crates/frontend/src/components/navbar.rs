//! Top navigation bar

use crate::auth::use_session;
use crate::routes::Route;
use yew::prelude::*;
use yew_router::prelude::*;

const LINK_CLASS: &str = "hover:underline";

#[function_component(Navbar)]
pub fn navbar() -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let user = session.user();

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            session.logout();
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };

    html! {
        <nav class="bg-blue-600 text-white px-6 py-4 shadow-md flex justify-between items-center">
            if user.is_some() {
                <Link<Route> to={Route::Dashboard} classes="text-xl font-bold">
                    {"DocuChat Dashboard"}
                </Link<Route>>
            } else {
                <Link<Route> to={Route::Home} classes="text-xl font-bold">
                    {"DocuChat"}
                </Link<Route>>
            }
            <div class="flex items-center gap-4">
                if let Some(user) = &user {
                    <Link<Route> to={Route::UploadPdf} classes={LINK_CLASS}>{"Upload PDF"}</Link<Route>>
                    <Link<Route> to={Route::PdfList} classes={LINK_CLASS}>{"All PDFs"}</Link<Route>>
                    <Link<Route> to={Route::ChunkList} classes={LINK_CLASS}>{"Chunks"}</Link<Route>>
                    <Link<Route> to={Route::RagChat} classes={LINK_CLASS}>{"RAG Chat"}</Link<Route>>
                    <Link<Route> to={Route::PromptEngineer} classes={LINK_CLASS}>{"Prompt Engineering"}</Link<Route>>
                    <span class="ml-2">{format!("Hi, {}", user.username)}</span>
                    <button
                        onclick={on_logout}
                        class="bg-red-500 hover:bg-red-600 px-3 py-1 rounded"
                    >
                        {"Logout"}
                    </button>
                } else {
                    <Link<Route> to={Route::Login} classes={LINK_CLASS}>{"Login"}</Link<Route>>
                    <Link<Route> to={Route::Register} classes={LINK_CLASS}>{"Register"}</Link<Route>>
                }
            </div>
        </nav>
    }
}
