use crate::routes::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="text-center p-10">
            <h1 class="text-2xl font-bold">{"404 - Page not found"}</h1>
            <p class="mt-4 text-gray-600">
                <Link<Route> to={Route::Home} classes="text-blue-600 hover:underline">{"Back to the start page"}</Link<Route>>
            </p>
        </div>
    }
}
