use yew::prelude::*;

#[function_component(UnauthorizedPage)]
pub fn unauthorized_page() -> Html {
    html! {
        <div class="text-center p-10">
            <h1 class="text-2xl font-bold text-red-600">{"403 - Unauthorized"}</h1>
            <p class="mt-4 text-gray-600">{"You do not have access to this page."}</p>
        </div>
    }
}
