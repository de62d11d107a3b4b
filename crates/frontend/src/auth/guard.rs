//! Authentication guard component for protected routes

use super::context::use_session;
use crate::components::LoadingSpinner;
use crate::routes::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RequireAuthProps {
    pub children: Children,
}

/// Renders its children only for a logged-in user; everyone else is sent to
/// the login page
#[function_component(RequireAuth)]
pub fn require_auth(props: &RequireAuthProps) -> Html {
    let session = use_session();

    if session.is_loading() {
        return html! {
            <div class="flex flex-col items-center justify-center min-h-[50vh]">
                <LoadingSpinner text="Checking authentication..." />
            </div>
        };
    }

    if session.user().is_some() {
        return html! { <>{ props.children.clone() }</> };
    }

    html! { <Redirect<Route> to={Route::Login} /> }
}
