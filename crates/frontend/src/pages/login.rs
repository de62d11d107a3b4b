//! Login form

use crate::auth::{SessionAction, use_session};
use crate::components::ErrorAlert;
use crate::routes::Route;
use docuchat_http::Credentials;
use tracing::warn;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let session = use_session();
    let navigator = use_navigator();

    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| Option::<String>::None);
    let is_submitting = use_state(|| false);

    let on_username = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };

    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let session = session.clone();
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let is_submitting = is_submitting.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_submitting {
                return;
            }

            let context = session.clone();
            let credentials = Credentials::new((*username).clone(), (*password).clone());
            let navigator = navigator.clone();
            let error = error.clone();
            let is_submitting = is_submitting.clone();

            is_submitting.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match context.session().login(&credentials).await {
                    Ok(user) => {
                        context.dispatch(SessionAction::LoggedIn(user));
                        if let Some(navigator) = &navigator {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(e) => {
                        warn!(detail = %e.detail(), "Login failed");
                        error.set(Some(e.to_string()));
                    }
                }
                is_submitting.set(false);
            });
        })
    };

    if session.user().is_some() {
        return html! { <Redirect<Route> to={Route::Dashboard} /> };
    }

    html! {
        <div class="flex justify-center items-center py-12">
            <div class="w-full max-w-md bg-white p-6 rounded-lg shadow-md">
                <h2 class="text-2xl font-bold text-center text-gray-700 mb-6">{"Log in"}</h2>

                if let Some(message) = (*error).clone() {
                    <ErrorAlert {message} />
                }

                <form onsubmit={on_submit} class="space-y-4">
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1" for="username">{"Username"}</label>
                        <input
                            id="username"
                            type="text"
                            required=true
                            autocomplete="username"
                            class="w-full px-3 py-2 border border-gray-300 rounded-md"
                            value={(*username).clone()}
                            oninput={on_username}
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1" for="password">{"Password"}</label>
                        <input
                            id="password"
                            type="password"
                            required=true
                            autocomplete="current-password"
                            class="w-full px-3 py-2 border border-gray-300 rounded-md"
                            value={(*password).clone()}
                            oninput={on_password}
                        />
                    </div>
                    <button
                        type="submit"
                        disabled={*is_submitting}
                        class="w-full bg-blue-600 text-white py-2 rounded hover:bg-blue-700 disabled:opacity-50"
                    >
                        {if *is_submitting { "Logging in..." } else { "Log in" }}
                    </button>
                </form>

                <p class="text-sm text-gray-600 text-center mt-4">
                    {"No account yet? "}
                    <Link<Route> to={Route::Register} classes="text-blue-600 hover:underline">{"Register"}</Link<Route>>
                </p>
            </div>
        </div>
    }
}
