//! Account registration form

use crate::auth::{SessionAction, use_session};
use crate::components::ErrorAlert;
use crate::routes::Route;
use docuchat_http::types::RegisterRequest;
use tracing::info;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct RegisterForm {
    full_name: String,
    username: String,
    email: String,
    phone: String,
    birthdate: String,
    password: String,
}

impl RegisterForm {
    fn to_request(&self) -> RegisterRequest {
        let birthdate = self.birthdate.trim();
        RegisterRequest {
            full_name: self.full_name.trim().to_string(),
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            birthdate: (!birthdate.is_empty()).then(|| birthdate.to_string()),
            password: self.password.clone(),
        }
    }
}

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let form = use_state(RegisterForm::default);
    let error = use_state(|| Option::<String>::None);
    let is_submitting = use_state(|| false);

    let field = |apply: fn(&mut RegisterForm, String)| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            apply(&mut next, input.value());
            form.set(next);
        })
    };

    let on_submit = {
        let session = session.clone();
        let form = form.clone();
        let error = error.clone();
        let is_submitting = is_submitting.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_submitting {
                return;
            }

            let context = session.clone();
            let request = form.to_request();
            let navigator = navigator.clone();
            let error = error.clone();
            let is_submitting = is_submitting.clone();

            is_submitting.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match context.session().register(&request).await {
                    Ok(user) => {
                        info!(username = %user.username, "Account created");
                        context.dispatch(SessionAction::LoggedIn(user));
                        if let Some(navigator) = &navigator {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
                is_submitting.set(false);
            });
        })
    };

    let input_class = "w-full px-3 py-2 border border-gray-300 rounded-md";
    let label_class = "block text-sm font-medium text-gray-700 mb-1";

    html! {
        <div class="flex justify-center items-center py-12">
            <div class="w-full max-w-md bg-white p-6 rounded-lg shadow-md">
                <h2 class="text-2xl font-bold text-center text-gray-700 mb-6">{"Create an Account"}</h2>

                if let Some(message) = (*error).clone() {
                    <ErrorAlert {message} />
                }

                <form onsubmit={on_submit} class="space-y-4">
                    <div>
                        <label class={label_class}>{"Full Name"}</label>
                        <input type="text" required=true class={input_class}
                            value={form.full_name.clone()}
                            oninput={field(|f, v| f.full_name = v)} />
                    </div>
                    <div>
                        <label class={label_class}>{"Username"}</label>
                        <input type="text" required=true class={input_class}
                            value={form.username.clone()}
                            oninput={field(|f, v| f.username = v)} />
                    </div>
                    <div>
                        <label class={label_class}>{"Email"}</label>
                        <input type="email" required=true class={input_class}
                            value={form.email.clone()}
                            oninput={field(|f, v| f.email = v)} />
                    </div>
                    <div>
                        <label class={label_class}>{"Phone"}</label>
                        <input type="tel" required=true class={input_class}
                            value={form.phone.clone()}
                            oninput={field(|f, v| f.phone = v)} />
                    </div>
                    <div>
                        <label class={label_class}>{"Birthdate"}</label>
                        <input type="date" class={input_class}
                            value={form.birthdate.clone()}
                            oninput={field(|f, v| f.birthdate = v)} />
                    </div>
                    <div>
                        <label class={label_class}>{"Password"}</label>
                        <input type="password" required=true class={input_class}
                            value={form.password.clone()}
                            oninput={field(|f, v| f.password = v)} />
                    </div>
                    <button
                        type="submit"
                        disabled={*is_submitting}
                        class="w-full bg-blue-600 text-white py-2 rounded hover:bg-blue-700 transition disabled:opacity-50"
                    >
                        {if *is_submitting { "Registering..." } else { "Register" }}
                    </button>
                </form>

                <p class="text-sm text-gray-600 text-center mt-4">
                    {"Already have an account? "}
                    <Link<Route> to={Route::Login} classes="text-blue-600 hover:underline">{"Log in"}</Link<Route>>
                </p>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_birthdate_is_omitted() {
        let form = RegisterForm {
            full_name: " Bob Example ".into(),
            username: "bob".into(),
            email: "bob@example.com".into(),
            phone: "555".into(),
            birthdate: "  ".into(),
            password: " secret ".into(),
        };
        let request = form.to_request();
        assert_eq!(request.full_name, "Bob Example");
        assert_eq!(request.birthdate, None);
        assert_eq!(request.password, " secret ");
    }

    #[test]
    fn test_birthdate_is_kept() {
        let form = RegisterForm {
            birthdate: "1990-04-12".into(),
            ..RegisterForm::default()
        };
        assert_eq!(form.to_request().birthdate.as_deref(), Some("1990-04-12"));
    }
}
