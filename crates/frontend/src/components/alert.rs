//! Inline message banners

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AlertProps {
    pub message: AttrValue,
}

#[function_component(ErrorAlert)]
pub fn error_alert(props: &AlertProps) -> Html {
    html! {
        <div class="mb-4 p-3 rounded-md text-sm bg-red-50 border border-red-200 text-red-700" role="alert">
            {props.message.clone()}
        </div>
    }
}

#[function_component(SuccessAlert)]
pub fn success_alert(props: &AlertProps) -> Html {
    html! {
        <div class="mb-4 p-3 rounded-md text-sm bg-green-50 border border-green-200 text-green-700" role="status">
            {props.message.clone()}
        </div>
    }
}
