//! Document type dropdown

use docuchat_http::types::DocType;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DocTypeSelectProps {
    pub value: DocType,
    pub onchange: Callback<DocType>,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(DocTypeSelect)]
pub fn doc_type_select(props: &DocTypeSelectProps) -> Html {
    let onchange = {
        let callback = props.onchange.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(doc_type) = select.value().parse::<DocType>() {
                callback.emit(doc_type);
            }
        })
    };

    html! {
        <select
            class={classes!("px-3", "py-2", "border", "border-gray-300", "rounded-md", "bg-white", props.class.clone())}
            disabled={props.disabled}
            {onchange}
        >
            { for DocType::ALL.iter().map(|doc_type| html! {
                <option value={doc_type.as_str()} selected={*doc_type == props.value}>
                    {doc_type.label()}
                </option>
            }) }
        </select>
    }
}
