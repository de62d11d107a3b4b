//! Prompt engineering playground

use crate::auth::use_api;
use crate::components::{DocTypeSelect, ErrorAlert};
use docuchat_http::types::{DocType, PromptRequest};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

const EMPTY_RESPONSE: &str = "No response received.";

fn build_request(text: &str, goal: &str, doc_type: DocType) -> PromptRequest {
    let goal = goal.trim();
    PromptRequest {
        text: text.to_string(),
        goal: (!goal.is_empty()).then(|| goal.to_string()),
        doc_type: Some(doc_type),
    }
}

#[function_component(PromptEditorPage)]
pub fn prompt_editor_page() -> Html {
    let api = use_api();
    let text = use_state(String::new);
    let goal = use_state(String::new);
    let doc_type = use_state(DocType::default);
    let response = use_state(String::new);
    let error = use_state(|| Option::<String>::None);
    let is_loading = use_state(|| false);

    let on_text = {
        let text = text.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            text.set(area.value());
        })
    };

    let on_goal = {
        let goal = goal.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            goal.set(input.value());
        })
    };

    let on_doc_type = {
        let doc_type = doc_type.clone();
        Callback::from(move |value: DocType| doc_type.set(value))
    };

    let on_generate = {
        let text = text.clone();
        let goal = goal.clone();
        let doc_type = doc_type.clone();
        let response = response.clone();
        let error = error.clone();
        let is_loading = is_loading.clone();

        Callback::from(move |_: MouseEvent| {
            if *is_loading || text.trim().is_empty() {
                return;
            }
            let api = api.clone();
            let request = build_request(&text, &goal, *doc_type);
            let response = response.clone();
            let error = error.clone();
            let is_loading = is_loading.clone();

            is_loading.set(true);
            error.set(None);
            response.set(String::new());
            wasm_bindgen_futures::spawn_local(async move {
                match api.engineer_prompt(&request).await {
                    Ok(result) if result.response.trim().is_empty() => {
                        response.set(EMPTY_RESPONSE.to_string());
                    }
                    Ok(result) => response.set(result.response),
                    Err(e) => error.set(Some(e.user_message())),
                }
                is_loading.set(false);
            });
        })
    };

    html! {
        <div class="max-w-3xl mx-auto space-y-3">
            <h2 class="text-xl font-bold">{"Prompt Engineering Playground"}</h2>

            <label class="block font-semibold">{"Extracted Text"}</label>
            <textarea
                rows="8"
                class="w-full px-3 py-2 border border-gray-300 rounded-md"
                placeholder="Paste extracted PDF text here"
                value={(*text).clone()}
                oninput={on_text}
            />

            <label class="block font-semibold">{"Optional Goal"}</label>
            <input
                class="w-full px-3 py-2 border border-gray-300 rounded-md"
                placeholder="e.g., Extract patient instructions or tabular data"
                value={(*goal).clone()}
                oninput={on_goal}
            />

            <label class="block font-semibold">{"Document Type"}</label>
            <DocTypeSelect value={*doc_type} onchange={on_doc_type} class="w-full" />

            <button
                onclick={on_generate}
                disabled={*is_loading || text.trim().is_empty()}
                class="px-4 py-2 bg-blue-600 text-white rounded hover:bg-blue-700 disabled:opacity-50"
            >
                {if *is_loading { "Generating..." } else { "Generate AI Response" }}
            </button>

            if let Some(message) = (*error).clone() {
                <ErrorAlert {message} />
            }

            <h3 class="text-lg font-semibold pt-4">{"AI Response:"}</h3>
            <pre class="bg-gray-100 p-4 rounded whitespace-pre-wrap max-h-96 overflow-auto">
                {(*response).clone()}
            </pre>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_goal_is_omitted() {
        let request = build_request("Patient has a fever", "   ", DocType::Medical);
        assert_eq!(request.goal, None);
        assert_eq!(request.doc_type, Some(DocType::Medical));

        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("goal").is_none());
        assert_eq!(body["doc_type"], "medical");
    }

    #[test]
    fn test_goal_is_trimmed() {
        let request = build_request("text", "  Extract symptoms ", DocType::Default);
        assert_eq!(request.goal.as_deref(), Some("Extract symptoms"));
    }
}
