//! Question answering over the indexed documents

use crate::auth::use_api;
use crate::components::{DocTypeSelect, LoadingSpinner};
use docuchat_http::types::{DocType, RagAnswer};
use tracing::warn;
use web_sys::HtmlInputElement;
use yew::prelude::*;

const EMPTY_REPLY: &str = "No response received from AI.";
const FAILED_REPLY: &str = "No relevant information found in the knowledge base.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Sender {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq)]
struct ChatMessage {
    sender: Sender,
    text: String,
    source: Option<String>,
    confidence: Option<f64>,
}

impl ChatMessage {
    fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            source: None,
            confidence: None,
        }
    }

    fn reply(answer: &RagAnswer) -> Self {
        Self {
            sender: Sender::Assistant,
            text: answer.answer().unwrap_or(EMPTY_REPLY).to_string(),
            source: answer.source().map(ToString::to_string),
            confidence: answer.confidence(),
        }
    }

    fn failure() -> Self {
        Self {
            sender: Sender::Assistant,
            text: FAILED_REPLY.to_string(),
            source: None,
            confidence: None,
        }
    }

    fn caption(&self) -> Option<String> {
        match (&self.source, self.confidence) {
            (Some(source), Some(confidence)) => {
                Some(format!("Source: {source} ({:.0}% confidence)", confidence * 100.0))
            }
            (Some(source), None) => Some(format!("Source: {source}")),
            (None, _) => None,
        }
    }
}

#[function_component(RagChatPage)]
pub fn rag_chat_page() -> Html {
    let api = use_api();
    let messages = use_state(Vec::<ChatMessage>::new);
    let input = use_state(String::new);
    let doc_type = use_state(DocType::default);
    let is_loading = use_state(|| false);

    let on_input = {
        let input = input.clone();
        Callback::from(move |e: InputEvent| {
            let field: HtmlInputElement = e.target_unchecked_into();
            input.set(field.value());
        })
    };

    let on_doc_type = {
        let doc_type = doc_type.clone();
        Callback::from(move |value: DocType| doc_type.set(value))
    };

    let on_submit = {
        let messages = messages.clone();
        let input = input.clone();
        let doc_type = doc_type.clone();
        let is_loading = is_loading.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let question = input.trim().to_string();
            if question.is_empty() || *is_loading {
                return;
            }

            let mut log = (*messages).clone();
            log.push(ChatMessage::user(question.clone()));
            messages.set(log.clone());
            input.set(String::new());
            is_loading.set(true);

            let api = api.clone();
            let doc_type = *doc_type;
            let messages = messages.clone();
            let is_loading = is_loading.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let reply = match api.rag_query(&question, doc_type).await {
                    Ok(answer) => ChatMessage::reply(&answer),
                    Err(e) => {
                        warn!(error = %e, "RAG query failed");
                        ChatMessage::failure()
                    }
                };
                log.push(reply);
                messages.set(log);
                is_loading.set(false);
            });
        })
    };

    html! {
        <div class="max-w-3xl mx-auto">
            <h2 class="text-xl font-bold mb-4">{"RAG Chat Assistant"}</h2>

            <DocTypeSelect value={*doc_type} onchange={on_doc_type} disabled={*is_loading} class="mb-3" />

            <div class="border rounded-md p-3 h-96 overflow-y-auto mb-3 bg-gray-50 space-y-2">
                { for messages.iter().enumerate().map(|(idx, message)| {
                    let is_user = message.sender == Sender::User;
                    html! {
                        <div key={idx} class={classes!(if is_user { "text-right" } else { "text-left" })}>
                            <span class={classes!(
                                "inline-block", "px-3", "py-2", "rounded-lg", "max-w-[70%]", "whitespace-pre-wrap",
                                if is_user { "bg-blue-600 text-white" } else { "bg-gray-200 text-gray-900" }
                            )}>
                                {message.text.clone()}
                            </span>
                            if let Some(caption) = message.caption() {
                                <p class="text-xs text-gray-500 mt-1">{caption}</p>
                            }
                        </div>
                    }
                }) }
                if *is_loading {
                    <LoadingSpinner text="Thinking..." inline=true />
                }
            </div>

            <form onsubmit={on_submit} class="flex gap-2">
                <input
                    type="text"
                    class="flex-1 px-3 py-2 border border-gray-300 rounded-md"
                    placeholder="Ask something..."
                    value={(*input).clone()}
                    oninput={on_input}
                />
                <button
                    type="submit"
                    disabled={*is_loading}
                    class="px-5 py-2 bg-blue-600 text-white rounded hover:bg-blue-700 disabled:opacity-50"
                >
                    {"Send"}
                </button>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn answer(result: serde_json::Value) -> RagAnswer {
        serde_json::from_value(json!({ "result": result })).unwrap()
    }

    #[test]
    fn test_structured_reply() {
        let reply = ChatMessage::reply(&answer(json!({
            "answer": "42 EUR", "source": "invoice.pdf", "confidence": 0.87
        })));
        assert_eq!(reply.text, "42 EUR");
        assert_eq!(
            reply.caption().as_deref(),
            Some("Source: invoice.pdf (87% confidence)")
        );
    }

    #[test]
    fn test_plain_reply() {
        let reply = ChatMessage::reply(&answer(json!("Just text")));
        assert_eq!(reply.text, "Just text");
        assert_eq!(reply.caption(), None);
    }

    #[test]
    fn test_empty_reply_falls_back() {
        assert_eq!(ChatMessage::reply(&answer(json!({"answer": "  "}))).text, EMPTY_REPLY);
        assert_eq!(ChatMessage::reply(&answer(json!(null))).text, EMPTY_REPLY);
        assert_eq!(ChatMessage::failure().text, FAILED_REPLY);
    }
}
