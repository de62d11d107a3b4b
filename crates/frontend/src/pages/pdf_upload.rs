//! PDF upload form

use crate::auth::use_api;
use crate::components::{ErrorAlert, SuccessAlert};
use crate::routes::Route;
use docuchat_http::types::{DocType, UploadPdf, UploadReceipt};
use gloo::file::File;
use tracing::{info, warn};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

/// Empty choice lets the backend detect the document type
fn parse_doc_type_choice(value: &str) -> Option<DocType> {
    value.parse().ok()
}

#[function_component(PdfUploadPage)]
pub fn pdf_upload_page() -> Html {
    let api = use_api();
    let file = use_state(|| Option::<web_sys::File>::None);
    let doc_type = use_state(|| Option::<DocType>::None);
    let goal = use_state(String::new);
    let receipt = use_state(|| Option::<UploadReceipt>::None);
    let error = use_state(|| Option::<String>::None);
    let is_uploading = use_state(|| false);

    let on_file = {
        let file = file.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            file.set(input.files().and_then(|files| files.get(0)));
        })
    };

    let on_doc_type = {
        let doc_type = doc_type.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            doc_type.set(parse_doc_type_choice(&select.value()));
        })
    };

    let on_goal = {
        let goal = goal.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            goal.set(area.value());
        })
    };

    let on_submit = {
        let file = file.clone();
        let doc_type = doc_type.clone();
        let goal = goal.clone();
        let receipt = receipt.clone();
        let error = error.clone();
        let is_uploading = is_uploading.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(selected) = (*file).clone() else {
                error.set(Some("Choose a PDF file first.".to_string()));
                return;
            };
            if *is_uploading {
                return;
            }

            let api = api.clone();
            let doc_type = *doc_type;
            let goal = Some((*goal).clone()).filter(|g| !g.trim().is_empty());
            let receipt = receipt.clone();
            let error = error.clone();
            let is_uploading = is_uploading.clone();

            is_uploading.set(true);
            error.set(None);
            receipt.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                let file = File::from(selected);
                let file_name = file.name();
                match gloo::file::futures::read_as_bytes(&file).await {
                    Ok(contents) => {
                        let upload = UploadPdf {
                            file_name,
                            contents: contents.into(),
                            doc_type,
                            goal,
                        };
                        match api.upload_pdf(upload).await {
                            Ok(result) => {
                                info!(pdf_id = ?result.pdf_id, "PDF uploaded");
                                receipt.set(Some(result));
                            }
                            Err(e) => error.set(Some(e.user_message())),
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Could not read the selected file");
                        error.set(Some("The selected file could not be read.".to_string()));
                    }
                }
                is_uploading.set(false);
            });
        })
    };

    html! {
        <div class="max-w-2xl mx-auto">
            <h2 class="text-xl font-bold mb-4">{"Upload PDF"}</h2>

            if let Some(message) = (*error).clone() {
                <ErrorAlert {message} />
            }
            if let Some(result) = (*receipt).clone() {
                <SuccessAlert message={result.summary()} />
                if let Some(pdf_id) = result.pdf_id.clone() {
                    <p class="mb-4 text-sm">
                        <Link<Route> to={Route::PdfDetails { id: pdf_id }} classes="text-blue-600 hover:underline">
                            {"View extracted data"}
                        </Link<Route>>
                    </p>
                }
            }

            <form onsubmit={on_submit} class="space-y-4 bg-white p-6 rounded shadow">
                <div>
                    <label class="block text-sm font-medium text-gray-700 mb-1">{"PDF file"}</label>
                    <input type="file" accept=".pdf,application/pdf" onchange={on_file} />
                </div>
                <div>
                    <label class="block text-sm font-medium text-gray-700 mb-1">{"Document type"}</label>
                    <select class="w-full px-3 py-2 border border-gray-300 rounded-md bg-white" onchange={on_doc_type}>
                        <option value="" selected={doc_type.is_none()}>{"Detect automatically"}</option>
                        { for DocType::ALL.iter().map(|choice| html! {
                            <option value={choice.as_str()} selected={*doc_type == Some(*choice)}>
                                {choice.label()}
                            </option>
                        }) }
                    </select>
                </div>
                <div>
                    <label class="block text-sm font-medium text-gray-700 mb-1">{"Extraction goal (optional)"}</label>
                    <textarea
                        rows="3"
                        class="w-full px-3 py-2 border border-gray-300 rounded-md"
                        placeholder="e.g., Extract patient instructions or tabular data"
                        value={(*goal).clone()}
                        oninput={on_goal}
                    />
                </div>
                <button
                    type="submit"
                    disabled={*is_uploading}
                    class="px-4 py-2 bg-blue-600 text-white rounded hover:bg-blue-700 disabled:opacity-50"
                >
                    {if *is_uploading { "Uploading..." } else { "Upload" }}
                </button>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_type_choice() {
        assert_eq!(parse_doc_type_choice(""), None);
        assert_eq!(parse_doc_type_choice("medical"), Some(DocType::Medical));
        assert_eq!(parse_doc_type_choice("default"), Some(DocType::Default));
    }
}
