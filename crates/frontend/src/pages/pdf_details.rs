//! Extraction results for one PDF

use crate::auth::use_api;
use crate::components::{ErrorAlert, ExtractedDataView, LoadingSpinner};
use crate::routes::Route;
use docuchat_http::types::PdfDetail;
use tracing::warn;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PdfDetailsProps {
    pub id: String,
}

#[function_component(PdfDetailsPage)]
pub fn pdf_details_page(props: &PdfDetailsProps) -> Html {
    let api = use_api();
    let detail = use_state(|| Option::<PdfDetail>::None);
    let error = use_state(|| Option::<String>::None);

    {
        let detail = detail.clone();
        let error = error.clone();
        use_effect_with(props.id.clone(), move |id| {
            let id = id.clone();
            detail.set(None);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match api.pdf_detail(&id).await {
                    Ok(result) => {
                        if result.extracted_data.is_malformed() {
                            warn!(pdf_id = %id, "Extracted data is not valid JSON");
                        }
                        detail.set(Some(result));
                    }
                    Err(e) => error.set(Some(format!("Failed to load PDF details: {}", e.user_message()))),
                }
            });
        });
    }

    if let Some(message) = (*error).clone() {
        return html! { <ErrorAlert {message} /> };
    }

    let Some(detail) = (*detail).clone() else {
        return html! { <LoadingSpinner text="Loading..." /> };
    };

    html! {
        <div class="max-w-4xl mx-auto">
            <h2 class="text-xl font-bold mb-1">{format!("PDF Details: {}", detail.filename)}</h2>
            <p class="text-sm text-gray-600 mb-4">
                {format!("Doc Type: {}", detail.doc_type.as_deref().unwrap_or("-"))}
                if let Some(status) = detail.status.clone() {
                    {format!(" | Status: {status}")}
                }
            </p>
            <div class="bg-white shadow rounded p-4">
                <ExtractedDataView data={detail.extracted_data.clone()} />
            </div>
            <p class="mt-4">
                <Link<Route> to={Route::ChunkDetails { id: detail.id.clone() }} classes="text-blue-600 hover:underline">
                    {"Browse chunks"}
                </Link<Route>>
            </p>
        </div>
    }
}
