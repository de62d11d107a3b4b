//! Table of uploaded PDFs

use crate::auth::use_api;
use crate::components::{ErrorAlert, LoadingSpinner};
use crate::routes::Route;
use chrono::{DateTime, NaiveDateTime};
use docuchat_http::types::PdfSummary;
use yew::prelude::*;
use yew_router::prelude::*;

/// Render the backend's upload timestamp (RFC 3339 or naive ISO 8601)
pub fn format_upload_time(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return "-".to_string();
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}

#[function_component(PdfListPage)]
pub fn pdf_list_page() -> Html {
    let api = use_api();
    let pdfs = use_state(Vec::<PdfSummary>::new);
    let is_loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);

    {
        let pdfs = pdfs.clone();
        let is_loading = is_loading.clone();
        let error = error.clone();

        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match api.list_pdfs().await {
                    Ok(list) => pdfs.set(list),
                    Err(e) => error.set(Some(format!("Failed to load PDFs: {}", e.user_message()))),
                }
                is_loading.set(false);
            });
        });
    }

    let body = if *is_loading {
        html! { <LoadingSpinner text="Loading PDFs..." /> }
    } else if pdfs.is_empty() {
        html! { <p class="text-gray-600">{"No PDFs found."}</p> }
    } else {
        html! {
            <table class="w-full border rounded shadow bg-white">
                <thead class="bg-gray-100 text-left">
                    <tr>
                        <th class="p-3">{"Filename"}</th>
                        <th class="p-3">{"Uploaded At"}</th>
                        <th class="p-3">{"Actions"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for pdfs.iter().map(|pdf| html! {
                        <tr key={pdf.id.clone()} class="border-t hover:bg-gray-50">
                            <td class="p-3">{pdf.filename.clone()}</td>
                            <td class="p-3">{format_upload_time(pdf.upload_time.as_deref())}</td>
                            <td class="p-3 space-x-2">
                                <Link<Route>
                                    to={Route::PdfDetails { id: pdf.id.clone() }}
                                    classes="bg-blue-600 text-white px-3 py-1 rounded hover:bg-blue-800"
                                >
                                    {"View Details"}
                                </Link<Route>>
                                <Link<Route>
                                    to={Route::ChunkDetails { id: pdf.id.clone() }}
                                    classes="bg-gray-200 text-gray-800 px-3 py-1 rounded hover:bg-gray-300"
                                >
                                    {"Chunks"}
                                </Link<Route>>
                            </td>
                        </tr>
                    }) }
                </tbody>
            </table>
        }
    };

    html! {
        <div class="max-w-5xl mx-auto">
            <h1 class="text-2xl font-bold mb-6">{"Uploaded PDF Files"}</h1>
            if let Some(message) = (*error).clone() {
                <ErrorAlert {message} />
            }
            {body}
        </div>
    }
}
