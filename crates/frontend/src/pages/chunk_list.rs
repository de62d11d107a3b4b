//! Chunk counts per indexed file

use crate::auth::use_api;
use crate::components::{ErrorAlert, LoadingSpinner};
use docuchat_http::types::ChunkFile;
use yew::prelude::*;

#[function_component(ChunkListPage)]
pub fn chunk_list_page() -> Html {
    let api = use_api();
    let files = use_state(Vec::<ChunkFile>::new);
    let is_loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);

    {
        let files = files.clone();
        let is_loading = is_loading.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match api.list_chunk_files().await {
                    Ok(list) => files.set(list),
                    Err(e) => error.set(Some(format!("Failed to load chunks: {}", e.user_message()))),
                }
                is_loading.set(false);
            });
        });
    }

    html! {
        <div class="max-w-3xl mx-auto">
            <h1 class="text-2xl font-bold mb-6">{"Indexed Chunks"}</h1>
            if let Some(message) = (*error).clone() {
                <ErrorAlert {message} />
            }
            if *is_loading {
                <LoadingSpinner />
            } else if files.is_empty() {
                <p class="text-gray-600">{"No chunks indexed yet."}</p>
            } else {
                <table class="w-full border rounded shadow bg-white">
                    <thead class="bg-gray-100 text-left">
                        <tr>
                            <th class="p-3">{"Filename"}</th>
                            <th class="p-3 text-right">{"Chunks"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for files.iter().map(|file| html! {
                            <tr class="border-t">
                                <td class="p-3">{file.filename.clone()}</td>
                                <td class="p-3 text-right">
                                    {file.chunk_count.map_or_else(|| "-".to_string(), |n| n.to_string())}
                                </td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            }
        </div>
    }
}
