//! Chunk browser for one PDF

use crate::auth::use_api;
use crate::components::{ErrorAlert, LoadingSpinner};
use docuchat_http::types::ChunkSummary;
use yew::prelude::*;

const PREVIEW_CHARS: usize = 80;

/// First line of a chunk, shortened for the sidebar
fn preview(content: &str) -> String {
    let line = content.lines().next().unwrap_or_default().trim();
    if line.chars().count() > PREVIEW_CHARS {
        let cut: String = line.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}

#[derive(Properties, PartialEq)]
pub struct ChunkDetailsProps {
    pub id: String,
}

#[function_component(ChunkDetailsPage)]
pub fn chunk_details_page(props: &ChunkDetailsProps) -> Html {
    let api = use_api();
    let chunks = use_state(Vec::<ChunkSummary>::new);
    let selected = use_state(|| Option::<String>::None);
    let is_loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);

    {
        let chunks = chunks.clone();
        let selected = selected.clone();
        let is_loading = is_loading.clone();
        let error = error.clone();
        use_effect_with(props.id.clone(), move |id| {
            let id = id.clone();
            selected.set(None);
            is_loading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match api.pdf_chunks(&id).await {
                    Ok(list) => {
                        chunks.set(list);
                        error.set(None);
                    }
                    Err(e) => error.set(Some(format!("Failed to load chunks: {}", e.user_message()))),
                }
                is_loading.set(false);
            });
        });
    }

    if *is_loading {
        return html! { <LoadingSpinner text="Loading chunks..." /> };
    }

    let current = (*selected)
        .as_ref()
        .and_then(|id| chunks.iter().find(|chunk| &chunk.id == id));

    html! {
        <div class="flex min-h-[70vh] bg-white rounded shadow">
            <aside class="w-64 bg-gray-100 p-4 border-r overflow-y-auto">
                <h2 class="text-lg font-bold mb-3">{"Chunks"}</h2>
                if chunks.is_empty() {
                    <p class="text-sm text-gray-500">{"No chunks for this PDF."}</p>
                }
                <ul class="space-y-2">
                    { for chunks.iter().map(|chunk| {
                        let is_selected = (*selected).as_deref() == Some(chunk.id.as_str());
                        let onclick = {
                            let selected = selected.clone();
                            let id = chunk.id.clone();
                            Callback::from(move |_: MouseEvent| selected.set(Some(id.clone())))
                        };
                        html! {
                            <li
                                key={chunk.id.clone()}
                                class={classes!("p-2", "rounded", "cursor-pointer", "hover:bg-gray-200", is_selected.then_some("bg-blue-100"))}
                                {onclick}
                            >
                                <span class="font-semibold">{format!("Chunk {}", chunk.chunk_num)}</span>
                                <p class="text-xs text-gray-600 truncate">{preview(&chunk.content)}</p>
                            </li>
                        }
                    }) }
                </ul>
            </aside>

            <section class="flex-1 p-6 overflow-y-auto">
                if let Some(message) = (*error).clone() {
                    <ErrorAlert {message} />
                }
                if let Some(chunk) = current {
                    <h2 class="text-xl font-bold mb-4">
                        {format!(
                            "Chunk {} (Page {})",
                            chunk.chunk_num,
                            chunk.page.map_or_else(|| "?".to_string(), |p| p.to_string())
                        )}
                    </h2>
                    <p class="mb-2 text-gray-700">
                        {format!(
                            "Characters: {} | {}{}",
                            chunk.char_count,
                            if chunk.processed { "Processed" } else { "Not processed" },
                            if chunk.has_analysis { " | Analysed" } else { "" }
                        )}
                    </p>
                    <div class="whitespace-pre-wrap border p-4 rounded bg-gray-50">
                        {chunk.content.clone()}
                    </div>
                } else {
                    <p class="text-gray-500">{"Select a chunk from the sidebar"}</p>
                }
            </section>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_uses_first_line() {
        assert_eq!(preview("Heading\nBody text"), "Heading");
        assert_eq!(preview(""), "");
    }

    #[test]
    fn test_preview_truncates_long_lines() {
        let long = "x".repeat(PREVIEW_CHARS + 5);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 3);
    }
}
