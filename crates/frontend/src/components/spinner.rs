//! Busy indicator shown while a request is outstanding

use yew::prelude::*;

/// Label announced to screen readers when no text is given
const DEFAULT_LABEL: &str = "Loading";

#[derive(Properties, Clone, PartialEq)]
pub struct SpinnerProps {
    #[prop_or_default]
    pub text: Option<AttrValue>,
    /// Sit in a line of text instead of centering in the page body
    #[prop_or_default]
    pub inline: bool,
}

fn spinner_label(text: Option<&AttrValue>) -> AttrValue {
    text.filter(|t| !t.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| AttrValue::from(DEFAULT_LABEL))
}

#[function_component(LoadingSpinner)]
pub fn loading_spinner(props: &SpinnerProps) -> Html {
    let label = spinner_label(props.text.as_ref());

    if props.inline {
        return html! {
            <span role="status" class="inline-flex items-center gap-2 text-gray-500">
                <span class="w-4 h-4 border-2 border-gray-300 border-t-indigo-600 rounded-full animate-spin"></span>
                <span>{label}</span>
            </span>
        };
    }

    html! {
        <div role="status" aria-live="polite" class="flex flex-col items-center py-12 gap-3">
            <span class="w-8 h-8 border-4 border-gray-200 border-t-indigo-600 rounded-full animate-spin"></span>
            if label.as_str() != DEFAULT_LABEL {
                <p class="text-sm text-gray-600">{label}</p>
            } else {
                <span class="sr-only">{label}</span>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_falls_back_when_missing_or_blank() {
        assert_eq!(spinner_label(None).as_str(), DEFAULT_LABEL);
        assert_eq!(spinner_label(Some(&AttrValue::from("  "))).as_str(), DEFAULT_LABEL);
        assert_eq!(
            spinner_label(Some(&AttrValue::from("Loading PDFs..."))).as_str(),
            "Loading PDFs..."
        );
    }
}
