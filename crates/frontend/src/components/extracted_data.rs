//! Rendering of a PDF's structured extraction output

use docuchat_http::types::ExtractedData;
use serde_json::Value as JsonValue;
use yew::prelude::*;

/// One `key: value` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: String,
    pub value: String,
}

/// How extraction output is laid out on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataShape {
    /// Nothing to show (null, empty or malformed)
    Empty,
    /// A single object
    Fields(Vec<Field>),
    /// An array of documents, one card each
    Documents(Vec<Vec<Field>>),
    /// A scalar
    Text(String),
}

pub fn shape(data: &ExtractedData) -> DataShape {
    let Some(value) = data.value() else {
        return DataShape::Empty;
    };

    match value {
        JsonValue::Object(map) if map.is_empty() => DataShape::Empty,
        JsonValue::Object(_) => DataShape::Fields(fields(value)),
        JsonValue::Array(items) if items.is_empty() => DataShape::Empty,
        JsonValue::Array(items) => DataShape::Documents(items.iter().map(fields).collect()),
        JsonValue::String(text) if text.trim().is_empty() => DataShape::Empty,
        other => DataShape::Text(display_value(other)),
    }
}

fn fields(value: &JsonValue) -> Vec<Field> {
    match value {
        JsonValue::Object(map) => map
            .iter()
            .map(|(key, value)| Field {
                key: key.clone(),
                value: display_value(value),
            })
            .collect(),
        other => vec![Field {
            key: "value".to_string(),
            value: display_value(other),
        }],
    }
}

/// Strings unquoted, nested structures as compact JSON
pub fn display_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => "-".to_string(),
        other => other.to_string(),
    }
}

fn field_list(fields: &[Field]) -> Html {
    html! {
        <ul class="list-disc pl-5 space-y-1">
            { for fields.iter().map(|field| html! {
                <li key={field.key.clone()}>
                    <strong>{format!("{}:", field.key)}</strong>{" "}{field.value.clone()}
                </li>
            }) }
        </ul>
    }
}

#[derive(Properties, PartialEq)]
pub struct ExtractedDataViewProps {
    pub data: ExtractedData,
}

#[function_component(ExtractedDataView)]
pub fn extracted_data_view(props: &ExtractedDataViewProps) -> Html {
    match shape(&props.data) {
        DataShape::Empty => html! { <p class="text-gray-500">{"No data"}</p> },
        DataShape::Text(text) => html! { <p class="whitespace-pre-wrap">{text}</p> },
        DataShape::Fields(fields) => html! {
            <div class="border rounded p-3 bg-gray-50 shadow-sm">
                {field_list(&fields)}
            </div>
        },
        DataShape::Documents(documents) => html! {
            <div class="space-y-4">
                { for documents.iter().enumerate().map(|(idx, fields)| html! {
                    <div key={idx} class="border rounded p-3 bg-gray-50 shadow-sm">
                        <h3 class="font-semibold text-lg mb-2">{format!("Document {}", idx + 1)}</h3>
                        {field_list(fields)}
                    </div>
                }) }
            </div>
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(key: &str, value: &str) -> Field {
        Field {
            key: key.into(),
            value: value.into(),
        }
    }

    #[test]
    fn test_object_becomes_fields() {
        let data = ExtractedData::from_wire(json!({"total": 42, "vendor": "ACME"}));
        assert_eq!(
            shape(&data),
            DataShape::Fields(vec![field("total", "42"), field("vendor", "ACME")])
        );
    }

    #[test]
    fn test_string_encoded_object_is_decoded_first() {
        let data = ExtractedData::from_wire(json!("{\"name\": \"Alice\"}"));
        assert_eq!(shape(&data), DataShape::Fields(vec![field("name", "Alice")]));
    }

    #[test]
    fn test_array_becomes_documents() {
        let data = ExtractedData::from_wire(json!([
            {"name": "Alice", "skills": ["rust", "sql"]},
            "loose note"
        ]));
        assert_eq!(
            shape(&data),
            DataShape::Documents(vec![
                vec![field("name", "Alice"), field("skills", "[\"rust\",\"sql\"]")],
                vec![field("value", "loose note")],
            ])
        );
    }

    #[test]
    fn test_nothing_to_show() {
        assert_eq!(shape(&ExtractedData::default()), DataShape::Empty);
        assert_eq!(shape(&ExtractedData::from_wire(json!({}))), DataShape::Empty);
        assert_eq!(shape(&ExtractedData::from_wire(json!([]))), DataShape::Empty);
        assert_eq!(
            shape(&ExtractedData::from_wire(json!("{broken"))),
            DataShape::Empty
        );
    }

    #[test]
    fn test_scalar_is_text() {
        assert_eq!(
            shape(&ExtractedData::from_wire(json!(3.5))),
            DataShape::Text("3.5".into())
        );
        assert_eq!(
            shape(&ExtractedData::from_wire(json!("\"plain summary\""))),
            DataShape::Text("plain summary".into())
        );
    }
}
