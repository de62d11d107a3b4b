//! Request and response types for the DocuChat backend

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use std::fmt;
use std::str::FromStr;

/// Registered user as returned by `/auth/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

/// Registration payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    /// `YYYY-MM-DD`; omitted when empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    pub password: String,
}

/// Registration response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub msg: Option<String>,
}

/// Token grant returned by `/auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Some backend versions embed the profile; otherwise fetch `/auth/me`
    #[serde(default)]
    pub user: Option<UserProfile>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Response of `/auth/refresh-token`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Document category understood by the extraction and RAG backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    #[default]
    Default,
    Medical,
    Invoice,
    Resume,
}

impl DocType {
    pub const ALL: [Self; 4] = [Self::Default, Self::Medical, Self::Invoice, Self::Resume];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Medical => "medical",
            Self::Invoice => "invoice",
            Self::Resume => "resume",
        }
    }

    /// Label shown in selectors
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "General",
            Self::Medical => "Medical",
            Self::Invoice => "Invoice",
            Self::Resume => "Resume",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|doc_type| doc_type.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown document type: {s}"))
    }
}

/// PDF upload form
#[derive(Debug, Clone)]
pub struct UploadPdf {
    pub file_name: String,
    pub contents: bytes::Bytes,
    /// Let the backend detect the type when absent
    pub doc_type: Option<DocType>,
    pub goal: Option<String>,
}

/// Result of `/pdfs/upload`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(default, alias = "msg")]
    pub message: Option<String>,
    #[serde(default)]
    pub pdf_id: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub processed_chunks: Option<u64>,
    #[serde(default)]
    pub total_chunks: Option<u64>,
    #[serde(default)]
    pub doc_type: Option<String>,
    #[serde(default)]
    pub detection: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl UploadReceipt {
    /// One-line confirmation for display
    pub fn summary(&self) -> String {
        let headline = self.message.as_deref().unwrap_or("Upload complete");
        match (&self.filename, &self.status) {
            (Some(filename), Some(status)) => format!("{headline}: {filename} ({status})"),
            (Some(filename), None) => format!("{headline}: {filename}"),
            (None, Some(status)) => format!("{headline} ({status})"),
            (None, None) => headline.to_string(),
        }
    }
}

/// Row of `/pdfs/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfSummary {
    pub id: String,
    pub filename: String,
    #[serde(default)]
    pub upload_time: Option<String>,
}

/// Structured extraction output of a PDF.
///
/// The backend sends `extracted_data` either as JSON or as a JSON-encoded
/// string. Strings are decoded; a string that is not valid JSON is kept as
/// [`ExtractedData::Malformed`] so one bad record does not fail the page.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedData {
    Parsed(JsonValue),
    Malformed { raw: String, error: String },
}

impl ExtractedData {
    pub fn from_wire(value: JsonValue) -> Self {
        match value {
            JsonValue::String(raw) => match serde_json::from_str(&raw) {
                Ok(parsed) => Self::Parsed(parsed),
                Err(e) => Self::Malformed {
                    raw,
                    error: e.to_string(),
                },
            },
            other => Self::Parsed(other),
        }
    }

    /// The decoded value, when there is something to show
    pub fn value(&self) -> Option<&JsonValue> {
        match self {
            Self::Parsed(JsonValue::Null) | Self::Malformed { .. } => None,
            Self::Parsed(value) => Some(value),
        }
    }

    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

impl Default for ExtractedData {
    fn default() -> Self {
        Self::Parsed(JsonValue::Null)
    }
}

impl<'de> Deserialize<'de> for ExtractedData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(Self::from_wire)
    }
}

impl Serialize for ExtractedData {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Parsed(value) => value.serialize(serializer),
            Self::Malformed { raw, .. } => raw.serialize(serializer),
        }
    }
}

/// Detail of `/pdfs/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfDetail {
    pub id: String,
    pub filename: String,
    #[serde(default)]
    pub doc_type: Option<String>,
    #[serde(default)]
    pub extracted_data: ExtractedData,
    #[serde(default)]
    pub status: Option<String>,
}

/// Row of `/pdfs/{id}/chunks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSummary {
    pub id: String,
    pub chunk_num: u32,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub char_count: u64,
    #[serde(default)]
    pub processed: bool,
    #[serde(default)]
    pub has_analysis: bool,
}

/// Row of `/chunks/`
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkFile {
    pub filename: String,
    /// Accepted as a number or a numeric string
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub chunk_count: Option<u64>,
}

/// Body of `/rag/query`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RagQuery {
    pub question: String,
    pub doc_type: DocType,
}

/// Answer of `/rag/query`; `result` is either text or a structured answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagAnswer {
    #[serde(default)]
    pub result: JsonValue,
    #[serde(default)]
    pub retrieved_chunks: Option<Vec<JsonValue>>,
}

impl RagAnswer {
    /// Answer text, if the backend produced one
    pub fn answer(&self) -> Option<&str> {
        let text = match &self.result {
            JsonValue::String(text) => Some(text.as_str()),
            JsonValue::Object(fields) => fields.get("answer").and_then(JsonValue::as_str),
            _ => None,
        };
        text.map(str::trim).filter(|t| !t.is_empty())
    }

    /// Cited source for structured answers
    pub fn source(&self) -> Option<&str> {
        self.result.get("source").and_then(JsonValue::as_str)
    }

    /// Model confidence in `[0, 1]` for structured answers
    pub fn confidence(&self) -> Option<f64> {
        self.result.get("confidence").and_then(JsonValue::as_f64)
    }
}

/// Body of `/prompt/engineer`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<DocType>,
}

/// Answer of `/prompt/engineer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptResponse {
    #[serde(default)]
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracted_data_string_is_decoded() {
        let detail: PdfDetail = serde_json::from_value(json!({
            "id": "1",
            "filename": "a.pdf",
            "doc_type": "invoice",
            "extracted_data": "{\"a\":1}",
            "status": "processed"
        }))
        .unwrap();
        assert_eq!(detail.extracted_data, ExtractedData::Parsed(json!({"a": 1})));
    }

    #[test]
    fn test_extracted_data_object_is_kept() {
        let data = ExtractedData::from_wire(json!([{"total": 3}]));
        assert_eq!(data.value(), Some(&json!([{"total": 3}])));
    }

    #[test]
    fn test_malformed_extracted_data_is_isolated() {
        let detail: PdfDetail = serde_json::from_value(json!({
            "id": "1",
            "filename": "a.pdf",
            "extracted_data": "{not json"
        }))
        .unwrap();
        assert!(detail.extracted_data.is_malformed());
        assert_eq!(detail.extracted_data.value(), None);
        assert_eq!(detail.doc_type, None);
    }

    #[test]
    fn test_missing_extracted_data_has_no_value() {
        let detail: PdfDetail =
            serde_json::from_value(json!({"id": "1", "filename": "a.pdf"})).unwrap();
        assert_eq!(detail.extracted_data.value(), None);
        assert!(!detail.extracted_data.is_malformed());
    }

    #[test]
    fn test_chunk_count_accepts_number_or_string() {
        let files: Vec<ChunkFile> = serde_json::from_value(json!([
            {"filename": "a.pdf", "chunk_count": 4},
            {"filename": "b.pdf", "chunk_count": "12"},
            {"filename": "c.pdf"}
        ]))
        .unwrap();
        assert_eq!(files[0].chunk_count, Some(4));
        assert_eq!(files[1].chunk_count, Some(12));
        assert_eq!(files[2].chunk_count, None);
    }

    #[test]
    fn test_rag_answer_shapes() {
        let text: RagAnswer = serde_json::from_value(json!({"result": "forty two"})).unwrap();
        assert_eq!(text.answer(), Some("forty two"));

        let structured: RagAnswer = serde_json::from_value(json!({
            "result": {"answer": "No relevant information found", "source": null, "confidence": 0.0}
        }))
        .unwrap();
        assert_eq!(structured.answer(), Some("No relevant information found"));
        assert_eq!(structured.source(), None);
        assert_eq!(structured.confidence(), Some(0.0));

        let empty: RagAnswer = serde_json::from_value(json!({"result": ""})).unwrap();
        assert_eq!(empty.answer(), None);
    }

    #[test]
    fn test_doc_type_parsing_and_wire_format() {
        assert_eq!("Medical".parse::<DocType>().unwrap(), DocType::Medical);
        assert!("legal".parse::<DocType>().is_err());
        assert_eq!(serde_json::to_value(DocType::Resume).unwrap(), json!("resume"));
    }

    #[test]
    fn test_prompt_request_skips_absent_fields() {
        let body = serde_json::to_value(PromptRequest {
            text: "hello".into(),
            ..PromptRequest::default()
        })
        .unwrap();
        assert_eq!(body, json!({"text": "hello"}));
    }

    #[test]
    fn test_login_response_without_user() {
        let grant: LoginResponse =
            serde_json::from_value(json!({"access_token": "tok123"})).unwrap();
        assert_eq!(grant.token_type, "bearer");
        assert!(grant.user.is_none());
    }

    #[test]
    fn test_upload_receipt_summary() {
        let receipt: UploadReceipt = serde_json::from_value(json!({
            "message": "PDF upload started",
            "filename": "report.pdf",
            "status": "processing",
            "pdf_id": "42"
        }))
        .unwrap();
        assert_eq!(receipt.summary(), "PDF upload started: report.pdf (processing)");
        assert!(receipt.extra.is_empty());
    }
}
