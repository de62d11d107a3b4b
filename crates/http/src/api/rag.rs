//! RAG query client methods

use super::ApiClient;
use crate::error::ClientError;
use crate::transport::ApiRequest;
use crate::types::{DocType, RagAnswer, RagQuery};

impl ApiClient {
    /// Ask a question against the indexed documents
    pub async fn rag_query(&self, question: &str, doc_type: DocType) -> Result<RagAnswer, ClientError> {
        let body = RagQuery {
            question: question.to_string(),
            doc_type,
        };
        self.execute(ApiRequest::post("/rag/query").json(&body)?)
            .await
    }
}
