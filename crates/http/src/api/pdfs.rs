//! PDF API client methods

use super::ApiClient;
use crate::error::ClientError;
use crate::transport::{ApiRequest, MultipartBody};
use crate::types::{ChunkSummary, PdfDetail, PdfSummary, UploadPdf, UploadReceipt};

const PDF_MIME: &str = "application/pdf";

impl ApiClient {
    /// Upload a PDF for extraction and indexing
    pub async fn upload_pdf(&self, upload: UploadPdf) -> Result<UploadReceipt, ClientError> {
        if upload.file_name.trim().is_empty() {
            return Err(ClientError::BadRequest("A file name is required".into()));
        }

        let mut body = MultipartBody::file("file", upload.file_name, PDF_MIME, upload.contents);
        if let Some(doc_type) = upload.doc_type {
            body = body.text("doc_type", doc_type.as_str());
        }
        if let Some(goal) = upload.goal.filter(|g| !g.trim().is_empty()) {
            body = body.text("goal", goal);
        }

        self.execute(ApiRequest::post("/pdfs/upload").multipart(body))
            .await
    }

    /// List uploaded PDFs
    pub async fn list_pdfs(&self) -> Result<Vec<PdfSummary>, ClientError> {
        self.execute(ApiRequest::get("/pdfs/")).await
    }

    /// Extraction detail of one PDF
    pub async fn pdf_detail(&self, id: &str) -> Result<PdfDetail, ClientError> {
        self.execute(ApiRequest::get(format!("/pdfs/{id}"))).await
    }

    /// Chunks of one PDF
    pub async fn pdf_chunks(&self, id: &str) -> Result<Vec<ChunkSummary>, ClientError> {
        self.execute(ApiRequest::get(format!("/pdfs/{id}/chunks")))
            .await
    }
}
