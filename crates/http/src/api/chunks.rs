//! Chunk statistics client methods

use super::ApiClient;
use crate::error::ClientError;
use crate::transport::ApiRequest;
use crate::types::ChunkFile;

impl ApiClient {
    /// Chunk counts per indexed file
    pub async fn list_chunk_files(&self) -> Result<Vec<ChunkFile>, ClientError> {
        self.execute(ApiRequest::get("/chunks/")).await
    }
}
