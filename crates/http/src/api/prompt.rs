//! Prompt engineering client methods

use super::ApiClient;
use crate::error::ClientError;
use crate::transport::ApiRequest;
use crate::types::{PromptRequest, PromptResponse};

impl ApiClient {
    /// Run extracted text through the prompt-engineering endpoint
    pub async fn engineer_prompt(&self, request: &PromptRequest) -> Result<PromptResponse, ClientError> {
        self.execute(ApiRequest::post("/prompt/engineer").json(request)?)
            .await
    }
}
