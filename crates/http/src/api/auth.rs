//! Authentication API client methods

use super::ApiClient;
use crate::error::ClientError;
use crate::transport::ApiRequest;
use crate::types::{LoginResponse, RefreshResponse, RegisterRequest, RegisterResponse, UserProfile};

impl ApiClient {
    /// Create an account
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ClientError> {
        let req = ApiRequest::post("/auth/register").json(request)?;
        self.execute(req).await
    }

    /// Exchange credentials for a token grant.
    ///
    /// Nothing is stored here; see [`Session::login`](crate::Session::login).
    /// A rejected login comes back as an error without touching the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let req = ApiRequest::post("/auth/login")
            .form(&[("username", username), ("password", password)])
            .without_session_recovery();
        self.execute(req).await
    }

    /// Current user for the active token
    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        self.execute(ApiRequest::get("/auth/me")).await
    }

    /// Current user for a token that has not been stored yet
    pub async fn me_with_token(&self, token: &str) -> Result<UserProfile, ClientError> {
        self.execute(ApiRequest::get("/auth/me").with_bearer(token))
            .await
    }

    /// Ask for a fresh access token. The result is returned, not stored.
    pub async fn refresh_token(&self) -> Result<RefreshResponse, ClientError> {
        let token = self.tokens().get_token();
        self.pipeline().refresh_grant(token.as_deref()).await
    }
}
