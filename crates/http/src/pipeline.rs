//! Authenticated request pipeline
//!
//! Wraps [`Transport`] with the session rules:
//!
//! * the active token is attached to every outbound request;
//! * a 401 carrying [`CREDENTIALS_REJECTED_DETAIL`] clears the session at once;
//! * any other 401 triggers exactly one silent refresh, after which the
//!   original request is re-sent once with the new token;
//! * a 401 on that re-send is final;
//! * a failure that arrives after a newer login leaves that login alone.
//!
//! Ending a session emits [`SessionEvent::ReauthenticationRequired`]; the
//! pipeline itself never navigates.

use crate::error::{self, ClientError};
use crate::events::{ReauthReason, SessionEvent, SessionEvents};
use crate::token::TokenStore;
use crate::transport::{self, ApiRequest, Transport};
use crate::types::RefreshResponse;
use reqwest::{Response, StatusCode};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Detail sent by the backend when a token cannot be validated at all
pub const CREDENTIALS_REJECTED_DETAIL: &str = "Could not validate credentials";

/// Endpoint issuing a fresh access token for the current session
pub const REFRESH_PATH: &str = "/auth/refresh-token";

/// Which dispatch of a request is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    First,
    Retry,
}

/// Decorator over [`Transport`] that keeps requests authenticated
#[derive(Clone, Debug)]
pub struct AuthPipeline {
    transport: Transport,
    tokens: TokenStore,
    events: SessionEvents,
}

impl AuthPipeline {
    pub const fn new(transport: Transport, tokens: TokenStore, events: SessionEvents) -> Self {
        Self {
            transport,
            tokens,
            events,
        }
    }

    pub const fn transport(&self) -> &Transport {
        &self.transport
    }

    pub const fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub const fn events(&self) -> &SessionEvents {
        &self.events
    }

    /// Send `request`, recovering once from an expired session.
    ///
    /// Statuses other than 401 are returned untouched for the caller to
    /// interpret. Store updates only apply while the token this request was
    /// sent with is still active; if a newer session took over in the
    /// meantime, the retry goes out with that session's token instead.
    pub async fn send(&self, request: &ApiRequest) -> Result<Response, ClientError> {
        let mut sent_with = match request.bearer_override() {
            Some(token) => Some(Arc::new(token.to_string())),
            None => self.tokens.current(),
        };
        let mut attempt = Attempt::First;

        loop {
            let token = sent_with.as_deref().map(String::as_str);
            let response = self.transport.dispatch(request, token).await?;
            if response.status() != StatusCode::UNAUTHORIZED || !request.recovers_session() {
                return Ok(response);
            }

            let message = unauthorized_message(response).await;
            if message == CREDENTIALS_REJECTED_DETAIL {
                self.end_session(&sent_with, ReauthReason::CredentialsRejected);
                return Err(ClientError::CredentialsRejected(message));
            }

            if attempt == Attempt::Retry {
                warn!(
                    path = request.path(),
                    "Request still unauthorized after token refresh"
                );
                return Err(ClientError::AuthenticationFailed(message));
            }

            debug!(path = request.path(), "Unauthorized, attempting token refresh");
            attempt = Attempt::Retry;
            sent_with = match self.refresh(token).await {
                Ok(fresh) => {
                    let fresh = Arc::new(fresh);
                    if self.tokens.install_if(&sent_with, Arc::clone(&fresh)) {
                        info!("Access token refreshed");
                        self.events.emit(SessionEvent::TokenRefreshed);
                        Some(fresh)
                    } else {
                        match self.tokens.current() {
                            Some(newer) => Some(newer),
                            None => return Err(ClientError::AuthenticationFailed(message)),
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Token refresh failed");
                    if self.end_session(&sent_with, ReauthReason::RefreshFailed) {
                        return Err(ClientError::SessionExpired(Box::new(e)));
                    }
                    match self.tokens.current() {
                        Some(newer) => Some(newer),
                        None => return Err(ClientError::SessionExpired(Box::new(e))),
                    }
                }
            };
        }
    }

    /// Ask the refresh endpoint for a new grant, bypassing session recovery
    pub async fn refresh_grant(&self, token: Option<&str>) -> Result<RefreshResponse, ClientError> {
        let request = ApiRequest::get(REFRESH_PATH).without_session_recovery();
        let response = self.transport.dispatch(&request, token).await?;
        transport::decode_json(response).await
    }

    /// Call the refresh endpoint directly on the transport. Going through
    /// [`send`](Self::send) would let a failing refresh trigger another
    /// refresh.
    async fn refresh(&self, token: Option<&str>) -> Result<String, ClientError> {
        let refreshed = self.refresh_grant(token).await?;
        if refreshed.access_token.is_empty() {
            return Err(ClientError::AuthenticationFailed(
                "refresh returned an empty access token".into(),
            ));
        }
        Ok(refreshed.access_token)
    }

    /// Clear the session `sent_with` belonged to. A newer session is left
    /// alone and no event is emitted. Returns whether the session ended.
    fn end_session(&self, sent_with: &Option<Arc<String>>, reason: ReauthReason) -> bool {
        let ended = match sent_with {
            Some(_) => self.tokens.clear_if(sent_with),
            None => !self.tokens.has_token(),
        };
        if !ended {
            debug!(?reason, "Stale authentication failure ignored, session has moved on");
            return false;
        }
        warn!(?reason, "Session invalidated, re-authentication required");
        self.events
            .emit(SessionEvent::ReauthenticationRequired(reason));
        true
    }
}

async fn unauthorized_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    error::message_from_body(status, &body)
}
