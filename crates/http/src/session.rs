//! Session context
//!
//! [`Session`] is the single owner of "who is logged in". It pairs the token
//! store with a cached [`UserProfile`] and exposes login, logout,
//! registration and startup restore to the presentation layer.

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::events::SessionEvent;
use crate::types::{RegisterRequest, UserProfile};
use arc_swap::ArcSwapOption;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Username and password as typed into the login form
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login failures
#[derive(Debug, Error)]
pub enum LoginError {
    /// The backend refused the username/password pair
    #[error("Invalid username or password.")]
    InvalidCredentials { detail: String },

    /// Anything else (network, server error, malformed response)
    #[error("An unexpected error occurred.")]
    Unexpected(#[source] ClientError),
}

impl LoginError {
    fn from_client(error: ClientError) -> Self {
        match error {
            ClientError::BadRequest(detail) | ClientError::AuthenticationFailed(detail) => {
                Self::InvalidCredentials { detail }
            }
            other => Self::Unexpected(other),
        }
    }

    /// The backend's message, for logging or detailed display
    pub fn detail(&self) -> String {
        match self {
            Self::InvalidCredentials { detail } => detail.clone(),
            Self::Unexpected(err) => err.detail(),
        }
    }
}

/// Registration failures
#[derive(Debug, Error)]
pub enum RegisterError {
    /// The backend refused the registration (duplicate user, validation, ...)
    #[error("{}", .0.detail())]
    Rejected(#[source] ClientError),

    /// The account was created but the automatic login failed
    #[error(transparent)]
    Login(#[from] LoginError),
}

/// Current user plus the operations that change it
#[derive(Clone, Debug)]
pub struct Session {
    client: ApiClient,
    user: Arc<ArcSwapOption<UserProfile>>,
}

impl Session {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            user: Arc::new(ArcSwapOption::empty()),
        }
    }

    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// The logged-in user. Absent whenever the token store is empty, even if
    /// a profile is still cached from before the session was invalidated.
    pub fn current_user(&self) -> Option<Arc<UserProfile>> {
        if !self.client.tokens().has_token() {
            return None;
        }
        self.user.load_full()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Whether a token is held, profile or not (optimistic startup state)
    pub fn has_token(&self) -> bool {
        self.client.tokens().has_token()
    }

    /// Log in and cache the profile.
    ///
    /// The token and profile are committed only after both have been
    /// obtained; a failure leaves the session exactly as it was.
    pub async fn login(&self, credentials: &Credentials) -> Result<Arc<UserProfile>, LoginError> {
        let grant = self
            .client
            .login(&credentials.username, &credentials.password)
            .await
            .map_err(LoginError::from_client)?;

        let profile = match grant.user {
            Some(profile) => profile,
            None => self
                .client
                .me_with_token(&grant.access_token)
                .await
                .map_err(LoginError::Unexpected)?,
        };

        let profile = Arc::new(profile);
        self.client.tokens().set_token(grant.access_token);
        self.user.store(Some(Arc::clone(&profile)));

        info!(username = %profile.username, "Logged in");
        self.client.events().emit(SessionEvent::LoggedIn {
            username: profile.username.clone(),
        });
        Ok(profile)
    }

    /// Create an account, then log in with the same credentials
    pub async fn register(&self, request: &RegisterRequest) -> Result<Arc<UserProfile>, RegisterError> {
        let response = self
            .client
            .register(request)
            .await
            .map_err(RegisterError::Rejected)?;
        debug!(
            username = %request.username,
            message = response.msg.as_deref().unwrap_or_default(),
            "Registered"
        );

        let credentials = Credentials::new(request.username.clone(), request.password.clone());
        Ok(self.login(&credentials).await?)
    }

    /// Forget the token and profile. Client-side only.
    pub fn logout(&self) {
        self.client.tokens().clear_token();
        self.user.store(None);
        info!("Logged out");
        self.client.events().emit(SessionEvent::LoggedOut);
    }

    /// Load the profile for a token persisted by an earlier visit.
    ///
    /// Returns `Ok(None)` when there is no token. Authentication failures are
    /// handled by the pipeline (which clears the token and signals
    /// re-authentication) and are also returned here.
    pub async fn restore(&self) -> Result<Option<Arc<UserProfile>>, ClientError> {
        if !self.client.tokens().has_token() {
            return Ok(None);
        }

        match self.client.me().await {
            Ok(profile) => {
                let profile = Arc::new(profile);
                self.user.store(Some(Arc::clone(&profile)));
                debug!(username = %profile.username, "Session restored");
                Ok(Some(profile))
            }
            Err(e) => {
                warn!(error = %e, "Failed to restore session");
                if e.requires_login() && !self.has_token() {
                    self.user.store(None);
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_classification() {
        let err = LoginError::from_client(ClientError::BadRequest(
            "Incorrect username or password".into(),
        ));
        assert!(matches!(err, LoginError::InvalidCredentials { .. }));
        assert_eq!(err.to_string(), "Invalid username or password.");
        assert_eq!(err.detail(), "Incorrect username or password");

        let err = LoginError::from_client(ClientError::ServerError {
            status: 500,
            message: "db down".into(),
        });
        assert!(matches!(err, LoginError::Unexpected(_)));
        assert_eq!(err.to_string(), "An unexpected error occurred.");
    }

    #[test]
    fn test_register_error_shows_backend_detail() {
        let err = RegisterError::Rejected(ClientError::BadRequest("Username already exists".into()));
        assert_eq!(err.to_string(), "Username already exists");
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let rendered = format!("{:?}", Credentials::new("alice", "secret"));
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_fresh_session_has_no_user() {
        let session = Session::new(ApiClient::new("http://localhost:8000").unwrap());
        assert!(session.current_user().is_none());
        assert!(!session.is_authenticated());
        assert!(!session.has_token());
    }
}
