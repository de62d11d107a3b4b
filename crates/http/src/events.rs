//! Session lifecycle events
//!
//! The data layer decides that a session is over; the presentation layer
//! decides what to do about it. Events are published on a broadcast channel
//! and any number of subscribers (the UI's session provider, tests) observe
//! them.

use tokio::sync::broadcast;
use tracing::trace;

/// Route the UI navigates to when re-authentication is required
pub const LOGIN_ROUTE: &str = "/login";

const DEFAULT_CAPACITY: usize = 32;

/// Why the session was torn down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReauthReason {
    /// The backend could not validate the credential at all
    CredentialsRejected,
    /// The silent refresh attempt failed
    RefreshFailed,
}

/// Something happened to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn { username: String },
    TokenRefreshed,
    LoggedOut,
    /// The token store has been cleared; the user must log in again
    ReauthenticationRequired(ReauthReason),
}

impl SessionEvent {
    /// Where the UI should navigate in response, if anywhere
    pub const fn redirect_target(&self) -> Option<&'static str> {
        match self {
            Self::ReauthenticationRequired(_) => Some(LOGIN_ROUTE),
            _ => None,
        }
    }
}

/// Broadcast hub for [`SessionEvent`]s
#[derive(Debug, Clone)]
pub struct SessionEvents {
    sender: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Receive every event emitted from now on
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    /// Publish an event; with no subscribers it is dropped
    pub fn emit(&self, event: SessionEvent) {
        trace!(?event, "session event");
        let _ = self.sender.send(event);
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}
