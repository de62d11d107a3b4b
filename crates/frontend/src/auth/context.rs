//! Global session context and provider

use crate::config::AppConfig;
use crate::routes::Route;
use crate::storage::BrowserTokenStorage;
use docuchat_http::types::UserProfile;
use docuchat_http::{ApiClient, ClientError, ReauthReason, Session, SessionEvent};
use std::rc::Rc;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};
use yew::prelude::*;
use yew_router::prelude::*;

/// Session state as seen by the UI
#[derive(Clone, Debug, PartialEq)]
pub struct SessionData {
    pub user: Option<Arc<UserProfile>>,
    /// A persisted token is being checked against `/auth/me`
    pub is_loading: bool,
    /// Why the user was sent back to the login page, if they were
    pub notice: Option<String>,
}

pub enum SessionAction {
    Restored(Option<Arc<UserProfile>>),
    LoggedIn(Arc<UserProfile>),
    LoggedOut,
    Expired(ReauthReason),
    DismissNotice,
}

impl SessionData {
    fn initial(has_token: bool) -> Self {
        Self {
            user: None,
            is_loading: has_token,
            notice: None,
        }
    }
}

impl Reducible for SessionData {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            SessionAction::Restored(user) => Rc::new(Self {
                user,
                is_loading: false,
                notice: self.notice.clone(),
            }),
            SessionAction::LoggedIn(user) => Rc::new(Self {
                user: Some(user),
                is_loading: false,
                notice: None,
            }),
            SessionAction::LoggedOut => Rc::new(Self {
                user: None,
                is_loading: false,
                notice: None,
            }),
            SessionAction::Expired(reason) => Rc::new(Self {
                user: None,
                is_loading: false,
                notice: Some(expiry_notice(reason).to_string()),
            }),
            SessionAction::DismissNotice => Rc::new(Self {
                notice: None,
                ..(*self).clone()
            }),
        }
    }
}

const fn expiry_notice(reason: ReauthReason) -> &'static str {
    match reason {
        ReauthReason::CredentialsRejected => "Your credentials are no longer valid. Please log in again.",
        ReauthReason::RefreshFailed => "Your session has expired. Please log in again.",
    }
}

/// Handle shared through the component tree
#[derive(Clone)]
pub struct SessionContext {
    session: Rc<Session>,
    state: UseReducerHandle<SessionData>,
}

impl PartialEq for SessionContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.session, &other.session) && self.state == other.state
    }
}

impl SessionContext {
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn api(&self) -> ApiClient {
        self.session.client().clone()
    }

    pub fn user(&self) -> Option<Arc<UserProfile>> {
        self.state.user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn notice(&self) -> Option<String> {
        self.state.notice.clone()
    }

    pub fn dispatch(&self, action: SessionAction) {
        self.state.dispatch(action);
    }

    /// Log out locally and update the UI
    pub fn logout(&self) {
        self.session.logout();
        self.state.dispatch(SessionAction::LoggedOut);
    }
}

fn connect() -> Result<Session, ClientError> {
    let client = ApiClient::builder()
        .config(AppConfig::client_config())
        .token_storage(Arc::new(BrowserTokenStorage::new()))
        .build()?;
    Ok(Session::new(client))
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

/// Owns the [`Session`] and mirrors its state into a reducer.
///
/// Must be rendered inside a router: forced re-authentication navigates to
/// the login route.
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let session = use_memo((), |_| connect().map(Rc::new).map_err(|e| e.to_string()));

    match session.as_ref() {
        Ok(session) => html! {
            <ConnectedProvider session={Rc::clone(session)}>
                {props.children.clone()}
            </ConnectedProvider>
        },
        Err(message) => {
            error!(error = %message, "Failed to initialise API client");
            html! {
                <div class="min-h-screen flex items-center justify-center bg-gray-50">
                    <div class="max-w-md p-6 bg-white rounded-lg shadow text-center">
                        <h1 class="text-xl font-bold text-red-600 mb-2">{"Configuration error"}</h1>
                        <p class="text-gray-600 text-sm">{message}</p>
                    </div>
                </div>
            }
        }
    }
}

#[derive(Properties)]
struct ConnectedProviderProps {
    session: Rc<Session>,
    children: Children,
}

impl PartialEq for ConnectedProviderProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.session, &other.session) && self.children == other.children
    }
}

#[function_component(ConnectedProvider)]
fn connected_provider(props: &ConnectedProviderProps) -> Html {
    let session = Rc::clone(&props.session);
    let state = {
        let has_token = session.has_token();
        use_reducer(move || SessionData::initial(has_token))
    };
    let navigator = use_navigator();

    // Restore a persisted session on mount
    {
        let session = Rc::clone(&session);
        let state = state.clone();
        use_effect_with((), move |_| {
            if session.has_token() {
                wasm_bindgen_futures::spawn_local(async move {
                    match session.restore().await {
                        Ok(user) => state.dispatch(SessionAction::Restored(user)),
                        Err(e) => {
                            warn!(error = %e, "Stored session could not be restored");
                            state.dispatch(SessionAction::Restored(None));
                        }
                    }
                });
            }
        });
    }

    // Turn session events into state changes and navigation
    {
        let session = Rc::clone(&session);
        let state = state.clone();
        use_effect_with((), move |_| {
            // Dropping the sender on unmount wakes the listener so it can exit
            let (stop, mut stopped) = oneshot::channel::<()>();
            let mut events = session.client().events().subscribe();
            wasm_bindgen_futures::spawn_local(async move {
                while let Some(event) = next_event(&mut events, &mut stopped).await {
                    match event {
                        SessionEvent::ReauthenticationRequired(reason) => {
                            info!(?reason, "Re-authentication required");
                            state.dispatch(SessionAction::Expired(reason));
                            if let Some(navigator) = &navigator {
                                navigator.push(&Route::Login);
                            }
                        }
                        SessionEvent::LoggedOut => state.dispatch(SessionAction::LoggedOut),
                        SessionEvent::LoggedIn { .. } => {
                            if let Some(user) = session.current_user() {
                                state.dispatch(SessionAction::LoggedIn(user));
                            }
                        }
                        SessionEvent::TokenRefreshed => debug!("Session token refreshed"),
                    }
                }
                debug!("Session event listener stopped");
            });
            move || drop(stop)
        });
    }

    let context = SessionContext { session, state };

    html! {
        <ContextProvider<SessionContext> context={context}>
            {props.children.clone()}
        </ContextProvider<SessionContext>>
    }
}

/// Next session event for the provider's listener. `None` once the provider
/// has unmounted (the stop sender was dropped) or the hub has closed.
async fn next_event(
    events: &mut broadcast::Receiver<SessionEvent>,
    stopped: &mut oneshot::Receiver<()>,
) -> Option<SessionEvent> {
    loop {
        let received = tokio::select! {
            biased;
            _ = &mut *stopped => return None,
            received = events.recv() => received,
        };
        match received {
            Ok(event) => return Some(event),
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Session event listener lagged");
            }
            Err(RecvError::Closed) => return None,
        }
    }
}

/// Hook to use the session context
#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
        .expect("SessionContext not found. Make sure to wrap your component with SessionProvider")
}

/// Hook to get the API client
#[hook]
pub fn use_api() -> ApiClient {
    use_session().api()
}

/// Hook to get the current user
#[hook]
pub fn use_current_user() -> Option<Arc<UserProfile>> {
    use_session().user()
}

/// Hook to check if authenticated
#[hook]
pub fn use_is_authenticated() -> bool {
    use_session().user().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Arc<UserProfile> {
        Arc::new(UserProfile {
            id: "u1".into(),
            username: "alice".into(),
            email: "alice@example.com".into(),
            full_name: "Alice".into(),
            phone: String::new(),
            birthdate: None,
            created_at: String::new(),
        })
    }

    #[test]
    fn test_initial_state_waits_for_restore_only_with_token() {
        assert!(SessionData::initial(true).is_loading);
        assert!(!SessionData::initial(false).is_loading);
    }

    #[test]
    fn test_login_then_expiry() {
        let state = Rc::new(SessionData::initial(false));
        let state = state.reduce(SessionAction::LoggedIn(alice()));
        assert_eq!(state.user.as_ref().map(|u| u.username.as_str()), Some("alice"));

        let state = state.reduce(SessionAction::Expired(ReauthReason::RefreshFailed));
        assert!(state.user.is_none());
        assert_eq!(
            state.notice.as_deref(),
            Some("Your session has expired. Please log in again.")
        );

        let state = state.reduce(SessionAction::DismissNotice);
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_restore_finishes_loading() {
        let state = Rc::new(SessionData::initial(true));
        let state = state.reduce(SessionAction::Restored(None));
        assert!(!state.is_loading);
        assert!(state.user.is_none());
    }

    #[test]
    fn test_login_clears_notice() {
        let state = Rc::new(SessionData::initial(false))
            .reduce(SessionAction::Expired(ReauthReason::CredentialsRejected));
        assert!(state.notice.is_some());

        let state = state.reduce(SessionAction::LoggedIn(alice()));
        assert!(state.notice.is_none());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod listener_tests {
    use super::*;
    use docuchat_http::SessionEvents;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_listener_receives_events() {
        let hub = SessionEvents::new();
        let mut events = hub.subscribe();
        let (_stop, mut stopped) = oneshot::channel::<()>();

        hub.emit(SessionEvent::LoggedOut);
        assert_eq!(
            next_event(&mut events, &mut stopped).await,
            Some(SessionEvent::LoggedOut)
        );
    }

    #[wasm_bindgen_test]
    async fn test_listener_stops_while_hub_is_alive() {
        let hub = SessionEvents::new();
        let mut events = hub.subscribe();
        let (stop, mut stopped) = oneshot::channel::<()>();

        drop(stop);
        assert_eq!(next_event(&mut events, &mut stopped).await, None);
        drop(hub);
    }

    #[wasm_bindgen_test]
    async fn test_unmount_wins_over_pending_events() {
        let hub = SessionEvents::new();
        let mut events = hub.subscribe();
        let (stop, mut stopped) = oneshot::channel::<()>();

        hub.emit(SessionEvent::TokenRefreshed);
        drop(stop);
        assert_eq!(next_event(&mut events, &mut stopped).await, None);
    }
}
