pub mod context;
pub mod guard;

pub use context::{
    SessionAction, SessionContext, SessionData, SessionProvider, use_api, use_current_user,
    use_is_authenticated, use_session,
};
pub use guard::RequireAuth;
