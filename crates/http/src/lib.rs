//! DocuChat HTTP client
//!
//! Typed access to the DocuChat backend (authentication, PDF extraction
//! results, chunk listings, RAG queries and prompt engineering) together with
//! the session lifecycle that keeps those calls authenticated: a token store
//! with durable persistence, a request pipeline that performs one silent
//! refresh on expiry, and a broadcast of session events that the UI layer
//! turns into navigation.
//!
//! The crate compiles both natively and for `wasm32-unknown-unknown`.

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod pipeline;
pub mod session;
pub mod token;
pub mod transport;
pub mod types;

pub use api::{ApiClient, ApiClientBuilder};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use events::{LOGIN_ROUTE, ReauthReason, SessionEvent, SessionEvents};
pub use pipeline::AuthPipeline;
pub use session::{Credentials, LoginError, RegisterError, Session};
pub use token::{MemoryTokenStorage, StorageError, TokenStorage, TokenStore};
pub use transport::{ApiRequest, MultipartBody, RequestBody, Transport};
