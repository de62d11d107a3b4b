//! DocuChat browser UI
//!
//! Yew single-page application on top of [`docuchat_http`]. The session
//! lifecycle (token storage, silent refresh, forced re-authentication) lives
//! in the HTTP crate; this crate renders pages and turns session events into
//! navigation.

pub mod app;
pub mod auth;
pub mod components;
pub mod config;
pub mod logging;
pub mod pages;
pub mod routes;
pub mod storage;

pub use app::App;
pub use routes::Route;
