//! # billing-session
//!
//! Client-side session state for the billing UI: login, logout, role
//! derivation from the caller's projects, and persistence of the session
//! to browser storage.
//!
//! The crate builds natively (HTTP via `reqwest`, in-memory storage) and for
//! the browser under the `hydrate` feature (HTTP via `gloo-net`, storage via
//! `web-sys`). Consumers receive the store by injection, typically as an
//! `Rc<SessionStore<HttpApi>>` created once at startup.

pub mod config;
pub mod error;
pub mod net;
pub mod state;
pub mod storage;

pub use config::SessionConfig;
pub use error::{ErrorCode, SessionError};
pub use net::api::{HttpApi, SessionApi};
pub use state::roles::Roles;
pub use state::session::{ListenerId, SessionEvent, SessionState, SessionStore};
pub use storage::{KeyValueStorage, MemoryStorage};

/// Install the console logger and panic hook for the browser build.
#[cfg(feature = "hydrate")]
pub fn init_browser_logging() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("console logger not installed: {e}").into());
    }
}

/// Open the session store backed by the tab's `sessionStorage`.
///
/// Falls back to in-memory storage when the window or its storage area is
/// unavailable (private browsing modes, sandboxed frames).
#[cfg(feature = "hydrate")]
pub fn open_browser_session(config: SessionConfig) -> std::rc::Rc<SessionStore<HttpApi>> {
    use std::rc::Rc;

    let storage: Rc<dyn KeyValueStorage> = match storage::BrowserStorage::session() {
        Ok(storage) => Rc::new(storage),
        Err(e) => {
            log::warn!("session storage unavailable, using memory: {e}");
            Rc::new(MemoryStorage::new())
        }
    };
    let api = HttpApi::new(config.clone());
    Rc::new(SessionStore::new(api, storage, config))
}
