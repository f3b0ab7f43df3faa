//! Session store: the current user's authentication and role state.
//!
//! DESIGN
//! ======
//! One `SessionStore` exists per tab and is handed to whatever needs it
//! (usually as an `Rc`). All state lives behind `RefCell`s because the store
//! runs on the browser's single thread; no borrow is held across an
//! `.await`, so a listener or another task may read the store while a login
//! is suspended on the network.
//!
//! Every field write goes through a setter that emits a [`SessionEvent`] to
//! the registered listeners. Persisting the token is one such listener,
//! registered first at construction, so storage always holds the token
//! before any other listener observes a change.
//!
//! ERROR HANDLING
//! ==============
//! Login failures are returned to the caller as [`SessionError`]s whose
//! messages are shown to the user as-is. Storage failures never fail a
//! session operation; they are logged and the in-memory state stays
//! authoritative for the rest of the page lifetime.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::roles::Roles;
use crate::config::SessionConfig;
use crate::error::{ErrorCode, SessionError};
use crate::net::api::{ApiError, SessionApi};
use crate::net::headers::{fetch_headers, token_from_header};
use crate::net::types::{ErrorBody, LoginRequest, LoginResponse};
use crate::storage::{self, KeyValueStorage};

// =============================================================================
// TYPES
// =============================================================================

/// Snapshot of the session record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Empty when logged out.
    pub username: String,
    pub is_logged_in: bool,
    /// True only while a login request is in flight.
    pub is_logging_in: bool,
    /// Empty when absent.
    pub token: String,
    pub roles: Roles,
}

/// A change to one field of the session record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    TokenChanged(String),
    UsernameChanged(String),
    RolesChanged(Roles),
    StatusChanged { is_logged_in: bool, is_logging_in: bool },
}

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(&SessionEvent)>;

pub struct SessionStore<A> {
    api: A,
    storage: Rc<dyn KeyValueStorage>,
    config: SessionConfig,
    state: RefCell<SessionState>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_listener: Cell<u64>,
    login_in_flight: Cell<bool>,
}

// =============================================================================
// CONSTRUCTION + OBSERVATION
// =============================================================================

impl<A> SessionStore<A> {
    /// Create a store hydrated from `storage` and keep its token mirrored there.
    pub fn new(api: A, storage: Rc<dyn KeyValueStorage>, config: SessionConfig) -> Self {
        let state = hydrate(storage.as_ref(), &config);
        log::debug!("session hydrated (logged in: {})", state.is_logged_in);

        let store = Self {
            api,
            storage,
            config,
            state: RefCell::new(state),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
            login_in_flight: Cell::new(false),
        };
        store.install_token_sync();
        store
    }

    fn install_token_sync(&self) {
        let storage = Rc::clone(&self.storage);
        let key = self.config.keys.token.clone();
        self.subscribe(move |event| {
            if let SessionEvent::TokenChanged(token) = event {
                if let Err(e) = storage.set_item(&key, token) {
                    log::warn!("failed to persist session token: {e}");
                }
            }
        });
    }

    /// Register a listener called synchronously after every field write.
    ///
    /// Listeners run in registration order and may read the store or
    /// register further listeners; those take effect from the next event.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&SessionEvent) + 'static,
    {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        let listener: Listener = Rc::new(listener);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    fn emit(&self, event: &SessionEvent) {
        let listeners: Vec<Listener> = self.listeners.borrow().iter().map(|(_, l)| Rc::clone(l)).collect();
        for listener in listeners {
            listener(event);
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn token(&self) -> String {
        self.state.borrow().token.clone()
    }

    #[must_use]
    pub fn username(&self) -> String {
        self.state.borrow().username.clone()
    }

    #[must_use]
    pub fn roles(&self) -> Roles {
        self.state.borrow().roles
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.state.borrow().is_logged_in
    }

    #[must_use]
    pub fn is_logging_in(&self) -> bool {
        self.state.borrow().is_logging_in
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Setters
    // -------------------------------------------------------------------------

    fn set_token(&self, token: String) {
        self.state.borrow_mut().token.clone_from(&token);
        self.emit(&SessionEvent::TokenChanged(token));
    }

    fn set_username(&self, username: String) {
        self.state.borrow_mut().username.clone_from(&username);
        self.emit(&SessionEvent::UsernameChanged(username));
    }

    fn set_roles(&self, roles: Roles) {
        self.state.borrow_mut().roles = roles;
        self.emit(&SessionEvent::RolesChanged(roles));
    }

    fn set_status(&self, is_logged_in: bool, is_logging_in: bool) {
        {
            let mut state = self.state.borrow_mut();
            state.is_logged_in = is_logged_in;
            state.is_logging_in = is_logging_in;
        }
        self.emit(&SessionEvent::StatusChanged { is_logged_in, is_logging_in });
    }

    fn persist_identity(&self, username: &str, roles: Roles) {
        if let Err(e) = self.storage.set_item(&self.config.keys.username, username) {
            log::warn!("failed to persist username: {e}");
        }
        if let Err(e) = storage::save_json(self.storage.as_ref(), &self.config.keys.roles, &roles) {
            log::warn!("failed to persist roles: {e}");
        }
    }

    /// Drop the session: token, persisted entries, identity, and roles.
    pub fn logout(&self) {
        log::info!("logging out {}", self.username());
        self.set_token(String::new());
        if let Err(e) = self.storage.clear() {
            log::warn!("failed to clear session storage: {e}");
        }
        self.set_username(String::new());
        self.set_roles(Roles::default());
        self.set_status(false, false);
    }
}

// =============================================================================
// LOGIN FLOW
// =============================================================================

impl<A: SessionApi> SessionStore<A> {
    /// Log in with `username` and `password`.
    ///
    /// On success the user holds at least one recognized role, the token is
    /// set, and username and roles are persisted.
    ///
    /// # Errors
    ///
    /// - [`SessionError::LoginInProgress`] if another login has not finished;
    ///   nothing is changed.
    /// - [`SessionError::InvalidCredentials`], [`SessionError::Forbidden`],
    ///   [`SessionError::LoginFailed`] for 401, 403, and other statuses.
    /// - [`SessionError::AccessDenied`] if the account holds no billing role;
    ///   the token is cleared again.
    /// - [`SessionError::Api`] for transport failures and role lookup
    ///   failures.
    ///
    /// Every failure except `LoginInProgress` leaves the token empty, and
    /// dropping the returned future mid-flight releases the login slot.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), SessionError> {
        if self.login_in_flight.replace(true) {
            log::warn!("login for {username} rejected: another login is in flight");
            return Err(SessionError::LoginInProgress);
        }

        let _guard = InFlightLogin { store: self };
        self.set_status(false, true);
        let result = self.attempt_login(username, password).await;

        match &result {
            Ok(()) => log::info!("logged in as {username}"),
            Err(e) => {
                if !self.token().is_empty() {
                    self.set_token(String::new());
                }
                log::warn!("login for {username} failed [{}]: {e}", e.error_code());
            }
        }
        result
    }

    async fn attempt_login(&self, username: &str, password: &str) -> Result<(), SessionError> {
        let request = LoginRequest { username: username.to_owned(), password: password.to_owned() };
        let headers = fetch_headers(&self.token());
        let response = self.api.login(&request, &headers).await?;
        let token = token_from_login_response(&response)?;

        self.set_status(false, false);
        self.set_username(username.to_owned());
        self.set_token(token);

        let roles = match self.derive_roles().await {
            Ok(roles) => roles,
            Err(e) => {
                self.set_token(String::new());
                return Err(e);
            }
        };
        self.set_roles(roles);

        if !roles.any() {
            self.set_token(String::new());
            return Err(SessionError::access_denied(&self.config.contact_url));
        }

        self.persist_identity(username, roles);
        self.set_status(true, false);
        Ok(())
    }

    /// Work out the caller's roles from the projects they can access.
    ///
    /// A renewed token on the projects response replaces the current one,
    /// unless there is no current token to renew.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Api`] with the collaborator's error unchanged.
    pub async fn derive_roles(&self) -> Result<Roles, SessionError> {
        let headers = fetch_headers(&self.token());
        let response = self.api.fetch_projects(&headers).await?;

        if let Some(renewed) = response.renewed_token {
            let current = self.token();
            if !current.is_empty() && renewed != current {
                log::debug!("adopting renewed session token");
                self.set_token(renewed);
            }
        }

        let roles = Roles::from_projects(&response.projects);
        log::debug!("derived {roles:?} from {} projects", response.projects.len());
        Ok(roles)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Releases the login slot when a login finishes or its future is dropped.
struct InFlightLogin<'a, A> {
    store: &'a SessionStore<A>,
}

impl<A> Drop for InFlightLogin<'_, A> {
    fn drop(&mut self) {
        self.store.login_in_flight.set(false);
        if self.store.is_logging_in() {
            self.store.set_status(false, false);
        }
    }
}

fn hydrate(storage: &dyn KeyValueStorage, config: &SessionConfig) -> SessionState {
    let token = storage::load_string(storage, &config.keys.token).unwrap_or_default();
    let username = storage::load_string(storage, &config.keys.username).unwrap_or_default();
    let roles = storage::load_json::<Roles>(storage, &config.keys.roles).unwrap_or_default();
    SessionState { is_logged_in: !token.is_empty(), username, is_logging_in: false, token, roles }
}

/// Map a login response to the session token or the error shown to the user.
fn token_from_login_response(response: &LoginResponse) -> Result<String, SessionError> {
    match response.status {
        200 => response
            .authorization
            .as_deref()
            .and_then(token_from_header)
            .ok_or(SessionError::LoginFailed { status: 200 }),
        401 => Err(SessionError::InvalidCredentials),
        403 => {
            let body: ErrorBody =
                serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))?;
            Err(SessionError::Forbidden(body.message))
        }
        status => Err(SessionError::LoginFailed { status }),
    }
}
