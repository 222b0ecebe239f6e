//! Authentication session shared between the client and its consumers.
//!
//! Holds the access token, the cached avatar URL and the tri-state login
//! flag. Consumers observe changes through a `tokio::sync::watch` channel;
//! `RegistryClient::follow` uses it to rebind itself on token changes.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use jsr_core::types::User;

/// Immutable snapshot of the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Empty when unauthenticated
    pub access_token: String,
    pub avatar_url: Option<String>,
    /// `None` while a login is in flight or before the token was checked
    pub logged_in: Option<bool>,
}

impl SessionState {
    pub fn has_token(&self) -> bool {
        !self.access_token.is_empty()
    }
}

/// Injected session object; cloning shares the same underlying state
#[derive(Debug, Clone)]
pub struct Session {
    sender: Arc<watch::Sender<SessionState>>,
}

impl Session {
    /// Start a session with `token`; validity is unknown until checked
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        let logged_in = if token.is_empty() { Some(false) } else { None };
        let (sender, _) = watch::channel(SessionState {
            access_token: token,
            avatar_url: None,
            logged_in,
        });
        Self { sender: Arc::new(sender) }
    }

    pub fn anonymous() -> Self {
        Self::new("")
    }

    pub fn snapshot(&self) -> SessionState {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.sender.subscribe()
    }

    /// Store a new token and mark the login as pending
    pub fn begin_login(&self, token: &str) {
        self.update(|state| {
            state.access_token = token.to_string();
            state.logged_in = None;
        });
    }

    /// The registry accepted the token
    pub fn complete_login(&self, user: &User) {
        self.update(|state| {
            state.avatar_url = Some(user.avatar_url.clone());
            state.logged_in = Some(true);
        });
    }

    /// The registry rejected the token or could not be reached
    pub fn fail_login(&self) {
        self.update(|state| state.logged_in = Some(false));
    }

    pub fn logout(&self) {
        self.update(|state| {
            state.access_token.clear();
            state.avatar_url = None;
            state.logged_in = Some(false);
        });
    }

    fn update(&self, mutate: impl FnOnce(&mut SessionState)) {
        let changed = self.sender.send_if_modified(|state| {
            let before = state.clone();
            mutate(state);
            *state != before
        });
        if changed {
            debug!("Session state changed");
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}
