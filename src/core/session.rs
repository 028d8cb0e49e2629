//! # Session
//!
//! Login state and the bearer token.
//!
//! ```text
//! Anonymous ──begin_login()──▶ Authenticating ──establish()──▶ Authenticated
//!     ▲                              │
//!     └────────────fail()────────────┘
//! ```
//!
//! Retries are unlimited. Username and token are only ever set together.

use crate::api::Credentials;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthPhase {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    username: String,
    token: String,
    phase: AuthPhase,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }

    /// Anonymous → Authenticating. Returns false (and changes nothing) from any other phase.
    pub fn begin_login(&mut self) -> bool {
        if self.phase != AuthPhase::Anonymous {
            return false;
        }
        self.phase = AuthPhase::Authenticating;
        true
    }

    /// Authenticating → Authenticated, setting username and token together.
    /// Returns false and leaves the session untouched from any other phase.
    pub fn establish(&mut self, username: String, token: String) -> bool {
        if self.phase != AuthPhase::Authenticating {
            return false;
        }
        self.username = username;
        self.token = token;
        self.phase = AuthPhase::Authenticated;
        true
    }

    /// Authenticating → Anonymous.
    pub fn fail(&mut self) -> bool {
        if self.phase != AuthPhase::Authenticating {
            return false;
        }
        self.phase = AuthPhase::Anonymous;
        true
    }

    /// Owned snapshot for a command. `None` unless authenticated.
    pub fn credentials(&self) -> Option<Credentials> {
        self.is_authenticated().then(|| Credentials {
            username: self.username.clone(),
            token: self.token.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_anonymous() {
        let session = Session::new();
        assert_eq!(session.phase(), AuthPhase::Anonymous);
        assert!(session.credentials().is_none());
    }

    #[test]
    fn test_full_login_sets_both_fields() {
        let mut session = Session::new();
        assert!(session.begin_login());
        assert!(session.credentials().is_none());
        assert!(session.establish("alice".to_string(), "tok".to_string()));

        let creds = session.credentials().unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.token, "tok");
    }

    #[test]
    fn test_establish_requires_authenticating() {
        let mut session = Session::new();
        assert!(!session.establish("mallory".to_string(), "x".to_string()));
        assert_eq!(session, Session::new());
    }

    #[test]
    fn test_redelivered_success_is_ignored() {
        let mut session = Session::new();
        session.begin_login();
        session.establish("alice".to_string(), "first".to_string());

        assert!(!session.establish("bob".to_string(), "second".to_string()));
        assert_eq!(session.username(), "alice");
        assert_eq!(session.credentials().unwrap().token, "first");
    }

    #[test]
    fn test_failure_allows_retry() {
        let mut session = Session::new();
        session.begin_login();
        assert!(session.fail());
        assert_eq!(session.phase(), AuthPhase::Anonymous);
        assert!(session.begin_login());
    }

    #[test]
    fn test_begin_login_refused_while_pending() {
        let mut session = Session::new();
        session.begin_login();
        assert!(!session.begin_login());
        assert!(!Session::new().fail());
    }
}
