//! Admin session tokens and the capability used to hand them to API calls.
//!
//! Nothing in this crate reads a token from ambient process state. Every call
//! that needs authentication receives a [`SessionProvider`] explicitly, which
//! keeps tests free to inject a fake token.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bearer token issued by the wiki backend after an admin logs in.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Source of the current admin session token.
pub trait SessionProvider {
    /// The token to authenticate with, or `None` if nobody is logged in.
    fn session_token(&self) -> Option<SessionToken>;
}

/// A fixed token, e.g. from the command line or a test.
#[derive(Debug, Clone, Default)]
pub struct StaticSession(Option<SessionToken>);

impl StaticSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(SessionToken::new(token)))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl SessionProvider for StaticSession {
    fn session_token(&self) -> Option<SessionToken> {
        self.0.clone().filter(|t| !t.is_empty())
    }
}

impl<P: SessionProvider + ?Sized> SessionProvider for &P {
    fn session_token(&self) -> Option<SessionToken> {
        (**self).session_token()
    }
}

impl<P: SessionProvider + ?Sized> SessionProvider for std::sync::Arc<P> {
    fn session_token(&self) -> Option<SessionToken> {
        (**self).session_token()
    }
}
