//! Explicit authentication state for API clients.
//!
//! A [`SessionContext`] starts empty, is populated by [`SessionContext::sign_in`]
//! and is cleared by [`SessionContext::sign_out`] or when a token refresh fails.
//! [`SessionStore`] keeps it on disk between runs.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::{FullName, UserEmail, UserId, UserRole};
use crate::domain::user::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub email: UserEmail,
    pub full_name: FullName,
    pub role: UserRole,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    user: Option<SessionUser>,
    access_token: Option<String>,
    refresh_token: Option<String>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(
        &mut self,
        user: SessionUser,
        access_token: impl Into<String>,
        refresh_token: Option<String>,
    ) {
        self.user = Some(user);
        self.access_token = Some(access_token.into());
        self.refresh_token = refresh_token;
    }

    /// Replaces the cached profile; ignored when nobody is signed in.
    pub fn update_profile(&mut self, user: SessionUser) -> bool {
        match &mut self.user {
            Some(current) if current.id == user.id => {
                *current = user;
                true
            }
            _ => false,
        }
    }

    /// Stores tokens obtained from a successful refresh.
    pub fn refreshed(&mut self, access_token: impl Into<String>, refresh_token: Option<String>) {
        if self.user.is_some() {
            self.access_token = Some(access_token.into());
            if refresh_token.is_some() {
                self.refresh_token = refresh_token;
            }
        }
    }

    pub fn sign_out(&mut self) {
        *self = Self::default();
    }

    pub fn refresh_failed(&mut self) {
        log::warn!("Token refresh failed; clearing session");
        self.sign_out();
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.access_token.is_some()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.user.as_ref().is_some_and(|user| user.role == role)
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// JSON file holding a persisted [`SessionContext`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Rehydrates the session; a missing file yields an empty one.
    pub fn load(&self) -> Result<SessionContext, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(SessionContext::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes the session, or removes the file once signed out.
    pub fn save(&self, session: &SessionContext) -> Result<(), SessionError> {
        if !session.is_authenticated() {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> SessionUser {
        SessionUser {
            id: UserId::new(11).unwrap(),
            email: UserEmail::new("driver@example.com").unwrap(),
            full_name: FullName::new("Omar Haddad").unwrap(),
            role: UserRole::Driver,
        }
    }

    #[test]
    fn starts_empty() {
        let session = SessionContext::new();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(!session.has_role(UserRole::Driver));
    }

    #[test]
    fn sign_in_then_sign_out() {
        let mut session = SessionContext::new();
        session.sign_in(driver(), "access", Some("refresh".to_string()));

        assert!(session.is_authenticated());
        assert!(session.has_role(UserRole::Driver));
        assert_eq!(session.access_token(), Some("access"));

        session.sign_out();
        assert_eq!(session, SessionContext::new());
    }

    #[test]
    fn refresh_keeps_user_until_it_fails() {
        let mut session = SessionContext::new();
        session.sign_in(driver(), "a1", Some("r1".to_string()));

        session.refreshed("a2", None);
        assert_eq!(session.access_token(), Some("a2"));
        assert_eq!(session.refresh_token(), Some("r1"));

        session.refresh_failed();
        assert!(!session.is_authenticated());
        assert!(session.refresh_token().is_none());
    }

    #[test]
    fn profile_update_requires_same_user() {
        let mut session = SessionContext::new();
        assert!(!session.update_profile(driver()));

        session.sign_in(driver(), "a", None);
        let promoted = SessionUser {
            role: UserRole::Admin,
            ..driver()
        };
        assert!(session.update_profile(promoted));
        assert!(session.has_role(UserRole::Admin));
    }

    #[test]
    fn store_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        assert_eq!(store.load().unwrap(), SessionContext::new());

        let mut session = SessionContext::new();
        session.sign_in(driver(), "token", None);
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), session);

        session.sign_out();
        store.save(&session).unwrap();
        assert!(!dir.path().join("session.json").exists());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{oops").unwrap();

        assert!(matches!(
            SessionStore::new(&path).load(),
            Err(SessionError::Corrupt(_))
        ));
    }
}
