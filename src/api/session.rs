use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use uuid::Uuid;

/// Bearer tokens issued at login, held in memory for the server's lifetime.
/// Each update is a single map call, so a poisoned lock is recovered, not fatal.
#[derive(Debug, Default)]
pub struct SessionStore {
    tokens: RwLock<HashMap<Uuid, Uuid>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh token for `user`.
    pub fn issue(&self, user: Uuid) -> String {
        let token = Uuid::new_v4();
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token, user);
        token.simple().to_string()
    }

    pub fn resolve(&self, token: &str) -> Option<Uuid> {
        let token = Uuid::parse_str(token).ok()?;
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&token)
            .copied()
    }

    /// Returns true when the token existed.
    pub fn revoke(&self, token: &str) -> bool {
        let Ok(token) = Uuid::parse_str(token) else {
            return false;
        };
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&token)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;

    #[test]
    fn issued_tokens_resolve_until_revoked() {
        let sessions = SessionStore::new();
        let user = Uuid::new_v4();
        let token = sessions.issue(user);
        assert_eq!(sessions.resolve(&token), Some(user));
        assert!(sessions.revoke(&token));
        assert_eq!(sessions.resolve(&token), None);
        assert!(!sessions.revoke(&token));
        assert_eq!(sessions.resolve("garbage"), None);
    }

    #[test]
    fn tokens_issued_after_a_panicking_writer_still_resolve() {
        let sessions = Arc::new(SessionStore::new());
        let poisoner = Arc::clone(&sessions);
        let result = thread::spawn(move || {
            let _guard = poisoner.tokens.write().unwrap();
            panic!("writer panicked");
        })
        .join();
        assert!(result.is_err());
        assert!(sessions.tokens.is_poisoned());

        let user = Uuid::new_v4();
        let token = sessions.issue(user);
        assert_eq!(sessions.resolve(&token), Some(user));
        assert!(sessions.revoke(&token));
    }
}
