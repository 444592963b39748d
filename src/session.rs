/// Session context
///
/// A process-wide, in-memory cache of the currently authenticated user,
/// shared between the identity service (which writes it on login, profile
/// update, and logout) and presentation collaborators (which read it).
/// It mirrors the `current_user` bucket in the durable store but avoids a
/// store round-trip on every read.
///
/// Cheaply cloneable; all clones share the same state.
use std::sync::{Arc, PoisonError, RwLock};

use uuid::Uuid;

use crate::models::user::User;

/// Shared cache of the current user
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    current: Arc<RwLock<Option<User>>>,
}

impl SessionContext {
    /// Creates an empty (unauthenticated) context
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cached user
    pub fn set(&self, user: User) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    /// Clears the cached user
    pub fn clear(&self) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// A copy of the cached user, if any
    pub fn user(&self) -> Option<User> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Id of the cached user, if any
    pub fn user_id(&self) -> Option<Uuid> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|u| u.id)
    }

    /// Whether a user is currently cached
    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            "Test".to_string(),
            "test@example.com".to_string(),
            "hash".to_string(),
        )
    }

    #[test]
    fn test_starts_unauthenticated() {
        let session = SessionContext::new();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(session.user_id().is_none());
    }

    #[test]
    fn test_set_then_clear() {
        let session = SessionContext::new();
        let user = sample_user();

        session.set(user.clone());
        assert!(session.is_authenticated());
        assert_eq!(session.user_id(), Some(user.id));

        session.clear();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_clones_share_state() {
        let session = SessionContext::new();
        let other = session.clone();

        session.set(sample_user());
        assert!(other.is_authenticated());
    }
}
