use std::sync::{Arc, RwLock};

use crate::session::IdentitySession;

/// Ordered list of identities plus the pointer to the currently active one.
///
/// Exactly one identity is active at any time; it is the one that answers
/// plain unprefixed commands. The pointer is read by every identity's
/// listener on every inbound message, and mutated only through
/// [`Switchboard::advance`] and [`Switchboard::select_by_name`]. Sections
/// holding the lock never await.
pub struct Switchboard {
    sessions: Vec<Arc<IdentitySession>>,
    active: RwLock<usize>,
}

impl Switchboard {
    /// Build a switchboard with the first session active.
    ///
    /// # Panics
    /// Panics when `sessions` is empty; a bot without identities cannot run.
    #[must_use]
    pub fn new(sessions: Vec<Arc<IdentitySession>>) -> Self {
        assert!(!sessions.is_empty(), "switchboard needs at least one identity");
        Self {
            sessions,
            active: RwLock::new(0),
        }
    }

    /// The currently active session.
    #[must_use]
    pub fn active(&self) -> Arc<IdentitySession> {
        let idx = *self.active.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&self.sessions[idx])
    }

    /// Whether the named identity is the active one.
    #[must_use]
    pub fn is_active(&self, name: &str) -> bool {
        self.active().name == name
    }

    /// Advance to the next identity, wrapping at the end of the list, and
    /// return the new active session.
    pub fn advance(&self) -> Arc<IdentitySession> {
        let mut idx = self.active.write().unwrap_or_else(|e| e.into_inner());
        *idx = (*idx + 1) % self.sessions.len();
        Arc::clone(&self.sessions[*idx])
    }

    /// Make the named identity active.
    ///
    /// Returns `None` (and leaves the active pointer untouched) when no
    /// identity carries that name; a miss is normal control flow.
    pub fn select_by_name(&self, name: &str) -> Option<Arc<IdentitySession>> {
        let pos = self.sessions.iter().position(|s| s.name == name)?;
        let mut idx = self.active.write().unwrap_or_else(|e| e.into_inner());
        *idx = pos;
        Some(Arc::clone(&self.sessions[pos]))
    }

    /// Look up a session by identity name without touching the pointer.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<IdentitySession>> {
        self.sessions.iter().find(|s| s.name == name).map(Arc::clone)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use {
        async_trait::async_trait,
        moneta_api::{BlockedTerm, PlatformApi, StreamInfo},
        moneta_chat::ChatTransport,
        moneta_templates::TemplateSet,
    };

    use super::*;

    struct NullTransport;

    #[async_trait]
    impl ChatTransport for NullTransport {
        async fn send_message(&self, _channel: &str, _text: &str) -> moneta_chat::Result<()> {
            Ok(())
        }
    }

    struct NullApi;

    #[async_trait]
    impl PlatformApi for NullApi {
        async fn fetch_current_stream(
            &self,
            _login: &str,
        ) -> moneta_api::Result<Option<StreamInfo>> {
            Ok(None)
        }

        async fn fetch_user_id(&self, login: &str) -> moneta_api::Result<String> {
            Ok(login.to_string())
        }

        async fn add_blocked_term(
            &self,
            _text: &str,
            _channel_id: &str,
            _moderator_id: &str,
        ) -> moneta_api::Result<()> {
            Ok(())
        }

        async fn list_blocked_terms(
            &self,
            _channel_id: &str,
            _moderator_id: &str,
        ) -> moneta_api::Result<Vec<BlockedTerm>> {
            Ok(Vec::new())
        }

        async fn remove_blocked_term(
            &self,
            _id: &str,
            _channel_id: &str,
            _moderator_id: &str,
        ) -> moneta_api::Result<()> {
            Ok(())
        }
    }

    fn session(name: &str) -> Arc<IdentitySession> {
        Arc::new(IdentitySession::new(
            name,
            Arc::new(NullTransport),
            Arc::new(NullApi),
            TemplateSet::default(),
        ))
    }

    fn board(names: &[&str]) -> Switchboard {
        Switchboard::new(names.iter().map(|n| session(n)).collect())
    }

    #[test]
    fn first_session_starts_active() {
        let b = board(&["a", "b", "c"]);
        assert_eq!(b.active().name, "a");
        assert!(b.is_active("a"));
        assert!(!b.is_active("b"));
    }

    #[test]
    fn advance_wraps_back_to_start() {
        let b = board(&["a", "b", "c"]);
        assert_eq!(b.advance().name, "b");
        assert_eq!(b.advance().name, "c");
        assert_eq!(b.advance().name, "a");
    }

    #[test]
    fn n_advances_return_to_original() {
        let b = board(&["a", "b", "c"]);
        for _ in 0..b.len() {
            b.advance();
        }
        assert_eq!(b.active().name, "a");
    }

    #[test]
    fn single_identity_advance_is_stable() {
        let b = board(&["only"]);
        assert_eq!(b.advance().name, "only");
        assert_eq!(b.active().name, "only");
    }

    #[test]
    fn select_by_name_moves_the_pointer() {
        let b = board(&["a", "b", "c"]);
        assert_eq!(b.select_by_name("c").map(|s| s.name.clone()), Some("c".into()));
        assert!(b.is_active("c"));
        // advance continues from the selected position
        assert_eq!(b.advance().name, "a");
    }

    #[test]
    fn unknown_name_leaves_active_unchanged() {
        let b = board(&["a", "b"]);
        b.advance();
        assert!(b.select_by_name("nobody").is_none());
        assert_eq!(b.active().name, "b");
    }

    #[test]
    fn get_does_not_move_the_pointer() {
        let b = board(&["a", "b"]);
        assert!(b.get("b").is_some());
        assert!(b.is_active("a"));
        assert!(b.get("nobody").is_none());
    }
}
