// Persisted bearer-token slot.
//
// The token is process-wide mutable state: any call site may clear it
// (logout, a 401 from any endpoint) and every subsequent request must
// observe the cleared state immediately. Implementations must make
// `set`/`clear` visible to concurrent readers without a stale window.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use secrecy::SecretString;

/// The single persisted token slot.
///
/// `ApiClient` reads it before each request and clears it on 401;
/// the session coordinator writes it on login and clears it on logout.
pub trait TokenStore: Send + Sync {
    /// The current token, if any.
    fn get(&self) -> Option<SecretString>;

    /// Store a new token, replacing any previous one.
    fn set(&self, token: SecretString);

    /// Remove the token. Idempotent.
    fn clear(&self);
}

/// In-memory token slot backed by `ArcSwapOption`.
///
/// Lock-free reads on the request path; a `clear` from any thread is
/// observed by the very next `get`. Persistent implementations (e.g.
/// the OS keyring store in `scolara-config`) wrap one of these as the
/// in-process mirror.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: ArcSwapOption<SecretString>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<SecretString> {
        self.slot.load_full().map(|t| (*t).clone())
    }

    fn set(&self, token: SecretString) {
        self.slot.store(Some(Arc::new(token)));
    }

    fn clear(&self) {
        self.slot.store(None);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let store = MemoryTokenStore::new();
        assert!(store.get().is_none());

        store.set(SecretString::from("t1"));
        assert_eq!(store.get().unwrap().expose_secret(), "t1");
    }

    #[test]
    fn clear_is_observed_immediately() {
        let store = MemoryTokenStore::new();
        store.set(SecretString::from("t1"));
        store.clear();
        assert!(store.get().is_none());

        // Clearing an empty slot is fine.
        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn set_replaces_previous_token() {
        let store = MemoryTokenStore::new();
        store.set(SecretString::from("old"));
        store.set(SecretString::from("new"));
        assert_eq!(store.get().unwrap().expose_secret(), "new");
    }
}
