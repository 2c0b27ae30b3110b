// ── Keyring-backed token slot ──
//
// The persisted half of the session token. The OS keyring survives
// restarts; an in-memory mirror guarantees that a clear issued by any
// call site (logout, 401) is observed by the next in-process read even
// if the keyring backend is slow or flaky.

use keyring::Entry;
use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use scolara_api::{MemoryTokenStore, TokenStore};

const SERVICE: &str = "scolara";
const ACCOUNT: &str = "api-token";

/// OS-keyring-backed implementation of [`TokenStore`].
pub struct KeyringTokenStore {
    entry: Entry,
    mirror: MemoryTokenStore,
}

impl KeyringTokenStore {
    /// Open the default slot (`scolara` / `api-token`).
    pub fn open_default() -> Result<Self, keyring::Error> {
        Self::open(SERVICE, ACCOUNT)
    }

    /// Open a specific service/account pair (one slot per environment).
    pub fn open(service: &str, account: &str) -> Result<Self, keyring::Error> {
        let entry = Entry::new(service, account)?;
        let mirror = MemoryTokenStore::new();

        // Seed the mirror from the keyring so a token persisted by a
        // previous run is visible before the first `set`.
        match entry.get_password() {
            Ok(token) => mirror.set(SecretString::from(token)),
            Err(keyring::Error::NoEntry) => {}
            Err(e) => warn!(error = %e, "could not read persisted token"),
        }

        Ok(Self { entry, mirror })
    }
}

impl TokenStore for KeyringTokenStore {
    fn get(&self) -> Option<SecretString> {
        self.mirror.get()
    }

    fn set(&self, token: SecretString) {
        // The mirror is the source of truth for this process; keyring
        // persistence failing only costs a re-login next run.
        if let Err(e) = self.entry.set_password(token.expose_secret()) {
            warn!(error = %e, "could not persist token to keyring");
        }
        self.mirror.set(token);
    }

    fn clear(&self) {
        match self.entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => {}
            Err(e) => warn!(error = %e, "could not remove token from keyring"),
        }
        self.mirror.clear();
    }
}
