use std::path::PathBuf;

use keyring::Entry;
use log::warn;

const SERVICE: &str = "fraudlens_app";
const USER: &str = "fraudlens_session";
const FALLBACK_FILE: &str = "session_token.txt";

/// Persisted access-credential storage. The session manager is the only
/// writer; the trait seam exists so tests can substitute an in-memory store.
pub trait CredentialStore: Send + Sync {
    fn save(&self, token: &str) -> anyhow::Result<()>;
    fn load(&self) -> Option<String>;
    fn clear(&self) -> anyhow::Result<()>;
}

/// OS-keyring backed store with an explicit, env-gated file fallback for
/// environments without a keyring daemon (set KEYRING_FALLBACK=true).
pub struct KeyringStore {
    fallback_path: PathBuf,
}

impl KeyringStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            fallback_path: data_dir.into().join(FALLBACK_FILE),
        }
    }

    fn fallback_enabled() -> bool {
        std::env::var("KEYRING_FALLBACK").unwrap_or_default() == "true"
    }
}

impl CredentialStore for KeyringStore {
    fn save(&self, token: &str) -> anyhow::Result<()> {
        let entry = Entry::new(SERVICE, USER);
        match entry.set_password(token) {
            Ok(()) => Ok(()),
            Err(_e) => {
                if Self::fallback_enabled() {
                    if let Some(parent) = self.fallback_path.parent() {
                        let _ = std::fs::create_dir_all(parent);
                    }
                    std::fs::write(&self.fallback_path, token)?;
                    // warn in logs but do not print the token
                    warn!("keyring unavailable, persisted token to fallback file");
                    Ok(())
                } else {
                    // do not persist to disk silently; return error so caller can decide
                    Err(anyhow::anyhow!(
                        "keyring unavailable and file fallback disabled"
                    ))
                }
            }
        }
    }

    fn load(&self) -> Option<String> {
        let entry = Entry::new(SERVICE, USER);
        match entry.get_password() {
            Ok(t) => {
                if t.trim().is_empty() {
                    None
                } else {
                    Some(t)
                }
            }
            Err(_e) => {
                if Self::fallback_enabled() && self.fallback_path.exists() {
                    if let Ok(s) = std::fs::read_to_string(&self.fallback_path) {
                        let t = s.trim().to_string();
                        if !t.is_empty() {
                            return Some(t);
                        }
                    }
                }
                None
            }
        }
    }

    fn clear(&self) -> anyhow::Result<()> {
        let entry = Entry::new(SERVICE, USER);
        let _ = entry.delete_password();
        if Self::fallback_enabled() && self.fallback_path.exists() {
            let _ = std::fs::remove_file(&self.fallback_path);
        }
        Ok(())
    }
}
