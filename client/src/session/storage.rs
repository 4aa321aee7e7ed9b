//! On-disk credential store.
//!
//! One JSON document per installation:
//!
//! ```json
//! { "version": 1, "deviceId": "…", "session": { "accessToken": "…", "expiresAtEpochMs": 0 } }
//! ```

use std::fs::{self, OpenOptions};
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use super::{CredentialStore, Session, StoreError};

/// Default file name under the platform config directory.
pub const CREDENTIALS_FILE: &str = "credentials.json";

const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCredentials {
    version: u32,
    device_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    session: Option<Session>,
}

/// File-backed [`CredentialStore`], written with owner-only permissions on
/// Unix.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    state: Mutex<StoredCredentials>,
}

impl FileCredentialStore {
    /// Opens `path`, creating it with a fresh device identifier if missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let state = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            let state = StoredCredentials {
                version: SCHEMA_VERSION,
                device_id: Uuid::new_v4().to_string(),
                session: None,
            };
            write_secure(&path, &state)?;
            state
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    /// `<config dir>/cvs/credentials.json`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cvs").join(CREDENTIALS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update(&self, session: Option<Session>) -> Result<(), StoreError> {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.session = session;
        write_secure(&self.path, &state)
    }
}

impl CredentialStore for FileCredentialStore {
    fn session(&self) -> Option<Session> {
        self.state.lock().ok().and_then(|state| state.session.clone())
    }

    fn device_id(&self) -> String {
        match self.state.lock() {
            Ok(state) => state.device_id.clone(),
            Err(poisoned) => poisoned.into_inner().device_id.clone(),
        }
    }

    fn save_session(&self, session: Session) -> Result<(), StoreError> {
        self.update(Some(session))
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.update(None)
    }
}

fn write_secure(path: &Path, state: &StoredCredentials) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;

    #[cfg(not(unix))]
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    let json = serde_json::to_string_pretty(state)?;
    file.write_all(json.as_bytes()).inspect_err(|err| {
        warn!(path = %path.display(), "failed to persist credentials: {err}");
    })?;

    // `mode` only applies on creation; tighten files that already existed.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}
