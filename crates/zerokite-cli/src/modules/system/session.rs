use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;
use zerokite_core::Session;

use crate::errors::CliError;

/// Persistence for the session produced by login. Injected wherever a
/// command needs it rather than read as ambient state.
pub(crate) trait SessionStore {
    fn load(&self) -> Result<Option<Session>, CliError>;
    fn save(&self, session: &Session) -> Result<(), CliError>;
    fn clear(&self) -> Result<(), CliError>;
    fn location(&self) -> &Path;
}

pub(crate) struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.zerokite/session.json`.
    pub(crate) fn from_home() -> Result<Self, CliError> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| CliError::session("~/.zerokite/session.json", "HOME is not set"))?;
        Ok(Self::new(
            Path::new(&home).join(".zerokite").join("session.json"),
        ))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, CliError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents =
            fs::read_to_string(&self.path).map_err(|err| CliError::session(&self.path, err))?;
        let session =
            serde_json::from_str(&contents).map_err(|err| CliError::session(&self.path, err))?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> Result<(), CliError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| CliError::session(parent, err))?;
        }
        let contents =
            serde_json::to_string_pretty(session).map_err(|err| CliError::session(&self.path, err))?;
        write_private(&self.path, contents.as_bytes())
            .map_err(|err| CliError::session(&self.path, err))?;
        debug!(path = %self.path.display(), "saved session");
        Ok(())
    }

    fn clear(&self) -> Result<(), CliError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "removed session");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(CliError::session(&self.path, err)),
        }
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn session() -> Session {
        Session {
            api_key: "key".to_string(),
            access_token: "abc".to_string(),
            public_token: None,
            refresh_token: None,
            user_id: Some("U1".to_string()),
            login_time: Utc::now(),
        }
    }

    #[test]
    fn save_load_clear() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));
        assert_eq!(store.load().expect("load"), None);

        let session = session();
        store.save(&session).expect("save");
        assert_eq!(store.load().expect("load"), Some(session));

        store.clear().expect("clear");
        assert_eq!(store.load().expect("load"), None);
        store.clear().expect("clear twice");
    }

    #[cfg(unix)]
    #[test]
    fn saved_session_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.save(&session()).expect("save");
        let mode = fs::metadata(store.location())
            .expect("metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o077, 0);
    }

    #[test]
    fn corrupt_file_is_a_session_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").expect("write");
        let err = FileSessionStore::new(&path).load().expect_err("corrupt");
        assert_eq!(err.kind(), "SessionError");
    }
}
