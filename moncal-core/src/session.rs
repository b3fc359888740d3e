//! Persisted login session.
//!
//! Stores the authenticated user and access token at:
//!   ~/.config/moncal/session.toml

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{MoncalError, MoncalResult};

/// An authenticated user session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
}

impl Session {
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Session {
            user_id: user_id.into(),
            email: email.into(),
            access_token: access_token.into(),
        }
    }

    fn path() -> MoncalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| MoncalError::Config("Could not determine config directory".into()))?
            .join("moncal");

        Ok(config_dir.join("session.toml"))
    }

    pub fn exists() -> bool {
        Self::path().map(|p| p.exists()).unwrap_or(false)
    }

    /// Load the persisted session, or fail with a sign-in hint.
    pub fn load() -> MoncalResult<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Err(MoncalError::Auth(
                "Not signed in. Run `moncal login` first.".into(),
            ));
        }

        let contents = std::fs::read_to_string(&path)?;
        let session: Session = toml::from_str(&contents).map_err(|e| {
            MoncalError::Serialization(format!(
                "Could not parse session file {}: {e}",
                path.display()
            ))
        })?;

        Ok(session)
    }

    pub fn save(&self) -> MoncalResult<()> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| MoncalError::Serialization(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Owner-only since the file contains the access token.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Remove the persisted session. Removing a session that does not exist
    /// is fine — the end state is the same.
    pub fn clear() -> MoncalResult<()> {
        let path = Self::path()?;

        if path.exists() {
            std::fs::remove_file(&path)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_round_trips_through_toml() {
        let session = Session::new("user-1", "ada@example.com", "token-abc");

        let serialized = toml::to_string_pretty(&session).unwrap();
        let restored: Session = toml::from_str(&serialized).unwrap();

        assert_eq!(restored.user_id, "user-1");
        assert_eq!(restored.email, "ada@example.com");
        assert_eq!(restored.access_token, "token-abc");
    }
}
