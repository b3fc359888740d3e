//! Profile collaborator client.
//!
//! The `user_profiles` table holds display-only settings: a name to greet
//! the user with and the color their events render in. Nothing here is
//! part of the event data model — a missing or broken profile degrades to
//! defaults and the calendar works unchanged.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::MoncalConfig;
use crate::error::{MoncalError, MoncalResult};
use crate::session::Session;
use crate::store::remote_status_error;

/// Default display color (hex), used whenever no profile color is usable.
pub const DEFAULT_COLOR: &str = "#3B82F6";

/// Display settings for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub color: String,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            first_name: "User".to_string(),
            username: None,
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

impl Profile {
    /// The profile color as RGB, falling back to the default when the
    /// stored string is not a `#RRGGBB` value.
    pub fn rgb(&self) -> (u8, u8, u8) {
        parse_hex_color(&self.color)
            .or_else(|| parse_hex_color(DEFAULT_COLOR))
            .unwrap()
    }
}

/// Parse a `#RRGGBB` hex color.
pub fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Row shape for the `user_profiles` table.
#[derive(Serialize, Deserialize)]
struct ProfileRow {
    user_id: String,
    first_name: String,
    #[serde(default)]
    username: Option<String>,
    color: String,
}

pub struct ProfileClient {
    client: Client,
    rest_url: String,
    api_key: String,
    access_token: String,
}

impl ProfileClient {
    pub fn new(config: &MoncalConfig, session: &Session) -> Self {
        ProfileClient {
            client: Client::new(),
            rest_url: config.rest_url(),
            api_key: config.anon_key.clone(),
            access_token: session.access_token.clone(),
        }
    }

    fn profiles_url(&self) -> String {
        format!("{}/user_profiles", self.rest_url)
    }

    /// Fetch the user's profile. `None` when the row is missing or the
    /// call fails — callers fall back to [`Profile::default`].
    pub async fn fetch_profile(&self, user_id: &str) -> Option<Profile> {
        match self.try_fetch(user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!("fetching profile degraded to default: {e}");
                None
            }
        }
    }

    /// Create or update the user's profile row. `false` on failure.
    pub async fn upsert_profile(&self, user_id: &str, profile: &Profile) -> bool {
        match self.try_upsert(user_id, profile).await {
            Ok(()) => true,
            Err(e) => {
                warn!("saving profile failed: {e}");
                false
            }
        }
    }

    async fn try_fetch(&self, user_id: &str) -> MoncalResult<Option<Profile>> {
        let user_filter = format!("eq.{user_id}");
        let response = self
            .client
            .get(self.profiles_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
            .query(&[("select", "*"), ("user_id", user_filter.as_str())])
            .send()
            .await
            .map_err(|e| MoncalError::Http(format!("Failed to fetch profile: {e}")))?;

        if !response.status().is_success() {
            return Err(remote_status_error("fetch profile", response).await);
        }

        let mut rows: Vec<ProfileRow> = response
            .json()
            .await
            .map_err(|e| MoncalError::Serialization(format!("Failed to parse profile row: {e}")))?;

        Ok(rows.pop().map(|row| Profile {
            first_name: row.first_name,
            username: row.username,
            color: row.color,
        }))
    }

    async fn try_upsert(&self, user_id: &str, profile: &Profile) -> MoncalResult<()> {
        let row = ProfileRow {
            user_id: user_id.to_string(),
            first_name: profile.first_name.clone(),
            username: profile.username.clone(),
            color: profile.color.clone(),
        };

        let response = self
            .client
            .post(self.profiles_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
            .header("Prefer", "resolution=merge-duplicates")
            .json(&row)
            .send()
            .await
            .map_err(|e| MoncalError::Http(format!("Failed to save profile: {e}")))?;

        if !response.status().is_success() {
            return Err(remote_status_error("save profile", response).await);
        }

        Ok(())
    }
}
