//! Auth collaborator client.
//!
//! The store's auth service is a GoTrue-style HTTP endpoint: signup and
//! password-grant sign-in return an access token plus the user record,
//! and logout revokes the token server-side. Sessions themselves persist
//! locally via [`crate::session::Session`].

use reqwest::Client;
use serde::Deserialize;

use crate::config::MoncalConfig;
use crate::error::{MoncalError, MoncalResult};
use crate::session::Session;

pub struct AuthClient {
    client: Client,
    auth_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct AuthUser {
    id: String,
    email: String,
}

/// Token-bearing response from signup / sign-in.
///
/// A signup on a deployment that requires email confirmation comes back
/// without an access token; that case is surfaced as `None` from
/// [`AuthClient::sign_up`], not as an error.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    user: Option<AuthUser>,
}

#[derive(Deserialize)]
struct AuthErrorBody {
    #[serde(alias = "error_description", alias = "msg", alias = "message")]
    error: Option<String>,
}

impl AuthClient {
    pub fn new(config: &MoncalConfig) -> Self {
        AuthClient {
            client: Client::new(),
            auth_url: config.auth_url(),
            api_key: config.anon_key.clone(),
        }
    }

    /// Sign in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> MoncalResult<Session> {
        let url = format!("{}/token?grant_type=password", self.auth_url);
        let response = self.post_credentials(&url, email, password).await?;

        session_from_response(response)
            .ok_or_else(|| MoncalError::Auth("Sign-in response carried no session".into()))
    }

    /// Create an account. Returns `None` when the deployment requires the
    /// user to confirm their email address before the first sign-in.
    pub async fn sign_up(&self, email: &str, password: &str) -> MoncalResult<Option<Session>> {
        let url = format!("{}/signup", self.auth_url);
        let response = self.post_credentials(&url, email, password).await?;

        Ok(session_from_response(response))
    }

    /// Revoke the session's token server-side. Best-effort: the local
    /// session file is what actually signs the user out.
    pub async fn sign_out(&self, session: &Session) -> MoncalResult<()> {
        let url = format!("{}/logout", self.auth_url);
        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(|e| MoncalError::Http(format!("Failed to sign out: {e}")))?;

        if !response.status().is_success() {
            return Err(MoncalError::Auth(format!(
                "Sign-out rejected: HTTP {}",
                response.status()
            )));
        }

        Ok(())
    }

    async fn post_credentials(
        &self,
        url: &str,
        email: &str,
        password: &str,
    ) -> MoncalResult<TokenResponse> {
        let response = self
            .client
            .post(url)
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| MoncalError::Http(format!("Auth request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<AuthErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(MoncalError::Auth(message));
        }

        response
            .json()
            .await
            .map_err(|e| MoncalError::Serialization(format!("Failed to parse auth response: {e}")))
    }
}

fn session_from_response(response: TokenResponse) -> Option<Session> {
    match (response.access_token, response.user) {
        (Some(token), Some(user)) => Some(Session::new(user.id, user.email, token)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_yields_a_session() {
        let response: TokenResponse = serde_json::from_str(
            r#"{"access_token":"tok","user":{"id":"u1","email":"ada@example.com"}}"#,
        )
        .unwrap();

        let session = session_from_response(response).unwrap();
        assert_eq!(session.user_id, "u1");
        assert_eq!(session.email, "ada@example.com");
        assert_eq!(session.access_token, "tok");
    }

    #[test]
    fn confirmation_pending_signup_yields_no_session() {
        let response: TokenResponse = serde_json::from_str(
            r#"{"user":{"id":"u1","email":"ada@example.com"}}"#,
        )
        .unwrap();

        assert!(session_from_response(response).is_none());
    }
}
