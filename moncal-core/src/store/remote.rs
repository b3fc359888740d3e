//! HTTP client for the hosted events table.
//!
//! Speaks the store's PostgREST-style query interface: column filters as
//! `?col=eq.value`, ordering as `?order=col.asc`, and
//! `Prefer: return=representation` to get inserted rows (with their
//! server-assigned ids) back in the response body.

use reqwest::Client;
use serde::Serialize;
use tracing::warn;

use super::EventStore;
use crate::config::MoncalConfig;
use crate::error::{MoncalError, MoncalResult};
use crate::event::{Event, NewEvent};
use crate::session::Session;

pub struct RemoteStore {
    client: Client,
    rest_url: String,
    api_key: String,
    access_token: String,
}

/// Insert body for the `events` table. The id column is omitted so the
/// server assigns it.
#[derive(Serialize)]
struct InsertEventRow<'a> {
    user_id: &'a str,
    name: &'a str,
    time: &'a str,
    datetime: &'a str,
}

impl RemoteStore {
    pub fn new(config: &MoncalConfig, session: &Session) -> Self {
        RemoteStore {
            client: Client::new(),
            rest_url: config.rest_url(),
            api_key: config.anon_key.clone(),
            access_token: session.access_token.clone(),
        }
    }

    fn events_url(&self) -> String {
        format!("{}/events", self.rest_url)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
    }

    async fn try_fetch(&self, user_id: &str) -> MoncalResult<Vec<Event>> {
        let user_filter = format!("eq.{user_id}");
        let response = self
            .authed(self.client.get(self.events_url()))
            .query(&[
                ("select", "*"),
                ("user_id", user_filter.as_str()),
                ("order", "datetime.asc"),
            ])
            .send()
            .await
            .map_err(|e| MoncalError::Http(format!("Failed to fetch events: {e}")))?;

        if !response.status().is_success() {
            return Err(status_error("fetch events", response).await);
        }

        response
            .json::<Vec<Event>>()
            .await
            .map_err(|e| MoncalError::Serialization(format!("Failed to parse event rows: {e}")))
    }

    async fn try_insert(&self, user_id: &str, event: &NewEvent) -> MoncalResult<Event> {
        let row = InsertEventRow {
            user_id,
            name: &event.name,
            time: &event.time,
            datetime: &event.datetime,
        };

        let response = self
            .authed(self.client.post(self.events_url()))
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(|e| MoncalError::Http(format!("Failed to insert event: {e}")))?;

        if !response.status().is_success() {
            return Err(status_error("insert event", response).await);
        }

        // The store returns the inserted rows as an array.
        let mut rows: Vec<Event> = response
            .json()
            .await
            .map_err(|e| MoncalError::Serialization(format!("Failed to parse inserted row: {e}")))?;

        rows.pop()
            .ok_or_else(|| MoncalError::Persistence("Insert returned no row".into()))
    }

    async fn try_delete(&self, event_id: &str) -> MoncalResult<()> {
        let id_filter = format!("eq.{event_id}");
        let response = self
            .authed(self.client.delete(self.events_url()))
            .query(&[("id", id_filter.as_str())])
            .send()
            .await
            .map_err(|e| MoncalError::Http(format!("Failed to delete event: {e}")))?;

        if !response.status().is_success() {
            return Err(status_error("delete event", response).await);
        }

        Ok(())
    }
}

impl EventStore for RemoteStore {
    async fn fetch_events(&self, user_id: &str) -> Vec<Event> {
        match self.try_fetch(user_id).await {
            Ok(events) => events,
            Err(e) => {
                warn!("fetching events degraded to empty list: {e}");
                Vec::new()
            }
        }
    }

    async fn insert_event(&self, user_id: &str, event: &NewEvent) -> Option<Event> {
        match self.try_insert(user_id, event).await {
            Ok(created) => Some(created),
            Err(e) => {
                warn!("inserting event failed: {e}");
                None
            }
        }
    }

    async fn delete_event(&self, event_id: &str) -> bool {
        match self.try_delete(event_id).await {
            Ok(()) => true,
            Err(e) => {
                warn!("deleting event failed: {e}");
                false
            }
        }
    }
}

/// Build a persistence error from a non-success response, keeping the
/// store's own message when it sent one.
pub(crate) async fn status_error(operation: &str, response: reqwest::Response) -> MoncalError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response".to_string());

    MoncalError::Persistence(format!("Failed to {operation}: HTTP {status} - {body}"))
}
