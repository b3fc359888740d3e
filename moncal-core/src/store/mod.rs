//! Remote event storage.
//!
//! The `events` table lives in a hosted relational store reached over its
//! REST interface. These three operations are the only points of contact
//! with persistent storage — there is no caching layer, every call hits
//! the store directly.

mod remote;

pub use remote::RemoteStore;
pub(crate) use remote::status_error as remote_status_error;

use crate::event::{Event, NewEvent};

/// Contract for the `events` table.
///
/// Implementations degrade rather than raise, so callers can keep showing
/// whatever state they already had: a broken fetch is an empty list, a
/// failed insert is `None`, a failed delete is `false`. The mutation
/// controller translates the degraded returns into errors without losing
/// prior state.
#[allow(async_fn_in_trait)]
pub trait EventStore {
    /// All events for one user, ordered by `datetime` ascending.
    ///
    /// Returns an empty list — never a failure — on any remote error,
    /// logging the error for diagnostics.
    async fn fetch_events(&self, user_id: &str) -> Vec<Event>;

    /// Persist one event; the server assigns the id. `None` on failure
    /// (constraint violation, connectivity loss).
    async fn insert_event(&self, user_id: &str, event: &NewEvent) -> Option<Event>;

    /// Delete by id; `false` on failure. Deleting a nonexistent id is
    /// success-no-op: the delete filter simply matches zero rows.
    async fn delete_event(&self, event_id: &str) -> bool;
}
