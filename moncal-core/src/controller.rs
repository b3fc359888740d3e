//! Mutation and reload orchestration.
//!
//! Every successful mutation triggers a full fetch + re-group cycle rather
//! than an incremental patch, so concurrent sessions, partial writes, and
//! server-assigned fields can never leave the client cache stale. At tens
//! of events per user the extra round-trip is cheap; "last fetch wins" is
//! the whole consistency model.

use crate::error::{MoncalError, MoncalResult};
use crate::event::{Event, NewEvent};
use crate::grouping::{CalendarDay, group_events};
use crate::store::EventStore;

/// Orchestrates mutations against the event store and owns the grouped
/// per-day cache for one user session.
///
/// Each mutation moves through
/// `Idle -> Submitting -> (Success -> Reloading -> Idle) | (Failed -> Idle)`;
/// the `submitting` flag guards against a second add while one is in
/// flight.
pub struct EventController<S> {
    store: S,
    user_id: String,
    days: Vec<CalendarDay>,
    submitting: bool,
}

impl<S: EventStore> EventController<S> {
    pub fn new(store: S, user_id: impl Into<String>) -> Self {
        EventController {
            store,
            user_id: user_id.into(),
            days: Vec::new(),
            submitting: false,
        }
    }

    /// The grouped per-day cache, ordered by date.
    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    /// Look up a cached event by id.
    pub fn find_event(&self, event_id: &str) -> Option<&Event> {
        self.days
            .iter()
            .flat_map(|d| d.events.iter())
            .find(|e| e.id == event_id)
    }

    /// Replace the cache wholesale with a fresh fetch + re-group.
    pub async fn reload(&mut self) -> MoncalResult<()> {
        let events = self.store.fetch_events(&self.user_id).await;
        self.days = group_events(events)?;
        Ok(())
    }

    /// Validate and persist a new event, then reload.
    ///
    /// An empty (after trim) name is rejected before the store is
    /// contacted. On store failure the cache is left untouched; the user
    /// retries explicitly.
    pub async fn add_event(&mut self, event: NewEvent) -> MoncalResult<Event> {
        if event.name.trim().is_empty() {
            return Err(MoncalError::Validation(
                "Event name must not be empty".into(),
            ));
        }

        if self.submitting {
            return Err(MoncalError::Validation(
                "An event submission is already in flight".into(),
            ));
        }

        self.submitting = true;
        let inserted = self.store.insert_event(&self.user_id, &event).await;
        self.submitting = false;

        match inserted {
            Some(created) => {
                self.reload().await?;
                Ok(created)
            }
            None => Err(MoncalError::Persistence(
                "Event could not be saved".into(),
            )),
        }
    }

    /// Delete an event by id, then reload.
    ///
    /// Confirmation is the caller's concern — by the time this runs, the
    /// user already said yes. Deleting an id the store no longer has is a
    /// success-no-op.
    pub async fn delete_event(&mut self, event_id: &str) -> MoncalResult<()> {
        if self.store.delete_event(event_id).await {
            self.reload().await
        } else {
            Err(MoncalError::Persistence(
                "Event could not be deleted".into(),
            ))
        }
    }

    /// Drop all cached state (the logout transition). The next login
    /// constructs a fresh controller and reloads.
    pub fn clear(&mut self) {
        self.days.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// In-memory store double. Counts calls so tests can assert which
    /// operations reached the store, and can be switched to fail.
    #[derive(Default)]
    struct MemoryStore {
        events: Mutex<Vec<Event>>,
        next_id: AtomicUsize,
        fail_inserts: AtomicBool,
        fetch_calls: AtomicUsize,
        insert_calls: AtomicUsize,
    }

    impl MemoryStore {
        fn with_events(events: Vec<Event>) -> Self {
            MemoryStore {
                events: Mutex::new(events),
                ..Default::default()
            }
        }

        fn fail_inserts(&self) {
            self.fail_inserts.store(true, Ordering::SeqCst);
        }
    }

    impl EventStore for MemoryStore {
        async fn fetch_events(&self, user_id: &str) -> Vec<Event> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            let mut events: Vec<Event> = self
                .events
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.user_id == user_id)
                .cloned()
                .collect();
            events.sort_by(|a, b| a.datetime.cmp(&b.datetime));
            events
        }

        async fn insert_event(&self, user_id: &str, event: &NewEvent) -> Option<Event> {
            self.insert_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_inserts.load(Ordering::SeqCst) {
                return None;
            }

            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let created = Event {
                id: format!("ev-{id}"),
                name: event.name.clone(),
                time: event.time.clone(),
                datetime: event.datetime.clone(),
                user_id: user_id.to_string(),
            };
            self.events.lock().unwrap().push(created.clone());
            Some(created)
        }

        async fn delete_event(&self, event_id: &str) -> bool {
            // Idempotent: filtering out a missing id is still success.
            self.events.lock().unwrap().retain(|e| e.id != event_id);
            true
        }
    }

    fn seeded_event(id: &str, datetime: &str) -> Event {
        Event {
            id: id.to_string(),
            name: format!("event {id}"),
            time: "All Day".to_string(),
            datetime: datetime.to_string(),
            user_id: "user-1".to_string(),
        }
    }

    #[tokio::test]
    async fn reload_groups_fetched_events() {
        let store = MemoryStore::with_events(vec![
            seeded_event("a", "2024-12-21T10:00:00"),
            seeded_event("b", "2024-12-22T09:00:00"),
        ]);
        let mut controller = EventController::new(store, "user-1");

        controller.reload().await.unwrap();

        assert_eq!(controller.days().len(), 2);
        assert_eq!(controller.days()[0].events[0].id, "a");
    }

    #[tokio::test]
    async fn add_event_persists_and_reloads() {
        let store = MemoryStore::default();
        let mut controller = EventController::new(store, "user-1");

        let created = controller
            .add_event(NewEvent::new("Dev Meeting", "All Day", "2024-12-21T12:00:00"))
            .await
            .unwrap();

        assert_eq!(created.name, "Dev Meeting");
        assert!(!created.id.is_empty());
        // The cache mirrors the store after the reload cycle.
        assert_eq!(controller.days().len(), 1);
        assert_eq!(controller.days()[0].events[0].id, created.id);
    }

    #[tokio::test]
    async fn empty_name_fails_validation_without_store_contact() {
        let store = MemoryStore::default();
        let mut controller = EventController::new(store, "user-1");

        let result = controller
            .add_event(NewEvent::new("   ", "All Day", "2024-12-21T12:00:00"))
            .await;

        assert!(matches!(result, Err(MoncalError::Validation(_))));
        assert_eq!(controller.store.insert_calls.load(Ordering::SeqCst), 0);
        assert_eq!(controller.store.fetch_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_insert_surfaces_persistence_and_keeps_state() {
        let store = MemoryStore::with_events(vec![seeded_event("a", "2024-12-21T10:00:00")]);
        store.fail_inserts();
        let mut controller = EventController::new(store, "user-1");
        controller.reload().await.unwrap();
        let fetches_before = controller.store.fetch_calls.load(Ordering::SeqCst);

        let result = controller
            .add_event(NewEvent::new("Doomed", "All Day", "2024-12-25T12:00:00"))
            .await;

        assert!(matches!(result, Err(MoncalError::Persistence(_))));
        // No reload happened and the prior cache is intact.
        assert_eq!(
            controller.store.fetch_calls.load(Ordering::SeqCst),
            fetches_before
        );
        assert_eq!(controller.days().len(), 1);
        assert_eq!(controller.days()[0].events[0].id, "a");
    }

    #[tokio::test]
    async fn duplicate_submission_is_rejected_before_the_store() {
        let store = MemoryStore::default();
        let mut controller = EventController::new(store, "user-1");
        controller.submitting = true;

        let result = controller
            .add_event(NewEvent::new("Second", "All Day", "2024-12-21T12:00:00"))
            .await;

        assert!(matches!(result, Err(MoncalError::Validation(_))));
        assert_eq!(controller.store.insert_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn delete_reloads_and_drops_the_event() {
        let store = MemoryStore::with_events(vec![
            seeded_event("a", "2024-12-21T10:00:00"),
            seeded_event("b", "2024-12-21T14:00:00"),
        ]);
        let mut controller = EventController::new(store, "user-1");
        controller.reload().await.unwrap();

        controller.delete_event("a").await.unwrap();

        assert_eq!(controller.days().len(), 1);
        assert_eq!(controller.days()[0].events.len(), 1);
        assert_eq!(controller.days()[0].events[0].id, "b");
    }

    #[tokio::test]
    async fn deleting_a_nonexistent_id_is_a_no_op() {
        let store = MemoryStore::with_events(vec![seeded_event("a", "2024-12-21T10:00:00")]);
        let mut controller = EventController::new(store, "user-1");
        controller.reload().await.unwrap();

        controller.delete_event("never-existed").await.unwrap();

        assert_eq!(controller.days().len(), 1);
        assert_eq!(controller.days()[0].events[0].id, "a");
    }

    #[tokio::test]
    async fn clear_empties_the_cache() {
        let store = MemoryStore::with_events(vec![seeded_event("a", "2024-12-21T10:00:00")]);
        let mut controller = EventController::new(store, "user-1");
        controller.reload().await.unwrap();
        assert!(!controller.days().is_empty());

        controller.clear();

        assert!(controller.days().is_empty());
    }

    #[tokio::test]
    async fn find_event_scans_the_cache() {
        let store = MemoryStore::with_events(vec![seeded_event("a", "2024-12-21T10:00:00")]);
        let mut controller = EventController::new(store, "user-1");
        controller.reload().await.unwrap();

        assert_eq!(controller.find_event("a").unwrap().name, "event a");
        assert!(controller.find_event("zzz").is_none());
    }
}
