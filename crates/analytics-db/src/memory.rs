//! In-process [`EventRepository`] implementation.
//!
//! Records live in an insertion-ordered `Vec` behind a
//! [`tokio::sync::RwLock`]. Used by the HTTP integration tests and for
//! running the API without a database.

use analytics_types::{Event, EventCreate, EventId, EventList, EventUpdate};
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::DbError;
use crate::event_store::EventRepository;

/// In-memory event store.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    events: RwLock<Vec<Event>>,
}

impl MemoryEventStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for MemoryEventStore {
    async fn create(&self, payload: &EventCreate) -> Result<Event, DbError> {
        let mut events = self.events.write().await;
        // v4 collisions are astronomically unlikely, but ids must never repeat.
        let mut id = EventId::new();
        while events.iter().any(|e| e.id == id) {
            id = EventId::new();
        }
        let event = Event::from_create(id, payload);
        events.push(event.clone());
        Ok(event)
    }

    async fn list(&self) -> Result<EventList, DbError> {
        let events = self.events.read().await;
        Ok(EventList::new(events.clone()))
    }

    async fn get(&self, id: EventId) -> Result<Option<Event>, DbError> {
        let events = self.events.read().await;
        Ok(events.iter().find(|e| e.id == id).cloned())
    }

    async fn update(&self, id: EventId, update: &EventUpdate) -> Result<Option<Event>, DbError> {
        let mut events = self.events.write().await;
        Ok(events.iter_mut().find(|e| e.id == id).map(|event| {
            event.apply(update);
            event.clone()
        }))
    }

    async fn delete(&self, id: EventId) -> Result<bool, DbError> {
        let mut events = self.events.write().await;
        let before = events.len();
        events.retain(|e| e.id != id);
        Ok(events.len() < before)
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[tokio::test]
    async fn create_assigns_unique_ids() {
        let store = MemoryEventStore::new();
        let a = store.create(&EventCreate::named("a")).await.unwrap();
        let b = store.create(&EventCreate::named("b")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
    }

    #[tokio::test]
    async fn get_returns_created_record() {
        let store = MemoryEventStore::new();
        let created = store.create(&EventCreate::named("launch")).await.unwrap();
        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn list_preserves_insertion_order_and_count() {
        let store = MemoryEventStore::new();
        for name in ["first", "second", "third"] {
            store.create(&EventCreate::named(name)).await.unwrap();
        }
        let list = store.list().await.unwrap();
        assert_eq!(list.count, 3);
        let names: Vec<&str> = list.results.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn update_touches_only_description() {
        let store = MemoryEventStore::new();
        let created = store.create(&EventCreate::named("launch")).await.unwrap();
        let update = EventUpdate {
            description: String::from("v2"),
        };

        let updated = store.update(created.id, &update).await.unwrap().unwrap();

        assert_eq!(updated.description.as_deref(), Some("v2"));
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(store.get(created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn update_moves_updated_at_forward() {
        let store = MemoryEventStore::new();
        let created = store.create(&EventCreate::named("launch")).await.unwrap();

        // Backdate the stored record so the refresh is observable.
        let backdated = created
            .updated_at
            .checked_sub_signed(chrono::TimeDelta::minutes(1))
            .unwrap();
        for event in store.events.write().await.iter_mut() {
            event.created_at = backdated;
            event.updated_at = backdated;
        }

        let update = EventUpdate {
            description: String::from("v2"),
        };
        let updated = store.update(created.id, &update).await.unwrap().unwrap();

        assert!(updated.updated_at > backdated);
        assert_eq!(updated.created_at, backdated);
    }

    #[tokio::test]
    async fn missing_ids_report_not_found() {
        let store = MemoryEventStore::new();
        let id = EventId::new();
        let update = EventUpdate {
            description: String::from("v2"),
        };
        assert_eq!(store.get(id).await.unwrap(), None);
        assert_eq!(store.update(id, &update).await.unwrap(), None);
        assert!(!store.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_is_permanent() {
        let store = MemoryEventStore::new();
        let keep = store.create(&EventCreate::named("keep")).await.unwrap();
        let gone = store.create(&EventCreate::named("gone")).await.unwrap();

        assert!(store.delete(gone.id).await.unwrap());
        assert!(!store.delete(gone.id).await.unwrap());
        assert_eq!(store.get(gone.id).await.unwrap(), None);

        let list = store.list().await.unwrap();
        assert_eq!(list.count, 1);
        assert_eq!(list.results, vec![keep]);
    }
}
