//! Event bus abstraction for workspace collection-change notifications.
//!
//! The document store pushes realtime updates to connected clients; inside
//! the process, mutations publish a [`CollectionChangeEvent`] on this bus so
//! listeners (sync fan-out, cache invalidation) can react. Implementations:
//! - Memory (single process, tokio broadcast channels)
//! - an external pub/sub for multi-replica deployments
//!
//! Events are advisory: a subscriber that misses one resyncs the named
//! collection from the store.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use shamba_storage::WorkspaceId;

/// Kind of change to a document in a collection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// Event representing a change to one document in a workspace collection
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CollectionChangeEvent {
    pub kind: ChangeKind,
    /// Collection name, e.g. `"accounts"`, `"journal_entries"`.
    pub collection: String,
    pub entity_id: String,
    pub timestamp: i64,
}

/// Error type for event bus operations
#[derive(Debug, Error)]
pub enum EventBusError {
    #[error("backend error: {0}")]
    Backend(String),
}

/// Stream of collection change events
pub type EventStream = Pin<Box<dyn Stream<Item = CollectionChangeEvent> + Send>>;

/// Event bus trait for publishing and subscribing to collection changes,
/// keyed by workspace.
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Publish a change event to all watchers of this workspace.
    async fn publish(
        &self,
        ws: &WorkspaceId,
        event: CollectionChangeEvent,
    ) -> Result<(), EventBusError>;

    /// Subscribe to change events for a workspace.
    ///
    /// Returns a stream that yields events as they occur until dropped.
    async fn subscribe(&self, ws: &WorkspaceId) -> Result<EventStream, EventBusError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_kind_equality() {
        assert_eq!(ChangeKind::Created, ChangeKind::Created);
        assert_ne!(ChangeKind::Created, ChangeKind::Updated);
        assert_ne!(ChangeKind::Updated, ChangeKind::Deleted);
    }

    #[test]
    fn test_event_serialization_roundtrip() {
        let event = CollectionChangeEvent {
            kind: ChangeKind::Updated,
            collection: "accounts".to_string(),
            entity_id: "acc_1".to_string(),
            timestamp: 1_712_000_000,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: CollectionChangeEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, ChangeKind::Updated);
        assert_eq!(back.collection, "accounts");
        assert_eq!(back.entity_id, "acc_1");
        assert_eq!(back.timestamp, 1_712_000_000);
    }
}
