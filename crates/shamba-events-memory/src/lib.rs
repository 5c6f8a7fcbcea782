//! In-memory event bus implementation using tokio broadcast channels.
//!
//! Suitable for single-process deployments, development and testing. Events
//! are only broadcast within one process: multiple replicas will NOT see
//! each other's events. Use an external pub/sub bus for that.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use shamba_events::{CollectionChangeEvent, EventBus, EventBusError, EventStream};
use shamba_storage::WorkspaceId;

const CHANNEL_CAPACITY: usize = 100;

/// In-memory event bus keyed by workspace.
pub struct MemoryEventBus {
    channels: Arc<DashMap<WorkspaceId, broadcast::Sender<CollectionChangeEvent>>>,
}

impl MemoryEventBus {
    pub fn new() -> Self {
        Self {
            channels: Arc::new(DashMap::new()),
        }
    }

    /// Get or create a broadcast channel for a workspace
    fn get_or_create_channel(
        &self,
        ws: &WorkspaceId,
    ) -> broadcast::Sender<CollectionChangeEvent> {
        self.channels
            .entry(ws.clone())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .clone()
    }
}

impl Default for MemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for MemoryEventBus {
    async fn publish(
        &self,
        ws: &WorkspaceId,
        event: CollectionChangeEvent,
    ) -> Result<(), EventBusError> {
        let tx = self.get_or_create_channel(ws);

        // Ignore error if no receivers (this is fine)
        let _ = tx.send(event);

        Ok(())
    }

    async fn subscribe(&self, ws: &WorkspaceId) -> Result<EventStream, EventBusError> {
        let tx = self.get_or_create_channel(ws);
        let rx = tx.subscribe();

        // Lagged receivers dropped an event; they should resync from the
        // store, so lag errors are filtered out of the stream.
        let stream = BroadcastStream::new(rx).filter_map(|result| result.ok());

        Ok(Box::pin(stream))
    }
}
