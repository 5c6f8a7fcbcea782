//! shamba-core - the service layer tying storage, access control, ledger
//! aggregation, events and audit together.
//!
//! A [`Shamba`] instance wraps a [`Store`] backend plus an event bus and an
//! audit log. Handlers follow one shape: load the relevant records, apply
//! the pure access/ledger functions, persist the full replacement document,
//! publish a change event. Nothing here caches derived state: every report
//! is computed from a fresh snapshot.

use std::sync::Arc;

use chrono::Utc;
use shamba_audit::AuditLog;
use shamba_events::{ChangeKind, CollectionChangeEvent, EventBus};
use shamba_storage::{Store, WorkspaceId};

mod config;
mod error;
mod export;
mod financials;
mod platform;
mod records;
mod reports;
mod seed;
mod workspaces;

pub use config::{ConfigError, CoreConfig};
pub use error::CoreError;
pub use export::WorkspaceExport;
pub use financials::{NewAccount, NewJournalEntry};
pub use records::{
    NewArticle, NewCustomer, NewEmployee, NewFarmer, NewHarvest, NewInteraction,
    NewInventoryItem, NewPlot, NewSale, NewSeason, NewSupplier, NewTask, NewTimesheet,
};
pub use reports::FinancialReports;

/// The application service facade.
pub struct Shamba<S> {
    store: Arc<S>,
    events: Arc<dyn EventBus>,
    audit: Arc<dyn AuditLog>,
    config: CoreConfig,
}

impl<S: Store> Shamba<S> {
    pub fn new(
        store: Arc<S>,
        events: Arc<dyn EventBus>,
        audit: Arc<dyn AuditLog>,
        config: CoreConfig,
    ) -> Self {
        Self {
            store,
            events,
            audit,
            config,
        }
    }

    /// Direct access to the underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Publish a collection change; delivery failures are ignored since
    /// subscribers resync from the store anyway.
    pub(crate) async fn emit(
        &self,
        ws: &WorkspaceId,
        kind: ChangeKind,
        collection: &str,
        entity_id: impl Into<String>,
    ) {
        let _ = self
            .events
            .publish(
                ws,
                CollectionChangeEvent {
                    kind,
                    collection: collection.to_string(),
                    entity_id: entity_id.into(),
                    timestamp: Utc::now().timestamp(),
                },
            )
            .await;
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use shamba_events_memory::MemoryEventBus;
    use shamba_storage::{User, UserId, UserStatus};
    use shamba_store_memory::MemoryStore;

    pub fn core() -> Shamba<MemoryStore> {
        Shamba::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryEventBus::new()),
            Arc::new(shamba_audit::MemoryAuditLog::new()),
            CoreConfig::default(),
        )
    }

    /// Core with starter-data seeding switched off, for tests that want
    /// empty collections.
    pub fn core_unseeded() -> Shamba<MemoryStore> {
        Shamba::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryEventBus::new()),
            Arc::new(shamba_audit::MemoryAuditLog::new()),
            CoreConfig {
                seed_new_workspaces: false,
                ..CoreConfig::default()
            },
        )
    }

    pub async fn owner(core: &Shamba<MemoryStore>) -> User {
        let user = User {
            id: UserId::from("user_owner"),
            email: "owner@farm.test".to_string(),
            name: "Abena Mensah".to_string(),
            status: UserStatus::Active,
        };
        core.store().create_user(&user).await.unwrap();
        user
    }
}
