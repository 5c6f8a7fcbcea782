//! Audit logging abstraction for shamba.
//!
//! Platform-operator (super-admin) actions such as suspending tenants,
//! changing platform configuration and impersonating users are recorded through the
//! [`AuditLog`] trait so the operator console can render a tamper-evident
//! history.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for an audit log entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuditEventId(pub Uuid);

impl AuditEventId {
    /// Generate a new audit event ID using UUID v7 (time-ordered)
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for AuditEventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AuditEventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Categories of auditable platform actions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    // Tenant lifecycle
    WorkspaceSuspend,
    WorkspaceActivate,
    WorkspaceDelete,

    // User lifecycle
    UserSuspend,
    UserActivate,

    // Operator impersonation
    ImpersonationStart,
    ImpersonationEnd,

    // Platform configuration
    ConfigUpdate,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AuditAction::WorkspaceSuspend => "workspace.suspend",
            AuditAction::WorkspaceActivate => "workspace.activate",
            AuditAction::WorkspaceDelete => "workspace.delete",
            AuditAction::UserSuspend => "user.suspend",
            AuditAction::UserActivate => "user.activate",
            AuditAction::ImpersonationStart => "impersonation.start",
            AuditAction::ImpersonationEnd => "impersonation.end",
            AuditAction::ConfigUpdate => "config.update",
        };
        write!(f, "{}", s)
    }
}

/// One recorded operator action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: AuditEventId,
    pub timestamp: DateTime<Utc>,
    /// Operator identity (super-admin handle).
    pub actor: String,
    pub action: AuditAction,
    /// Human-readable description of what changed.
    pub details: String,
}

impl AuditEvent {
    pub fn new(actor: impl Into<String>, action: AuditAction, details: impl Into<String>) -> Self {
        Self {
            id: AuditEventId::new(),
            timestamp: Utc::now(),
            actor: actor.into(),
            action,
            details: details.into(),
        }
    }
}

/// Error type for audit log operations
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("backend error: {0}")]
    Backend(String),
}

/// Audit log trait for persisting operator actions.
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Append an event to the log.
    async fn record(&self, event: AuditEvent) -> Result<(), AuditError>;

    /// All recorded events, oldest first.
    async fn entries(&self) -> Result<Vec<AuditEvent>, AuditError>;
}

/// In-memory audit log for single-process deployments and tests.
#[derive(Default)]
pub struct MemoryAuditLog {
    entries: tokio::sync::RwLock<Vec<AuditEvent>>,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditLog for MemoryAuditLog {
    async fn record(&self, event: AuditEvent) -> Result<(), AuditError> {
        self.entries.write().await.push(event);
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<AuditEvent>, AuditError> {
        Ok(self.entries.read().await.clone())
    }
}
