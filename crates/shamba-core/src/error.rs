//! Service-layer error type.

use thiserror::Error;

use shamba_access::AccessError;
use shamba_audit::AuditError;
use shamba_storage::StoreError;

/// Errors surfaced by the service layer.
///
/// Validation failures reject the specific mutation and leave stored state
/// untouched; none of these are fatal to the process.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error("workspace is suspended")]
    WorkspaceSuspended,

    #[error("user account is suspended")]
    UserSuspended,
}
