//! Platform-operator (super-admin) console operations.
//!
//! These act across tenants and are all audited: the operator console
//! renders the audit trail so status flips and config changes have a
//! who/when/what history.

use tracing::info;

use shamba_audit::{AuditAction, AuditEvent};
use shamba_storage::{
    PlatformConfig, Store, User, UserId, UserStatus, Workspace, WorkspaceId, WorkspaceStatus,
};

use crate::{CoreError, Shamba};

impl<S: Store> Shamba<S> {
    /// All workspaces on the platform.
    pub async fn all_workspaces(&self) -> Result<Vec<Workspace>, CoreError> {
        Ok(self.store.list_workspaces().await?)
    }

    /// All users on the platform.
    pub async fn all_users(&self) -> Result<Vec<User>, CoreError> {
        Ok(self.store.list_users().await?)
    }

    /// Suspend or reactivate a workspace.
    pub async fn set_workspace_status(
        &self,
        actor: &str,
        ws: &WorkspaceId,
        status: WorkspaceStatus,
    ) -> Result<Workspace, CoreError> {
        let mut workspace = self.store.get_workspace(ws).await?;
        workspace.status = status;
        self.store.replace_workspace(&workspace).await?;

        let action = match status {
            WorkspaceStatus::Suspended => AuditAction::WorkspaceSuspend,
            WorkspaceStatus::Active => AuditAction::WorkspaceActivate,
        };
        self.audit
            .record(AuditEvent::new(
                actor,
                action,
                format!("Workspace {} ({}) status changed", workspace.name, ws),
            ))
            .await?;
        info!(workspace_id = %ws, ?status, "workspace status changed");
        Ok(workspace)
    }

    /// Suspend or reactivate a user account.
    pub async fn set_user_status(
        &self,
        actor: &str,
        user_id: &UserId,
        status: UserStatus,
    ) -> Result<User, CoreError> {
        let mut user = self.store.get_user(user_id).await?;
        user.status = status;
        self.store.replace_user(&user).await?;

        let action = match status {
            UserStatus::Suspended => AuditAction::UserSuspend,
            UserStatus::Active => AuditAction::UserActivate,
        };
        self.audit
            .record(AuditEvent::new(
                actor,
                action,
                format!("User {} ({}) status changed", user.name, user_id),
            ))
            .await?;
        info!(user_id = %user_id, ?status, "user status changed");
        Ok(user)
    }

    /// Delete a workspace from the operator console.
    pub async fn delete_workspace_as_operator(
        &self,
        actor: &str,
        ws: &WorkspaceId,
    ) -> Result<(), CoreError> {
        let workspace = self.store.get_workspace(ws).await?;
        self.delete_workspace(ws).await?;
        self.audit
            .record(AuditEvent::new(
                actor,
                AuditAction::WorkspaceDelete,
                format!("Workspace {} ({}) deleted", workspace.name, ws),
            ))
            .await?;
        Ok(())
    }

    /// Current platform configuration; defaults when none has been stored.
    pub async fn platform_config(&self) -> Result<PlatformConfig, CoreError> {
        Ok(self.store.get_platform_config().await?.unwrap_or_default())
    }

    /// Replace the platform configuration.
    pub async fn update_platform_config(
        &self,
        actor: &str,
        config: PlatformConfig,
    ) -> Result<(), CoreError> {
        self.store.set_platform_config(&config).await?;
        self.audit
            .record(AuditEvent::new(
                actor,
                AuditAction::ConfigUpdate,
                "Platform configuration updated",
            ))
            .await?;
        Ok(())
    }

    /// The operator audit trail, oldest first.
    pub async fn audit_trail(&self) -> Result<Vec<AuditEvent>, CoreError> {
        Ok(self.audit.entries().await?)
    }
}
