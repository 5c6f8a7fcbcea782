//! Workspace lifecycle: creation, membership, permissions, migration-on-load.

use chrono::Utc;
use tracing::info;

use shamba_access::{
    default_feature_permissions, enabled_features, migrate_feature_permissions, remove_member,
    update_feature_permission, update_member_role,
};
use shamba_events::ChangeKind;
use shamba_storage::{
    Feature, FeaturePermission, Role, Store, User, UserId, Workspace, WorkspaceId,
    WorkspaceMember, WorkspaceStatus,
};

use crate::{CoreError, Shamba};

impl<S: Store> Shamba<S> {
    /// Create a workspace owned by `owner`, with the full default feature
    /// permission map, and seed starter data when configured to.
    pub async fn create_workspace(
        &self,
        name: &str,
        owner: &User,
    ) -> Result<Workspace, CoreError> {
        if owner.is_suspended() {
            return Err(CoreError::UserSuspended);
        }

        let workspace = Workspace {
            id: WorkspaceId::generate(),
            name: name.to_string(),
            members: [(owner.id.clone(), WorkspaceMember { role: Role::Owner })]
                .into_iter()
                .collect(),
            feature_permissions: default_feature_permissions(),
            status: WorkspaceStatus::Active,
            logo_url: None,
            created_at: Utc::now(),
        };
        self.store.create_workspace(&workspace).await?;

        if self.config.seed_new_workspaces {
            self.seed_workspace(&workspace.id).await?;
        }

        info!(workspace_id = %workspace.id, name, "workspace created");
        Ok(workspace)
    }

    /// Load a workspace, backfilling any feature permissions introduced
    /// since the record was written. The migrated record is persisted before
    /// being returned, so callers always see a complete permission map.
    pub async fn load_workspace(&self, ws: &WorkspaceId) -> Result<Workspace, CoreError> {
        let workspace = self.store.get_workspace(ws).await?;
        let migration = migrate_feature_permissions(workspace);
        if migration.changed {
            self.store.replace_workspace(&migration.workspace).await?;
            info!(workspace_id = %ws, "backfilled missing feature permissions");
        }
        Ok(migration.workspace)
    }

    /// Load a workspace and reject suspended tenants. Gate used by every
    /// record mutation.
    pub(crate) async fn active_workspace(&self, ws: &WorkspaceId) -> Result<Workspace, CoreError> {
        let workspace = self.load_workspace(ws).await?;
        if workspace.is_suspended() {
            return Err(CoreError::WorkspaceSuspended);
        }
        Ok(workspace)
    }

    /// All workspaces the user belongs to, migrated on load.
    pub async fn workspaces_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Workspace>, CoreError> {
        let mut out = Vec::new();
        for ws in self.store.list_workspaces_for_user(user_id).await? {
            out.push(self.load_workspace(&ws.id).await?);
        }
        Ok(out)
    }

    /// Join an existing workspace with the `member` role. Joining a
    /// workspace you already belong to is a no-op (the invite link may be
    /// clicked twice).
    pub async fn join_workspace(
        &self,
        ws: &WorkspaceId,
        user_id: &UserId,
    ) -> Result<Workspace, CoreError> {
        let user = self.store.get_user(user_id).await?;
        if user.is_suspended() {
            return Err(CoreError::UserSuspended);
        }
        let mut workspace = self.active_workspace(ws).await?;
        if !workspace.members.contains_key(user_id) {
            workspace
                .members
                .insert(user_id.clone(), WorkspaceMember { role: Role::Member });
            self.store.replace_workspace(&workspace).await?;
            info!(workspace_id = %ws, user_id = %user_id, "member joined");
        }
        Ok(workspace)
    }

    /// Features visible to the user in this workspace.
    pub async fn enabled_features(
        &self,
        ws: &WorkspaceId,
        user_id: &UserId,
    ) -> Result<Vec<Feature>, CoreError> {
        let workspace = self.active_workspace(ws).await?;
        Ok(enabled_features(&workspace, user_id))
    }

    /// Change a member's role, with last-owner protection.
    pub async fn update_member_role(
        &self,
        ws: &WorkspaceId,
        user_id: &UserId,
        new_role: Role,
    ) -> Result<Workspace, CoreError> {
        let workspace = self.active_workspace(ws).await?;
        let updated = update_member_role(workspace, user_id, new_role)?;
        self.store.replace_workspace(&updated).await?;
        self.emit(ws, ChangeKind::Updated, "workspaces", ws.as_str())
            .await;
        info!(workspace_id = %ws, user_id = %user_id, role = %new_role, "member role updated");
        Ok(updated)
    }

    /// Remove a member, with last-owner protection.
    pub async fn remove_member(
        &self,
        ws: &WorkspaceId,
        user_id: &UserId,
    ) -> Result<Workspace, CoreError> {
        let workspace = self.active_workspace(ws).await?;
        let updated = remove_member(workspace, user_id)?;
        self.store.replace_workspace(&updated).await?;
        self.emit(ws, ChangeKind::Updated, "workspaces", ws.as_str())
            .await;
        info!(workspace_id = %ws, user_id = %user_id, "member removed");
        Ok(updated)
    }

    /// Replace one feature's permission.
    pub async fn set_feature_permission(
        &self,
        ws: &WorkspaceId,
        feature: Feature,
        permission: FeaturePermission,
    ) -> Result<Workspace, CoreError> {
        let workspace = self.active_workspace(ws).await?;
        let updated = update_feature_permission(workspace, feature, permission);
        self.store.replace_workspace(&updated).await?;
        self.emit(ws, ChangeKind::Updated, "workspaces", ws.as_str())
            .await;
        Ok(updated)
    }

    /// Rename a workspace and/or set its logo.
    pub async fn update_workspace_details(
        &self,
        ws: &WorkspaceId,
        name: Option<String>,
        logo_url: Option<String>,
    ) -> Result<Workspace, CoreError> {
        let mut workspace = self.active_workspace(ws).await?;
        if let Some(name) = name {
            workspace.name = name;
        }
        if let Some(logo_url) = logo_url {
            workspace.logo_url = Some(logo_url);
        }
        self.store.replace_workspace(&workspace).await?;
        self.emit(ws, ChangeKind::Updated, "workspaces", ws.as_str())
            .await;
        Ok(workspace)
    }

    /// Delete a workspace and all of its collections.
    pub async fn delete_workspace(&self, ws: &WorkspaceId) -> Result<(), CoreError> {
        self.store.delete_workspace(ws).await?;
        self.emit(ws, ChangeKind::Deleted, "workspaces", ws.as_str())
            .await;
        info!(workspace_id = %ws, "workspace deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{core, core_unseeded, owner};
    use shamba_storage::UserStatus;

    #[tokio::test]
    async fn create_workspace_sets_owner_and_defaults() {
        let core = core_unseeded();
        let user = owner(&core).await;
        let ws = core.create_workspace("Sunrise Farm", &user).await.unwrap();

        assert_eq!(ws.member_role(&user.id), Some(Role::Owner));
        assert_eq!(ws.feature_permissions.len(), Feature::ALL.len());

        let features = core.enabled_features(&ws.id, &user.id).await.unwrap();
        assert_eq!(features.len(), Feature::ALL.len());
    }

    #[tokio::test]
    async fn create_workspace_seeds_starter_data() {
        let core = core();
        let user = owner(&core).await;
        let ws = core.create_workspace("Seeded Farm", &user).await.unwrap();

        assert_eq!(core.store().list_accounts(&ws.id).await.unwrap().len(), 10);
        assert_eq!(core.store().list_plots(&ws.id).await.unwrap().len(), 2);
        assert_eq!(core.store().list_seasons(&ws.id).await.unwrap().len(), 2);
        assert_eq!(core.store().list_employees(&ws.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn load_workspace_backfills_and_persists() {
        let core = core_unseeded();
        let user = owner(&core).await;
        let ws = core.create_workspace("Old Farm", &user).await.unwrap();

        // Strip newer features from the stored record, as a legacy tenant.
        let mut stored = core.store().get_workspace(&ws.id).await.unwrap();
        stored.feature_permissions.remove(&Feature::HarvestSales);
        stored.feature_permissions.remove(&Feature::Faq);
        core.store().replace_workspace(&stored).await.unwrap();

        let loaded = core.load_workspace(&ws.id).await.unwrap();
        assert!(loaded.feature_permissions.contains_key(&Feature::HarvestSales));

        // The migrated record was written back.
        let persisted = core.store().get_workspace(&ws.id).await.unwrap();
        assert_eq!(persisted.feature_permissions.len(), Feature::ALL.len());
    }

    #[tokio::test]
    async fn join_workspace_is_idempotent() {
        let core = core_unseeded();
        let user = owner(&core).await;
        let ws = core.create_workspace("Farm", &user).await.unwrap();

        let friend = User {
            id: UserId::from("user_friend"),
            email: "friend@farm.test".to_string(),
            name: "Kojo".to_string(),
            status: UserStatus::Active,
        };
        core.store().create_user(&friend).await.unwrap();

        let joined = core.join_workspace(&ws.id, &friend.id).await.unwrap();
        assert_eq!(joined.member_role(&friend.id), Some(Role::Member));

        let again = core.join_workspace(&ws.id, &friend.id).await.unwrap();
        assert_eq!(again.members.len(), 2);
    }

    #[tokio::test]
    async fn last_owner_demotion_is_rejected_and_state_unchanged() {
        let core = core_unseeded();
        let user = owner(&core).await;
        let ws = core.create_workspace("Farm", &user).await.unwrap();

        let err = core
            .update_member_role(&ws.id, &user.id, Role::Member)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Access(shamba_access::AccessError::LastOwnerDemotion)
        ));

        let stored = core.store().get_workspace(&ws.id).await.unwrap();
        assert_eq!(stored.member_role(&user.id), Some(Role::Owner));
    }

    #[tokio::test]
    async fn suspended_workspace_rejects_operations() {
        let core = core_unseeded();
        let user = owner(&core).await;
        let ws = core.create_workspace("Farm", &user).await.unwrap();

        let mut stored = core.store().get_workspace(&ws.id).await.unwrap();
        stored.status = WorkspaceStatus::Suspended;
        core.store().replace_workspace(&stored).await.unwrap();

        let err = core.enabled_features(&ws.id, &user.id).await.unwrap_err();
        assert!(matches!(err, CoreError::WorkspaceSuspended));
    }

    #[tokio::test]
    async fn suspended_user_cannot_create_or_join() {
        let core = core_unseeded();
        let user = owner(&core).await;
        let ws = core.create_workspace("Farm", &user).await.unwrap();

        let banned = User {
            id: UserId::from("user_banned"),
            email: "banned@farm.test".to_string(),
            name: "Banned".to_string(),
            status: UserStatus::Suspended,
        };
        core.store().create_user(&banned).await.unwrap();

        assert!(matches!(
            core.create_workspace("Nope", &banned).await.unwrap_err(),
            CoreError::UserSuspended
        ));
        assert!(matches!(
            core.join_workspace(&ws.id, &banned.id).await.unwrap_err(),
            CoreError::UserSuspended
        ));
    }

    #[tokio::test]
    async fn feature_permission_update_persists() {
        let core = core_unseeded();
        let user = owner(&core).await;
        let ws = core.create_workspace("Farm", &user).await.unwrap();

        core.set_feature_permission(
            &ws.id,
            Feature::Financials,
            FeaturePermission::for_roles([Role::Owner]),
        )
        .await
        .unwrap();

        let stored = core.store().get_workspace(&ws.id).await.unwrap();
        assert!(!stored.feature_permissions[&Feature::Financials].permits(Role::Accountant));
    }
}
