//! Feature-permission migration for workspace records.
//!
//! Workspace records written before a feature existed have no entry for it
//! in `feature_permissions`. Backfilling on load keeps old tenants working
//! when new features ship, without a separate data migration.

use std::collections::BTreeMap;

use shamba_storage::{Feature, FeaturePermission, Role, Workspace};

/// Result of a migration pass.
pub struct Migration {
    pub workspace: Workspace,
    /// True iff at least one entry was inserted; the caller should persist
    /// the record back to storage when set.
    pub changed: bool,
}

/// The default permission for one feature, used both when creating a new
/// workspace and when backfilling a missing entry.
fn default_permission(feature: Feature) -> FeaturePermission {
    match feature {
        // Collaborative/reference features are open to every role.
        Feature::Dashboard | Feature::Suppliers | Feature::HowTo | Feature::Faq => {
            FeaturePermission::for_all_roles()
        }
        Feature::Operations => FeaturePermission::for_roles([
            Role::Owner,
            Role::FarmManager,
            Role::FieldManager,
            Role::FieldOfficer,
        ]),
        Feature::Financials => FeaturePermission::for_roles([
            Role::Owner,
            Role::Accountant,
            Role::FarmManager,
            Role::OfficeManager,
        ]),
        Feature::Hr => FeaturePermission::for_roles([
            Role::Owner,
            Role::PeopleHr,
            Role::FarmManager,
            Role::OfficeManager,
        ]),
        Feature::Inventory | Feature::PlotsSeasons | Feature::HarvestSales => {
            FeaturePermission::for_roles([Role::Owner, Role::FarmManager, Role::FieldManager])
        }
        Feature::Aeo => FeaturePermission::for_roles([Role::Owner, Role::ExtensionOfficer]),
        Feature::AiInsights => FeaturePermission::for_roles([Role::Owner, Role::FarmManager]),
        Feature::Admin => FeaturePermission::for_roles([Role::Owner]),
    }
}

/// The full default permission map for a newly created workspace.
pub fn default_feature_permissions() -> BTreeMap<Feature, FeaturePermission> {
    Feature::ALL
        .into_iter()
        .map(|f| (f, default_permission(f)))
        .collect()
}

/// Backfill missing feature-permission entries with their defaults.
///
/// Existing entries are never touched, so running this twice returns
/// `changed == false` the second time.
pub fn migrate_feature_permissions(mut workspace: Workspace) -> Migration {
    let mut changed = false;
    for feature in Feature::ALL {
        if !workspace.feature_permissions.contains_key(&feature) {
            workspace
                .feature_permissions
                .insert(feature, default_permission(feature));
            changed = true;
        }
    }
    Migration { workspace, changed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shamba_storage::{UserId, WorkspaceId, WorkspaceMember, WorkspaceStatus};

    fn legacy_workspace() -> Workspace {
        // Record from before Suppliers / Harvest & Sales / How To / FAQ shipped.
        let mut permissions = default_feature_permissions();
        permissions.remove(&Feature::Suppliers);
        permissions.remove(&Feature::HarvestSales);
        permissions.remove(&Feature::HowTo);
        permissions.remove(&Feature::Faq);

        Workspace {
            id: WorkspaceId::from("ws_legacy"),
            name: "Old Farm".to_string(),
            members: [(
                UserId::from("user_owner"),
                WorkspaceMember { role: Role::Owner },
            )]
            .into_iter()
            .collect(),
            feature_permissions: permissions,
            status: WorkspaceStatus::Active,
            logo_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn backfills_missing_features_with_defaults() {
        let migration = migrate_feature_permissions(legacy_workspace());
        assert!(migration.changed);

        let perms = &migration.workspace.feature_permissions;
        assert_eq!(perms.len(), Feature::ALL.len());
        // Reference features open to everyone...
        for role in Role::ALL {
            assert!(perms[&Feature::Suppliers].permits(role));
            assert!(perms[&Feature::HowTo].permits(role));
            assert!(perms[&Feature::Faq].permits(role));
        }
        // ...operational features to the named subset.
        let hs = &perms[&Feature::HarvestSales];
        assert!(hs.permits(Role::FarmManager));
        assert!(!hs.permits(Role::Accountant));
    }

    #[test]
    fn existing_entries_are_preserved() {
        let mut ws = legacy_workspace();
        // Tenant customized Financials before the migration runs.
        ws.feature_permissions.insert(
            Feature::Financials,
            FeaturePermission::for_roles([Role::Owner]),
        );
        let migration = migrate_feature_permissions(ws);
        let financials = &migration.workspace.feature_permissions[&Feature::Financials];
        assert!(!financials.permits(Role::Accountant));
    }

    #[test]
    fn migration_is_idempotent() {
        let first = migrate_feature_permissions(legacy_workspace());
        assert!(first.changed);
        let second = migrate_feature_permissions(first.workspace);
        assert!(!second.changed);
    }

    #[test]
    fn complete_workspace_is_unchanged() {
        let mut ws = legacy_workspace();
        ws.feature_permissions = default_feature_permissions();
        let migration = migrate_feature_permissions(ws.clone());
        assert!(!migration.changed);
        assert_eq!(migration.workspace.feature_permissions, ws.feature_permissions);
    }

    #[test]
    fn default_table_covers_every_feature() {
        let defaults = default_feature_permissions();
        for feature in Feature::ALL {
            let perm = defaults.get(&feature).expect("default missing");
            assert!(perm.enabled);
            assert!(perm.permits(Role::Owner), "{:?} should permit owner", feature);
        }
    }
}
