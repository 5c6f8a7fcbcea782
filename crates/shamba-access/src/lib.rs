//! Role-based feature gating for workspaces.
//!
//! Pure functions over [`Workspace`] values: no storage access, no ambient
//! state. Mutating operations take the workspace by value and return the
//! updated record for the caller to persist (full-document write), so a
//! rejected mutation leaves the stored record untouched by construction.

use thiserror::Error;

use shamba_storage::{Feature, FeaturePermission, Role, UserId, Workspace, WorkspaceMember};

mod migrate;

pub use migrate::{default_feature_permissions, migrate_feature_permissions, Migration};

/// Membership/permission mutation errors. All recoverable: reject the
/// mutation, keep prior state, surface the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("user is not a member of this workspace")]
    NotAMember,
    #[error("cannot demote or remove the last owner of a workspace")]
    LastOwnerDemotion,
}

/// Features the given user may access, in declared navigation order.
///
/// Non-members get an empty list. Owners always get `Admin`, even when the
/// stored permission would exclude them: a misconfigured permission map must
/// never lock owners out of workspace administration.
pub fn enabled_features(workspace: &Workspace, user_id: &UserId) -> Vec<Feature> {
    let Some(role) = workspace.member_role(user_id) else {
        return Vec::new();
    };

    let mut features: Vec<Feature> = Feature::ALL
        .into_iter()
        .filter(|feature| {
            workspace
                .feature_permissions
                .get(feature)
                .map(|perm| perm.permits(role))
                .unwrap_or(false)
        })
        .collect();

    if role.is_owner() && !features.contains(&Feature::Admin) {
        features.push(Feature::Admin);
    }

    features
}

/// Single-feature access check, with the same owner override as
/// [`enabled_features`].
pub fn can_access(workspace: &Workspace, user_id: &UserId, feature: Feature) -> bool {
    let Some(role) = workspace.member_role(user_id) else {
        return false;
    };
    if feature == Feature::Admin && role.is_owner() {
        return true;
    }
    workspace
        .feature_permissions
        .get(&feature)
        .map(|perm| perm.permits(role))
        .unwrap_or(false)
}

/// Replace one feature's permission. No validation beyond type shape: an
/// empty `allowed_roles` set is legal and hides the feature from everyone
/// except owners via the `Admin` override.
pub fn update_feature_permission(
    mut workspace: Workspace,
    feature: Feature,
    permission: FeaturePermission,
) -> Workspace {
    workspace.feature_permissions.insert(feature, permission);
    workspace
}

/// Change a member's role.
///
/// Fails with [`AccessError::LastOwnerDemotion`] when the target is the sole
/// owner and the new role is not `owner`, and with [`AccessError::NotAMember`]
/// when the user has no membership.
pub fn update_member_role(
    mut workspace: Workspace,
    user_id: &UserId,
    new_role: Role,
) -> Result<Workspace, AccessError> {
    if !workspace.members.contains_key(user_id) {
        return Err(AccessError::NotAMember);
    }
    if !new_role.is_owner() && is_sole_owner(&workspace, user_id) {
        return Err(AccessError::LastOwnerDemotion);
    }
    workspace
        .members
        .insert(user_id.clone(), WorkspaceMember { role: new_role });
    Ok(workspace)
}

/// Remove a member. Carries the same last-owner guard as
/// [`update_member_role`]: a workspace can never be left ownerless.
pub fn remove_member(
    mut workspace: Workspace,
    user_id: &UserId,
) -> Result<Workspace, AccessError> {
    if !workspace.members.contains_key(user_id) {
        return Err(AccessError::NotAMember);
    }
    if is_sole_owner(&workspace, user_id) {
        return Err(AccessError::LastOwnerDemotion);
    }
    workspace.members.remove(user_id);
    Ok(workspace)
}

fn is_sole_owner(workspace: &Workspace, user_id: &UserId) -> bool {
    let owners = workspace.owner_ids();
    owners.len() == 1 && owners[0] == user_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shamba_storage::{WorkspaceId, WorkspaceStatus};
    use std::collections::BTreeMap;

    fn workspace(members: &[(&str, Role)]) -> Workspace {
        let mut ws = Workspace {
            id: WorkspaceId::from("ws_1"),
            name: "Sunrise Farm".to_string(),
            members: members
                .iter()
                .map(|(id, role)| (UserId::from(*id), WorkspaceMember { role: *role }))
                .collect(),
            feature_permissions: BTreeMap::new(),
            status: WorkspaceStatus::Active,
            logo_url: None,
            created_at: Utc::now(),
        };
        ws.feature_permissions = default_feature_permissions();
        ws
    }

    #[test]
    fn non_member_sees_nothing() {
        let ws = workspace(&[("user_owner", Role::Owner)]);
        assert!(enabled_features(&ws, &UserId::from("user_stranger")).is_empty());
        assert!(!can_access(
            &ws,
            &UserId::from("user_stranger"),
            Feature::Dashboard
        ));
    }

    #[test]
    fn features_follow_role_and_declared_order() {
        let ws = workspace(&[("user_acct", Role::Accountant)]);
        let features = enabled_features(&ws, &UserId::from("user_acct"));
        // Accountant defaults: Dashboard, Financials, Suppliers, How To, FAQ.
        assert_eq!(
            features,
            vec![
                Feature::Dashboard,
                Feature::Financials,
                Feature::Suppliers,
                Feature::HowTo,
                Feature::Faq,
            ]
        );
    }

    #[test]
    fn visibility_invariant_holds_for_every_role_and_feature() {
        for role in Role::ALL {
            let ws = workspace(&[("user_x", role)]);
            let user = UserId::from("user_x");
            let visible = enabled_features(&ws, &user);
            for feature in Feature::ALL {
                let stored = ws
                    .feature_permissions
                    .get(&feature)
                    .map(|p| p.permits(role))
                    .unwrap_or(false);
                let expected = stored || (feature == Feature::Admin && role.is_owner());
                assert_eq!(
                    visible.contains(&feature),
                    expected,
                    "role {:?} feature {:?}",
                    role,
                    feature
                );
                assert_eq!(can_access(&ws, &user, feature), expected);
            }
        }
    }

    #[test]
    fn owner_keeps_admin_despite_misconfiguration() {
        let ws = workspace(&[("user_owner", Role::Owner)]);
        // Lock everyone out of Admin, owner included.
        let ws = update_feature_permission(
            ws,
            Feature::Admin,
            FeaturePermission {
                enabled: false,
                allowed_roles: Default::default(),
            },
        );
        let features = enabled_features(&ws, &UserId::from("user_owner"));
        assert!(features.contains(&Feature::Admin));
        assert!(can_access(&ws, &UserId::from("user_owner"), Feature::Admin));

        // A non-owner really is locked out.
        let ws2 = workspace(&[("user_owner", Role::Owner), ("user_m", Role::FarmManager)]);
        let ws2 = update_feature_permission(
            ws2,
            Feature::Admin,
            FeaturePermission {
                enabled: false,
                allowed_roles: Default::default(),
            },
        );
        assert!(!can_access(&ws2, &UserId::from("user_m"), Feature::Admin));
    }

    #[test]
    fn empty_allowed_roles_hides_feature_from_everyone_but_owner() {
        let ws = workspace(&[("user_owner", Role::Owner), ("user_m", Role::Member)]);
        let ws = update_feature_permission(
            ws,
            Feature::Dashboard,
            FeaturePermission {
                enabled: true,
                allowed_roles: Default::default(),
            },
        );
        assert!(!can_access(&ws, &UserId::from("user_owner"), Feature::Dashboard));
        assert!(!can_access(&ws, &UserId::from("user_m"), Feature::Dashboard));
    }

    #[test]
    fn last_owner_cannot_be_demoted() {
        let ws = workspace(&[("user_owner", Role::Owner), ("user_m", Role::Member)]);
        let before = ws.clone();
        let err =
            update_member_role(ws, &UserId::from("user_owner"), Role::Member).unwrap_err();
        assert_eq!(err, AccessError::LastOwnerDemotion);
        // By-value API: the caller's stored record is untouched on failure.
        assert_eq!(before.member_role(&UserId::from("user_owner")), Some(Role::Owner));
    }

    #[test]
    fn demotion_allowed_with_a_second_owner() {
        let ws = workspace(&[("user_a", Role::Owner), ("user_b", Role::Owner)]);
        let ws = update_member_role(ws, &UserId::from("user_a"), Role::Accountant).unwrap();
        assert_eq!(
            ws.member_role(&UserId::from("user_a")),
            Some(Role::Accountant)
        );
        assert_eq!(ws.owner_ids().len(), 1);
    }

    #[test]
    fn role_update_for_unknown_user_fails() {
        let ws = workspace(&[("user_owner", Role::Owner)]);
        let err =
            update_member_role(ws, &UserId::from("user_ghost"), Role::Member).unwrap_err();
        assert_eq!(err, AccessError::NotAMember);
    }

    #[test]
    fn remove_member_guards_last_owner() {
        let ws = workspace(&[("user_owner", Role::Owner), ("user_m", Role::Member)]);
        let err = remove_member(ws.clone(), &UserId::from("user_owner")).unwrap_err();
        assert_eq!(err, AccessError::LastOwnerDemotion);

        let ws = remove_member(ws, &UserId::from("user_m")).unwrap();
        assert!(ws.member_role(&UserId::from("user_m")).is_none());
    }

    #[test]
    fn remove_unknown_member_fails() {
        let ws = workspace(&[("user_owner", Role::Owner)]);
        let err = remove_member(ws, &UserId::from("user_ghost")).unwrap_err();
        assert_eq!(err, AccessError::NotAMember);
    }
}
