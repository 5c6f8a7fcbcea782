//! Workspace types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Feature, FeaturePermission, Role, UserId, WorkspaceId};

/// Lifecycle status of a workspace, controlled by platform operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceStatus {
    Active,
    Suspended,
}

/// One user's membership in a workspace. Exactly one role per membership.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceMember {
    pub role: Role,
}

/// Workspace record: one farm/organization's tenant boundary.
///
/// Every [`Feature`] should have an entry in `feature_permissions`; records
/// written by older versions may miss newer features and are backfilled on
/// load by the access layer's migration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    pub members: BTreeMap<UserId, WorkspaceMember>,
    pub feature_permissions: BTreeMap<Feature, FeaturePermission>,
    pub status: WorkspaceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Workspace {
    /// Role of the given user, if they are a member.
    pub fn member_role(&self, user_id: &UserId) -> Option<Role> {
        self.members.get(user_id).map(|m| m.role)
    }

    /// Ids of all members holding the `owner` role.
    pub fn owner_ids(&self) -> Vec<&UserId> {
        self.members
            .iter()
            .filter(|(_, m)| m.role.is_owner())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn is_suspended(&self) -> bool {
        self.status == WorkspaceStatus::Suspended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace_with(members: &[(&str, Role)]) -> Workspace {
        Workspace {
            id: WorkspaceId::from("ws_1"),
            name: "Test Farm".to_string(),
            members: members
                .iter()
                .map(|(id, role)| (UserId::from(*id), WorkspaceMember { role: *role }))
                .collect(),
            feature_permissions: BTreeMap::new(),
            status: WorkspaceStatus::Active,
            logo_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn member_role_lookup() {
        let ws = workspace_with(&[("user_a", Role::Owner), ("user_b", Role::Accountant)]);
        assert_eq!(ws.member_role(&UserId::from("user_a")), Some(Role::Owner));
        assert_eq!(
            ws.member_role(&UserId::from("user_b")),
            Some(Role::Accountant)
        );
        assert_eq!(ws.member_role(&UserId::from("user_c")), None);
    }

    #[test]
    fn owner_ids_filters_by_role() {
        let ws = workspace_with(&[
            ("user_a", Role::Owner),
            ("user_b", Role::Member),
            ("user_c", Role::Owner),
        ]);
        let mut owners: Vec<&str> = ws.owner_ids().iter().map(|id| id.as_str()).collect();
        owners.sort();
        assert_eq!(owners, ["user_a", "user_c"]);
    }

    #[test]
    fn workspace_serde_roundtrip() {
        let mut ws = workspace_with(&[("user_a", Role::Owner)]);
        ws.feature_permissions
            .insert(Feature::Admin, FeaturePermission::for_roles([Role::Owner]));

        let json = serde_json::to_string(&ws).unwrap();
        let back: Workspace = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ws);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&WorkspaceStatus::Suspended).unwrap(),
            "\"suspended\""
        );
    }
}
