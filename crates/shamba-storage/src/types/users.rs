//! User types.
//!
//! A user may belong to multiple workspaces; membership (and the role held)
//! is recorded per-workspace on the [`Workspace`](super::Workspace) record,
//! never on the user itself.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Lifecycle status of a user account, controlled by platform operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Suspended,
}

/// User record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub status: UserStatus,
}

impl User {
    pub fn is_suspended(&self) -> bool {
        self.status == UserStatus::Suspended
    }
}
