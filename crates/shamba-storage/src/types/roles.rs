//! Role types for workspace membership.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role held by a user within one workspace.
///
/// Closed set; the string forms are the spellings stored in workspace
/// records, so `FromStr`/`as_str` must round-trip exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "owner")]
    Owner,
    #[serde(rename = "member")]
    Member,
    #[serde(rename = "Office Manager")]
    OfficeManager,
    #[serde(rename = "Accountant")]
    Accountant,
    #[serde(rename = "PeopleHR")]
    PeopleHr,
    #[serde(rename = "Agr_iEx_Off")]
    ExtensionOfficer,
    #[serde(rename = "Field Manager")]
    FieldManager,
    #[serde(rename = "Farm Manager")]
    FarmManager,
    #[serde(rename = "Field Officer")]
    FieldOfficer,
}

/// Error type for parsing Role from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(pub String);

impl std::fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid role: {}", self.0)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Role::Owner),
            "member" => Ok(Role::Member),
            "Office Manager" => Ok(Role::OfficeManager),
            "Accountant" => Ok(Role::Accountant),
            "PeopleHR" => Ok(Role::PeopleHr),
            "Agr_iEx_Off" => Ok(Role::ExtensionOfficer),
            "Field Manager" => Ok(Role::FieldManager),
            "Farm Manager" => Ok(Role::FarmManager),
            "Field Officer" => Ok(Role::FieldOfficer),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

impl Role {
    /// Every role, in declared order.
    pub const ALL: [Role; 9] = [
        Role::Owner,
        Role::Member,
        Role::OfficeManager,
        Role::Accountant,
        Role::PeopleHr,
        Role::ExtensionOfficer,
        Role::FieldManager,
        Role::FarmManager,
        Role::FieldOfficer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Member => "member",
            Role::OfficeManager => "Office Manager",
            Role::Accountant => "Accountant",
            Role::PeopleHr => "PeopleHR",
            Role::ExtensionOfficer => "Agr_iEx_Off",
            Role::FieldManager => "Field Manager",
            Role::FarmManager => "Farm Manager",
            Role::FieldOfficer => "Field Officer",
        }
    }

    /// Whether this role administers the workspace.
    pub fn is_owner(&self) -> bool {
        matches!(self, Role::Owner)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("owner".parse::<Role>().unwrap(), Role::Owner);
        assert_eq!("member".parse::<Role>().unwrap(), Role::Member);
        assert_eq!("Farm Manager".parse::<Role>().unwrap(), Role::FarmManager);
        assert_eq!(
            "Agr_iEx_Off".parse::<Role>().unwrap(),
            Role::ExtensionOfficer
        );
    }

    #[test]
    fn test_role_parse_invalid() {
        assert!("invalid".parse::<Role>().is_err());
        assert!("Owner".parse::<Role>().is_err()); // Case sensitive
        assert!("OWNER".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_roundtrip() {
        for role in Role::ALL {
            let s = role.as_str();
            let parsed: Role = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_role_serde_uses_stored_spellings() {
        let json = serde_json::to_string(&Role::ExtensionOfficer).unwrap();
        assert_eq!(json, "\"Agr_iEx_Off\"");
        let back: Role = serde_json::from_str("\"PeopleHR\"").unwrap();
        assert_eq!(back, Role::PeopleHr);
    }

    #[test]
    fn test_role_is_owner() {
        assert!(Role::Owner.is_owner());
        assert!(!Role::Member.is_owner());
        assert!(!Role::FarmManager.is_owner());
    }

    #[test]
    fn test_role_is_copy() {
        let role = Role::Accountant;
        let copied = role; // Copy, not move
        assert_eq!(role, copied); // Original still valid
    }

    #[test]
    fn test_parse_role_error_display() {
        let err = ParseRoleError("unknown".to_string());
        assert!(err.to_string().contains("unknown"));
    }
}
