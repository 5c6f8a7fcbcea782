//! Feature gating types.
//!
//! A [`Feature`] identifies one functional module of the application. The set
//! is closed and known at build time; the declared order here is the order
//! features appear in navigation.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Role;

/// A gated functional module of the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Feature {
    #[serde(rename = "Dashboard")]
    Dashboard,
    #[serde(rename = "Operations")]
    Operations,
    #[serde(rename = "Financials")]
    Financials,
    #[serde(rename = "HR")]
    Hr,
    #[serde(rename = "Inventory")]
    Inventory,
    #[serde(rename = "Plots & Seasons")]
    PlotsSeasons,
    #[serde(rename = "AEO")]
    Aeo,
    #[serde(rename = "AI Insights")]
    AiInsights,
    #[serde(rename = "Admin")]
    Admin,
    #[serde(rename = "Suppliers")]
    Suppliers,
    #[serde(rename = "Harvest & Sales")]
    HarvestSales,
    #[serde(rename = "How To")]
    HowTo,
    #[serde(rename = "FAQ")]
    Faq,
}

/// Error type for parsing Feature from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFeatureError(pub String);

impl std::fmt::Display for ParseFeatureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid feature: {}", self.0)
    }
}

impl std::error::Error for ParseFeatureError {}

impl Feature {
    /// Every feature, in declared navigation order.
    pub const ALL: [Feature; 13] = [
        Feature::Dashboard,
        Feature::Operations,
        Feature::Financials,
        Feature::Hr,
        Feature::Inventory,
        Feature::PlotsSeasons,
        Feature::Aeo,
        Feature::AiInsights,
        Feature::Admin,
        Feature::Suppliers,
        Feature::HarvestSales,
        Feature::HowTo,
        Feature::Faq,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Dashboard => "Dashboard",
            Feature::Operations => "Operations",
            Feature::Financials => "Financials",
            Feature::Hr => "HR",
            Feature::Inventory => "Inventory",
            Feature::PlotsSeasons => "Plots & Seasons",
            Feature::Aeo => "AEO",
            Feature::AiInsights => "AI Insights",
            Feature::Admin => "Admin",
            Feature::Suppliers => "Suppliers",
            Feature::HarvestSales => "Harvest & Sales",
            Feature::HowTo => "How To",
            Feature::Faq => "FAQ",
        }
    }
}

impl FromStr for Feature {
    type Err = ParseFeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ParseFeatureError(s.to_string()))
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-workspace visibility of one feature.
///
/// A feature is visible to a member iff `enabled` is true and the member's
/// role is in `allowed_roles`. Owners always see `Admin` regardless of the
/// stored permission; that override lives in the access layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturePermission {
    pub enabled: bool,
    pub allowed_roles: BTreeSet<Role>,
}

impl FeaturePermission {
    /// Enabled for every role.
    pub fn for_all_roles() -> Self {
        Self {
            enabled: true,
            allowed_roles: Role::ALL.into_iter().collect(),
        }
    }

    /// Enabled for the given roles only.
    pub fn for_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            enabled: true,
            allowed_roles: roles.into_iter().collect(),
        }
    }

    pub fn permits(&self, role: Role) -> bool {
        self.enabled && self.allowed_roles.contains(&role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_roundtrip() {
        for feature in Feature::ALL {
            let parsed: Feature = feature.as_str().parse().unwrap();
            assert_eq!(feature, parsed);
        }
    }

    #[test]
    fn test_feature_parse_invalid() {
        assert!("Plots and Seasons".parse::<Feature>().is_err());
        assert!("dashboard".parse::<Feature>().is_err());
        assert!("".parse::<Feature>().is_err());
    }

    #[test]
    fn test_feature_declared_order_is_stable() {
        assert_eq!(Feature::ALL[0], Feature::Dashboard);
        assert_eq!(Feature::ALL[8], Feature::Admin);
        assert_eq!(Feature::ALL[12], Feature::Faq);
    }

    #[test]
    fn test_feature_serde_uses_display_names() {
        let json = serde_json::to_string(&Feature::PlotsSeasons).unwrap();
        assert_eq!(json, "\"Plots & Seasons\"");
        let back: Feature = serde_json::from_str("\"AEO\"").unwrap();
        assert_eq!(back, Feature::Aeo);
    }

    #[test]
    fn test_permission_permits() {
        let perm = FeaturePermission::for_roles([Role::Owner, Role::Accountant]);
        assert!(perm.permits(Role::Owner));
        assert!(perm.permits(Role::Accountant));
        assert!(!perm.permits(Role::Member));
    }

    #[test]
    fn test_disabled_permission_permits_nobody() {
        let mut perm = FeaturePermission::for_all_roles();
        perm.enabled = false;
        assert!(!perm.permits(Role::Owner));
        assert!(!perm.permits(Role::Member));
    }

    #[test]
    fn test_for_all_roles_covers_every_role() {
        let perm = FeaturePermission::for_all_roles();
        for role in Role::ALL {
            assert!(perm.permits(role));
        }
    }
}
