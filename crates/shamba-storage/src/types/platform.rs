//! Platform-level (super-admin) configuration types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Feature, FeaturePermission};

/// Platform-wide configuration maintained from the operator console.
///
/// `feature_flags` can switch a feature off for the whole platform;
/// `default_permissions` seeds the permission map of newly created
/// workspaces and fills gaps during migration.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PlatformConfig {
    #[serde(default)]
    pub feature_flags: BTreeMap<Feature, bool>,
    #[serde(default)]
    pub default_permissions: BTreeMap<Feature, FeaturePermission>,
}

impl PlatformConfig {
    /// Whether a feature is enabled platform-wide. Features without a flag
    /// default to enabled.
    pub fn feature_enabled(&self, feature: Feature) -> bool {
        self.feature_flags.get(&feature).copied().unwrap_or(true)
    }
}
