//! Strongly-typed identifiers (avoid mixing plain strings arbitrarily).
//!
//! The document store keys records by string ids. Generated ids follow the
//! `<entity>_<uuid-v7>` convention so they sort roughly by creation time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Generate a fresh id with the entity prefix.
            pub fn generate() -> Self {
                Self(format!(concat!($prefix, "_{}"), Uuid::now_v7()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// User identifier.
    UserId, "user"
);
string_id!(
    /// Workspace (tenant) identifier.
    WorkspaceId, "ws"
);
string_id!(
    /// Ledger account identifier.
    AccountId, "acc"
);
string_id!(
    /// Journal entry identifier.
    JournalEntryId, "je"
);
string_id!(
    /// Plot identifier.
    PlotId, "plot"
);
string_id!(
    /// Season identifier.
    SeasonId, "season"
);
string_id!(
    /// Task identifier.
    TaskId, "task"
);
string_id!(
    /// Task comment identifier.
    CommentId, "comment"
);
string_id!(
    /// Employee identifier.
    EmployeeId, "emp"
);
string_id!(
    /// Timesheet identifier.
    TimesheetId, "ts"
);
string_id!(
    /// Inventory item identifier.
    InventoryItemId, "inv"
);
string_id!(
    /// Farmer record identifier.
    FarmerId, "farmer"
);
string_id!(
    /// Extension interaction identifier.
    InteractionId, "interaction"
);
string_id!(
    /// Knowledge-base article identifier.
    ArticleId, "kb"
);
string_id!(
    /// Supplier identifier.
    SupplierId, "sup"
);
string_id!(
    /// Customer identifier.
    CustomerId, "cust"
);
string_id!(
    /// Harvest identifier.
    HarvestId, "harv"
);
string_id!(
    /// Sale identifier.
    SaleId, "sale"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_carry_entity_prefix() {
        assert!(UserId::generate().as_str().starts_with("user_"));
        assert!(WorkspaceId::generate().as_str().starts_with("ws_"));
        assert!(AccountId::generate().as_str().starts_with("acc_"));
        assert!(JournalEntryId::generate().as_str().starts_with("je_"));
        assert!(TimesheetId::generate().as_str().starts_with("ts_"));
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = AccountId::generate();
        let b = AccountId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn typed_ids_equality_and_hash() {
        use std::collections::HashSet;

        let id = UserId::from("user_1");
        let same = UserId::from("user_1");
        assert_eq!(id, same);

        let mut set = HashSet::new();
        set.insert(id);
        assert!(set.contains(&same));
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = PlotId::from("plot_42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"plot_42\"");
        let back: PlotId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn display_matches_inner() {
        let id = SaleId::from("sale_7");
        assert_eq!(id.to_string(), "sale_7");
    }
}
