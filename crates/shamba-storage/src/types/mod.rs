//! Type definitions for shamba storage.

mod accounting;
mod extension;
mod features;
mod hr;
mod ids;
mod inventory;
mod operations;
mod platform;
mod roles;
mod trade;
mod users;
mod workspaces;

// Re-export all types from submodules
pub use accounting::*;
pub use extension::*;
pub use features::*;
pub use hr::*;
pub use ids::*;
pub use inventory::*;
pub use operations::*;
pub use platform::*;
pub use roles::*;
pub use trade::*;
pub use users::*;
pub use workspaces::*;
