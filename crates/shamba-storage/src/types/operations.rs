//! Operational types: plots, seasons and field tasks.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CommentId, InventoryItemId, PlotId, SeasonId, TaskId, UserId};

/// A cultivated plot of land.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    pub id: PlotId,
    pub name: String,
    pub crop: String,
    /// Area in acres.
    pub area: f64,
    pub soil_type: String,
}

/// A growing season within a year.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub name: String,
    pub year: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "To-Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Blocked,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

/// A comment left on a task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub author_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Inventory drawn down by completing a task.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryConsumption {
    pub inventory_id: InventoryItemId,
    pub quantity_used: f64,
}

/// A unit of field work assigned to a member.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub plot_id: PlotId,
    pub assignee_id: UserId,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
    pub cost: Decimal,
    pub priority: TaskPriority,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inventory_consumed: Vec<InventoryConsumption>,
}
