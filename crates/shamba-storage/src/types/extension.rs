//! Agricultural extension (AEO) types: farmer outreach records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{ArticleId, FarmerId, InteractionId, UserId};

/// A farmer tracked by an extension officer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Farmer {
    pub id: FarmerId,
    pub name: String,
    pub location: String,
    pub contact: String,
    /// Farm size in acres.
    pub farm_size: f64,
    pub crops: Vec<String>,
    pub notes: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionKind {
    Visit,
    Call,
    Meeting,
    Training,
}

/// One recorded contact between an extension officer and a farmer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: InteractionId,
    pub farmer_id: FarmerId,
    pub date: NaiveDate,
    pub kind: InteractionKind,
    pub summary: String,
    pub aeo_id: UserId,
}

/// Knowledge-base article maintained by extension staff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBaseArticle {
    pub id: ArticleId,
    pub title: String,
    pub category: String,
    pub content: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
