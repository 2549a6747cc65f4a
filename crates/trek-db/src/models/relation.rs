//! User relation database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for user_relations table
///
/// One row per unordered user pair; `relation_type` is stored as its
/// stable string form.
#[derive(Debug, Clone, FromRow)]
pub struct UserRelationModel {
    pub sent_by_id: Uuid,
    pub sent_to_id: Uuid,
    pub relation_type: String,
    pub became_friends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
