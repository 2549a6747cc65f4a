//! Chat database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for chats, with the participant list aggregated from
/// chat_users
#[derive(Debug, Clone, FromRow)]
pub struct ChatModel {
    pub id: Uuid,
    pub user_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for chat_messages table
#[derive(Debug, Clone, FromRow)]
pub struct ChatMessageModel {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for chat_user_reads table
#[derive(Debug, Clone, FromRow)]
pub struct ChatUserReadModel {
    pub chat_id: Uuid,
    pub user_id: Uuid,
    pub last_read_at: DateTime<Utc>,
}
