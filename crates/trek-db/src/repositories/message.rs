//! PostgreSQL implementation of ChatMessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use trek_core::entities::ChatMessage;
use trek_core::traits::{ChatMessageRepository, RepoResult};
use trek_core::value_objects::PageRequest;

use crate::models::ChatMessageModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ChatMessageRepository
#[derive(Clone)]
pub struct PgChatMessageRepository {
    pool: PgPool,
}

impl PgChatMessageRepository {
    /// Create a new PgChatMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatMessageRepository for PgChatMessageRepository {
    #[instrument(skip(self))]
    async fn find_by_chat(
        &self,
        chat_id: Uuid,
        page: PageRequest,
    ) -> RepoResult<(Vec<ChatMessage>, i64)> {
        let models = sqlx::query_as::<_, ChatMessageModel>(
            r"
            SELECT id, chat_id, author_id, content, created_at, updated_at
            FROM chat_messages
            WHERE chat_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(chat_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM chat_messages WHERE chat_id = $1
            ",
        )
        .bind(chat_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok((models.into_iter().map(ChatMessage::from).collect(), total))
    }

    #[instrument(skip(self, message))]
    async fn create(&self, message: &ChatMessage) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO chat_messages (id, chat_id, author_id, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(message.id)
        .bind(message.chat_id)
        .bind(message.author_id)
        .bind(&message.content)
        .bind(message.created_at)
        .bind(message.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
