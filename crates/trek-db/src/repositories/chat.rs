//! PostgreSQL implementation of ChatRepository
//!
//! Participants live in the chat_users join table; chat rows for private
//! chats also carry the normalized participant pair, which is unique so
//! two racing creations cannot produce a second chat for the same pair.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use trek_core::entities::{Chat, ChatUserRead};
use trek_core::error::DomainError;
use trek_core::traits::{ChatRepository, RepoResult};
use trek_core::value_objects::PageRequest;

use crate::models::{ChatModel, ChatUserReadModel};

use super::error::{chat_not_found, map_db_error, map_unique_violation};

/// PostgreSQL implementation of ChatRepository
#[derive(Clone)]
pub struct PgChatRepository {
    pool: PgPool,
}

impl PgChatRepository {
    /// Create a new PgChatRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRepository for PgChatRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Chat>> {
        let result = sqlx::query_as::<_, ChatModel>(
            r"
            SELECT c.id, c.created_at, c.updated_at,
                   (SELECT array_agg(user_id) FROM chat_users WHERE chat_id = c.id) AS user_ids
            FROM chats c
            WHERE c.id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Chat::from))
    }

    #[instrument(skip(self))]
    async fn find_private_between(&self, a: Uuid, b: Uuid) -> RepoResult<Option<Chat>> {
        let result = sqlx::query_as::<_, ChatModel>(
            r"
            SELECT c.id, c.created_at, c.updated_at,
                   (SELECT array_agg(user_id) FROM chat_users WHERE chat_id = c.id) AS user_ids
            FROM chats c
            WHERE c.private_pair_min = LEAST($1, $2)
              AND c.private_pair_max = GREATEST($1, $2)
            ",
        )
        .bind(a)
        .bind(b)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Chat::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user: Uuid, page: PageRequest) -> RepoResult<(Vec<Chat>, i64)> {
        let models = sqlx::query_as::<_, ChatModel>(
            r"
            SELECT c.id, c.created_at, c.updated_at,
                   (SELECT array_agg(user_id) FROM chat_users WHERE chat_id = c.id) AS user_ids
            FROM chats c
            WHERE EXISTS (SELECT 1 FROM chat_users WHERE chat_id = c.id AND user_id = $1)
            ORDER BY c.updated_at DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(user)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM chat_users WHERE user_id = $1
            ",
        )
        .bind(user)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok((models.into_iter().map(Chat::from).collect(), total))
    }

    #[instrument(skip(self))]
    async fn create(&self, chat: &Chat) -> RepoResult<()> {
        let pair = if chat.is_private() {
            let a = chat.user_ids[0];
            let b = chat.user_ids[1];
            Some((a.min(b), a.max(b)))
        } else {
            None
        };

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO chats (id, private_pair_min, private_pair_max, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(chat.id)
        .bind(pair.map(|(min, _)| min))
        .bind(pair.map(|(_, max)| max))
        .bind(chat.created_at)
        .bind(chat.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ChatExists))?;

        for user_id in &chat.user_ids {
            sqlx::query(
                r"
                INSERT INTO chat_users (chat_id, user_id) VALUES ($1, $2)
                ",
            )
            .bind(chat.id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn touch(&self, chat_id: Uuid, now: DateTime<Utc>) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE chats SET updated_at = $2 WHERE id = $1
            ",
        )
        .bind(chat_id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(chat_not_found(chat_id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_last_read(
        &self,
        chat_id: Uuid,
        user_id: Uuid,
    ) -> RepoResult<Option<ChatUserRead>> {
        let result = sqlx::query_as::<_, ChatUserReadModel>(
            r"
            SELECT chat_id, user_id, last_read_at
            FROM chat_user_reads
            WHERE chat_id = $1 AND user_id = $2
            ",
        )
        .bind(chat_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ChatUserRead::from))
    }

    #[instrument(skip(self))]
    async fn upsert_last_read(
        &self,
        chat_id: Uuid,
        user_id: Uuid,
        read_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO chat_user_reads (chat_id, user_id, last_read_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (chat_id, user_id)
            DO UPDATE SET last_read_at = EXCLUDED.last_read_at
            ",
        )
        .bind(chat_id)
        .bind(user_id)
        .bind(read_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgChatRepository>();
    }
}
