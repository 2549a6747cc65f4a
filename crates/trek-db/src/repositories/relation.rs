//! PostgreSQL implementation of RelationRepository
//!
//! The user_relations table carries a unique index over the unordered
//! user pair, so concurrent inserts for the same pair collapse into a
//! unique violation rather than a duplicate edge.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use trek_core::entities::{User, UserRelation};
use trek_core::error::DomainError;
use trek_core::traits::{RelationRepository, RepoResult};
use trek_core::value_objects::PageRequest;

use crate::mappers::relation_type_to_str;
use crate::models::{UserModel, UserRelationModel};

use super::error::{map_db_error, map_unique_violation, relation_not_found};

/// PostgreSQL implementation of RelationRepository
#[derive(Clone)]
pub struct PgRelationRepository {
    pool: PgPool,
}

impl PgRelationRepository {
    /// Create a new PgRelationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RelationRepository for PgRelationRepository {
    #[instrument(skip(self))]
    async fn find_between(&self, a: Uuid, b: Uuid) -> RepoResult<Option<UserRelation>> {
        let result = sqlx::query_as::<_, UserRelationModel>(
            r"
            SELECT sent_by_id, sent_to_id, relation_type, became_friends_at,
                   created_at, updated_at
            FROM user_relations
            WHERE (sent_by_id = $1 AND sent_to_id = $2)
               OR (sent_by_id = $2 AND sent_to_id = $1)
            ",
        )
        .bind(a)
        .bind(b)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(UserRelation::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_directed(&self, from: Uuid, to: Uuid) -> RepoResult<Option<UserRelation>> {
        let result = sqlx::query_as::<_, UserRelationModel>(
            r"
            SELECT sent_by_id, sent_to_id, relation_type, became_friends_at,
                   created_at, updated_at
            FROM user_relations
            WHERE sent_by_id = $1 AND sent_to_id = $2
            ",
        )
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(UserRelation::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_friends_of(
        &self,
        user: Uuid,
        page: PageRequest,
    ) -> RepoResult<(Vec<User>, i64)> {
        let models = sqlx::query_as::<_, UserModel>(
            r"
            SELECT u.id, u.username, u.full_name, u.email, u.bio, u.home_town,
                   u.created_at, u.updated_at
            FROM users u
            JOIN user_relations r
              ON (r.sent_by_id = $1 AND r.sent_to_id = u.id)
              OR (r.sent_to_id = $1 AND r.sent_by_id = u.id)
            WHERE r.relation_type = 'friend'
            ORDER BY u.username
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
            SELECT COUNT(*)
            FROM user_relations
            WHERE (sent_by_id = $1 OR sent_to_id = $1)
              AND relation_type = 'friend'
            ",
        )
        .bind(user)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }

    #[instrument(skip(self))]
    async fn find_pending_received(
        &self,
        user: Uuid,
        page: PageRequest,
    ) -> RepoResult<(Vec<UserRelation>, i64)> {
        let models = sqlx::query_as::<_, UserRelationModel>(
            r"
            SELECT sent_by_id, sent_to_id, relation_type, became_friends_at,
                   created_at, updated_at
            FROM user_relations
            WHERE sent_to_id = $1 AND relation_type = 'pending'
            ORDER BY created_at DESC
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
            SELECT COUNT(*)
            FROM user_relations
            WHERE sent_to_id = $1 AND relation_type = 'pending'
            ",
        )
        .bind(user)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let relations = models
            .into_iter()
            .map(UserRelation::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((relations, total))
    }

    #[instrument(skip(self))]
    async fn friend_ids_of(&self, user: Uuid) -> RepoResult<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r"
            SELECT CASE WHEN sent_by_id = $1 THEN sent_to_id ELSE sent_by_id END
            FROM user_relations
            WHERE (sent_by_id = $1 OR sent_to_id = $1)
              AND relation_type = 'friend'
            ",
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids)
    }

    #[instrument(skip(self))]
    async fn blocked_partner_ids(&self, user: Uuid) -> RepoResult<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r"
            SELECT CASE WHEN sent_by_id = $1 THEN sent_to_id ELSE sent_by_id END
            FROM user_relations
            WHERE (sent_by_id = $1 OR sent_to_id = $1)
              AND relation_type = 'blocked'
            ",
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids)
    }

    #[instrument(skip(self))]
    async fn create(&self, relation: &UserRelation) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO user_relations
                (sent_by_id, sent_to_id, relation_type, became_friends_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(relation.sent_by_id)
        .bind(relation.sent_to_id)
        .bind(relation_type_to_str(relation.relation_type))
        .bind(relation.became_friends_at)
        .bind(relation.created_at)
        .bind(relation.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::RelationExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(&self, relation: &UserRelation) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE user_relations
            SET sent_by_id = $1, sent_to_id = $2, relation_type = $3,
                became_friends_at = $4, updated_at = $5
            WHERE (sent_by_id = $1 AND sent_to_id = $2)
               OR (sent_by_id = $2 AND sent_to_id = $1)
            ",
        )
        .bind(relation.sent_by_id)
        .bind(relation.sent_to_id)
        .bind(relation_type_to_str(relation.relation_type))
        .bind(relation.became_friends_at)
        .bind(relation.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(relation_not_found());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, sent_by: Uuid, sent_to: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM user_relations
            WHERE sent_by_id = $1 AND sent_to_id = $2
            ",
        )
        .bind(sent_by)
        .bind(sent_to)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(relation_not_found());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgRelationRepository>();
    }
}
