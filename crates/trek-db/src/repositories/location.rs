//! PostgreSQL implementation of LocationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use trek_core::entities::Location;
use trek_core::traits::{LocationRepository, RepoResult};
use trek_core::value_objects::PageRequest;

use crate::mappers::location_type_to_str;
use crate::models::LocationModel;

use super::error::{location_not_found, map_db_error};

/// PostgreSQL implementation of LocationRepository
#[derive(Clone)]
pub struct PgLocationRepository {
    pool: PgPool,
}

impl PgLocationRepository {
    /// Create a new PgLocationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for PgLocationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Location>> {
        let result = sqlx::query_as::<_, LocationModel>(
            r"
            SELECT id, user_id, name, longitude, latitude, arrive_at, depart_at,
                   location_type, created_at, updated_at
            FROM locations
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Location::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_current(&self, user: Uuid, now: DateTime<Utc>) -> RepoResult<Option<Location>> {
        let result = sqlx::query_as::<_, LocationModel>(
            r"
            SELECT id, user_id, name, longitude, latitude, arrive_at, depart_at,
                   location_type, created_at, updated_at
            FROM locations
            WHERE user_id = $1
              AND location_type = 'visited'
              AND arrive_at <= $2
              AND (depart_at IS NULL OR depart_at >= $2)
            ORDER BY arrive_at DESC
            LIMIT 1
            ",
        )
        .bind(user)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Location::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_visited(
        &self,
        user: Uuid,
        page: PageRequest,
    ) -> RepoResult<(Vec<Location>, i64)> {
        let models = sqlx::query_as::<_, LocationModel>(
            r"
            SELECT id, user_id, name, longitude, latitude, arrive_at, depart_at,
                   location_type, created_at, updated_at
            FROM locations
            WHERE user_id = $1 AND location_type = 'visited'
            ORDER BY arrive_at DESC, depart_at DESC NULLS FIRST
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
            SELECT COUNT(*) FROM locations
            WHERE user_id = $1 AND location_type = 'visited'
            ",
        )
        .bind(user)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let locations = models
            .into_iter()
            .map(Location::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((locations, total))
    }

    #[instrument(skip(self))]
    async fn find_planned(
        &self,
        user: Uuid,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> RepoResult<(Vec<Location>, i64)> {
        let models = sqlx::query_as::<_, LocationModel>(
            r"
            SELECT id, user_id, name, longitude, latitude, arrive_at, depart_at,
                   location_type, created_at, updated_at
            FROM locations
            WHERE user_id = $1
              AND location_type = 'planned'
              AND (depart_at IS NULL OR depart_at >= $2)
            ORDER BY arrive_at ASC, depart_at ASC NULLS LAST
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(user)
        .bind(now)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM locations
            WHERE user_id = $1
              AND location_type = 'planned'
              AND (depart_at IS NULL OR depart_at >= $2)
            ",
        )
        .bind(user)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let locations = models
            .into_iter()
            .map(Location::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((locations, total))
    }

    #[instrument(skip(self))]
    async fn find_current_for(
        &self,
        user_ids: &[Uuid],
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> RepoResult<(Vec<Location>, i64)> {
        let models = sqlx::query_as::<_, LocationModel>(
            r"
            SELECT id, user_id, name, longitude, latitude, arrive_at, depart_at,
                   location_type, created_at, updated_at
            FROM locations
            WHERE user_id = ANY($1)
              AND location_type = 'visited'
              AND arrive_at <= $2
              AND (depart_at IS NULL OR depart_at >= $2)
            ORDER BY arrive_at DESC
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(user_ids)
        .bind(now)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM locations
            WHERE user_id = ANY($1)
              AND location_type = 'visited'
              AND arrive_at <= $2
              AND (depart_at IS NULL OR depart_at >= $2)
            ",
        )
        .bind(user_ids)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let locations = models
            .into_iter()
            .map(Location::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((locations, total))
    }

    #[instrument(skip(self))]
    async fn create(&self, location: &Location) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO locations
                (id, user_id, name, longitude, latitude, arrive_at, depart_at,
                 location_type, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(location.id)
        .bind(location.user_id)
        .bind(&location.name)
        .bind(location.longitude)
        .bind(location.latitude)
        .bind(location.arrive_at)
        .bind(location.depart_at)
        .bind(location_type_to_str(location.location_type))
        .bind(location.created_at)
        .bind(location.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(&self, location: &Location) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE locations
            SET name = $2, longitude = $3, latitude = $4, arrive_at = $5,
                depart_at = $6, updated_at = $7
            WHERE id = $1
            ",
        )
        .bind(location.id)
        .bind(&location.name)
        .bind(location.longitude)
        .bind(location.latitude)
        .bind(location.arrive_at)
        .bind(location.depart_at)
        .bind(location.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(location_not_found());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM locations WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(location_not_found());
        }

        Ok(())
    }
}
