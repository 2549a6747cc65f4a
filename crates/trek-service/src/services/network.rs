//! Network service
//!
//! Viewer-relative queries over other users and their travel records.
//! Every result set is filtered by the viewer's relation to the
//! candidates: blocked pairs never see each other in search, and a
//! friend's locations are only visible while the friendship stands.

use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use trek_core::entities::{Location, User};
use trek_core::{DomainError, PageRequest, PageResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Network service
pub struct NetworkService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NetworkService<'a> {
    /// Create a new NetworkService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Search users by name, hiding the viewer and anyone in a blocked
    /// pair with the viewer, whichever side issued the block
    #[instrument(skip(self))]
    pub async fn search_users(
        &self,
        user_id: Uuid,
        term: &str,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<User>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(DomainError::InvalidInput("search term is blank".to_string()).into());
        }

        let mut excluded = self.ctx.relation_repo().blocked_partner_ids(user_id).await?;
        excluded.push(user_id);

        let (users, total) = self
            .ctx
            .user_repo()
            .search_by_name(term, &excluded, page)
            .await?;
        Ok(PageResponse::new(users, page, total))
    }

    /// Where the viewer's friends are right now, most recent arrival first
    #[instrument(skip(self))]
    pub async fn friends_current_locations(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<Location>> {
        let friend_ids = self.ctx.relation_repo().friend_ids_of(user_id).await?;
        if friend_ids.is_empty() {
            return Ok(PageResponse::new(Vec::new(), page, 0));
        }

        let (locations, total) = self
            .ctx
            .location_repo()
            .find_current_for(&friend_ids, Utc::now(), page)
            .await?;
        Ok(PageResponse::new(locations, page, total))
    }

    /// A friend's visited locations, most recent first
    #[instrument(skip(self))]
    pub async fn friend_visited_locations(
        &self,
        user_id: Uuid,
        friend_id: Uuid,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<Location>> {
        self.ensure_friends(user_id, friend_id).await?;

        let (locations, total) = self.ctx.location_repo().find_visited(friend_id, page).await?;
        Ok(PageResponse::new(locations, page, total))
    }

    /// A friend's upcoming planned locations, soonest first
    #[instrument(skip(self))]
    pub async fn friend_planned_locations(
        &self,
        user_id: Uuid,
        friend_id: Uuid,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<Location>> {
        self.ensure_friends(user_id, friend_id).await?;

        let (locations, total) = self
            .ctx
            .location_repo()
            .find_planned(friend_id, Utc::now(), page)
            .await?;
        Ok(PageResponse::new(locations, page, total))
    }

    /// Location access requires a standing friendship; a missing edge and
    /// a wrong-typed edge fail the same way, not with an empty page
    async fn ensure_friends(&self, user_id: Uuid, friend_id: Uuid) -> ServiceResult<()> {
        if user_id == friend_id {
            return Err(DomainError::SelfRelation.into());
        }

        match self
            .ctx
            .relation_repo()
            .find_between(user_id, friend_id)
            .await?
        {
            Some(edge) if edge.is_friend() => Ok(()),
            _ => Err(DomainError::RelationNotFriend.into()),
        }
    }
}
