//! Friend service
//!
//! Drives the relation state machine: Pending -> Friend (accept) or
//! deletion (reject/unfriend), with Blocked overwriting any prior state
//! and deletion on unblock.

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use trek_core::entities::{User, UserRelation};
use trek_core::{DomainError, PageRequest, PageResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Friend service
pub struct FriendService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FriendService<'a> {
    /// Create a new FriendService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Send a friend request to another user
    #[instrument(skip(self))]
    pub async fn send_friend_request(
        &self,
        user_id: Uuid,
        to_user_id: Uuid,
    ) -> ServiceResult<UserRelation> {
        if user_id == to_user_id {
            return Err(DomainError::SelfRelation.into());
        }

        self.ctx
            .user_repo()
            .find_by_id(to_user_id)
            .await?
            .ok_or(DomainError::UserNotFound(to_user_id))?;

        // One edge per unordered pair, whichever way it points
        match self
            .ctx
            .relation_repo()
            .find_between(user_id, to_user_id)
            .await?
        {
            Some(edge) if edge.is_blocked() => return Err(DomainError::BlockedOrBlocking.into()),
            Some(_) => return Err(DomainError::RelationExists.into()),
            None => {}
        }

        let relation = UserRelation::pending(user_id, to_user_id);
        self.ctx.relation_repo().create(&relation).await?;

        info!(from = %user_id, to = %to_user_id, "Friend request sent");
        Ok(relation)
    }

    /// Accept a friend request sent by `from_user_id`
    #[instrument(skip(self))]
    pub async fn accept_friend_request(
        &self,
        user_id: Uuid,
        from_user_id: Uuid,
    ) -> ServiceResult<UserRelation> {
        let mut relation = self.received_request(from_user_id, user_id).await?;
        if !relation.is_pending() {
            return Err(DomainError::RelationNotPending.into());
        }

        relation.accept(Utc::now());
        self.ctx.relation_repo().update(&relation).await?;

        info!(user = %user_id, friend = %from_user_id, "Friend request accepted");
        Ok(relation)
    }

    /// Reject a friend request sent by `from_user_id`
    #[instrument(skip(self))]
    pub async fn reject_friend_request(
        &self,
        user_id: Uuid,
        from_user_id: Uuid,
    ) -> ServiceResult<()> {
        let relation = self.received_request(from_user_id, user_id).await?;
        if !relation.is_pending() {
            return Err(DomainError::RelationNotPending.into());
        }

        self.ctx
            .relation_repo()
            .delete(relation.sent_by_id, relation.sent_to_id)
            .await?;

        info!(user = %user_id, requester = %from_user_id, "Friend request rejected");
        Ok(())
    }

    /// End a friendship, whichever side created it
    #[instrument(skip(self))]
    pub async fn unfriend(&self, user_id: Uuid, other_user_id: Uuid) -> ServiceResult<()> {
        let relation = self
            .ctx
            .relation_repo()
            .find_between(user_id, other_user_id)
            .await?
            .ok_or(DomainError::RelationNotFound)?;

        if !relation.is_friend() {
            return Err(DomainError::RelationNotFriend.into());
        }

        self.ctx
            .relation_repo()
            .delete(relation.sent_by_id, relation.sent_to_id)
            .await?;

        info!(user = %user_id, other = %other_user_id, "Friendship ended");
        Ok(())
    }

    /// Block another user, overwriting any prior relation between the two
    #[instrument(skip(self))]
    pub async fn block_user(&self, user_id: Uuid, target_user_id: Uuid) -> ServiceResult<UserRelation> {
        if user_id == target_user_id {
            return Err(DomainError::SelfRelation.into());
        }

        self.ctx
            .user_repo()
            .find_by_id(target_user_id)
            .await?
            .ok_or(DomainError::UserNotFound(target_user_id))?;

        let relation = match self
            .ctx
            .relation_repo()
            .find_between(user_id, target_user_id)
            .await?
        {
            Some(edge) if edge.is_blocked() => return Err(DomainError::BlockedOrBlocking.into()),
            Some(mut edge) => {
                edge.block(user_id, Utc::now());
                self.ctx.relation_repo().update(&edge).await?;
                edge
            }
            None => {
                let edge = UserRelation::blocked(user_id, target_user_id);
                self.ctx.relation_repo().create(&edge).await?;
                edge
            }
        };

        info!(blocker = %user_id, blocked = %target_user_id, "User blocked");
        Ok(relation)
    }

    /// Remove a block this user issued
    #[instrument(skip(self))]
    pub async fn unblock_user(&self, user_id: Uuid, target_user_id: Uuid) -> ServiceResult<()> {
        // Direction-sensitive: only the blocker can unblock
        let relation = self
            .ctx
            .relation_repo()
            .find_directed(user_id, target_user_id)
            .await?
            .ok_or(DomainError::RelationNotFound)?;

        if !relation.is_blocked() {
            return Err(DomainError::RelationNotBlocked.into());
        }

        self.ctx
            .relation_repo()
            .delete(relation.sent_by_id, relation.sent_to_id)
            .await?;

        info!(user = %user_id, unblocked = %target_user_id, "User unblocked");
        Ok(())
    }

    /// The user's friends, one page at a time
    #[instrument(skip(self))]
    pub async fn get_friends(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<User>> {
        let (friends, total) = self.ctx.relation_repo().find_friends_of(user_id, page).await?;
        Ok(PageResponse::new(friends, page, total))
    }

    /// Pending requests the user has received, newest first
    #[instrument(skip(self))]
    pub async fn get_pending_requests(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<UserRelation>> {
        let (requests, total) = self
            .ctx
            .relation_repo()
            .find_pending_received(user_id, page)
            .await?;
        Ok(PageResponse::new(requests, page, total))
    }

    /// Look up the request `from` sent to `to`.
    ///
    /// A Blocked edge is indistinguishable from a missing one here:
    /// surfacing a distinct error would leak the block to the requester.
    async fn received_request(&self, from: Uuid, to: Uuid) -> ServiceResult<UserRelation> {
        match self.ctx.relation_repo().find_directed(from, to).await? {
            Some(edge) if edge.is_blocked() => Err(DomainError::RelationNotFound.into()),
            Some(edge) => Ok(edge),
            None => Err(DomainError::RelationNotFound.into()),
        }
    }
}
