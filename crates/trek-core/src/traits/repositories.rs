//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Paged enumerations return the page of
//! items together with the unpaged total count. Queries whose result
//! depends on the clock take `now` as a parameter so callers (and tests)
//! control it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{Chat, ChatMessage, ChatUserRead, Location, User, UserRelation};
use crate::error::DomainError;
use crate::value_objects::PageRequest;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;

    /// Find user by exact username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Case-insensitive substring search over username and full name,
    /// skipping every id in `excluded_ids`, ordered by username
    async fn search_by_name(
        &self,
        term: &str,
        excluded_ids: &[Uuid],
        page: PageRequest,
    ) -> RepoResult<(Vec<User>, i64)>;

    /// Create a new user
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Update an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Delete a user
    async fn delete(&self, id: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Relation Repository
// ============================================================================

#[async_trait]
pub trait RelationRepository: Send + Sync {
    /// Find the relation between two users, in either direction
    ///
    /// The one "exists in either direction" lookup: every existence,
    /// friendship, or blocked check goes through this.
    async fn find_between(&self, a: Uuid, b: Uuid) -> RepoResult<Option<UserRelation>>;

    /// Find the relation sent by `from` to `to` (direction-sensitive)
    async fn find_directed(&self, from: Uuid, to: Uuid) -> RepoResult<Option<UserRelation>>;

    /// Users that `user` is friends with, ordered by username
    async fn find_friends_of(&self, user: Uuid, page: PageRequest)
        -> RepoResult<(Vec<User>, i64)>;

    /// Pending requests received by `user`, newest first
    async fn find_pending_received(
        &self,
        user: Uuid,
        page: PageRequest,
    ) -> RepoResult<(Vec<UserRelation>, i64)>;

    /// Ids of every friend of `user` (either direction)
    async fn friend_ids_of(&self, user: Uuid) -> RepoResult<Vec<Uuid>>;

    /// Ids of every user with a Blocked edge touching `user`, whoever
    /// issued the block
    async fn blocked_partner_ids(&self, user: Uuid) -> RepoResult<Vec<Uuid>>;

    /// Create a new relation edge
    async fn create(&self, relation: &UserRelation) -> RepoResult<()>;

    /// Update the edge between the relation's two users, matched in
    /// either direction (block may reorient the stored pair)
    async fn update(&self, relation: &UserRelation) -> RepoResult<()>;

    /// Delete the edge with this exact direction
    async fn delete(&self, sent_by: Uuid, sent_to: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Location Repository
// ============================================================================

#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Find location by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Location>>;

    /// The user's current location: a Visited stay whose interval
    /// contains `now` (open-ended counts), most recent arrival first
    async fn find_current(&self, user: Uuid, now: DateTime<Utc>) -> RepoResult<Option<Location>>;

    /// The user's Visited locations, by arrival then departure, descending
    async fn find_visited(
        &self,
        user: Uuid,
        page: PageRequest,
    ) -> RepoResult<(Vec<Location>, i64)>;

    /// The user's Planned locations that have not lapsed (open-ended or
    /// departing at/after `now`), by arrival then departure, ascending
    async fn find_planned(
        &self,
        user: Uuid,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> RepoResult<(Vec<Location>, i64)>;

    /// Current locations of the given users, most recent arrival first
    async fn find_current_for(
        &self,
        user_ids: &[Uuid],
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> RepoResult<(Vec<Location>, i64)>;

    /// Create a new location
    async fn create(&self, location: &Location) -> RepoResult<()>;

    /// Update an existing location
    async fn update(&self, location: &Location) -> RepoResult<()>;

    /// Delete a location
    async fn delete(&self, id: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Chat Repository
// ============================================================================

#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Find chat by ID (with its participant list)
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Chat>>;

    /// Find the private chat between two users, if any
    async fn find_private_between(&self, a: Uuid, b: Uuid) -> RepoResult<Option<Chat>>;

    /// Chats `user` participates in, most recently active first
    async fn find_by_user(&self, user: Uuid, page: PageRequest) -> RepoResult<(Vec<Chat>, i64)>;

    /// Create a chat with its participants
    async fn create(&self, chat: &Chat) -> RepoResult<()>;

    /// Bump the chat's modification time (new message activity)
    async fn touch(&self, chat_id: Uuid, now: DateTime<Utc>) -> RepoResult<()>;

    /// The viewer's read marker for a chat, if any
    async fn find_last_read(&self, chat_id: Uuid, user_id: Uuid)
        -> RepoResult<Option<ChatUserRead>>;

    /// Insert or update the (chat, user) read marker
    async fn upsert_last_read(
        &self,
        chat_id: Uuid,
        user_id: Uuid,
        read_at: DateTime<Utc>,
    ) -> RepoResult<()>;
}

// ============================================================================
// Chat Message Repository
// ============================================================================

#[async_trait]
pub trait ChatMessageRepository: Send + Sync {
    /// Messages in a chat, newest first
    async fn find_by_chat(
        &self,
        chat_id: Uuid,
        page: PageRequest,
    ) -> RepoResult<(Vec<ChatMessage>, i64)>;

    /// Create a new message
    async fn create(&self, message: &ChatMessage) -> RepoResult<()>;
}
