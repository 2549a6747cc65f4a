//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
///
/// Not-found variants are also used deliberately to mask unauthorized
/// access: a non-participant asking for a chat, or a non-owner asking for
/// a location, learns nothing beyond "no such thing".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Relation not found")]
    RelationNotFound,

    #[error("Location not found")]
    LocationNotFound,

    #[error("Chat not found: {0}")]
    ChatNotFound(Uuid),

    // =========================================================================
    // Input Errors
    // =========================================================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Operation requires another user than yourself")]
    SelfRelation,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("A relation with this user already exists")]
    RelationExists,

    #[error("One of the users has blocked the other")]
    BlockedOrBlocking,

    #[error("Relation is not a pending request")]
    RelationNotPending,

    #[error("Relation is not a friendship")]
    RelationNotFriend,

    #[error("Relation is not a block")]
    RelationNotBlocked,

    #[error("Location is not a planned location")]
    LocationNotPlanned,

    #[error("Location is not a visited location")]
    LocationNotVisited,

    #[error("A private chat with this user already exists")]
    ChatExists,

    // =========================================================================
    // Date Validation Errors
    // =========================================================================
    #[error("Arrival date must be in the future")]
    ArriveNotFuture,

    #[error("Arrival date must not be after the departure date")]
    ArriveAfterDepart,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::RelationNotFound => "UNKNOWN_RELATION",
            Self::LocationNotFound => "UNKNOWN_LOCATION",
            Self::ChatNotFound(_) => "UNKNOWN_CHAT",

            // Input
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::SelfRelation => "SELF_RELATION",

            // Conflict
            Self::RelationExists => "RELATION_EXISTS",
            Self::BlockedOrBlocking => "BLOCKED_OR_BLOCKING",
            Self::RelationNotPending => "RELATION_NOT_PENDING",
            Self::RelationNotFriend => "RELATION_NOT_FRIEND",
            Self::RelationNotBlocked => "RELATION_NOT_BLOCKED",
            Self::LocationNotPlanned => "LOCATION_NOT_PLANNED",
            Self::LocationNotVisited => "LOCATION_NOT_VISITED",
            Self::ChatExists => "CHAT_EXISTS",

            // Date Validation
            Self::ArriveNotFuture => "ARRIVE_NOT_FUTURE",
            Self::ArriveAfterDepart => "ARRIVE_AFTER_DEPART",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::RelationNotFound
                | Self::LocationNotFound
                | Self::ChatNotFound(_)
        )
    }

    /// Check if this is an input/validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::SelfRelation
                | Self::ArriveNotFuture
                | Self::ArriveAfterDepart
        )
    }

    /// Check if this is a state-conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::RelationExists
                | Self::BlockedOrBlocking
                | Self::RelationNotPending
                | Self::RelationNotFriend
                | Self::RelationNotBlocked
                | Self::LocationNotPlanned
                | Self::LocationNotVisited
                | Self::ChatExists
        )
    }
}
