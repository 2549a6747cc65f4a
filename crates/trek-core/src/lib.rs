//! # trek-core
//!
//! Domain layer containing entities, the relation state machine, paging
//! value objects, and repository traits. This crate has zero dependencies
//! on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    unread_count, Chat, ChatMessage, ChatUserRead, Location, LocationType, RelationType, User,
    UserRelation,
};
pub use error::DomainError;
pub use traits::{
    ChatMessageRepository, ChatRepository, LocationRepository, RelationRepository, RepoResult,
    UserRepository,
};
pub use value_objects::{PageRequest, PageResponse, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
