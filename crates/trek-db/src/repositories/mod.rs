//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in trek-core.
//! Each repository handles database operations for a specific domain entity.

mod chat;
mod error;
mod location;
mod message;
mod relation;
mod user;

pub use chat::PgChatRepository;
pub use location::PgLocationRepository;
pub use message::PgChatMessageRepository;
pub use relation::PgRelationRepository;
pub use user::PgUserRepository;
