//! Domain entities

mod chat;
mod location;
mod relation;
mod user;

pub use chat::{unread_count, Chat, ChatMessage, ChatUserRead};
pub use location::{Location, LocationType};
pub use relation::{RelationType, UserRelation};
pub use user::User;
