//! Database models - SQLx-compatible structs for PostgreSQL tables

mod chat;
mod location;
mod relation;
mod user;

pub use chat::{ChatMessageModel, ChatModel, ChatUserReadModel};
pub use location::LocationModel;
pub use relation::UserRelationModel;
pub use user::UserModel;
