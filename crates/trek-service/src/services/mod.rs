//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod chat;
pub mod context;
pub mod error;
pub mod friend;
pub mod location;
pub mod network;

mod validate;

// Re-export all services for convenience
pub use chat::{ChatService, ChatSummary};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use friend::FriendService;
pub use location::{LocationService, LocationUpdate};
pub use network::NetworkService;
