//! # trek-service
//!
//! Application layer containing business logic and use cases. Every
//! service method takes the acting user's id explicitly and runs its
//! guard pipeline before touching the store.

pub mod services;

pub use services::{
    ChatService, ChatSummary, FriendService, LocationService, LocationUpdate, NetworkService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
