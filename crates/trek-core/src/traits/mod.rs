//! Domain traits (ports)

mod repositories;

pub use repositories::{
    ChatMessageRepository, ChatRepository, LocationRepository, RelationRepository, RepoResult,
    UserRepository,
};
