//! Service context - dependency container for services
//!
//! Holds the repository implementations every service needs. Repositories
//! are injected as `Arc<dyn Trait>`, so tests can swap in in-memory
//! doubles without a database.

use std::sync::Arc;

use trek_core::traits::{
    ChatMessageRepository, ChatRepository, LocationRepository, RelationRepository, UserRepository,
};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    relation_repo: Arc<dyn RelationRepository>,
    location_repo: Arc<dyn LocationRepository>,
    chat_repo: Arc<dyn ChatRepository>,
    message_repo: Arc<dyn ChatMessageRepository>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        relation_repo: Arc<dyn RelationRepository>,
        location_repo: Arc<dyn LocationRepository>,
        chat_repo: Arc<dyn ChatRepository>,
        message_repo: Arc<dyn ChatMessageRepository>,
    ) -> Self {
        Self {
            user_repo,
            relation_repo,
            location_repo,
            chat_repo,
            message_repo,
        }
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the relation repository
    pub fn relation_repo(&self) -> &dyn RelationRepository {
        self.relation_repo.as_ref()
    }

    /// Get the location repository
    pub fn location_repo(&self) -> &dyn LocationRepository {
        self.location_repo.as_ref()
    }

    /// Get the chat repository
    pub fn chat_repo(&self) -> &dyn ChatRepository {
        self.chat_repo.as_ref()
    }

    /// Get the chat message repository
    pub fn message_repo(&self) -> &dyn ChatMessageRepository {
        self.message_repo.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating a ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    relation_repo: Option<Arc<dyn RelationRepository>>,
    location_repo: Option<Arc<dyn LocationRepository>>,
    chat_repo: Option<Arc<dyn ChatRepository>>,
    message_repo: Option<Arc<dyn ChatMessageRepository>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn relation_repo(mut self, repo: Arc<dyn RelationRepository>) -> Self {
        self.relation_repo = Some(repo);
        self
    }

    pub fn location_repo(mut self, repo: Arc<dyn LocationRepository>) -> Self {
        self.location_repo = Some(repo);
        self
    }

    pub fn chat_repo(mut self, repo: Arc<dyn ChatRepository>) -> Self {
        self.chat_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn ChatMessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    /// Build the context
    ///
    /// # Errors
    /// Returns the name of the first missing repository.
    pub fn build(self) -> Result<ServiceContext, &'static str> {
        Ok(ServiceContext {
            user_repo: self.user_repo.ok_or("user_repo")?,
            relation_repo: self.relation_repo.ok_or("relation_repo")?,
            location_repo: self.location_repo.ok_or("location_repo")?,
            chat_repo: self.chat_repo.ok_or("chat_repo")?,
            message_repo: self.message_repo.ok_or("message_repo")?,
        })
    }
}
