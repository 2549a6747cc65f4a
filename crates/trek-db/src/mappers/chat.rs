//! Chat entity <-> model mappers

use trek_core::entities::{Chat, ChatMessage, ChatUserRead};

use crate::models::{ChatMessageModel, ChatModel, ChatUserReadModel};

/// Convert ChatModel to Chat entity
impl From<ChatModel> for Chat {
    fn from(model: ChatModel) -> Self {
        Chat {
            id: model.id,
            user_ids: model.user_ids,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert ChatMessageModel to ChatMessage entity
impl From<ChatMessageModel> for ChatMessage {
    fn from(model: ChatMessageModel) -> Self {
        ChatMessage {
            id: model.id,
            chat_id: model.chat_id,
            author_id: model.author_id,
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert ChatUserReadModel to ChatUserRead entity
impl From<ChatUserReadModel> for ChatUserRead {
    fn from(model: ChatUserReadModel) -> Self {
        ChatUserRead {
            chat_id: model.chat_id,
            user_id: model.user_id,
            last_read_at: model.last_read_at,
        }
    }
}
