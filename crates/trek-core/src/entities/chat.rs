//! Chat entities - conversations, messages, and per-user read state

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Chat entity: a conversation container
///
/// A private chat has exactly two participants and is unique per unordered
/// user pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    pub id: Uuid,
    pub user_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chat {
    /// Create a private chat between two users
    pub fn private(id: Uuid, a: Uuid, b: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_ids: vec![a, b],
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_private(&self) -> bool {
        self.user_ids.len() == 2
    }

    /// Is `user` among the participants?
    pub fn is_participant(&self, user: Uuid) -> bool {
        self.user_ids.contains(&user)
    }

    /// In a private chat, the participant other than `user`
    pub fn other_participant(&self, user: Uuid) -> Option<Uuid> {
        if !self.is_participant(user) {
            return None;
        }
        self.user_ids.iter().copied().find(|&id| id != user)
    }
}

/// A single message inside a chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new ChatMessage
    pub fn new(id: Uuid, chat_id: Uuid, author_id: Uuid, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            chat_id,
            author_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// A message whose modification time moved past its creation time
    /// has been edited
    #[inline]
    pub fn is_edited(&self) -> bool {
        self.updated_at != self.created_at
    }

    /// Edit the message content
    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }
}

/// Per-user read marker: at most one row per (chat, user) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatUserRead {
    pub chat_id: Uuid,
    pub user_id: Uuid,
    pub last_read_at: DateTime<Utc>,
}

/// Count unread messages for `viewer` given the chat's messages ordered
/// newest first.
///
/// This is a prefix count of the most-recent run of other-authored unread
/// messages, not a full-history filter: the scan stops at the first message
/// that is either authored by the viewer or already read. An absent
/// `last_read` marker means the viewer has never read the chat.
pub fn unread_count(
    messages_newest_first: &[ChatMessage],
    viewer: Uuid,
    last_read: Option<DateTime<Utc>>,
) -> usize {
    messages_newest_first
        .iter()
        .take_while(|message| {
            message.author_id != viewer
                && last_read.map_or(true, |read_at| message.created_at > read_at)
        })
        .count()
}
