//! Chat service
//!
//! Private conversations between users. Every read or write first passes
//! the participancy gate: a non-participant gets `ChatNotFound`, the same
//! answer as for a chat that does not exist, so chat existence is never
//! leaked.

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use trek_core::entities::{unread_count, Chat, ChatMessage};
use trek_core::{DomainError, PageRequest, PageResponse, MAX_PAGE_SIZE};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::validate::non_blank;

/// A chat as listed for one viewer: the newest message plus how many
/// messages the viewer has not read yet
#[derive(Debug, Clone)]
pub struct ChatSummary {
    pub chat: Chat,
    pub last_message: Option<ChatMessage>,
    pub unread_count: usize,
}

/// Chat service
pub struct ChatService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChatService<'a> {
    /// Create a new ChatService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Start a private chat with another user, seeded with a first message
    #[instrument(skip(self, first_message))]
    pub async fn start_private_chat(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
        first_message: &str,
    ) -> ServiceResult<Chat> {
        if user_id == other_user_id {
            return Err(DomainError::SelfRelation.into());
        }

        self.ctx
            .user_repo()
            .find_by_id(other_user_id)
            .await?
            .ok_or(DomainError::UserNotFound(other_user_id))?;

        if let Some(edge) = self
            .ctx
            .relation_repo()
            .find_between(user_id, other_user_id)
            .await?
        {
            if edge.is_blocked() {
                return Err(DomainError::BlockedOrBlocking.into());
            }
        }

        // One private chat per unordered pair
        if self
            .ctx
            .chat_repo()
            .find_private_between(user_id, other_user_id)
            .await?
            .is_some()
        {
            return Err(DomainError::ChatExists.into());
        }

        let content = non_blank(first_message, "message content")?;

        let chat = Chat::private(Uuid::new_v4(), user_id, other_user_id);
        self.ctx.chat_repo().create(&chat).await?;

        let message = ChatMessage::new(Uuid::new_v4(), chat.id, user_id, content);
        self.ctx.message_repo().create(&message).await?;

        // The sender has obviously seen their own opener
        self.ctx
            .chat_repo()
            .upsert_last_read(chat.id, user_id, Utc::now())
            .await?;

        info!(chat = %chat.id, user = %user_id, other = %other_user_id, "Private chat started");
        Ok(chat)
    }

    /// Append a message to a chat the user participates in
    #[instrument(skip(self, content))]
    pub async fn create_message(
        &self,
        user_id: Uuid,
        chat_id: Uuid,
        content: &str,
    ) -> ServiceResult<ChatMessage> {
        let chat = self.participant_chat(chat_id, user_id).await?;
        let content = non_blank(content, "message content")?;

        let now = Utc::now();
        let message = ChatMessage::new(Uuid::new_v4(), chat.id, user_id, content);
        self.ctx.message_repo().create(&message).await?;
        self.ctx.chat_repo().touch(chat.id, now).await?;
        self.ctx
            .chat_repo()
            .upsert_last_read(chat.id, user_id, now)
            .await?;

        info!(chat = %chat_id, author = %user_id, "Chat message created");
        Ok(message)
    }

    /// Mark the chat read for this user as of now
    #[instrument(skip(self))]
    pub async fn read_chat(&self, user_id: Uuid, chat_id: Uuid) -> ServiceResult<()> {
        let chat = self.participant_chat(chat_id, user_id).await?;
        self.ctx
            .chat_repo()
            .upsert_last_read(chat.id, user_id, Utc::now())
            .await?;
        Ok(())
    }

    /// One page of the chat's messages, newest first
    #[instrument(skip(self))]
    pub async fn get_messages(
        &self,
        user_id: Uuid,
        chat_id: Uuid,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<ChatMessage>> {
        let chat = self.participant_chat(chat_id, user_id).await?;
        let (messages, total) = self.ctx.message_repo().find_by_chat(chat.id, page).await?;
        Ok(PageResponse::new(messages, page, total))
    }

    /// The viewer's chats with their unread counts, most recently active first
    #[instrument(skip(self))]
    pub async fn get_chats(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<ChatSummary>> {
        let (chats, total) = self.ctx.chat_repo().find_by_user(user_id, page).await?;

        let mut summaries = Vec::with_capacity(chats.len());
        for chat in chats {
            let unread = self.count_unread(&chat, user_id).await?;
            let (messages, _) = self
                .ctx
                .message_repo()
                .find_by_chat(chat.id, PageRequest::new(1, 1))
                .await?;
            summaries.push(ChatSummary {
                last_message: messages.into_iter().next(),
                unread_count: unread,
                chat,
            });
        }

        Ok(PageResponse::new(summaries, page, total))
    }

    /// How many messages the viewer has not read in one chat
    #[instrument(skip(self))]
    pub async fn unread_count_for(&self, user_id: Uuid, chat_id: Uuid) -> ServiceResult<usize> {
        let chat = self.participant_chat(chat_id, user_id).await?;
        self.count_unread(&chat, user_id).await
    }

    async fn count_unread(&self, chat: &Chat, user_id: Uuid) -> ServiceResult<usize> {
        let last_read = self
            .ctx
            .chat_repo()
            .find_last_read(chat.id, user_id)
            .await?
            .map(|read| read.last_read_at);

        // The unread run can be longer than one page, so keep fetching
        // until the prefix scan breaks or the chat runs out of messages
        let mut total = 0;
        let mut page_number = 1;
        loop {
            let (messages, _) = self
                .ctx
                .message_repo()
                .find_by_chat(chat.id, PageRequest::new(page_number, MAX_PAGE_SIZE))
                .await?;
            let run = unread_count(&messages, user_id, last_read);
            total += run;
            let page_exhausted = (messages.len() as i64) < MAX_PAGE_SIZE;
            if run < messages.len() || page_exhausted {
                break;
            }
            page_number += 1;
        }
        Ok(total)
    }

    /// Participancy gate: outsiders get the not-found answer
    async fn participant_chat(&self, chat_id: Uuid, user_id: Uuid) -> ServiceResult<Chat> {
        let chat = self
            .ctx
            .chat_repo()
            .find_by_id(chat_id)
            .await?
            .ok_or(DomainError::ChatNotFound(chat_id))?;

        if !chat.is_participant(user_id) {
            return Err(DomainError::ChatNotFound(chat_id).into());
        }
        Ok(chat)
    }
}
