//! In-memory repository backend for service tests
//!
//! One `TestBackend` implements every repository trait over plain vectors,
//! honoring the same contracts the PostgreSQL implementations do: ordering,
//! either-direction relation matching, and the unique-pair constraints.

#![allow(dead_code)]

use std::cmp::Reverse;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use trek_core::entities::{Chat, ChatMessage, ChatUserRead, Location, User, UserRelation};
use trek_core::traits::{
    ChatMessageRepository, ChatRepository, LocationRepository, RelationRepository, RepoResult,
    UserRepository,
};
use trek_core::{DomainError, PageRequest};
use trek_service::ServiceContext;

/// Slice a full result set down to the requested page, keeping the total
fn page_slice<T: Clone>(items: &[T], page: PageRequest) -> (Vec<T>, i64) {
    let total = items.len() as i64;
    let start = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let len = usize::try_from(page.limit()).unwrap_or(0);
    let paged = items.iter().skip(start).take(len).cloned().collect();
    (paged, total)
}

#[derive(Default)]
pub struct TestBackend {
    users: Mutex<Vec<User>>,
    relations: Mutex<Vec<UserRelation>>,
    locations: Mutex<Vec<Location>>,
    chats: Mutex<Vec<Chat>>,
    messages: Mutex<Vec<ChatMessage>>,
    reads: Mutex<Vec<ChatUserRead>>,
}

impl TestBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Build a service context where every repository is this backend
    pub fn context(self: &Arc<Self>) -> ServiceContext {
        ServiceContext::new(
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
        )
    }

    // ------------------------------------------------------------------
    // Fixtures
    // ------------------------------------------------------------------

    pub fn add_user(&self, username: &str) -> User {
        let user = User::new(
            Uuid::new_v4(),
            username.to_string(),
            format!("{username} Traveller"),
            format!("{username}@example.com"),
        );
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn add_named_user(&self, username: &str, full_name: &str) -> User {
        let mut user = self.add_user(username);
        user.full_name = full_name.to_string();
        let mut users = self.users.lock().unwrap();
        let slot = users.iter_mut().find(|u| u.id == user.id).unwrap();
        slot.full_name = user.full_name.clone();
        user
    }

    pub fn add_pending(&self, from: Uuid, to: Uuid) -> UserRelation {
        let edge = UserRelation::pending(from, to);
        self.relations.lock().unwrap().push(edge.clone());
        edge
    }

    pub fn add_friends(&self, a: Uuid, b: Uuid) -> UserRelation {
        let mut edge = UserRelation::pending(a, b);
        edge.accept(Utc::now());
        self.relations.lock().unwrap().push(edge.clone());
        edge
    }

    pub fn add_blocked(&self, blocker: Uuid, blocked: Uuid) -> UserRelation {
        let edge = UserRelation::blocked(blocker, blocked);
        self.relations.lock().unwrap().push(edge.clone());
        edge
    }

    pub fn add_location(&self, location: Location) -> Location {
        self.locations.lock().unwrap().push(location.clone());
        location
    }

    pub fn add_chat(&self, a: Uuid, b: Uuid) -> Chat {
        let chat = Chat::private(Uuid::new_v4(), a, b);
        self.chats.lock().unwrap().push(chat.clone());
        chat
    }

    /// Seed a message with an explicit creation time
    pub fn add_message_at(
        &self,
        chat_id: Uuid,
        author_id: Uuid,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> ChatMessage {
        let mut message = ChatMessage::new(Uuid::new_v4(), chat_id, author_id, content.to_string());
        message.created_at = created_at;
        message.updated_at = created_at;
        self.messages.lock().unwrap().push(message.clone());
        message
    }

    pub fn relation_between(&self, a: Uuid, b: Uuid) -> Option<UserRelation> {
        self.relations
            .lock()
            .unwrap()
            .iter()
            .find(|edge| edge.links(a, b))
            .cloned()
    }
}

#[async_trait]
impl UserRepository for TestBackend {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn search_by_name(
        &self,
        term: &str,
        excluded_ids: &[Uuid],
        page: PageRequest,
    ) -> RepoResult<(Vec<User>, i64)> {
        let needle = term.to_lowercase();
        let mut matches: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| !excluded_ids.contains(&u.id))
            .filter(|u| {
                u.username.to_lowercase().contains(&needle)
                    || u.full_name.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(page_slice(&matches, page))
    }

    async fn create(&self, user: &User) -> RepoResult<()> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(())
            }
            None => Err(DomainError::UserNotFound(user.id)),
        }
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(DomainError::UserNotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl RelationRepository for TestBackend {
    async fn find_between(&self, a: Uuid, b: Uuid) -> RepoResult<Option<UserRelation>> {
        Ok(self.relation_between(a, b))
    }

    async fn find_directed(&self, from: Uuid, to: Uuid) -> RepoResult<Option<UserRelation>> {
        Ok(self
            .relations
            .lock()
            .unwrap()
            .iter()
            .find(|edge| edge.sent_by_id == from && edge.sent_to_id == to)
            .cloned())
    }

    async fn find_friends_of(
        &self,
        user: Uuid,
        page: PageRequest,
    ) -> RepoResult<(Vec<User>, i64)> {
        let friend_ids = self.friend_ids_of(user).await?;
        let mut friends: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| friend_ids.contains(&u.id))
            .cloned()
            .collect();
        friends.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(page_slice(&friends, page))
    }

    async fn find_pending_received(
        &self,
        user: Uuid,
        page: PageRequest,
    ) -> RepoResult<(Vec<UserRelation>, i64)> {
        let mut pending: Vec<UserRelation> = self
            .relations
            .lock()
            .unwrap()
            .iter()
            .filter(|edge| edge.sent_to_id == user && edge.is_pending())
            .cloned()
            .collect();
        pending.sort_by_key(|edge| Reverse(edge.created_at));
        Ok(page_slice(&pending, page))
    }

    async fn friend_ids_of(&self, user: Uuid) -> RepoResult<Vec<Uuid>> {
        Ok(self
            .relations
            .lock()
            .unwrap()
            .iter()
            .filter(|edge| edge.is_friend() && edge.involves(user))
            .filter_map(|edge| edge.other_party(user))
            .collect())
    }

    async fn blocked_partner_ids(&self, user: Uuid) -> RepoResult<Vec<Uuid>> {
        Ok(self
            .relations
            .lock()
            .unwrap()
            .iter()
            .filter(|edge| edge.is_blocked() && edge.involves(user))
            .filter_map(|edge| edge.other_party(user))
            .collect())
    }

    async fn create(&self, relation: &UserRelation) -> RepoResult<()> {
        let mut relations = self.relations.lock().unwrap();
        // Same unique-pair constraint the database index enforces
        if relations
            .iter()
            .any(|edge| edge.links(relation.sent_by_id, relation.sent_to_id))
        {
            return Err(DomainError::RelationExists);
        }
        relations.push(relation.clone());
        Ok(())
    }

    async fn update(&self, relation: &UserRelation) -> RepoResult<()> {
        let mut relations = self.relations.lock().unwrap();
        match relations
            .iter_mut()
            .find(|edge| edge.links(relation.sent_by_id, relation.sent_to_id))
        {
            Some(slot) => {
                *slot = relation.clone();
                Ok(())
            }
            None => Err(DomainError::RelationNotFound),
        }
    }

    async fn delete(&self, sent_by: Uuid, sent_to: Uuid) -> RepoResult<()> {
        let mut relations = self.relations.lock().unwrap();
        let before = relations.len();
        relations.retain(|edge| !(edge.sent_by_id == sent_by && edge.sent_to_id == sent_to));
        if relations.len() == before {
            return Err(DomainError::RelationNotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl LocationRepository for TestBackend {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Location>> {
        Ok(self
            .locations
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }

    async fn find_current(&self, user: Uuid, now: DateTime<Utc>) -> RepoResult<Option<Location>> {
        let mut current: Vec<Location> = self
            .locations
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.user_id == user && l.is_current(now))
            .cloned()
            .collect();
        current.sort_by_key(|l| Reverse(l.arrive_at));
        Ok(current.into_iter().next())
    }

    async fn find_visited(
        &self,
        user: Uuid,
        page: PageRequest,
    ) -> RepoResult<(Vec<Location>, i64)> {
        let mut visited: Vec<Location> = self
            .locations
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.user_id == user && l.is_visited())
            .cloned()
            .collect();
        // Open-ended stays sort as the latest departure
        visited.sort_by_key(|l| {
            Reverse((l.arrive_at, l.depart_at.unwrap_or(DateTime::<Utc>::MAX_UTC)))
        });
        Ok(page_slice(&visited, page))
    }

    async fn find_planned(
        &self,
        user: Uuid,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> RepoResult<(Vec<Location>, i64)> {
        let mut planned: Vec<Location> = self
            .locations
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.user_id == user && l.is_planned())
            .filter(|l| l.depart_at.map_or(true, |depart| depart >= now))
            .cloned()
            .collect();
        planned.sort_by_key(|l| (l.arrive_at, l.depart_at.unwrap_or(DateTime::<Utc>::MAX_UTC)));
        Ok(page_slice(&planned, page))
    }

    async fn find_current_for(
        &self,
        user_ids: &[Uuid],
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> RepoResult<(Vec<Location>, i64)> {
        let mut current: Vec<Location> = self
            .locations
            .lock()
            .unwrap()
            .iter()
            .filter(|l| user_ids.contains(&l.user_id) && l.is_current(now))
            .cloned()
            .collect();
        current.sort_by_key(|l| Reverse(l.arrive_at));
        Ok(page_slice(&current, page))
    }

    async fn create(&self, location: &Location) -> RepoResult<()> {
        self.locations.lock().unwrap().push(location.clone());
        Ok(())
    }

    async fn update(&self, location: &Location) -> RepoResult<()> {
        let mut locations = self.locations.lock().unwrap();
        match locations.iter_mut().find(|l| l.id == location.id) {
            Some(slot) => {
                *slot = location.clone();
                Ok(())
            }
            None => Err(DomainError::LocationNotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let mut locations = self.locations.lock().unwrap();
        let before = locations.len();
        locations.retain(|l| l.id != id);
        if locations.len() == before {
            return Err(DomainError::LocationNotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl ChatRepository for TestBackend {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Chat>> {
        Ok(self
            .chats
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn find_private_between(&self, a: Uuid, b: Uuid) -> RepoResult<Option<Chat>> {
        Ok(self
            .chats
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.is_private() && c.is_participant(a) && c.is_participant(b))
            .cloned())
    }

    async fn find_by_user(&self, user: Uuid, page: PageRequest) -> RepoResult<(Vec<Chat>, i64)> {
        let mut chats: Vec<Chat> = self
            .chats
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.is_participant(user))
            .cloned()
            .collect();
        chats.sort_by_key(|c| Reverse(c.updated_at));
        Ok(page_slice(&chats, page))
    }

    async fn create(&self, chat: &Chat) -> RepoResult<()> {
        let mut chats = self.chats.lock().unwrap();
        // Same unique private-pair constraint the database index enforces
        if chat.is_private()
            && chats.iter().any(|c| {
                c.is_private()
                    && c.is_participant(chat.user_ids[0])
                    && c.is_participant(chat.user_ids[1])
            })
        {
            return Err(DomainError::ChatExists);
        }
        chats.push(chat.clone());
        Ok(())
    }

    async fn touch(&self, chat_id: Uuid, now: DateTime<Utc>) -> RepoResult<()> {
        let mut chats = self.chats.lock().unwrap();
        match chats.iter_mut().find(|c| c.id == chat_id) {
            Some(chat) => {
                chat.updated_at = now;
                Ok(())
            }
            None => Err(DomainError::ChatNotFound(chat_id)),
        }
    }

    async fn find_last_read(
        &self,
        chat_id: Uuid,
        user_id: Uuid,
    ) -> RepoResult<Option<ChatUserRead>> {
        Ok(self
            .reads
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.chat_id == chat_id && r.user_id == user_id)
            .cloned())
    }

    async fn upsert_last_read(
        &self,
        chat_id: Uuid,
        user_id: Uuid,
        read_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        let mut reads = self.reads.lock().unwrap();
        match reads
            .iter_mut()
            .find(|r| r.chat_id == chat_id && r.user_id == user_id)
        {
            Some(marker) => marker.last_read_at = read_at,
            None => reads.push(ChatUserRead {
                chat_id,
                user_id,
                last_read_at: read_at,
            }),
        }
        Ok(())
    }
}

#[async_trait]
impl ChatMessageRepository for TestBackend {
    async fn find_by_chat(
        &self,
        chat_id: Uuid,
        page: PageRequest,
    ) -> RepoResult<(Vec<ChatMessage>, i64)> {
        let mut messages: Vec<ChatMessage> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| Reverse(m.created_at));
        Ok(page_slice(&messages, page))
    }

    async fn create(&self, message: &ChatMessage) -> RepoResult<()> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }
}
