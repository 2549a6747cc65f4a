//! UserRelation entity - the directed edge between two users
//!
//! Storage is directional (`sent_by_id` -> `sent_to_id`) but several
//! semantics are direction-agnostic: friendship and "any edge exists"
//! checks look both ways, while block and pending-request checks care
//! about who initiated. The predicates here are the single source of
//! truth for both kinds of lookup.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Relation state between two users
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationType {
    /// Request sent, awaiting action by the recipient
    Pending,
    /// Accepted friendship (symmetric in effect, stored directionally)
    Friend,
    /// `sent_by_id` has blocked `sent_to_id`
    Blocked,
}

impl RelationType {
    /// Stable string form used by the persistence layer
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Friend => "friend",
            Self::Blocked => "blocked",
        }
    }
}

/// Directed relation edge between two users
///
/// At most one edge may exist per unordered user pair, regardless of
/// direction. The pair `(sent_by_id, sent_to_id)` is the identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRelation {
    pub sent_by_id: Uuid,
    pub sent_to_id: Uuid,
    pub relation_type: RelationType,
    pub became_friends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRelation {
    /// Create a new pending friend request from `sent_by_id` to `sent_to_id`
    pub fn pending(sent_by_id: Uuid, sent_to_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            sent_by_id,
            sent_to_id,
            relation_type: RelationType::Pending,
            became_friends_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an edge recording that `blocker` has blocked `blocked`
    pub fn blocked(blocker: Uuid, blocked: Uuid) -> Self {
        let now = Utc::now();
        Self {
            sent_by_id: blocker,
            sent_to_id: blocked,
            relation_type: RelationType::Blocked,
            became_friends_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Transition a pending request into a friendship
    pub fn accept(&mut self, now: DateTime<Utc>) {
        self.relation_type = RelationType::Friend;
        self.became_friends_at = Some(now);
        self.updated_at = now;
    }

    /// Overwrite the edge as a block issued by `blocker`
    ///
    /// Reorients the edge so `sent_by_id` is always the blocker, whatever
    /// the prior state or direction was.
    pub fn block(&mut self, blocker: Uuid, now: DateTime<Utc>) {
        if self.sent_to_id == blocker {
            std::mem::swap(&mut self.sent_by_id, &mut self.sent_to_id);
        }
        self.relation_type = RelationType::Blocked;
        self.became_friends_at = None;
        self.updated_at = now;
    }

    /// Does this edge touch `user` in either position?
    pub fn involves(&self, user: Uuid) -> bool {
        self.sent_by_id == user || self.sent_to_id == user
    }

    /// Does this edge connect `a` and `b`, in either direction?
    pub fn links(&self, a: Uuid, b: Uuid) -> bool {
        (self.sent_by_id == a && self.sent_to_id == b)
            || (self.sent_by_id == b && self.sent_to_id == a)
    }

    /// The user on the other end of the edge from `user`
    pub fn other_party(&self, user: Uuid) -> Option<Uuid> {
        if self.sent_by_id == user {
            Some(self.sent_to_id)
        } else if self.sent_to_id == user {
            Some(self.sent_by_id)
        } else {
            None
        }
    }

    /// Was the edge created by `user`? For a Blocked edge this means
    /// `user` is the blocker.
    pub fn was_sent_by(&self, user: Uuid) -> bool {
        self.sent_by_id == user
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.relation_type == RelationType::Pending
    }

    #[inline]
    pub fn is_friend(&self) -> bool {
        self.relation_type == RelationType::Friend
    }

    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.relation_type == RelationType::Blocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_initial_state() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let edge = UserRelation::pending(a, b);

        assert!(edge.is_pending());
        assert!(edge.became_friends_at.is_none());
        assert!(edge.was_sent_by(a));
        assert!(!edge.was_sent_by(b));
    }

    #[test]
    fn test_accept_sets_friendship_date() {
        let edge_start = Utc::now();
        let mut edge = UserRelation::pending(Uuid::new_v4(), Uuid::new_v4());
        let now = Utc::now();
        edge.accept(now);

        assert!(edge.is_friend());
        assert_eq!(edge.became_friends_at, Some(now));
        assert!(edge.updated_at >= edge_start);
    }

    #[test]
    fn test_block_reorients_edge_toward_blocker() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        // a sent the original request, b does the blocking
        let mut edge = UserRelation::pending(a, b);
        edge.block(b, Utc::now());

        assert!(edge.is_blocked());
        assert_eq!(edge.sent_by_id, b);
        assert_eq!(edge.sent_to_id, a);
    }

    #[test]
    fn test_block_clears_friendship_date() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut edge = UserRelation::pending(a, b);
        edge.accept(Utc::now());
        edge.block(a, Utc::now());

        assert!(edge.is_blocked());
        assert!(edge.became_friends_at.is_none());
    }

    #[test]
    fn test_links_is_direction_agnostic() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let edge = UserRelation::pending(a, b);

        assert!(edge.links(a, b));
        assert!(edge.links(b, a));
        assert!(!edge.links(a, c));
    }

    #[test]
    fn test_other_party() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let edge = UserRelation::pending(a, b);

        assert_eq!(edge.other_party(a), Some(b));
        assert_eq!(edge.other_party(b), Some(a));
        assert_eq!(edge.other_party(Uuid::new_v4()), None);
    }

    #[test]
    fn test_relation_type_str() {
        assert_eq!(RelationType::Pending.as_str(), "pending");
        assert_eq!(RelationType::Friend.as_str(), "friend");
        assert_eq!(RelationType::Blocked.as_str(), "blocked");
    }
}
