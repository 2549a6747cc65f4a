//! User relation entity <-> model mapper

use trek_core::entities::{RelationType, UserRelation};
use trek_core::error::DomainError;

use crate::models::UserRelationModel;

/// Convert database relation type string to RelationType enum
///
/// An unknown string means the row bypassed the CHECK constraint, which
/// is a storage fault, not a domain state.
fn parse_relation_type(type_str: &str) -> Result<RelationType, DomainError> {
    match type_str {
        "pending" => Ok(RelationType::Pending),
        "friend" => Ok(RelationType::Friend),
        "blocked" => Ok(RelationType::Blocked),
        other => Err(DomainError::DatabaseError(format!(
            "unknown relation type: {other}"
        ))),
    }
}

/// Convert RelationType enum to database string
pub fn relation_type_to_str(rt: RelationType) -> &'static str {
    rt.as_str()
}

impl TryFrom<UserRelationModel> for UserRelation {
    type Error = DomainError;

    fn try_from(model: UserRelationModel) -> Result<Self, DomainError> {
        Ok(UserRelation {
            sent_by_id: model.sent_by_id,
            sent_to_id: model.sent_to_id,
            relation_type: parse_relation_type(&model.relation_type)?,
            became_friends_at: model.became_friends_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
