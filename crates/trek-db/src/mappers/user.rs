//! User entity <-> model mapper

use trek_core::entities::User;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            username: model.username,
            full_name: model.full_name,
            email: model.email,
            bio: model.bio,
            home_town: model.home_town,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
