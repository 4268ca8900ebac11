//! User and refresh token model -> entity mappers

use boss_core::entities::{RefreshToken, User};
use boss_core::value_objects::UserId;

use crate::models::{RefreshTokenModel, UserModel};

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            username: model.username,
            password_hash: model.password_hash,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<RefreshTokenModel> for RefreshToken {
    fn from(model: RefreshTokenModel) -> Self {
        RefreshToken {
            id: model.id,
            user_id: UserId::new(model.user_id),
            token_hash: model.token_hash,
            expires_at: model.expires_at,
            revoked_at: model.revoked_at,
            created_at: model.created_at,
        }
    }
}
