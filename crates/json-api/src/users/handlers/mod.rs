//! User Handlers

pub(crate) mod me;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lemon_app::domain::users::records::UserRecord;

/// User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// The unique identifier of the user
    pub uuid: Uuid,

    pub username: String,

    pub email: String,

    /// Staff groups the user belongs to; empty for customers
    pub groups: Vec<String>,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            uuid: user.uuid.into(),
            groups: user.roles.iter().map(ToString::to_string).collect(),
            username: user.username,
            email: user.email,
        }
    }
}

/// Users Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersResponse {
    pub users: Vec<UserResponse>,
}
