//! Staff group membership

mod handlers;

pub(crate) use handlers::*;

use salvo::prelude::StatusError;

use lemon_app::domain::users::records::Role;

/// Resolve a `{group}` path segment such as `manager` or `delivery-crew`.
pub(crate) fn group_role(slug: &str) -> Result<Role, StatusError> {
    Role::from_slug(slug).ok_or_else(|| StatusError::not_found().brief("Unknown group"))
}
