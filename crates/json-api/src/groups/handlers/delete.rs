//! Remove Group Member Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::permissions::require_manager,
    extensions::*,
    groups::group_role,
    state::State,
    users::errors::into_status_error,
};

/// Remove Group Member Handler
///
/// Removing a user who is not in the group still succeeds.
#[endpoint(
    tags("groups"),
    summary = "Remove Group Member",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User removed from group"),
        (status_code = StatusCode::FORBIDDEN, description = "User is not a manager"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown group or user"),
    ),
)]
pub(crate) async fn handler(
    group: PathParam<String>,
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let current = depot.authenticated_user_or_401()?;

    require_manager(&current)?;

    let role = group_role(&group.into_inner())?;
    let user = user.into_inner();

    state
        .app
        .users
        .remove_role(user.into(), role)
        .await
        .map_err(into_status_error)?;

    info!(user_uuid = %user, group = role.slug(), "removed user from group");

    Ok(StatusCode::OK)
}
