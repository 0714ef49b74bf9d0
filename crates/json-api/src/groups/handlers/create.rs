//! Add Group Member Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    auth::permissions::require_manager,
    extensions::*,
    groups::group_role,
    state::State,
    users::{UserResponse, errors::into_status_error},
};

/// Add Group Member Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddGroupMemberRequest {
    /// Username of the user to add
    pub username: String,
}

/// Add Group Member Handler
#[endpoint(
    tags("groups"),
    summary = "Add Group Member",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "User added to group"),
        (status_code = StatusCode::FORBIDDEN, description = "User is not a manager"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown group or user"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    group: PathParam<String>,
    json: JsonBody<AddGroupMemberRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.authenticated_user_or_401()?;

    require_manager(&user)?;

    let role = group_role(&group.into_inner())?;
    let request = json.into_inner();

    let member = state
        .app
        .users
        .assign_role(request.username.trim(), role)
        .await
        .map_err(into_status_error)?;

    info!(user_uuid = %member.uuid, group = role.slug(), "added user to group");

    res.status_code(StatusCode::CREATED);

    Ok(Json(member.into()))
}
