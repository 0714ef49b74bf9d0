//! Current User Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    users::{UserResponse, errors::into_status_error},
};

/// Current User Handler
///
/// Returns the authenticated user's profile.
#[endpoint(
    tags("users"),
    summary = "Current User",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.authenticated_user_or_401()?;

    let user = state
        .app
        .users
        .get_user(user.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}
