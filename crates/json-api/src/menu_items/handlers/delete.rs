//! Delete Menu Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::permissions::require_menu_editor, extensions::*,
    menu_items::errors::into_status_error, state::State,
};

/// Delete Menu Item Handler
///
/// Hides the menu item and drops it from every cart. Existing orders keep their lines.
#[endpoint(
    tags("menu-items"),
    summary = "Delete Menu Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Menu item deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Menu item not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Non-Manager cannot edit menu-items"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    menu_item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.authenticated_user_or_401()?;

    require_menu_editor(&user)?;

    let menu_item = menu_item.into_inner();

    state
        .app
        .menu_items
        .delete_menu_item(menu_item.into())
        .await
        .map_err(into_status_error)?;

    info!(menu_item_uuid = %menu_item, "removed menu item");

    Ok(StatusCode::OK)
}
