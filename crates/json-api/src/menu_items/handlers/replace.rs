//! Replace Menu Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lemon_app::domain::menu_items::data::MenuItemUpdate;

use crate::{
    auth::permissions::require_menu_editor,
    extensions::*,
    menu_items::{errors::into_status_error, get::MenuItemResponse},
    state::State,
};

/// Replace Menu Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReplaceMenuItemRequest {
    pub title: String,

    /// Price in cents
    pub price: u64,

    pub featured: bool,

    pub category_uuid: Uuid,
}

impl From<ReplaceMenuItemRequest> for MenuItemUpdate {
    fn from(request: ReplaceMenuItemRequest) -> Self {
        MenuItemUpdate {
            title: Some(request.title),
            price: Some(request.price),
            featured: Some(request.featured),
            category_uuid: Some(request.category_uuid.into()),
        }
    }
}

/// Replace Menu Item Handler
///
/// Overwrites every editable field of a menu item.
#[endpoint(
    tags("menu-items"),
    summary = "Replace Menu Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Menu item replaced"),
        (status_code = StatusCode::NOT_FOUND, description = "Menu item not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Non-Manager cannot edit menu-items"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
#[tracing::instrument(
    name = "menu_items.replace",
    skip(menu_item, json, depot),
    fields(menu_item_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    menu_item: PathParam<Uuid>,
    json: JsonBody<ReplaceMenuItemRequest>,
    depot: &mut Depot,
) -> Result<Json<MenuItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.authenticated_user_or_401()?;

    require_menu_editor(&user)?;

    let menu_item = menu_item.into_inner();

    tracing::Span::current().record("menu_item_uuid", tracing::field::display(menu_item));

    let item = state
        .app
        .menu_items
        .update_menu_item(menu_item.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}
