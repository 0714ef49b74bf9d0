//! Update Menu Item Handler

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

/// Update Menu Item Request
///
/// Omitted fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateMenuItemRequest {
    #[serde(default)]
    pub title: Option<String>,

    /// Price in cents
    #[serde(default)]
    pub price: Option<u64>,

    #[serde(default)]
    pub featured: Option<bool>,

    #[serde(default)]
    pub category_uuid: Option<Uuid>,
}

impl From<UpdateMenuItemRequest> for MenuItemUpdate {
    fn from(request: UpdateMenuItemRequest) -> Self {
        MenuItemUpdate {
            title: request.title,
            price: request.price,
            featured: request.featured,
            category_uuid: request.category_uuid.map(Into::into),
        }
    }
}

/// Update Menu Item Handler
#[endpoint(
    tags("menu-items"),
    summary = "Update Menu Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Menu item updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Menu item not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Non-Manager cannot edit menu-items"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
#[tracing::instrument(
    name = "menu_items.update",
    skip(menu_item, json, depot),
    fields(menu_item_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    menu_item: PathParam<Uuid>,
    json: JsonBody<UpdateMenuItemRequest>,
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
