//! Create Menu Item Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use lemon_app::domain::menu_items::{data::NewMenuItem, records::MenuItemUuid};

use crate::{
    auth::permissions::require_menu_editor,
    extensions::*,
    menu_items::{errors::into_status_error, get::MenuItemResponse},
    state::State,
};

/// Create Menu Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateMenuItemRequest {
    pub title: String,

    /// Price in cents
    pub price: u64,

    #[serde(default)]
    pub featured: bool,

    pub category_uuid: Uuid,
}

impl From<CreateMenuItemRequest> for NewMenuItem {
    fn from(request: CreateMenuItemRequest) -> Self {
        NewMenuItem {
            uuid: MenuItemUuid::new(),
            title: request.title,
            price: request.price,
            featured: request.featured,
            category_uuid: request.category_uuid.into(),
        }
    }
}

/// Create Menu Item Handler
#[endpoint(
    tags("menu-items"),
    summary = "Create Menu Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Menu item created"),
        (status_code = StatusCode::FORBIDDEN, description = "Non-Manager cannot edit menu-items"),
        (status_code = StatusCode::BAD_REQUEST, description = "Duplicate title, unknown category or bad payload"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateMenuItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MenuItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.authenticated_user_or_401()?;

    require_menu_editor(&user)?;

    let item = state
        .app
        .menu_items
        .create_menu_item(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    info!(menu_item_uuid = %item.uuid, title = %item.title, "added menu item");

    res.add_header(LOCATION, format!("/api/menu-items/{}", item.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(item.into()))
}
