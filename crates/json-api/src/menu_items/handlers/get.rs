//! Get Menu Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lemon_app::domain::menu_items::records::MenuItemRecord;

use crate::{extensions::*, menu_items::errors::into_status_error, state::State};

/// Menu Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuItemResponse {
    /// The unique identifier of the menu item
    pub uuid: Uuid,

    pub title: String,

    /// The price of the menu item in cents
    pub price: u64,

    /// Whether the item is highlighted as item of the day
    pub featured: bool,

    /// The category the menu item belongs to
    pub category_uuid: Uuid,

    /// The date and time the menu item was created
    pub created_at: String,

    /// The date and time the menu item was last updated
    pub updated_at: String,
}

impl From<MenuItemRecord> for MenuItemResponse {
    fn from(item: MenuItemRecord) -> Self {
        MenuItemResponse {
            uuid: item.uuid.into(),
            title: item.title,
            price: item.price,
            featured: item.featured,
            category_uuid: item.category_uuid.into(),
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

/// Get Menu Item Handler
///
/// Returns a single menu item.
#[endpoint(
    tags("menu-items"),
    summary = "Get Menu Item",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    menu_item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<MenuItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.authenticated_user_or_401()?;

    let item = state
        .app
        .menu_items
        .get_menu_item(menu_item.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}
