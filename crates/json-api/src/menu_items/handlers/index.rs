//! Menu Item Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use lemon_app::domain::menu_items::data::{MenuItemFilter, MenuItemOrdering};

use crate::{
    extensions::*,
    menu_items::{errors::into_status_error, get::MenuItemResponse},
    state::State,
};

/// Menu Items Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuItemsResponse {
    pub menu_items: Vec<MenuItemResponse>,

    pub page: u32,

    pub per_page: u32,

    /// Number of menu items matching the filters across all pages
    pub total: u64,
}

/// Menu Item Index Handler
///
/// Returns a page of menu items. `ordering` accepts `price`, `-price`, `title` and `-title`.
#[endpoint(
    tags("menu-items"),
    summary = "List Menu Items",
    security(("bearer_auth" = []))
)]
#[expect(clippy::too_many_arguments, reason = "one argument per query parameter")]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    featured: QueryParam<bool, false>,
    max_price: QueryParam<u64, false>,
    search: QueryParam<String, false>,
    ordering: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    per_page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<MenuItemsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.authenticated_user_or_401()?;

    let filter = MenuItemFilter {
        category: category.into_inner(),
        featured: featured.into_inner(),
        max_price: max_price.into_inner(),
        search: search.into_inner(),
        ordering: ordering.parse_or_400::<MenuItemOrdering>("Unsupported ordering")?,
        page: (page, per_page).into_page_request(),
    };

    let page = state
        .app
        .menu_items
        .list_menu_items(filter)
        .await
        .map_err(into_status_error)?
        .map(MenuItemResponse::from);

    Ok(Json(MenuItemsResponse {
        menu_items: page.items,
        page: page.page,
        per_page: page.per_page,
        total: page.total,
    }))
}
