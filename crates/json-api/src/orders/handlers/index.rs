//! Order Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use lemon_app::domain::orders::{
    data::{OrderFilter, OrderOrdering},
    records::OrderStatus,
};

use crate::{
    auth::permissions::order_scope,
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

/// Orders Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderResponse>,

    pub page: u32,

    pub per_page: u32,

    /// Number of visible orders matching the filters across all pages
    pub total: u64,
}

/// Order Index Handler
///
/// Managers see every order, delivery crew the orders assigned to them and
/// customers their own. `status` accepts `pending`, `delivered`, `0` or `1`;
/// `ordering` accepts `created_at`, `-created_at`, `total` and `-total`.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    ordering: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    per_page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.authenticated_user_or_401()?;

    let filter = OrderFilter {
        status: status.parse_or_400::<OrderStatus>("Unknown order status")?,
        ordering: ordering.parse_or_400::<OrderOrdering>("Unsupported ordering")?,
        page: (page, per_page).into_page_request(),
    };

    let page = state
        .app
        .orders
        .list_orders(order_scope(&user), filter)
        .await
        .map_err(into_status_error)?
        .map(OrderResponse::from);

    Ok(Json(OrdersResponse {
        orders: page.items,
        page: page.page,
        per_page: page.per_page,
        total: page.total,
    }))
}
