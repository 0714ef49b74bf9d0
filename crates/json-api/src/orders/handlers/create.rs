//! Place Order Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};

use lemon_app::domain::orders::{data::NewOrder, records::OrderUuid};

use crate::{
    auth::permissions::require_customer,
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

/// Place Order Handler
///
/// Turns the current user's cart into an order and empties the cart.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart is empty"),
        (status_code = StatusCode::FORBIDDEN, description = "User is not a Customer"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.authenticated_user_or_401()?;

    require_customer(&user)?;

    let order = state
        .app
        .orders
        .place_order(user.uuid, NewOrder { uuid: OrderUuid::new() })
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
