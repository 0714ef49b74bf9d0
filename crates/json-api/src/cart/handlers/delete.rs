//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    auth::permissions::require_customer, cart::errors::into_status_error, extensions::*,
    state::State,
};

/// Remove Cart Item Handler
///
/// Removes the line for `{menu_item}` from the current user's cart.
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Line removed"),
        (status_code = StatusCode::FORBIDDEN, description = "User is not a Customer"),
        (status_code = StatusCode::NOT_FOUND, description = "Menu item not in cart"),
    ),
)]
#[tracing::instrument(
    name = "cart.remove_item",
    skip(menu_item, depot),
    fields(menu_item_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    menu_item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.authenticated_user_or_401()?;

    require_customer(&user)?;

    let menu_item = menu_item.into_inner();

    tracing::Span::current().record("menu_item_uuid", tracing::field::display(menu_item));

    state
        .app
        .carts
        .remove_item(user.uuid, menu_item.into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use lemon_app::domain::{carts::CartsServiceError, menu_items::records::MenuItemUuid};

    use crate::test_helpers::{Mocks, customer, service_as};

    use super::*;

    fn route() -> Router {
        Router::with_path("cart/menu-items/{menu_item}").delete(handler)
    }

    #[tokio::test]
    async fn test_remove_line_returns_200() -> TestResult {
        let user = customer();
        let owner = user.uuid;
        let menu_item = MenuItemUuid::new();
        let mut mocks = Mocks::new();

        mocks
            .carts
            .expect_remove_item()
            .once()
            .withf(move |u, item| *u == owner && *item == menu_item)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/cart/menu-items/{menu_item}"))
            .send(&service_as(&user, mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_line_returns_404() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .carts
            .expect_remove_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::delete(format!(
            "http://example.com/cart/menu-items/{}",
            MenuItemUuid::new()
        ))
        .send(&service_as(&customer(), mocks, route()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
