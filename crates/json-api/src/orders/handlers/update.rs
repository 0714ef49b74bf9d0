//! Update Order Handler

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

use lemon_app::domain::orders::{data::OrderUpdate, records::OrderStatus};

use crate::{
    auth::permissions::order_update_scope,
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

/// Update Order Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderRequest {
    /// Delivery crew member to assign; managers only
    #[serde(default)]
    pub delivery_crew_uuid: Option<Uuid>,

    /// `pending`, `delivered`, `0` or `1`
    #[serde(default)]
    pub status: Option<String>,
}

impl UpdateOrderRequest {
    fn into_update(self) -> Result<OrderUpdate, StatusError> {
        let status = self
            .status
            .map(|status| status.parse::<OrderStatus>())
            .transpose()
            .or_400("Unknown order status")?;

        let update = OrderUpdate {
            delivery_crew_uuid: self.delivery_crew_uuid.map(Into::into),
            status,
        };

        if update == OrderUpdate::default() {
            return Err(StatusError::bad_request().brief("Nothing to update"));
        }

        Ok(update)
    }
}

/// Update Order Handler
///
/// Managers may assign delivery crew and set the status; delivery crew may
/// only set the status of orders assigned to them. Serves both `PUT` and `PATCH`.
#[endpoint(
    tags("orders"),
    summary = "Update Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad payload or assignee"),
        (status_code = StatusCode::FORBIDDEN, description = "Not allowed to make this change"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
#[tracing::instrument(
    name = "orders.update",
    skip(order, json, depot),
    fields(order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.authenticated_user_or_401()?;
    let order = order.into_inner();

    tracing::Span::current().record("order_uuid", tracing::field::display(order));

    let request = json.into_inner();
    let scope = order_update_scope(&user, request.delivery_crew_uuid.is_some())?;
    let update = request.into_update()?;

    let order = state
        .app
        .orders
        .update_order(scope, order.into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use lemon_app::domain::{
        orders::{OrdersServiceError, data::OrderScope, records::OrderUuid},
        users::records::UserUuid,
    };

    use crate::{
        orders::tests::make_order,
        test_helpers::{Mocks, customer, delivery_crew, manager, service_as},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("orders/{order}").put(handler).patch(handler)
    }

    #[tokio::test]
    async fn test_manager_assigns_delivery_crew() -> TestResult {
        let uuid = OrderUuid::new();
        let crew = UserUuid::new();
        let mut mocks = Mocks::new();

        mocks
            .orders
            .expect_update_order()
            .once()
            .withf(move |scope, u, update| {
                *scope == OrderScope::All
                    && *u == uuid
                    && *update
                        == OrderUpdate {
                            delivery_crew_uuid: Some(crew),
                            status: None,
                        }
            })
            .return_once(move |_, _, _| {
                let mut order = make_order(uuid, UserUuid::new());
                order.delivery_crew_uuid = Some(crew);
                Ok(order)
            });

        let mut res = TestClient::patch(format!("http://example.com/orders/{uuid}"))
            .json(&json!({ "delivery_crew_uuid": crew.into_uuid() }))
            .send(&service_as(&manager(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(body.delivery_crew_uuid, Some(crew.into_uuid()));

        Ok(())
    }

    #[tokio::test]
    async fn test_delivery_crew_marks_delivered() -> TestResult {
        let user = delivery_crew();
        let crew = user.uuid;
        let uuid = OrderUuid::new();
        let mut mocks = Mocks::new();

        mocks
            .orders
            .expect_update_order()
            .once()
            .withf(move |scope, _, update| {
                *scope == OrderScope::AssignedTo(crew)
                    && update.status == Some(OrderStatus::Delivered)
            })
            .return_once(move |_, _, _| {
                let mut order = make_order(uuid, UserUuid::new());
                order.status = OrderStatus::Delivered;
                Ok(order)
            });

        let mut res = TestClient::put(format!("http://example.com/orders/{uuid}"))
            .json(&json!({ "status": "1" }))
            .send(&service_as(&user, mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(body.status, "delivered");

        Ok(())
    }

    #[tokio::test]
    async fn test_delivery_crew_cannot_assign() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.orders.expect_update_order().never();

        let res = TestClient::patch(format!("http://example.com/orders/{}", OrderUuid::new()))
            .json(&json!({ "delivery_crew_uuid": UserUuid::new().into_uuid() }))
            .send(&service_as(&delivery_crew(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_customers_cannot_update() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.orders.expect_update_order().never();

        let mut res = TestClient::patch(format!("http://example.com/orders/{}", OrderUuid::new()))
            .json(&json!({ "status": "delivered" }))
            .send(&service_as(&customer(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
        assert!(
            res.take_string().await?.contains("Customers cannot update orders"),
            "expected the customer update message"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_update_returns_400() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.orders.expect_update_order().never();

        let res = TestClient::patch(format!("http://example.com/orders/{}", OrderUuid::new()))
            .json(&json!({}))
            .send(&service_as(&manager(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.orders.expect_update_order().never();

        let res = TestClient::patch(format!("http://example.com/orders/{}", OrderUuid::new()))
            .json(&json!({ "status": "lost" }))
            .send(&service_as(&manager(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_crew_assignee_returns_400() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .orders
            .expect_update_order()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::InvalidAssignee));

        let res = TestClient::patch(format!("http://example.com/orders/{}", OrderUuid::new()))
            .json(&json!({ "delivery_crew_uuid": UserUuid::new().into_uuid() }))
            .send(&service_as(&manager(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unassigned_order_returns_404_for_crew() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .orders
            .expect_update_order()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::patch(format!("http://example.com/orders/{}", OrderUuid::new()))
            .json(&json!({ "status": "delivered" }))
            .send(&service_as(&delivery_crew(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
