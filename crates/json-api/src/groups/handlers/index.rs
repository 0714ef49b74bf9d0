//! Group Members Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    auth::permissions::require_manager,
    extensions::*,
    groups::group_role,
    state::State,
    users::{UsersResponse, errors::into_status_error},
};

/// Group Members Handler
///
/// Lists the members of a staff group.
#[endpoint(
    tags("groups"),
    summary = "List Group Members",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Group members"),
        (status_code = StatusCode::FORBIDDEN, description = "User is not a manager"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown group"),
    ),
)]
pub(crate) async fn handler(
    group: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<UsersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.authenticated_user_or_401()?;

    require_manager(&user)?;

    let role = group_role(&group.into_inner())?;

    let users = state
        .app
        .users
        .list_users_in_role(role)
        .await
        .map_err(into_status_error)?;

    Ok(Json(UsersResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use lemon_app::domain::users::records::Role;

    use crate::test_helpers::{Mocks, customer, make_user, manager, service_as};

    use super::*;

    fn route() -> Router {
        Router::with_path("groups/{group}/users").get(handler)
    }

    #[tokio::test]
    async fn test_lists_delivery_crew() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_list_users_in_role()
            .once()
            .withf(|role| *role == Role::DeliveryCrew)
            .return_once(|_| {
                Ok(vec![
                    make_user("adrian", &[Role::DeliveryCrew]),
                    make_user("bella", &[Role::DeliveryCrew]),
                ])
            });

        let mut res = TestClient::get("http://example.com/groups/delivery-crew/users")
            .send(&service_as(&manager(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: UsersResponse = res.take_json().await?;
        let names: Vec<_> = body.users.iter().map(|u| u.username.as_str()).collect();

        assert_eq!(names, ["adrian", "bella"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_non_manager_is_forbidden() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.users.expect_list_users_in_role().never();

        let res = TestClient::get("http://example.com/groups/manager/users")
            .send(&service_as(&customer(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_group_returns_404() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.users.expect_list_users_in_role().never();

        let res = TestClient::get("http://example.com/groups/waiters/users")
            .send(&service_as(&manager(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
