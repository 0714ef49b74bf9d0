//! Category Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    categories::{CategoryResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Categories Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesResponse {
    pub categories: Vec<CategoryResponse>,
}

/// Category Index Handler
///
/// Returns every category ordered by title.
#[endpoint(
    tags("categories"),
    summary = "List Categories",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CategoriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.authenticated_user_or_401()?;

    let categories = state
        .app
        .categories
        .list_categories()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CategoriesResponse {
        categories: categories.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        categories::tests::make_category,
        test_helpers::{Mocks, customer, service_as},
    };

    use super::*;

    #[tokio::test]
    async fn test_any_user_can_list_categories() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .categories
            .expect_list_categories()
            .once()
            .return_once(|| {
                Ok(vec![
                    make_category("Desserts", "desserts"),
                    make_category("Mains", "mains"),
                ])
            });

        let mut res = TestClient::get("http://example.com/categories")
            .send(&service_as(
                &customer(),
                mocks,
                Router::with_path("categories").get(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CategoriesResponse = res.take_json().await?;
        let slugs: Vec<_> = body.categories.iter().map(|c| c.slug.as_str()).collect();

        assert_eq!(slugs, ["desserts", "mains"]);

        Ok(())
    }
}
