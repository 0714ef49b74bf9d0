//! App Router

use std::sync::Arc;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};

use crate::{
    auth, cart, categories, groups, healthcheck, menu_items,
    observability::{metrics_handler, request_logging},
    orders,
    state::State,
    users,
};

/// Authenticated routes under `/api`.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .hoop(auth::middleware::handler)
        .push(Router::with_path("users/me").get(users::me::handler))
        .push(
            Router::with_path("groups/{group}/users")
                .get(groups::index::handler)
                .post(groups::create::handler)
                .push(Router::with_path("{user}").delete(groups::delete::handler)),
        )
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .post(categories::create::handler),
        )
        .push(
            Router::with_path("menu-items")
                .get(menu_items::index::handler)
                .post(menu_items::create::handler)
                .push(
                    Router::with_path("{menu_item}")
                        .get(menu_items::get::handler)
                        .put(menu_items::replace::handler)
                        .patch(menu_items::update::handler)
                        .delete(menu_items::delete::handler),
                ),
        )
        .push(
            Router::with_path("cart/menu-items")
                .get(cart::index::handler)
                .post(cart::create::handler)
                .delete(cart::clear::handler)
                .push(Router::with_path("{menu_item}").delete(cart::delete::handler)),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .put(orders::update::handler)
                        .patch(orders::update::handler)
                        .delete(orders::delete::handler),
                ),
        )
}

/// The full service router: middleware, health, metrics, the API and its docs.
pub(crate) fn service_router(state: Arc<State>) -> Router {
    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(request_logging)
        .hoop(remove_slash())
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(api_router());

    let doc = OpenApi::new("Little Lemon API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"))
}
