//! App Router

use salvo::Router;

use crate::{auth, carts, checkout, orders};

/// Routes that require a verified access token.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("cart")
                .get(carts::handlers::get::handler)
                .push(
                    Router::with_path("items")
                        .post(carts::handlers::add_item::handler)
                        .push(
                            Router::with_path("{item}")
                                .put(carts::handlers::update_item::handler)
                                .delete(carts::handlers::delete_item::handler),
                        ),
                )
                .push(Router::with_path("remove").post(carts::handlers::remove_item::handler))
                .push(Router::with_path("checkout").post(checkout::handler::handler)),
        )
        .push(
            Router::with_path("orders")
                .get(orders::handlers::index::handler)
                .push(Router::with_path("{order}").get(orders::handlers::get::handler)),
        )
        .push(
            Router::with_path("admin")
                .push(
                    Router::with_path("orders")
                        .get(orders::handlers::admin_index::handler)
                        .push(
                            Router::with_path("{order}/status")
                                .put(orders::handlers::update_status::handler),
                        ),
                )
                .push(
                    Router::with_path("users/{user}/orders")
                        .get(orders::handlers::user_orders::handler),
                ),
        )
}
