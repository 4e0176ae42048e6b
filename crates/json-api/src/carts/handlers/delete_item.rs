//! Delete Cart Item Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use storefront_app::domain::carts::models::CartItemId;

use crate::{carts::errors::into_api_error, errors::ApiError, extensions::*};

/// Delete Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Delete Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Cart item deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.delete_item",
    skip(item, depot),
    fields(user_id = tracing::field::Empty, cart_item_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    item: PathParam<i64>,
    depot: &mut Depot,
) -> Result<StatusCode, ApiError> {
    let app = depot.app_or_500()?;
    let requester = depot.requester_or_401()?;
    let item = CartItemId::from_i64(item.into_inner());

    let span = tracing::Span::current();

    span.record("user_id", tracing::field::display(requester.user));
    span.record("cart_item_id", tracing::field::display(item));

    app.carts
        .delete_item(requester.user, item)
        .await
        .map_err(into_api_error)?;

    tracing::info!(cart_item_id = %item, "deleted cart item");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use storefront_app::domain::carts::CartsServiceError;
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER, TestApp, service_as, shopper};

    use super::*;

    fn make_service(app: TestApp) -> Service {
        service_as(
            app,
            shopper(),
            Router::with_path("cart/items/{item}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_item_success() -> TestResult {
        let mut app = TestApp::new();

        app.carts
            .expect_delete_item()
            .once()
            .withf(|user, item| *user == TEST_USER && *item == CartItemId::from_i64(7))
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete("http://example.com/cart/items/7")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_item_not_found_returns_404() -> TestResult {
        let mut app = TestApp::new();

        app.carts
            .expect_delete_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::delete("http://example.com/cart/items/7")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
