//! List Orders Handler

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderResponse},
};

/// List Orders Handler
///
/// The requester's own orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "List My Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let app = depot.app_or_500()?;
    let requester = depot.requester_or_401()?;

    let orders = app
        .orders
        .list_orders(requester.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER, TestApp, make_order, service_as, shopper};

    use super::*;

    #[tokio::test]
    async fn test_list_orders_returns_requesters_orders() -> TestResult {
        let mut app = TestApp::new();

        app.orders
            .expect_list_orders()
            .once()
            .withf(|user| *user == TEST_USER)
            .return_once(|_| Ok(vec![make_order(2, TEST_USER), make_order(1, TEST_USER)]));

        let mut res = TestClient::get("http://example.com/orders")
            .send(&service_as(app, shopper(), Router::with_path("orders").get(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<OrderResponse> = res.take_json().await?;
        let ids: Vec<i64> = body.iter().map(|order| order.id).collect();

        assert_eq!(ids, vec![2, 1]);

        Ok(())
    }
}
