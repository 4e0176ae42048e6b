//! Update Order Status Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::models::OrderId;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderResponse},
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// Any non-blank status, stored trimmed
    pub status: String,
}

/// Update Order Status Handler
#[endpoint(
    tags("admin"),
    summary = "Set Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Blank status"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(order, json, depot),
    fields(admin_id = tracing::field::Empty, order_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<i64>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let app = depot.app_or_500()?;
    let admin = depot.admin_or_403()?;
    let order = OrderId::from_i64(order.into_inner());

    let span = tracing::Span::current();

    span.record("admin_id", tracing::field::display(admin.user));
    span.record("order_id", tracing::field::display(order));

    let order = app
        .orders
        .update_status(order, json.into_inner().status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront_app::{auth::Requester, domain::orders::OrdersServiceError};
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER, TestApp, admin, make_order, service_as, shopper};

    use super::*;

    fn make_service(app: TestApp, requester: Requester) -> Service {
        service_as(
            app,
            requester,
            Router::with_path("admin/orders/{order}/status").put(handler),
        )
    }

    #[tokio::test]
    async fn test_admin_sets_status() -> TestResult {
        let mut app = TestApp::new();

        app.orders
            .expect_update_status()
            .once()
            .withf(|order, status| *order == OrderId::from_i64(55) && status == "SHIPPED")
            .return_once(|_, status| {
                let mut order = make_order(55, TEST_USER);
                order.status = status;

                Ok(order)
            });

        let mut res = TestClient::put("http://example.com/admin/orders/55/status")
            .json(&json!({ "status": "SHIPPED" }))
            .send(&make_service(app, admin()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(body.status, "SHIPPED");

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_status_returns_400() -> TestResult {
        let mut app = TestApp::new();

        app.orders
            .expect_update_status()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::InvalidStatus));

        let res = TestClient::put("http://example.com/admin/orders/55/status")
            .json(&json!({ "status": "   " }))
            .send(&make_service(app, admin()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_admin_returns_403() -> TestResult {
        let mut app = TestApp::new();

        app.orders.expect_update_status().never();

        let res = TestClient::put("http://example.com/admin/orders/55/status")
            .json(&json!({ "status": "SHIPPED" }))
            .send(&make_service(app, shopper()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_order_returns_404() -> TestResult {
        let mut app = TestApp::new();

        app.orders
            .expect_update_status()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::put("http://example.com/admin/orders/99/status")
            .json(&json!({ "status": "SHIPPED" }))
            .send(&make_service(app, admin()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
