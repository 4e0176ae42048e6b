//! List All Orders Handler

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderResponse},
};

/// List All Orders Handler
#[endpoint(
    tags("admin"),
    summary = "List All Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders, newest first"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let app = depot.app_or_500()?;

    depot.admin_or_403()?;

    let orders = app
        .orders
        .list_all_orders()
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::auth::{Requester, UserId};
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER, TestApp, admin, make_order, service_as, shopper};

    use super::*;

    fn make_service(app: TestApp, requester: Requester) -> Service {
        service_as(app, requester, Router::with_path("admin/orders").get(handler))
    }

    #[tokio::test]
    async fn test_admin_lists_every_order() -> TestResult {
        let mut app = TestApp::new();

        app.orders.expect_list_all_orders().once().return_once(|| {
            Ok(vec![
                make_order(3, UserId::from_i64(9)),
                make_order(2, TEST_USER),
            ])
        });

        let mut res = TestClient::get("http://example.com/admin/orders")
            .send(&make_service(app, admin()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<OrderResponse> = res.take_json().await?;

        assert_eq!(body.len(), 2, "expected both orders");

        Ok(())
    }

    #[tokio::test]
    async fn test_non_admin_returns_403() -> TestResult {
        let mut app = TestApp::new();

        app.orders.expect_list_all_orders().never();

        let res = TestClient::get("http://example.com/admin/orders")
            .send(&make_service(app, shopper()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
