//! Get Order Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use storefront_app::domain::orders::models::OrderId;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderDetailsResponse},
};

/// Get Order Handler
///
/// Readable by the order's owner and by admins.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order with lines"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<OrderDetailsResponse>, StatusError> {
    let app = depot.app_or_500()?;
    let requester = depot.requester_or_401()?;

    let details = app
        .orders
        .get_order(requester, OrderId::from_i64(order.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(details.into()))
}
