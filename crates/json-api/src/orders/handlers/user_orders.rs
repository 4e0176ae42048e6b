//! List User Orders Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use storefront_app::auth::UserId;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderDetailsResponse},
};

/// List User Orders Handler
///
/// A single user's orders with their lines, newest first.
#[endpoint(
    tags("admin"),
    summary = "List Orders of a User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders with lines"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<Vec<OrderDetailsResponse>>, StatusError> {
    let app = depot.app_or_500()?;

    depot.admin_or_403()?;

    let orders = app
        .orders
        .list_user_orders_with_lines(UserId::from_i64(user.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(
        orders.into_iter().map(OrderDetailsResponse::from).collect(),
    ))
}
