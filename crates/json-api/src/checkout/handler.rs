//! Checkout Handler

use salvo::{http::header::LOCATION, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::domain::checkout::models::CheckoutReceipt;

use crate::{
    checkout::errors::into_api_error, errors::ApiError, extensions::*,
    observability::record_checkout,
};

/// Checkout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    /// The created order
    pub order_id: i64,

    /// Sum of the captured line prices
    pub total_price: String,
}

impl From<CheckoutReceipt> for CheckoutResponse {
    fn from(receipt: CheckoutReceipt) -> Self {
        CheckoutResponse {
            order_id: receipt.order.into(),
            total_price: receipt.total_price.to_string(),
        }
    }
}

/// Checkout Handler
///
/// Turns the active cart into a pending order and opens a new empty cart.
/// Either every line is taken from stock or nothing changes.
#[endpoint(
    tags("checkout"),
    summary = "Checkout Active Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "No active cart, empty cart, or a line with a missing or unknown size"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "checkout",
    skip(depot, res),
    fields(user_id = tracing::field::Empty, order_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let app = depot.app_or_500()?;
    let requester = depot.requester_or_401()?;

    let span = tracing::Span::current();

    span.record("user_id", tracing::field::display(requester.user));

    let receipt = match app.checkout.checkout(requester.user).await {
        Ok(receipt) => receipt,
        Err(error) => {
            record_checkout(error.outcome());

            return Err(into_api_error(error));
        }
    };

    record_checkout("success");

    span.record("order_id", tracing::field::display(receipt.order));

    res.add_header(LOCATION, format!("/orders/{}", receipt.order), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(receipt.into()))
}
