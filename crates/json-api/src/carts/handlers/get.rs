//! Get Cart Handler

use salvo::prelude::*;

use crate::{
    carts::{errors::into_api_error, responses::CartResponse},
    errors::ApiError,
    extensions::*,
};

/// Get Cart Handler
///
/// Opens an empty cart on first access.
#[endpoint(
    tags("carts"),
    summary = "Get Active Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Active cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, ApiError> {
    let app = depot.app_or_500()?;
    let requester = depot.requester_or_401()?;

    let cart = app
        .carts
        .get_cart(requester.user)
        .await
        .map_err(into_api_error)?;

    Ok(Json(cart.into()))
}
