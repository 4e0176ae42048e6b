//! Update Cart Item Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::carts::models::CartItemId;

use crate::{
    carts::{errors::into_api_error, responses::CartItemResponse},
    errors::ApiError,
    extensions::*,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// New absolute quantity, at least 1
    pub quantity: u32,
}

/// Update Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Set Cart Item Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad quantity"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<i64>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartItemResponse>, ApiError> {
    let app = depot.app_or_500()?;
    let requester = depot.requester_or_401()?;

    let item = app
        .carts
        .update_item(
            requester.user,
            CartItemId::from_i64(item.into_inner()),
            json.into_inner().quantity,
        )
        .await
        .map_err(into_api_error)?;

    Ok(Json(item.into()))
}
