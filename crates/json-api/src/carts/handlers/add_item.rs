//! Add Cart Item Handler

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{carts::models::NewCartItem, products::models::ProductId};

use crate::{
    carts::{errors::into_api_error, responses::CartItemResponse},
    errors::ApiError,
    extensions::*,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    pub product_id: i64,

    /// Required for every product; compared case-insensitively
    pub size: Option<String>,

    /// Defaults to 1
    pub quantity: Option<u32>,
}

impl From<AddCartItemRequest> for NewCartItem {
    fn from(request: AddCartItemRequest) -> Self {
        NewCartItem {
            product: ProductId::from_i64(request.product_id),
            size: request.size,
            quantity: request.quantity.unwrap_or(1),
        }
    }
}

/// Add Cart Item Handler
///
/// Adding a product and size already in the cart increases that line.
#[endpoint(
    tags("carts"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing size, unknown size or bad quantity"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.add_item",
    skip(json, depot, res),
    fields(user_id = tracing::field::Empty, cart_item_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartItemResponse>, ApiError> {
    let app = depot.app_or_500()?;
    let requester = depot.requester_or_401()?;

    let span = tracing::Span::current();

    span.record("user_id", tracing::field::display(requester.user));

    let item = app
        .carts
        .add_item(requester.user, json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    span.record("cart_item_id", tracing::field::display(item.id));

    res.add_header(LOCATION, format!("/cart/items/{}", item.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(item.into()))
}
