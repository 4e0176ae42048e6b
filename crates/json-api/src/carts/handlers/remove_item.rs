//! Remove Cart Item Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{carts::models::RemovedItem, products::models::ProductId};

use crate::{
    carts::{errors::into_api_error, responses::CartItemResponse},
    errors::ApiError,
    extensions::*,
};

/// Remove Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RemoveCartItemRequest {
    pub product_id: i64,

    pub size: Option<String>,
}

/// Remove Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RemoveCartItemResponse {
    /// The line after removing one unit, absent once the line is gone
    pub item: Option<CartItemResponse>,

    /// Whether the line was deleted
    pub deleted: bool,
}

impl From<RemovedItem> for RemoveCartItemResponse {
    fn from(removed: RemovedItem) -> Self {
        match removed {
            RemovedItem::Decremented(item) => RemoveCartItemResponse {
                item: Some(item.into()),
                deleted: false,
            },
            RemovedItem::Deleted => RemoveCartItemResponse {
                item: None,
                deleted: true,
            },
        }
    }
}

/// Remove Cart Item Handler
///
/// Takes one unit off the line for a product and size.
#[endpoint(
    tags("carts"),
    summary = "Remove One Unit From Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Unit removed"),
        (status_code = StatusCode::NOT_FOUND, description = "No such line in the cart"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RemoveCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<RemoveCartItemResponse>, ApiError> {
    let app = depot.app_or_500()?;
    let requester = depot.requester_or_401()?;
    let request = json.into_inner();

    let removed = app
        .carts
        .remove_item(
            requester.user,
            ProductId::from_i64(request.product_id),
            request.size,
        )
        .await
        .map_err(into_api_error)?;

    Ok(Json(removed.into()))
}
