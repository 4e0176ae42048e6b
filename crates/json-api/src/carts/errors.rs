//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

use crate::errors::{ApiError, StockShortage};

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    let status = match error {
        CartsServiceError::InsufficientStock {
            size,
            available,
            requested,
        } => {
            return ApiError::Shortage(StockShortage {
                product_id: None,
                size,
                available,
                requested,
            });
        }
        CartsServiceError::NotFound => {
            StatusError::not_found().brief("Cart item or product not found")
        }
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be at least 1")
        }
        CartsServiceError::MissingSize => StatusError::bad_request().brief("Size is required"),
        CartsServiceError::InvalidVariant { size } => StatusError::bad_request()
            .brief(format!("Size {size} is not offered for this product")),
        CartsServiceError::InvalidReference | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::AlreadyExists => {
            error!("active cart uniqueness violated outside of get-or-create");

            StatusError::internal_server_error()
        }
        CartsServiceError::ActiveCartUnavailable => {
            error!("active cart could not be resolved");

            StatusError::internal_server_error()
        }
        CartsServiceError::Sql(source) => {
            error!("cart operation failed: {source}");

            StatusError::internal_server_error()
        }
    };

    ApiError::Status(status)
}
