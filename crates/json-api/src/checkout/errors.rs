//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::checkout::CheckoutError;

use crate::errors::{ApiError, StockShortage};

pub(crate) fn into_api_error(error: CheckoutError) -> ApiError {
    let status = match error {
        CheckoutError::InsufficientStock {
            product,
            size,
            available,
            requested,
        } => {
            return ApiError::Shortage(StockShortage {
                product_id: Some(product.into()),
                size,
                available,
                requested,
            });
        }
        CheckoutError::NoActiveCart => StatusError::bad_request().brief("No active cart"),
        CheckoutError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        CheckoutError::MissingSize { item } => StatusError::bad_request()
            .brief("Size is required")
            .detail(format!("cart_item_id={item}")),
        CheckoutError::InvalidVariant { product, size } => StatusError::bad_request()
            .brief(format!("Size {size} is not offered for this product"))
            .detail(format!("product_id={product} size={size}")),
        CheckoutError::Server(source) => {
            error!("checkout failed: {source}");

            StatusError::internal_server_error()
        }
    };

    ApiError::Status(status)
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use storefront_app::domain::{carts::models::CartItemId, products::models::ProductId};

    use super::*;

    fn status_error(error: CheckoutError) -> Option<StatusError> {
        match into_api_error(error) {
            ApiError::Status(status) => Some(status),
            ApiError::Shortage(_) => None,
        }
    }

    #[test]
    fn state_errors_are_bad_requests() {
        for error in [
            CheckoutError::NoActiveCart,
            CheckoutError::EmptyCart,
            CheckoutError::MissingSize {
                item: CartItemId::from_i64(4),
            },
            CheckoutError::InvalidVariant {
                product: ProductId::from_i64(1),
                size: "XS".to_string(),
            },
        ] {
            assert_eq!(
                status_error(error).map(|status| status.code),
                Some(StatusCode::BAD_REQUEST)
            );
        }
    }

    #[test]
    fn shortage_carries_product_and_counts() {
        let error = into_api_error(CheckoutError::InsufficientStock {
            product: ProductId::from_i64(1),
            size: "M".to_string(),
            available: 0,
            requested: 1,
        });

        assert!(
            matches!(
                error,
                ApiError::Shortage(StockShortage {
                    product_id: Some(1),
                    available: 0,
                    requested: 1,
                    ..
                })
            ),
            "expected shortage, got {error:?}"
        );
    }

    #[test]
    fn server_errors_are_opaque() {
        let status = status_error(CheckoutError::Server(sqlx::Error::PoolTimedOut))
            .map(|status| (status.code, status.detail));

        assert_eq!(status, Some((StatusCode::INTERNAL_SERVER_ERROR, None)));
    }
}
