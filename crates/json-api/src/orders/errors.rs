//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Forbidden => {
            StatusError::forbidden().brief("Order belongs to another user")
        }
        OrdersServiceError::InvalidStatus => {
            StatusError::bad_request().brief("Status must not be blank")
        }
        OrdersServiceError::Sql(source) => {
            error!("order operation failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
