//! Checkout errors.

use thiserror::Error;

use crate::domain::{carts::models::CartItemId, products::models::ProductId};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("no active cart")]
    NoActiveCart,

    #[error("cart is empty")]
    EmptyCart,

    #[error("cart item {item} has no size")]
    MissingSize { item: CartItemId },

    #[error("product {product} is not offered in size {size}")]
    InvalidVariant { product: ProductId, size: String },

    #[error("only {available} of product {product} in size {size}, {requested} requested")]
    InsufficientStock {
        product: ProductId,
        size: String,
        available: u32,
        requested: u32,
    },

    #[error("checkout failed")]
    Server(#[source] sqlx::Error),
}

impl From<sqlx::Error> for CheckoutError {
    fn from(error: sqlx::Error) -> Self {
        Self::Server(error)
    }
}

impl CheckoutError {
    /// Short label used for logs and metrics.
    #[must_use]
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::NoActiveCart => "no_active_cart",
            Self::EmptyCart => "empty_cart",
            Self::MissingSize { .. } => "missing_size",
            Self::InvalidVariant { .. } => "invalid_variant",
            Self::InsufficientStock { .. } => "insufficient_stock",
            Self::Server(_) => "server_error",
        }
    }
}
