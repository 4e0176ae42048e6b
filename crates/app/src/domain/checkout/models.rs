//! Checkout Models

use rust_decimal::Decimal;

use crate::domain::orders::models::OrderId;

/// Result of a successful checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub order: OrderId,
    pub total_price: Decimal,
}
