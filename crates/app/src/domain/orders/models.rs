//! Order Models

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    auth::UserId,
    domain::{carts::models::CartId, products::models::ProductId},
    ids::TypedId,
};

/// Status given to every order at checkout.
pub const PENDING_STATUS: &str = "PENDING";

/// Order Id
pub type OrderId = TypedId<Order>;

/// Order Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub cart: CartId,
    /// Owner of the cart the order was created from.
    pub user: UserId,
    pub total_price: Decimal,
    pub status: String,
    pub created_at: Timestamp,
}

/// A line of the cart snapshot an order was placed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub product: ProductId,
    pub product_name: String,
    pub img_url: Option<String>,
    pub size: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// Order Details Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetails {
    pub order: Order,
    pub lines: Vec<OrderLine>,
}
