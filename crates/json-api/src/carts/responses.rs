//! Cart Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storefront_app::domain::carts::models::{CartItem, CartLine, CartView};

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The cart item id
    pub id: i64,

    /// The product in this line
    pub product_id: i64,

    /// The size of the product, upper-cased
    pub size: Option<String>,

    /// Number of units
    pub quantity: u32,

    /// Price per unit captured when the line was first added
    pub unit_price: String,

    /// `unit_price * quantity`
    pub line_total: String,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        CartItemResponse {
            id: item.id.into(),
            product_id: item.product.into(),
            line_total: item.line_total().to_string(),
            unit_price: item.unit_price.to_string(),
            size: item.size,
            quantity: item.quantity,
        }
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// The cart item id
    pub id: i64,

    /// The product in this line
    pub product_id: i64,

    /// Product display name
    pub product_name: String,

    /// Product image
    pub img_url: Option<String>,

    /// The size of the product
    pub size: Option<String>,

    /// Number of units
    pub quantity: u32,

    /// Price per unit captured when the line was first added
    pub unit_price: String,

    /// `unit_price * quantity`
    pub line_total: String,

    /// Units currently in stock for this size, absent when the size is gone
    pub stock: Option<u32>,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        let item = line.item;

        CartLineResponse {
            id: item.id.into(),
            product_id: item.product.into(),
            product_name: line.product_name,
            img_url: line.img_url,
            line_total: item.line_total().to_string(),
            unit_price: item.unit_price.to_string(),
            size: item.size,
            quantity: item.quantity,
            stock: line.variant_stock,
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The active cart id
    pub id: i64,

    /// Lines, most recently added first
    pub items: Vec<CartLineResponse>,

    /// Sum of line totals
    pub total: String,

    /// The date and time the cart was opened
    pub created_at: String,
}

impl From<CartView> for CartResponse {
    fn from(view: CartView) -> Self {
        CartResponse {
            id: view.cart.id.into(),
            items: view.lines.into_iter().map(CartLineResponse::from).collect(),
            total: view.total.to_string(),
            created_at: view.cart.created_at.to_string(),
        }
    }
}
