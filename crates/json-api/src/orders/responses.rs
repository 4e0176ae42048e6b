//! Order Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::models::{Order, OrderDetails, OrderLine};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub id: i64,

    /// The cart this order was placed from
    pub cart_id: i64,

    pub user_id: i64,

    /// Sum of the captured line prices
    pub total_price: String,

    pub status: String,

    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.id.into(),
            cart_id: order.cart.into(),
            user_id: order.user.into(),
            total_price: order.total_price.to_string(),
            status: order.status,
            created_at: order.created_at.to_string(),
        }
    }
}

/// Order Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    pub product_id: i64,

    pub product_name: String,

    pub img_url: Option<String>,

    pub size: Option<String>,

    pub quantity: u32,

    /// Price per unit at the time the line was added to the cart
    pub unit_price: String,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        OrderLineResponse {
            product_id: line.product.into(),
            product_name: line.product_name,
            img_url: line.img_url,
            size: line.size,
            quantity: line.quantity,
            unit_price: line.unit_price.to_string(),
        }
    }
}

/// Order Details Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderDetailsResponse {
    pub order: OrderResponse,

    pub lines: Vec<OrderLineResponse>,
}

impl From<OrderDetails> for OrderDetailsResponse {
    fn from(details: OrderDetails) -> Self {
        OrderDetailsResponse {
            order: details.order.into(),
            lines: details
                .lines
                .into_iter()
                .map(OrderLineResponse::from)
                .collect(),
        }
    }
}
