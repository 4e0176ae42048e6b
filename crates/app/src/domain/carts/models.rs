//! Cart Models

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{auth::UserId, domain::products::models::ProductId, ids::TypedId};

/// Cart Id
pub type CartId = TypedId<Cart>;

/// Cart Item Id
pub type CartItemId = TypedId<CartItem>;

/// Cart Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub id: CartId,
    pub user: UserId,
    pub is_ordered: bool,
    pub created_at: Timestamp,
}

/// Cart Item Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub id: CartItemId,
    pub cart: CartId,
    pub product: ProductId,
    pub size: Option<String>,
    pub quantity: u32,
    /// Price captured when the line was first added.
    pub unit_price: Decimal,
    pub created_at: Timestamp,
}

impl CartItem {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A cart item with the product display fields and live variant stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item: CartItem,
    pub product_name: String,
    pub img_url: Option<String>,
    /// `None` when the line's variant no longer exists.
    pub variant_stock: Option<u32>,
}

/// The active cart with its lines, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub cart: Cart,
    pub lines: Vec<CartLine>,
    /// Advisory total. Checkout recomputes it.
    pub total: Decimal,
}

/// New Cart Item Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub product: ProductId,
    pub size: Option<String>,
    pub quantity: u32,
}

/// What happened to a line when one unit was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovedItem {
    Decremented(CartItem),
    Deleted,
}

/// Sum of `unit_price * quantity` over the given items.
pub fn cart_total<'a>(items: impl IntoIterator<Item = &'a CartItem>) -> Decimal {
    items.into_iter().map(CartItem::line_total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(unit_price: Decimal, quantity: u32) -> CartItem {
        CartItem {
            id: CartItemId::from_i64(1),
            cart: CartId::from_i64(1),
            product: ProductId::from_i64(1),
            size: Some("M".to_string()),
            quantity,
            unit_price,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        assert_eq!(
            item(Decimal::new(550, 2), 3).line_total(),
            Decimal::new(1_650, 2)
        );
    }

    #[test]
    fn cart_total_sums_lines() {
        let items = [item(Decimal::new(1_000, 2), 2), item(Decimal::new(550, 2), 3)];

        assert_eq!(cart_total(&items), Decimal::new(3_650, 2));
    }

    #[test]
    fn empty_cart_totals_zero() {
        assert_eq!(cart_total(&Vec::<CartItem>::new()), Decimal::ZERO);
    }
}
