//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{count_param, try_get_count, try_get_optional_count},
    domain::{
        carts::models::{CartId, CartItem, CartItemId, CartLine},
        products::models::ProductId,
    },
};

const LIST_CART_ITEMS_SQL: &str = include_str!("../sql/list_cart_items.sql");
const LIST_CART_LINES_SQL: &str = include_str!("../sql/list_cart_lines.sql");
const FIND_CART_ITEM_SQL: &str = include_str!("../sql/find_cart_item.sql");
const FIND_CART_ITEM_BY_VARIANT_SQL: &str = include_str!("../sql/find_cart_item_by_variant.sql");
const UPSERT_CART_ITEM_SQL: &str = include_str!("../sql/upsert_cart_item.sql");
const SET_CART_ITEM_QUANTITY_SQL: &str = include_str!("../sql/set_cart_item_quantity.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Items in insertion order.
    pub(crate) async fn list_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<Vec<CartItem>, sqlx::Error> {
        query_as::<Postgres, CartItem>(LIST_CART_ITEMS_SQL)
            .bind(cart.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    /// Items joined with product display fields and live variant stock,
    /// newest first.
    pub(crate) async fn list_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(LIST_CART_LINES_SQL)
            .bind(cart.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        item: CartItemId,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        query_as::<Postgres, CartItem>(FIND_CART_ITEM_SQL)
            .bind(item.into_i64())
            .bind(cart.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_item_by_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        product: ProductId,
        size: Option<&str>,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        query_as::<Postgres, CartItem>(FIND_CART_ITEM_BY_VARIANT_SQL)
            .bind(cart.into_i64())
            .bind(product.into_i64())
            .bind(size)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Insert a line, or add `quantity` to the existing line for the same
    /// product and size. The unit price is only written on insert.
    pub(crate) async fn upsert_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        product: ProductId,
        size: &str,
        quantity: u32,
        unit_price: Decimal,
    ) -> Result<CartItem, sqlx::Error> {
        query_as::<Postgres, CartItem>(UPSERT_CART_ITEM_SQL)
            .bind(cart.into_i64())
            .bind(product.into_i64())
            .bind(size)
            .bind(count_param(quantity, "quantity")?)
            .bind(unit_price)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        item: CartItemId,
        quantity: u32,
    ) -> Result<CartItem, sqlx::Error> {
        query_as::<Postgres, CartItem>(SET_CART_ITEM_QUANTITY_SQL)
            .bind(item.into_i64())
            .bind(cart.into_i64())
            .bind(count_param(quantity, "quantity")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        item: CartItemId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item.into_i64())
            .bind(cart.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CartItemId::from_i64(row.try_get("cart_items_id")?),
            cart: CartId::from_i64(row.try_get("cart_id")?),
            product: ProductId::from_i64(row.try_get("product_id")?),
            size: row.try_get("size")?,
            quantity: try_get_count(row, "quantity")?,
            unit_price: row.try_get("price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            item: CartItem::from_row(row)?,
            product_name: row.try_get("product_name")?,
            img_url: row.try_get("img_url")?,
            variant_stock: try_get_optional_count(row, "variant_stock")?,
        })
    }
}
