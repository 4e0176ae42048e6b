//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    auth::UserId,
    domain::carts::models::{Cart, CartId},
};

const LOCK_ACTIVE_CART_SQL: &str = include_str!("../sql/lock_active_cart.sql");
const INSERT_ACTIVE_CART_SQL: &str = include_str!("../sql/insert_active_cart.sql");
const CREATE_CART_SQL: &str = include_str!("../sql/create_cart.sql");
const CLOSE_CART_SQL: &str = include_str!("../sql/close_cart.sql");

/// Attempts at resolving the active cart before giving up.
///
/// A lookup can miss when a concurrent checkout replaces the cart between the
/// insert and the select.
const ACTIVE_CART_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lock the user's open cart, if there is one.
    pub(crate) async fn lock_active_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Option<Cart>, sqlx::Error> {
        query_as::<Postgres, Cart>(LOCK_ACTIVE_CART_SQL)
            .bind(user.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Lock the user's open cart, creating it first when absent.
    ///
    /// Returns `None` only when every attempt lost the race.
    pub(crate) async fn get_or_create_active_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Option<Cart>, sqlx::Error> {
        for _ in 0..ACTIVE_CART_ATTEMPTS {
            query(INSERT_ACTIVE_CART_SQL)
                .bind(user.into_i64())
                .execute(&mut **tx)
                .await?;

            if let Some(cart) = self.lock_active_cart(tx, user).await? {
                return Ok(Some(cart));
            }
        }

        Ok(None)
    }

    pub(crate) async fn create_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Cart, sqlx::Error> {
        query_as::<Postgres, Cart>(CREATE_CART_SQL)
            .bind(user.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    /// Mark an open cart as ordered. Returns the number of carts closed.
    pub(crate) async fn close_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLOSE_CART_SQL)
            .bind(cart.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CartId::from_i64(row.try_get("cart_id")?),
            user: UserId::from_i64(row.try_get("user_id")?),
            is_ordered: row.try_get("is_ordered")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
