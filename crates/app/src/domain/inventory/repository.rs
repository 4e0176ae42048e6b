//! Inventory Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::{count_param, try_get_count},
    domain::{
        inventory::models::{DecrementOutcome, Variant, VariantId},
        products::models::ProductId,
    },
};

const GET_VARIANT_SQL: &str = include_str!("sql/get_variant.sql");
const LIST_VARIANTS_SQL: &str = include_str!("sql/list_variants.sql");
const UPSERT_VARIANT_SQL: &str = include_str!("sql/upsert_variant.sql");
const DECREMENT_VARIANT_SQL: &str = include_str!("sql/decrement_variant.sql");
const LOCK_VARIANT_STOCK_SQL: &str = include_str!("sql/lock_variant_stock.sql");
const REFRESH_PRODUCT_STOCK_SQL: &str = include_str!("sql/refresh_product_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgInventoryRepository;

impl PgInventoryRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        size: &str,
    ) -> Result<Option<Variant>, sqlx::Error> {
        query_as::<Postgres, Variant>(GET_VARIANT_SQL)
            .bind(product.into_i64())
            .bind(size)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_variants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Vec<Variant>, sqlx::Error> {
        query_as::<Postgres, Variant>(LIST_VARIANTS_SQL)
            .bind(product.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn upsert_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        size: &str,
        stock: u32,
    ) -> Result<Variant, sqlx::Error> {
        query_as::<Postgres, Variant>(UPSERT_VARIANT_SQL)
            .bind(product.into_i64())
            .bind(size)
            .bind(count_param(stock, "stock")?)
            .fetch_one(&mut **tx)
            .await
    }

    /// Take `amount` units from a variant only if at least that many remain.
    ///
    /// The variant row is locked before its stock is read, so the count
    /// reported on a shortage is the one the decision was made against and
    /// stays put until the transaction ends. The product's aggregate stock is
    /// adjusted in the same statement as the variant.
    pub(crate) async fn conditional_decrement(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        size: &str,
        amount: u32,
    ) -> Result<DecrementOutcome, sqlx::Error> {
        let available: Option<i32> = query_scalar(LOCK_VARIANT_STOCK_SQL)
            .bind(product.into_i64())
            .bind(size)
            .fetch_optional(&mut **tx)
            .await?;

        let Some(available) = available else {
            return Ok(DecrementOutcome::NotFound);
        };

        let available = u32::try_from(available).unwrap_or_default();

        if available < amount {
            return Ok(DecrementOutcome::Insufficient { available });
        }

        let remaining: Option<i32> = query_scalar(DECREMENT_VARIANT_SQL)
            .bind(product.into_i64())
            .bind(size)
            .bind(count_param(amount, "amount")?)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(match remaining {
            Some(remaining) => DecrementOutcome::Applied {
                remaining: u32::try_from(remaining).unwrap_or_default(),
            },
            // The row is locked, so the guard can only fail if it vanished.
            None => DecrementOutcome::NotFound,
        })
    }

    /// Recompute a product's aggregate stock from its variants.
    pub(crate) async fn refresh_product_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REFRESH_PRODUCT_STOCK_SQL)
            .bind(product.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Variant {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: VariantId::from_i64(row.try_get("variant_id")?),
            product: ProductId::from_i64(row.try_get("product_id")?),
            size: row.try_get("size")?,
            stock: try_get_count(row, "stock")?,
        })
    }
}
