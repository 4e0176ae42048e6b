//! Inventory service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        inventory::{
            errors::InventoryServiceError,
            models::{DecrementOutcome, Variant, normalize_size},
            repository::PgInventoryRepository,
        },
        products::models::ProductId,
    },
};

#[derive(Debug, Clone)]
pub struct PgInventoryService {
    db: Db,
    repository: PgInventoryRepository,
}

impl PgInventoryService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgInventoryRepository::new(),
        }
    }
}

#[async_trait]
impl InventoryService for PgInventoryService {
    async fn get_variant(
        &self,
        product: ProductId,
        size: &str,
    ) -> Result<Variant, InventoryServiceError> {
        let size = normalize_size(Some(size)).ok_or(InventoryServiceError::MissingSize)?;

        let mut tx = self.db.begin_transaction().await?;

        let variant = self
            .repository
            .get_variant(&mut tx, product, &size)
            .await?
            .ok_or(InventoryServiceError::NotFound)?;

        tx.commit().await?;

        Ok(variant)
    }

    async fn list_variants(&self, product: ProductId) -> Result<Vec<Variant>, InventoryServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let variants = self.repository.list_variants(&mut tx, product).await?;

        tx.commit().await?;

        Ok(variants)
    }

    async fn set_variant_stock(
        &self,
        product: ProductId,
        size: &str,
        stock: u32,
    ) -> Result<Variant, InventoryServiceError> {
        let size = normalize_size(Some(size)).ok_or(InventoryServiceError::MissingSize)?;

        let mut tx = self.db.begin_transaction().await?;

        let variant = self
            .repository
            .upsert_variant(&mut tx, product, &size, stock)
            .await?;

        self.repository
            .refresh_product_stock(&mut tx, product)
            .await?;

        tx.commit().await?;

        debug!(%product, size = %variant.size, stock, "variant stock set");

        Ok(variant)
    }

    async fn conditional_decrement(
        &self,
        product: ProductId,
        size: &str,
        amount: u32,
    ) -> Result<DecrementOutcome, InventoryServiceError> {
        if amount == 0 {
            return Err(InventoryServiceError::InvalidQuantity);
        }

        let size = normalize_size(Some(size)).ok_or(InventoryServiceError::MissingSize)?;

        let mut tx = self.db.begin_transaction().await?;

        let outcome = self
            .repository
            .conditional_decrement(&mut tx, product, &size, amount)
            .await?;

        tx.commit().await?;

        Ok(outcome)
    }
}

#[automock]
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Read a variant's current stock. Never use this alone to authorize a
    /// decrement.
    async fn get_variant(
        &self,
        product: ProductId,
        size: &str,
    ) -> Result<Variant, InventoryServiceError>;

    /// List a product's variants ordered by size.
    async fn list_variants(&self, product: ProductId) -> Result<Vec<Variant>, InventoryServiceError>;

    /// Create or overwrite a variant's stock and refresh the product's
    /// aggregate stock.
    async fn set_variant_stock(
        &self,
        product: ProductId,
        size: &str,
        stock: u32,
    ) -> Result<Variant, InventoryServiceError>;

    /// Atomically take `amount` units if they are available.
    async fn conditional_decrement(
        &self,
        product: ProductId,
        size: &str,
        amount: u32,
    ) -> Result<DecrementOutcome, InventoryServiceError>;
}
