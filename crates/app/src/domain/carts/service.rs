//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    auth::UserId,
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{CartItem, CartItemId, CartView, NewCartItem, RemovedItem, cart_total},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        inventory::{
            models::{Variant, normalize_size},
            repository::PgInventoryRepository,
        },
        products::{models::ProductId, repository::PgProductsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
    inventory_repository: PgInventoryRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
            inventory_repository: PgInventoryRepository::new(),
        }
    }

    /// Look up the variant a line would draw from and check that it holds
    /// `requested` units. Advisory only: checkout takes stock authoritatively.
    async fn check_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        size: &str,
        requested: u32,
    ) -> Result<Variant, CartsServiceError> {
        let variant = self
            .inventory_repository
            .get_variant(tx, product, size)
            .await?
            .ok_or_else(|| CartsServiceError::InvalidVariant {
                size: size.to_string(),
            })?;

        if requested > variant.stock {
            return Err(CartsServiceError::InsufficientStock {
                size: variant.size,
                available: variant.stock,
                requested,
            });
        }

        Ok(variant)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserId) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self
            .carts_repository
            .get_or_create_active_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::ActiveCartUnavailable)?;

        let lines = self
            .items_repository
            .list_cart_lines(&mut tx, cart.id)
            .await?;

        tx.commit().await?;

        let total = cart_total(lines.iter().map(|line| &line.item));

        Ok(CartView { cart, lines, total })
    }

    async fn add_item(
        &self,
        user: UserId,
        item: NewCartItem,
    ) -> Result<CartItem, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let size = normalize_size(item.size.as_deref()).ok_or(CartsServiceError::MissingSize)?;

        let mut tx = self.db.begin_transaction().await?;

        let cart = self
            .carts_repository
            .get_or_create_active_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::ActiveCartUnavailable)?;

        let product = self
            .products_repository
            .get_product(&mut tx, item.product)
            .await?;

        let in_cart = self
            .items_repository
            .find_item_by_variant(&mut tx, cart.id, product.id, Some(&size))
            .await?
            .map_or(0, |existing| existing.quantity);

        let requested = in_cart.saturating_add(item.quantity);

        self.check_stock(&mut tx, product.id, &size, requested)
            .await?;

        let added = self
            .items_repository
            .upsert_item(&mut tx, cart.id, product.id, &size, item.quantity, product.price)
            .await?;

        tx.commit().await?;

        Ok(added)
    }

    async fn update_item(
        &self,
        user: UserId,
        item: CartItemId,
        quantity: u32,
    ) -> Result<CartItem, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_transaction().await?;

        let cart = self
            .carts_repository
            .get_or_create_active_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::ActiveCartUnavailable)?;

        let existing = self
            .items_repository
            .find_item(&mut tx, cart.id, item)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        if quantity > existing.quantity {
            let size = existing
                .size
                .as_deref()
                .ok_or(CartsServiceError::MissingSize)?;

            self.check_stock(&mut tx, existing.product, size, quantity)
                .await?;
        }

        let updated = self
            .items_repository
            .set_quantity(&mut tx, cart.id, item, quantity)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn remove_item(
        &self,
        user: UserId,
        product: ProductId,
        size: Option<String>,
    ) -> Result<RemovedItem, CartsServiceError> {
        let size = normalize_size(size.as_deref());

        let mut tx = self.db.begin_transaction().await?;

        let cart = self
            .carts_repository
            .get_or_create_active_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::ActiveCartUnavailable)?;

        let existing = self
            .items_repository
            .find_item_by_variant(&mut tx, cart.id, product, size.as_deref())
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let removed = if existing.quantity > 1 {
            let decremented = self
                .items_repository
                .set_quantity(&mut tx, cart.id, existing.id, existing.quantity - 1)
                .await?;

            RemovedItem::Decremented(decremented)
        } else {
            self.items_repository
                .delete_item(&mut tx, cart.id, existing.id)
                .await?;

            RemovedItem::Deleted
        };

        tx.commit().await?;

        Ok(removed)
    }

    async fn delete_item(&self, user: UserId, item: CartItemId) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self
            .carts_repository
            .get_or_create_active_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::ActiveCartUnavailable)?;

        let rows_affected = self
            .items_repository
            .delete_item(&mut tx, cart.id, item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's active cart, creating it if absent.
    async fn get_cart(&self, user: UserId) -> Result<CartView, CartsServiceError>;

    /// Add units of a product size to the active cart. Repeated adds of the
    /// same product and size merge into one line.
    async fn add_item(&self, user: UserId, item: NewCartItem)
    -> Result<CartItem, CartsServiceError>;

    /// Set the absolute quantity of a line in the active cart.
    async fn update_item(
        &self,
        user: UserId,
        item: CartItemId,
        quantity: u32,
    ) -> Result<CartItem, CartsServiceError>;

    /// Take one unit off the line for a product size, deleting it at zero.
    async fn remove_item(
        &self,
        user: UserId,
        product: ProductId,
        size: Option<String>,
    ) -> Result<RemovedItem, CartsServiceError>;

    /// Delete a line from the active cart.
    async fn delete_item(&self, user: UserId, item: CartItemId) -> Result<(), CartsServiceError>;
}
