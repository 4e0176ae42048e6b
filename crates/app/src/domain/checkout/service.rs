//! Checkout service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{Span, info, warn};

use crate::{
    auth::UserId,
    database::{Db, is_transient_conflict},
    domain::{
        carts::{
            models::cart_total,
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        checkout::{errors::CheckoutError, models::CheckoutReceipt},
        inventory::{
            models::{DecrementOutcome, normalize_size},
            repository::PgInventoryRepository,
        },
        orders::repository::PgOrdersRepository,
        products::models::ProductId,
    },
};

/// Attempts made when a checkout hits a serialization failure or deadlock.
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

#[derive(Debug, Clone)]
pub struct PgCheckoutService {
    db: Db,
    max_attempts: usize,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    inventory_repository: PgInventoryRepository,
    orders_repository: PgOrdersRepository,
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            inventory_repository: PgInventoryRepository::new(),
            orders_repository: PgOrdersRepository::new(),
        }
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// One all-or-nothing checkout. Returning early drops the transaction,
    /// which rolls back every write made so far.
    async fn attempt(&self, user: UserId) -> Result<CheckoutReceipt, CheckoutError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self
            .carts_repository
            .lock_active_cart(&mut tx, user)
            .await?
            .ok_or(CheckoutError::NoActiveCart)?;

        let items = self
            .items_repository
            .list_cart_items(&mut tx, cart.id)
            .await?;

        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let mut lines: Vec<(ProductId, String, u32)> = Vec::with_capacity(items.len());

        for item in &items {
            let size = normalize_size(item.size.as_deref())
                .ok_or(CheckoutError::MissingSize { item: item.id })?;

            lines.push((item.product, size, item.quantity));
        }

        // Take variant locks in a fixed order so concurrent checkouts over
        // overlapping carts queue instead of deadlocking.
        lines.sort();

        for (product, size, quantity) in lines {
            let outcome = self
                .inventory_repository
                .conditional_decrement(&mut tx, product, &size, quantity)
                .await?;

            match outcome {
                DecrementOutcome::Applied { .. } => {}
                DecrementOutcome::Insufficient { available } => {
                    return Err(CheckoutError::InsufficientStock {
                        product,
                        size,
                        available,
                        requested: quantity,
                    });
                }
                DecrementOutcome::NotFound => {
                    return Err(CheckoutError::InvalidVariant { product, size });
                }
            }
        }

        let total_price = cart_total(&items);

        let order = self
            .orders_repository
            .create_order(&mut tx, cart.id, total_price)
            .await?;

        if self.carts_repository.close_cart(&mut tx, cart.id).await? != 1 {
            return Err(CheckoutError::NoActiveCart);
        }

        self.carts_repository.create_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(CheckoutReceipt {
            order: order.id,
            total_price: order.total_price,
        })
    }
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    #[tracing::instrument(
        name = "checkout.service.checkout",
        skip(self),
        fields(
            user_id = %user,
            order_id = tracing::field::Empty,
            attempts = tracing::field::Empty
        ),
        err
    )]
    async fn checkout(&self, user: UserId) -> Result<CheckoutReceipt, CheckoutError> {
        let span = Span::current();
        let mut attempt = 1;

        loop {
            let result = self.attempt(user).await;

            match result {
                Err(CheckoutError::Server(ref error))
                    if attempt < self.max_attempts && is_transient_conflict(error) =>
                {
                    warn!(attempt, error = %error, "retrying checkout after transient conflict");

                    attempt += 1;
                }
                result => {
                    span.record("attempts", attempt);

                    if let Ok(receipt) = &result {
                        span.record("order_id", tracing::field::display(receipt.order));

                        info!(order_id = %receipt.order, total_price = %receipt.total_price, "checkout completed");
                    }

                    return result;
                }
            }
        }
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Place an order for everything in the user's active cart.
    async fn checkout(&self, user: UserId) -> Result<CheckoutReceipt, CheckoutError>;
}
