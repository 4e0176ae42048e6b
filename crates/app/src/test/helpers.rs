//! Test Helpers
//!
//! Seeding shortcuts for state the services do not create themselves
//! (users, legacy rows) or that tests set up repeatedly.

use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction, query, query_scalar};

use crate::{
    auth::UserId,
    domain::{
        carts::{
            CartsService, CartsServiceError,
            models::{CartId, CartItem, CartItemId, NewCartItem},
        },
        inventory::InventoryService,
        products::{
            ProductsService,
            models::{NewProduct, Product, ProductId},
        },
    },
    test::TestContext,
};

impl TestContext {
    /// Insert a user with a unique email.
    pub(crate) async fn create_user(&self) -> UserId {
        let id: i64 = query_scalar(
            "INSERT INTO users (email) \
             VALUES ('shopper-' || gen_random_uuid() || '@example.test') \
             RETURNING user_id",
        )
        .fetch_one(self.db.pool())
        .await
        .expect("Failed to create test user");

        UserId::from_i64(id)
    }

    pub(crate) async fn create_product(&self, name: &str, price: Decimal) -> Product {
        self.products
            .create_product(NewProduct {
                name: name.to_string(),
                price,
                img_url: None,
            })
            .await
            .expect("Failed to create test product")
    }

    pub(crate) async fn seed_variant(&self, product: ProductId, size: &str, stock: u32) {
        self.inventory
            .set_variant_stock(product, size, stock)
            .await
            .expect("Failed to seed variant stock");
    }

    pub(crate) async fn add_to_cart(
        &self,
        user: UserId,
        product: ProductId,
        size: &str,
        quantity: u32,
    ) -> Result<CartItem, CartsServiceError> {
        self.carts
            .add_item(
                user,
                NewCartItem {
                    product,
                    size: Some(size.to_string()),
                    quantity,
                },
            )
            .await
    }

    /// Change a catalog price after items have been carted.
    pub(crate) async fn set_product_price(&self, product: ProductId, price: Decimal) {
        query("UPDATE products SET price = $2 WHERE product_id = $1")
            .bind(product.into_i64())
            .bind(price)
            .execute(self.db.pool())
            .await
            .expect("Failed to update product price");
    }

    pub(crate) async fn delete_variant(&self, product: ProductId, size: &str) {
        query("DELETE FROM product_variants WHERE product_id = $1 AND size = $2")
            .bind(product.into_i64())
            .bind(size)
            .execute(self.db.pool())
            .await
            .expect("Failed to delete variant");
    }

    /// Insert a cart line with no size, as older clients could.
    pub(crate) async fn insert_sizeless_item(
        &self,
        cart: CartId,
        product: ProductId,
        quantity: i32,
    ) -> CartItemId {
        let id: i64 = query_scalar(
            "INSERT INTO cart_items (cart_id, product_id, size, quantity, price) \
             SELECT $1, product_id, NULL, $3, price FROM products WHERE product_id = $2 \
             RETURNING cart_items_id",
        )
        .bind(cart.into_i64())
        .bind(product.into_i64())
        .bind(quantity)
        .fetch_one(self.db.pool())
        .await
        .expect("Failed to insert sizeless cart item");

        CartItemId::from_i64(id)
    }

    /// Make every newly inserted cart arrive already ordered, so no open
    /// cart can ever be resolved for any user.
    pub(crate) async fn close_carts_on_insert(&self) {
        query(
            "CREATE FUNCTION close_cart_on_insert() RETURNS trigger AS $$ \
             BEGIN NEW.is_ordered := TRUE; RETURN NEW; END; \
             $$ LANGUAGE plpgsql",
        )
        .execute(self.db.pool())
        .await
        .expect("Failed to create cart trigger function");

        query(
            "CREATE TRIGGER close_cart_on_insert BEFORE INSERT ON carts \
             FOR EACH ROW EXECUTE FUNCTION close_cart_on_insert()",
        )
        .execute(self.db.pool())
        .await
        .expect("Failed to create cart trigger");
    }

    /// Hold the row lock on the user's open cart until the returned
    /// transaction ends, so concurrent checkouts queue behind it.
    pub(crate) async fn lock_open_cart(&self, user: UserId) -> Transaction<'static, Postgres> {
        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .expect("Failed to begin locking transaction");

        query("SELECT cart_id FROM carts WHERE user_id = $1 AND NOT is_ordered FOR UPDATE")
            .bind(user.into_i64())
            .execute(&mut *tx)
            .await
            .expect("Failed to lock open cart");

        tx
    }

    pub(crate) async fn open_cart_count(&self, user: UserId) -> i64 {
        query_scalar("SELECT COUNT(*) FROM carts WHERE user_id = $1 AND NOT is_ordered")
            .bind(user.into_i64())
            .fetch_one(self.db.pool())
            .await
            .expect("Failed to count open carts")
    }
}
