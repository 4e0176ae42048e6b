//! Orders service.

use std::collections::HashMap;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    auth::{Requester, UserId},
    database::Db,
    domain::orders::{
        errors::OrdersServiceError,
        models::{Order, OrderDetails, OrderId, OrderLine},
        repository::PgOrdersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }

    async fn attach_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: Vec<Order>,
    ) -> Result<Vec<OrderDetails>, sqlx::Error> {
        let ids: Vec<OrderId> = orders.iter().map(|order| order.id).collect();

        let mut lines: HashMap<OrderId, Vec<OrderLine>> = HashMap::with_capacity(ids.len());

        for row in self.repository.list_order_lines(tx, &ids).await? {
            lines.entry(row.order).or_default().push(row.line);
        }

        Ok(orders
            .into_iter()
            .map(|order| OrderDetails {
                lines: lines.remove(&order.id).unwrap_or_default(),
                order,
            })
            .collect())
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn get_order(
        &self,
        requester: Requester,
        order: OrderId,
    ) -> Result<OrderDetails, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let order = self.repository.get_order(&mut tx, order).await?;

        if !requester.can_access(order.user) {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut details = self.attach_lines(&mut tx, vec![order]).await?;

        tx.commit().await?;

        details.pop().ok_or(OrdersServiceError::NotFound)
    }

    async fn list_orders(&self, user: UserId) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self.repository.list_orders_for_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_all_orders(&self) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self.repository.list_all_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_user_orders_with_lines(
        &self,
        user: UserId,
    ) -> Result<Vec<OrderDetails>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self.repository.list_orders_for_user(&mut tx, user).await?;
        let details = self.attach_lines(&mut tx, orders).await?;

        tx.commit().await?;

        Ok(details)
    }

    async fn update_status(
        &self,
        order: OrderId,
        status: String,
    ) -> Result<Order, OrdersServiceError> {
        let status = status.trim();

        if status.is_empty() {
            return Err(OrdersServiceError::InvalidStatus);
        }

        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.update_status(&mut tx, order, status).await?;

        tx.commit().await?;

        info!(order_id = %updated.id, status = %updated.status, "order status updated");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Retrieve an order with its lines. Only the owner or an admin may read it.
    async fn get_order(
        &self,
        requester: Requester,
        order: OrderId,
    ) -> Result<OrderDetails, OrdersServiceError>;

    /// The user's orders, newest first.
    async fn list_orders(&self, user: UserId) -> Result<Vec<Order>, OrdersServiceError>;

    /// Every order, newest first.
    async fn list_all_orders(&self) -> Result<Vec<Order>, OrdersServiceError>;

    /// The user's orders with their lines, newest first.
    async fn list_user_orders_with_lines(
        &self,
        user: UserId,
    ) -> Result<Vec<OrderDetails>, OrdersServiceError>;

    /// Set an order's status. Any non-blank status is accepted.
    async fn update_status(
        &self,
        order: OrderId,
        status: String,
    ) -> Result<Order, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::{checkout::CheckoutService, orders::models::PENDING_STATUS},
        test::TestContext,
    };

    use super::*;

    async fn place_order(ctx: &TestContext, user: UserId) -> TestResult<OrderId> {
        let product = ctx.create_product("Tee", Decimal::new(1_250, 2)).await;
        ctx.seed_variant(product.id, "M", 10).await;
        ctx.add_to_cart(user, product.id, "M", 2).await?;

        Ok(ctx.checkout.checkout(user).await?.order)
    }

    #[tokio::test]
    async fn owner_reads_order_with_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user().await;
        let order = place_order(&ctx, user).await?;

        let details = ctx.orders.get_order(Requester::user(user), order).await?;

        assert_eq!(details.order.user, user);
        assert_eq!(details.order.status, PENDING_STATUS);
        assert_eq!(details.order.total_price, Decimal::new(2_500, 2));
        assert_eq!(details.lines.len(), 1);
        assert_eq!(details.lines[0].quantity, 2);
        assert_eq!(details.lines[0].size.as_deref(), Some("M"));

        Ok(())
    }

    #[tokio::test]
    async fn non_owner_is_forbidden() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user().await;
        let other = ctx.create_user().await;
        let order = place_order(&ctx, owner).await?;

        let result = ctx.orders.get_order(Requester::user(other), order).await;

        assert!(
            matches!(result, Err(OrdersServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn admin_reads_any_order() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user().await;
        let admin = ctx.create_user().await;
        let order = place_order(&ctx, owner).await?;

        let details = ctx.orders.get_order(Requester::admin(admin), order).await?;

        assert_eq!(details.order.id, order);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user().await;

        let result = ctx
            .orders
            .get_order(Requester::user(user), OrderId::from_i64(31_337))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_only_returns_users_orders_newest_first() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user().await;
        let other = ctx.create_user().await;

        let first = place_order(&ctx, user).await?;
        let second = place_order(&ctx, user).await?;
        place_order(&ctx, other).await?;

        let ids: Vec<OrderId> = ctx
            .orders
            .list_orders(user)
            .await?
            .into_iter()
            .map(|order| order.id)
            .collect();

        assert_eq!(ids, vec![second, first]);
        assert_eq!(ctx.orders.list_all_orders().await?.len(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn list_user_orders_with_lines_groups_lines_per_order() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user().await;

        place_order(&ctx, user).await?;
        place_order(&ctx, user).await?;

        let details = ctx.orders.list_user_orders_with_lines(user).await?;

        assert_eq!(details.len(), 2);
        assert!(details.iter().all(|d| d.lines.len() == 1));

        Ok(())
    }

    #[tokio::test]
    async fn update_status_sets_trimmed_status() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user().await;
        let order = place_order(&ctx, user).await?;

        let updated = ctx
            .orders
            .update_status(order, " SHIPPED ".to_string())
            .await?;

        assert_eq!(updated.status, "SHIPPED");
        assert_eq!(updated.total_price, Decimal::new(2_500, 2));

        Ok(())
    }

    #[tokio::test]
    async fn blank_status_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user().await;
        let order = place_order(&ctx, user).await?;

        let result = ctx.orders.update_status(order, "   ".to_string()).await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidStatus)),
            "expected InvalidStatus, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_status_of_unknown_order_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .orders
            .update_status(OrderId::from_i64(404), "SHIPPED".to_string())
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
