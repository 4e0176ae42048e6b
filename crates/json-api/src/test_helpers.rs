//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use storefront_app::{
    auth::{MockAuthService, Requester, UserId},
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            models::{CartId, CartItem, CartItemId},
        },
        checkout::MockCheckoutService,
        inventory::MockInventoryService,
        orders::{
            MockOrdersService,
            models::{Order, OrderId, PENDING_STATUS},
        },
        products::{MockProductsService, models::ProductId},
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER: UserId = UserId::from_i64(42);

pub(crate) const TEST_ADMIN: UserId = UserId::from_i64(1);

/// Mocked services. Any call without a matching expectation fails the test.
pub(crate) struct TestApp {
    pub(crate) products: MockProductsService,
    pub(crate) inventory: MockInventoryService,
    pub(crate) carts: MockCartsService,
    pub(crate) checkout: MockCheckoutService,
    pub(crate) orders: MockOrdersService,
    pub(crate) auth: MockAuthService,
}

impl TestApp {
    pub(crate) fn new() -> Self {
        Self {
            products: MockProductsService::new(),
            inventory: MockInventoryService::new(),
            carts: MockCartsService::new(),
            checkout: MockCheckoutService::new(),
            orders: MockOrdersService::new(),
            auth: MockAuthService::new(),
        }
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            products: Arc::new(self.products),
            inventory: Arc::new(self.inventory),
            carts: Arc::new(self.carts),
            checkout: Arc::new(self.checkout),
            orders: Arc::new(self.orders),
            auth: Arc::new(self.auth),
        })
    }
}

/// Stands in for the auth middleware with a fixed requester.
#[derive(Debug)]
pub(crate) struct InjectRequester(pub(crate) Requester);

#[salvo::handler]
impl InjectRequester {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_requester(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

pub(crate) fn service_with(app: TestApp, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(app.into_state())).push(route))
}

pub(crate) fn service_as(app: TestApp, requester: Requester, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(app.into_state()))
            .hoop(InjectRequester(requester))
            .push(route),
    )
}

pub(crate) fn shopper() -> Requester {
    Requester::user(TEST_USER)
}

pub(crate) fn admin() -> Requester {
    Requester::admin(TEST_ADMIN)
}

pub(crate) fn make_cart_item(id: i64, quantity: u32) -> CartItem {
    CartItem {
        id: CartItemId::from_i64(id),
        cart: CartId::from_i64(10),
        product: ProductId::from_i64(3),
        size: Some("M".to_string()),
        quantity,
        unit_price: Decimal::new(1_000, 2),
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(id: i64, user: UserId) -> Order {
    Order {
        id: OrderId::from_i64(id),
        cart: CartId::from_i64(10),
        user,
        total_price: Decimal::new(3_650, 2),
        status: PENDING_STATUS.to_string(),
        created_at: Timestamp::UNIX_EPOCH,
    }
}
