use crate::application::boundary::{RollbackPolicy, TransactionBoundary};
use crate::domain::order::{NewOrder, Order, OrderId};
use crate::domain::payment::{PaymentFailure, PaymentGatewayBox};
use crate::domain::ports::{OrderStoreBox, OrderTransactionBox};
use crate::error::{OrderError, Result};
use tracing::{error, info, warn};

/// Places orders and takes payment for them.
///
/// `OrderService` owns the order store and the payment gateway. Each call to
/// [`OrderService::order`] opens one transaction, and the configured
/// [`RollbackPolicy`] decides what survives when payment fails.
pub struct OrderService {
    store: OrderStoreBox,
    gateway: PaymentGatewayBox,
    boundary: TransactionBoundary,
}

impl OrderService {
    /// Creates a service with the default policy: declined payments keep the
    /// pending order, unexpected failures discard it.
    ///
    /// # Arguments
    ///
    /// * `store` - The store orders are persisted in.
    /// * `gateway` - The collaborator that decides payment outcomes.
    pub fn new(store: OrderStoreBox, gateway: PaymentGatewayBox) -> Self {
        Self::with_policy(store, gateway, RollbackPolicy::default())
    }

    pub fn with_policy(
        store: OrderStoreBox,
        gateway: PaymentGatewayBox,
        policy: RollbackPolicy,
    ) -> Self {
        Self {
            store,
            gateway,
            boundary: TransactionBoundary::new(policy),
        }
    }

    /// Creates a pending order and attempts payment for it.
    ///
    /// * Payment succeeds: the order is marked completed and committed.
    /// * Payment declined: `OrderError::NotEnoughMoney` is returned and the
    ///   pending order is still committed.
    /// * Unexpected failure: the transaction is rolled back, so no order is
    ///   left behind, and the error is returned.
    pub async fn order(&self, request: NewOrder) -> Result<Order> {
        info!(username = %request.username, "order called");
        let mut tx = self.store.begin().await?;
        let result = self.place(&mut tx, request).await;
        self.boundary.complete(tx, result).await
    }

    async fn place(&self, tx: &mut OrderTransactionBox, request: NewOrder) -> Result<Order> {
        let mut order = tx.save(Order::from(request)).await?;
        let order_id = order.id.ok_or_else(|| {
            OrderError::TransactionError("store did not assign an order id".to_string())
        })?;

        info!(%order_id, "entering payment process");
        match self.gateway.pay(&order).await {
            Ok(()) => {
                info!(%order_id, "payment approved");
                order.complete();
                let order = tx.save(order).await?;
                info!(%order_id, "payment process finished");
                Ok(order)
            }
            Err(PaymentFailure::InsufficientBalance(message)) => {
                warn!(%order_id, %message, "payment declined: insufficient balance");
                Err(OrderError::NotEnoughMoney { order_id, message })
            }
            Err(PaymentFailure::Unexpected(message)) => {
                error!(%order_id, %message, "system failure during payment");
                Err(OrderError::System(message))
            }
        }
    }

    pub async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        self.store.find_by_id(id).await
    }

    /// Consumes the service and returns every committed order.
    pub async fn into_orders(self) -> Result<Vec<Order>> {
        self.store.all_orders().await
    }
}
