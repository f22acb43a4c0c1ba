use crate::domain::order::{Order, OrderId};
use crate::domain::ports::{OrderStore, OrderTransaction, OrderTransactionBox};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::trace;

type OrderTable = Arc<RwLock<BTreeMap<OrderId, Order>>>;

/// A thread-safe in-memory order store with transactional writes.
///
/// Committed orders live in an `Arc<RwLock<BTreeMap<OrderId, Order>>>`; each
/// transaction stages its writes privately until `commit`. Ids come from a
/// shared sequence and are never handed out twice, even after a rollback.
#[derive(Clone)]
pub struct InMemoryOrderStore {
    orders: OrderTable,
    sequence: Arc<AtomicU64>,
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self {
            orders: Arc::default(),
            sequence: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl InMemoryOrderStore {
    /// Creates a new, empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn begin(&self) -> Result<OrderTransactionBox> {
        Ok(Box::new(InMemoryTransaction {
            orders: Arc::clone(&self.orders),
            sequence: Arc::clone(&self.sequence),
            staged: BTreeMap::new(),
        }))
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(&id).cloned())
    }

    async fn all_orders(&self) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.values().cloned().collect())
    }
}

/// Staged writes against an `InMemoryOrderStore`.
pub struct InMemoryTransaction {
    orders: OrderTable,
    sequence: Arc<AtomicU64>,
    staged: BTreeMap<OrderId, Order>,
}

#[async_trait]
impl OrderTransaction for InMemoryTransaction {
    async fn save(&mut self, mut order: Order) -> Result<Order> {
        let id = match order.id {
            Some(id) => id,
            None => {
                let id = OrderId(self.sequence.fetch_add(1, Ordering::Relaxed));
                order.id = Some(id);
                id
            }
        };
        self.staged.insert(id, order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        if let Some(order) = self.staged.get(&id) {
            return Ok(Some(order.clone()));
        }
        let orders = self.orders.read().await;
        Ok(orders.get(&id).cloned())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let InMemoryTransaction { orders, staged, .. } = *self;
        trace!(writes = staged.len(), "publishing staged orders");
        let mut orders = orders.write().await;
        orders.extend(staged);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        trace!(writes = self.staged.len(), "discarding staged orders");
        Ok(())
    }
}
