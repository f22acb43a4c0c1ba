use super::order::{Order, OrderId};
use crate::error::Result;
use async_trait::async_trait;

/// Persistence collaborator: hands out transactions and serves the committed view.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Opens a new transaction. Writes made through it become visible to
    /// other readers only after `commit`.
    async fn begin(&self) -> Result<OrderTransactionBox>;
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>>;
    async fn all_orders(&self) -> Result<Vec<Order>>;
}

/// A scoped unit of work over the order store.
///
/// Dropping a transaction without calling `commit` discards its writes.
#[async_trait]
pub trait OrderTransaction: Send + Sync {
    /// Inserts or updates an order, assigning an id when it has none.
    async fn save(&mut self, order: Order) -> Result<Order>;
    /// Reads through staged writes first, then the committed view.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>>;
    async fn commit(self: Box<Self>) -> Result<()>;
    async fn rollback(self: Box<Self>) -> Result<()>;
}

pub type OrderStoreBox = Box<dyn OrderStore>;
pub type OrderTransactionBox = Box<dyn OrderTransaction>;
pub type OrderStoreFactory = Box<dyn Fn() -> OrderStoreBox + Send + Sync>;
