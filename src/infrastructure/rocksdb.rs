use crate::domain::order::{Order, OrderId};
use crate::domain::ports::{OrderStore, OrderTransaction, OrderTransactionBox};
use crate::error::{OrderError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options, WriteBatch};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, trace};

/// Column Family for storing committed orders.
pub const CF_ORDERS: &str = "orders";
/// Column Family for store bookkeeping such as the id sequence.
pub const CF_META: &str = "meta";

const NEXT_ORDER_ID_KEY: &[u8] = b"next_order_id";

/// A persistent order store implementation using RocksDB.
///
/// Orders are kept in the `orders` Column Family, keyed by the big-endian
/// bytes of their id and encoded as JSON. Transactions stage writes in memory
/// and publish them with a single atomic `WriteBatch` on commit.
///
/// The id sequence is persisted in the `meta` Column Family as soon as an id
/// is handed out, so ids of rolled-back orders are not reused after a restart.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBOrderStore {
    db: Arc<DB>,
    sequence: Arc<Mutex<u64>>,
}

impl RocksDBOrderStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// The id sequence resumes after the highest id ever handed out.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_orders = ColumnFamilyDescriptor::new(CF_ORDERS, Options::default());
        let cf_meta = ColumnFamilyDescriptor::new(CF_META, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_orders, cf_meta])?;

        let after_last_order = {
            let cf = orders_cf(&db)?;
            match db.iterator_cf(cf, IteratorMode::End).next() {
                Some(item) => {
                    let (key, _) = item?;
                    decode_id(&key)?.0 + 1
                }
                None => 1,
            }
        };
        let persisted = match db.get_cf(meta_cf(&db)?, NEXT_ORDER_ID_KEY)? {
            Some(bytes) => decode_id(&bytes)?.0,
            None => 1,
        };
        let next_id = after_last_order.max(persisted);
        debug!(next_id, "opened order database");

        Ok(Self {
            db: Arc::new(db),
            sequence: Arc::new(Mutex::new(next_id)),
        })
    }
}

impl From<rocksdb::Error> for OrderError {
    fn from(err: rocksdb::Error) -> Self {
        OrderError::StorageError(format!("RocksDB error: {}", err))
    }
}

fn orders_cf(db: &DB) -> Result<&ColumnFamily> {
    db.cf_handle(CF_ORDERS)
        .ok_or_else(|| OrderError::StorageError("Orders column family not found".to_string()))
}

fn meta_cf(db: &DB) -> Result<&ColumnFamily> {
    db.cf_handle(CF_META)
        .ok_or_else(|| OrderError::StorageError("Meta column family not found".to_string()))
}

/// Hands out the next id and records the new high-water mark.
fn allocate_id(db: &DB, sequence: &Mutex<u64>) -> Result<OrderId> {
    let mut next = sequence
        .lock()
        .map_err(|_| OrderError::StorageError("Order sequence lock poisoned".to_string()))?;
    let id = *next;
    db.put_cf(meta_cf(db)?, NEXT_ORDER_ID_KEY, (id + 1).to_be_bytes())?;
    *next = id + 1;
    Ok(OrderId(id))
}

fn decode_id(key: &[u8]) -> Result<OrderId> {
    let bytes: [u8; 8] = key
        .try_into()
        .map_err(|_| OrderError::StorageError(format!("Malformed order key: {:?}", key)))?;
    Ok(OrderId(u64::from_be_bytes(bytes)))
}

fn read_order(db: &DB, id: OrderId) -> Result<Option<Order>> {
    let cf = orders_cf(db)?;
    match db.get_cf(cf, id.0.to_be_bytes())? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

#[async_trait]
impl OrderStore for RocksDBOrderStore {
    async fn begin(&self) -> Result<OrderTransactionBox> {
        Ok(Box::new(RocksDBTransaction {
            db: Arc::clone(&self.db),
            sequence: Arc::clone(&self.sequence),
            staged: BTreeMap::new(),
        }))
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        read_order(&self.db, id)
    }

    async fn all_orders(&self) -> Result<Vec<Order>> {
        let cf = orders_cf(&self.db)?;
        let mut orders = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            orders.push(serde_json::from_slice(&value)?);
        }
        Ok(orders)
    }
}

/// Staged writes against a `RocksDBOrderStore`.
pub struct RocksDBTransaction {
    db: Arc<DB>,
    sequence: Arc<Mutex<u64>>,
    staged: BTreeMap<OrderId, Order>,
}

#[async_trait]
impl OrderTransaction for RocksDBTransaction {
    async fn save(&mut self, mut order: Order) -> Result<Order> {
        let id = match order.id {
            Some(id) => id,
            None => {
                let id = allocate_id(&self.db, &self.sequence)?;
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
        read_order(&self.db, id)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let cf = orders_cf(&self.db)?;
        let mut batch = WriteBatch::default();
        for (id, order) in &self.staged {
            batch.put_cf(cf, id.0.to_be_bytes(), serde_json::to_vec(order)?);
        }
        trace!(writes = self.staged.len(), "writing order batch");
        self.db.write(&batch)?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        trace!(writes = self.staged.len(), "discarding staged orders");
        Ok(())
    }
}
