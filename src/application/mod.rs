//! Application layer containing the order workflow orchestration.
//!
//! `OrderService` is the entry point for placing orders. Every call runs inside
//! one store transaction, and `TransactionBoundary` decides from the error kind
//! whether that transaction is committed or rolled back.

pub mod boundary;
pub mod order_service;
