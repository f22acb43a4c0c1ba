//! Domain layer: the order entity, payment outcomes and the ports the
//! application layer depends on.

pub mod order;
pub mod payment;
pub mod ports;
