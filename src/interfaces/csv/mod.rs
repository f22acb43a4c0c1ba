//! CSV adapters: order requests in, committed orders out.

pub mod order_reader;
pub mod order_writer;
