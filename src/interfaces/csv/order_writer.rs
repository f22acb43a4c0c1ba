use crate::domain::order::Order;
use crate::error::Result;
use std::io::Write;

/// Writes orders as CSV with an `id,username,pay_status` header.
pub struct OrderWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OrderWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Writes the given orders sorted by id and flushes the sink.
    pub fn write_orders(&mut self, mut orders: Vec<Order>) -> Result<()> {
        orders.sort_by_key(|order| order.id);
        for order in &orders {
            self.writer.serialize(order)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{OrderId, PayStatus};

    #[test]
    fn test_write_orders_sorted() {
        let orders = vec![
            Order {
                id: Some(OrderId(2)),
                username: "잔고부족".to_string(),
                pay_status: PayStatus::Pending,
            },
            Order {
                id: Some(OrderId(1)),
                username: "정상".to_string(),
                pay_status: PayStatus::Completed,
            },
        ];

        let mut buffer = Vec::new();
        OrderWriter::new(&mut buffer).write_orders(orders).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "id,username,pay_status\n1,정상,완료\n2,잔고부족,대기\n"
        );
    }

    #[test]
    fn test_write_no_orders() {
        let mut buffer = Vec::new();
        OrderWriter::new(&mut buffer).write_orders(Vec::new()).unwrap();
        assert!(buffer.is_empty());
    }
}
