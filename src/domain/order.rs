use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier of an order record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payment state of an order. Serialized with the literals stored in the
/// `pay_status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PayStatus {
    #[default]
    #[serde(rename = "대기")]
    Pending,
    #[serde(rename = "완료")]
    Completed,
}

impl PayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayStatus::Pending => "대기",
            PayStatus::Completed => "완료",
        }
    }
}

impl fmt::Display for PayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order request as submitted by a caller: no id, no payment state yet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewOrder {
    pub username: String,
}

impl NewOrder {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// A persisted customer order and its payment status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// `None` until the store assigns one on first `save`.
    pub id: Option<OrderId>,
    pub username: String,
    pub pay_status: PayStatus,
}

impl Order {
    /// Creates an unsaved order in the pending state.
    pub fn pending(username: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            pay_status: PayStatus::Pending,
        }
    }

    /// Marks the payment as completed.
    pub fn complete(&mut self) {
        self.pay_status = PayStatus::Completed;
    }

    pub fn is_completed(&self) -> bool {
        self.pay_status == PayStatus::Completed
    }
}

impl From<NewOrder> for Order {
    fn from(request: NewOrder) -> Self {
        Self::pending(request.username)
    }
}
