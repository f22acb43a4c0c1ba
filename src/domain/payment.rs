use super::order::Order;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Username that makes `ScenarioPaymentGateway` fail unexpectedly.
pub const SYSTEM_FAILURE_USERNAME: &str = "예외";
/// Username that makes `ScenarioPaymentGateway` decline for lack of funds.
pub const INSUFFICIENT_BALANCE_USERNAME: &str = "잔고부족";

/// Why a payment attempt did not go through.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentFailure {
    /// The customer cannot pay. A business condition, not a fault.
    #[error("insufficient balance: {0}")]
    InsufficientBalance(String),
    /// The gateway itself failed.
    #[error("payment gateway failure: {0}")]
    Unexpected(String),
}

/// Payment collaborator consulted by the order service.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn pay(&self, order: &Order) -> Result<(), PaymentFailure>;
}

pub type PaymentGatewayBox = Box<dyn PaymentGateway>;

#[async_trait]
impl<G: PaymentGateway + ?Sized> PaymentGateway for Arc<G> {
    async fn pay(&self, order: &Order) -> Result<(), PaymentFailure> {
        (**self).pay(order).await
    }
}

/// Gateway that decides the outcome from the customer's username.
///
/// `"예외"` fails unexpectedly, `"잔고부족"` is declined, everyone else pays.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScenarioPaymentGateway;

impl ScenarioPaymentGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentGateway for ScenarioPaymentGateway {
    async fn pay(&self, order: &Order) -> Result<(), PaymentFailure> {
        match order.username.as_str() {
            SYSTEM_FAILURE_USERNAME => Err(PaymentFailure::Unexpected(
                "system exception during payment".to_string(),
            )),
            INSUFFICIENT_BALANCE_USERNAME => Err(PaymentFailure::InsufficientBalance(
                "잔고가 부족합니다".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
