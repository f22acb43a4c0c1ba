use crate::domain::ports::OrderTransactionBox;
use crate::error::{ErrorKind, Result};
use tracing::{debug, warn};

/// What the boundary does with a transaction once the work has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Commit,
    Rollback,
}

/// Maps each error kind to the outcome applied when work fails with it.
///
/// Successful work always commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollbackPolicy {
    pub business: Outcome,
    pub system: Outcome,
}

impl Default for RollbackPolicy {
    /// Business errors keep their work, everything else is discarded.
    fn default() -> Self {
        Self {
            business: Outcome::Commit,
            system: Outcome::Rollback,
        }
    }
}

impl RollbackPolicy {
    pub fn new(business: Outcome, system: Outcome) -> Self {
        Self { business, system }
    }

    /// Rolls back on every error, regardless of kind.
    pub fn rollback_all() -> Self {
        Self::new(Outcome::Rollback, Outcome::Rollback)
    }

    pub fn outcome_for(&self, kind: ErrorKind) -> Outcome {
        match kind {
            ErrorKind::Business => self.business,
            ErrorKind::System => self.system,
        }
    }
}

/// Finishes a transaction according to the result of the work done in it.
///
/// The transaction handle is consumed on every path, so it is always either
/// committed or rolled back exactly once. The work's error, if any, is
/// returned to the caller unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionBoundary {
    policy: RollbackPolicy,
}

impl TransactionBoundary {
    pub fn new(policy: RollbackPolicy) -> Self {
        Self { policy }
    }

    pub async fn complete<T>(&self, tx: OrderTransactionBox, result: Result<T>) -> Result<T> {
        let err = match result {
            Ok(value) => {
                tx.commit().await?;
                debug!("transaction committed");
                return Ok(value);
            }
            Err(err) => err,
        };

        let kind = err.kind();
        match self.policy.outcome_for(kind) {
            Outcome::Commit => {
                tx.commit().await?;
                debug!(?kind, "transaction committed despite error");
            }
            Outcome::Rollback => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "rollback failed");
                }
                debug!(?kind, "transaction rolled back");
            }
        }
        Err(err)
    }
}
