//! Transaction boundary for service calls.
//!
//! # Invariants
//! - The closure result decides the outcome: `Ok` commits, `Err` rolls back.
//! - Repositories built inside the closure borrow the transaction, so every
//!   write they issue belongs to the same unit of work.

use super::{DbError, TxStage};
use log::{debug, warn};
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Runs `work` inside one immediate SQLite transaction.
///
/// `Transaction` derefs to `Connection`, so callers construct repositories
/// from the `&Transaction` handed to the closure.
///
/// # Errors
/// - Returns the closure error unchanged after rolling back.
/// - Returns a converted [`DbError::Transaction`] when begin or commit fails.
pub fn with_transaction<T, E, F>(conn: &mut Connection, work: F) -> Result<T, E>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, E>,
    E: From<DbError>,
{
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|source| {
            E::from(DbError::Transaction {
                stage: TxStage::Begin,
                source,
            })
        })?;

    match work(&tx) {
        Ok(value) => {
            tx.commit().map_err(|source| {
                E::from(DbError::Transaction {
                    stage: TxStage::Commit,
                    source,
                })
            })?;
            debug!("event=unit_of_work module=db status=committed");
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback() {
                warn!(
                    "event=unit_of_work module=db status=rollback_failed error={}",
                    rollback_err
                );
            } else {
                debug!("event=unit_of_work module=db status=rolled_back");
            }
            Err(err)
        }
    }
}
