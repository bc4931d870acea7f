//! Transfer flow controller.
//!
//! # Responsibilities
//! - Own the recipient/amount input fields
//! - Validate input before any wallet interaction
//! - Drive one attempt at a time through the status machine
//! - Publish every status change for the display layer
//!
//! # Concurrency
//! At most one attempt is in flight; `submit` while `Submitting` or
//! `Confirming` is rejected without side effects. There is no cancellation:
//! an accepted attempt runs to `Confirmed` or `Failed`.

use alloy::primitives::utils::parse_ether;
use alloy::primitives::{Address, U256};
use arc_swap::ArcSwap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use uuid::Uuid;

use crate::chain::{ChainWatcher, ReceiptOutcome};
use crate::flow::history::TransferLog;
use crate::flow::status::TransactionStatus;
use crate::observability::metrics;
use crate::wallet::WalletProvider;

/// Raw user-edited form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferInput {
    pub recipient: String,
    pub amount: String,
}

/// Errors from the controller itself (as opposed to attempt outcomes, which
/// are statuses).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    /// A previous submit has not reached a terminal state yet.
    #[error("a transfer is already in flight")]
    InFlight,
}

/// Drives a [`TransferInput`] through validation, broadcast and confirmation,
/// publishing [`TransactionStatus`] transitions on a watch channel.
pub struct FlowController {
    wallet: Arc<dyn WalletProvider>,
    watcher: Arc<dyn ChainWatcher>,
    status_tx: watch::Sender<TransactionStatus>,
    input: ArcSwap<TransferInput>,
    in_flight: AtomicBool,
    log: TransferLog,
}

impl FlowController {
    pub fn new(wallet: Arc<dyn WalletProvider>, watcher: Arc<dyn ChainWatcher>) -> Self {
        let (status_tx, _) = watch::channel(TransactionStatus::Idle);
        Self {
            wallet,
            watcher,
            status_tx,
            input: ArcSwap::from_pointee(TransferInput::default()),
            in_flight: AtomicBool::new(false),
            log: TransferLog::new(),
        }
    }

    /// Subscribe to status transitions.
    pub fn subscribe(&self) -> watch::Receiver<TransactionStatus> {
        self.status_tx.subscribe()
    }

    /// Current status snapshot.
    pub fn status(&self) -> TransactionStatus {
        self.status_tx.borrow().clone()
    }

    /// Current input snapshot.
    pub fn input(&self) -> TransferInput {
        (**self.input.load()).clone()
    }

    /// Session log of accepted attempts.
    pub fn log(&self) -> &TransferLog {
        &self.log
    }

    /// Replace the recipient field. Editing after `Invalid` or `Failed`
    /// returns the status to `Idle`.
    pub fn set_recipient(&self, recipient: &str) {
        let current = self.input.load();
        self.input.store(Arc::new(TransferInput {
            recipient: recipient.to_string(),
            amount: current.amount.clone(),
        }));
        self.reset_after_edit();
    }

    /// Replace the amount field. Editing after `Invalid` or `Failed` returns
    /// the status to `Idle`.
    pub fn set_amount(&self, amount: &str) {
        let current = self.input.load();
        self.input.store(Arc::new(TransferInput {
            recipient: current.recipient.clone(),
            amount: amount.to_string(),
        }));
        self.reset_after_edit();
    }

    fn reset_after_edit(&self) {
        let recoverable = matches!(
            &*self.status_tx.borrow(),
            TransactionStatus::Invalid { .. } | TransactionStatus::Failed { .. }
        );
        if recoverable {
            self.status_tx.send_replace(TransactionStatus::Idle);
        }
    }

    /// Run one transfer attempt to its terminal status.
    ///
    /// Returns `Err(FlowError::InFlight)` without side effects when called
    /// while a previous attempt is still `Submitting` or `Confirming`. All
    /// other outcomes are returned (and published) as statuses.
    pub async fn submit(&self) -> Result<TransactionStatus, FlowError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(FlowError::InFlight);
        }

        let input = self.input();
        let (to, value) = match validate(&input) {
            Ok(parsed) => parsed,
            Err(reason) => {
                // Rejected before the wallet is ever involved; fields stay
                // as typed for correction.
                let status = TransactionStatus::Invalid { reason };
                self.status_tx.send_replace(status.clone());
                self.in_flight.store(false, Ordering::SeqCst);
                return Ok(status);
            }
        };

        let attempt = Uuid::new_v4();
        self.log.begin(attempt, to, value);
        metrics::record_transfer_submitted();
        self.status_tx.send_replace(TransactionStatus::Submitting);
        tracing::info!(attempt = %attempt, to = %to, value = %value, "Submitting transfer");

        let handle = match self.wallet.broadcast(to, value).await {
            Ok(handle) => handle,
            Err(e) => {
                let status = TransactionStatus::Failed {
                    reason: e.to_string(),
                };
                tracing::warn!(attempt = %attempt, error = %e, "Broadcast failed");
                metrics::record_transfer_failed("broadcast");
                self.log.finish(attempt, status.to_string());
                self.status_tx.send_replace(status.clone());
                self.in_flight.store(false, Ordering::SeqCst);
                return Ok(status);
            }
        };

        self.log.set_handle(attempt, handle);
        self.status_tx
            .send_replace(TransactionStatus::Confirming { handle });
        tracing::info!(attempt = %attempt, tx_hash = %handle, "Broadcast accepted, awaiting receipt");

        let status = match self.watcher.await_receipt(handle).await {
            Ok(ReceiptOutcome::Success { block_number }) => {
                tracing::info!(
                    attempt = %attempt,
                    tx_hash = %handle,
                    block_number = block_number,
                    "Transfer confirmed"
                );
                metrics::record_transfer_confirmed();
                // Successful attempt clears the form for the next transfer.
                self.input.store(Arc::new(TransferInput::default()));
                TransactionStatus::Confirmed { handle }
            }
            Ok(ReceiptOutcome::Reverted) => {
                tracing::warn!(attempt = %attempt, tx_hash = %handle, "Transfer reverted");
                metrics::record_transfer_failed("reverted");
                TransactionStatus::Failed {
                    reason: "transaction reverted".to_string(),
                }
            }
            Err(e) => {
                tracing::warn!(attempt = %attempt, tx_hash = %handle, error = %e, "Confirmation failed");
                metrics::record_transfer_failed("receipt");
                TransactionStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };

        self.log.finish(attempt, status.to_string());
        self.status_tx.send_replace(status.clone());
        self.in_flight.store(false, Ordering::SeqCst);
        Ok(status)
    }
}

/// Validate raw input into a destination address and a wei value.
///
/// Runs entirely locally; a rejection here never reaches the wallet.
fn validate(input: &TransferInput) -> Result<(Address, U256), String> {
    let recipient = input.recipient.trim();
    let amount = input.amount.trim();

    if recipient.is_empty() || amount.is_empty() {
        return Err("Please enter recipient address and amount".to_string());
    }

    let to: Address = recipient
        .parse()
        .map_err(|_| format!("Invalid recipient address: {}", recipient))?;

    let value = parse_ether(amount).map_err(|_| format!("Invalid amount: {}", amount))?;
    if value.is_zero() {
        return Err("Amount must be greater than zero".to_string());
    }

    Ok((to, value))
}
