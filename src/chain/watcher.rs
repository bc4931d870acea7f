//! Receipt watching for broadcast transactions.
//!
//! A [`ChainWatcher`] observes the chain for finality of a single transaction
//! handle. The concrete implementation polls the RPC for a receipt and then
//! waits until the required confirmation depth is reached, all under a hard
//! deadline so a dropped transaction cannot hang a flow forever.

use alloy::primitives::TxHash;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::chain::client::ChainClient;
use crate::chain::types::{ChainError, ChainResult, ReceiptOutcome};

/// Capability to await finality of a broadcast transaction.
#[async_trait]
pub trait ChainWatcher: Send + Sync {
    /// Resolve once the transaction is confirmed or reverted.
    ///
    /// Times out with [`ChainError::ReceiptTimeout`] when no terminal outcome
    /// is observed within the watcher's deadline.
    async fn await_receipt(&self, handle: TxHash) -> ChainResult<ReceiptOutcome>;
}

/// Receipt watcher that polls the RPC.
pub struct ReceiptPoller {
    client: ChainClient,
    poll_interval: Duration,
    deadline_secs: u64,
}

impl ReceiptPoller {
    pub fn new(client: ChainClient) -> Self {
        let deadline_secs = client.config().receipt_timeout_secs;
        Self {
            client,
            poll_interval: Duration::from_secs(2),
            deadline_secs,
        }
    }
}

#[async_trait]
impl ChainWatcher for ReceiptPoller {
    async fn await_receipt(&self, handle: TxHash) -> ChainResult<ReceiptOutcome> {
        let required = self.client.confirmation_blocks();
        let deadline = Duration::from_secs(self.deadline_secs);

        let result = timeout(deadline, async {
            let mut ticker = interval(self.poll_interval);

            loop {
                ticker.tick().await;

                let receipt = match self.client.get_transaction_receipt(handle).await? {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %handle, "Transaction pending");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Ok(ReceiptOutcome::Reverted);
                }

                let current_block = self.client.get_block_number().await?;
                let tx_block = receipt.block_number.unwrap_or(current_block);
                let confirmations = current_block.saturating_sub(tx_block) as u32;

                if confirmations >= required {
                    return Ok(ReceiptOutcome::Success {
                        block_number: tx_block,
                    });
                }

                tracing::debug!(
                    tx_hash = %handle,
                    confirmations = confirmations,
                    required = required,
                    "Waiting for confirmations"
                );
            }
        })
        .await;

        match result {
            Ok(outcome) => outcome,
            Err(_) => Err(ChainError::ReceiptTimeout(self.deadline_secs)),
        }
    }
}
