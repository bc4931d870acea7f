//! Scripted wallet and watcher doubles for flow testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use tokio::sync::{watch, Notify};

use walletflow::chain::{ChainError, ChainResult, ChainWatcher, ReceiptOutcome};
use walletflow::flow::TransactionStatus;
use walletflow::wallet::{Balance, WalletError, WalletProvider};

/// What the scripted wallet does with a broadcast request.
#[derive(Debug, Clone)]
pub enum BroadcastScript {
    Accept(TxHash),
    InsufficientFunds,
    UserRejected,
    NetworkError(String),
}

/// Wallet double that records every broadcast call.
pub struct ScriptedWallet {
    pub address: Address,
    pub chain_id: u64,
    pub script: BroadcastScript,
    pub broadcast_calls: AtomicUsize,
    pub last_broadcast: Mutex<Option<(Address, U256)>>,
    /// When set, the controller status is sampled at broadcast time so tests
    /// can assert the transition ordering despite watch coalescing.
    pub status_probe: Mutex<Option<watch::Receiver<TransactionStatus>>>,
    pub status_at_broadcast: Mutex<Option<TransactionStatus>>,
}

impl ScriptedWallet {
    pub fn new(script: BroadcastScript) -> Self {
        Self {
            address: Address::repeat_byte(0xaa),
            chain_id: 11155111,
            script,
            broadcast_calls: AtomicUsize::new(0),
            last_broadcast: Mutex::new(None),
            status_probe: Mutex::new(None),
            status_at_broadcast: Mutex::new(None),
        }
    }

    pub fn accepting(handle: TxHash) -> Self {
        Self::new(BroadcastScript::Accept(handle))
    }

    pub fn attach_probe(&self, rx: watch::Receiver<TransactionStatus>) {
        *self.status_probe.lock().unwrap() = Some(rx);
    }

    pub fn calls(&self) -> usize {
        self.broadcast_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletProvider for ScriptedWallet {
    async fn connect(&self) -> Result<Address, WalletError> {
        Ok(self.address)
    }

    async fn balance(&self) -> Result<Balance, WalletError> {
        Ok(Balance {
            amount: U256::from(10u64).pow(U256::from(18u64)),
            symbol: "ETH".to_string(),
        })
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        Ok(self.chain_id)
    }

    async fn broadcast(&self, to: Address, value: U256) -> Result<TxHash, WalletError> {
        self.broadcast_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_broadcast.lock().unwrap() = Some((to, value));

        if let Some(rx) = self.status_probe.lock().unwrap().as_ref() {
            *self.status_at_broadcast.lock().unwrap() = Some(rx.borrow().clone());
        }

        match &self.script {
            BroadcastScript::Accept(handle) => Ok(*handle),
            BroadcastScript::InsufficientFunds => Err(WalletError::InsufficientFunds),
            BroadcastScript::UserRejected => Err(WalletError::UserRejected),
            BroadcastScript::NetworkError(detail) => {
                Err(WalletError::NetworkError(detail.clone()))
            }
        }
    }
}

/// What the scripted watcher resolves a receipt to.
#[derive(Debug, Clone)]
pub enum ReceiptScript {
    Success { block_number: u64 },
    Reverted,
    Timeout,
    /// Block until [`ScriptedWatcher::release`] is notified, then succeed.
    Hold,
}

/// Watcher double with a controllable resolution point.
pub struct ScriptedWatcher {
    pub script: ReceiptScript,
    pub release: Arc<Notify>,
    pub calls: AtomicUsize,
    pub seen: Mutex<Vec<TxHash>>,
}

impl ScriptedWatcher {
    pub fn new(script: ReceiptScript) -> Self {
        Self {
            script,
            release: Arc::new(Notify::new()),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainWatcher for ScriptedWatcher {
    async fn await_receipt(&self, handle: TxHash) -> ChainResult<ReceiptOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(handle);

        match &self.script {
            ReceiptScript::Success { block_number } => Ok(ReceiptOutcome::Success {
                block_number: *block_number,
            }),
            ReceiptScript::Reverted => Ok(ReceiptOutcome::Reverted),
            ReceiptScript::Timeout => Err(ChainError::ReceiptTimeout(120)),
            ReceiptScript::Hold => {
                self.release.notified().await;
                Ok(ReceiptOutcome::Success { block_number: 1 })
            }
        }
    }
}
