//! Session-scoped record of transfer attempts.
//!
//! Nothing here is persisted; the log lives for the lifetime of the process
//! so the display can list what happened this session.

use alloy::primitives::{Address, TxHash, U256};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// One accepted transfer attempt.
#[derive(Debug, Clone)]
pub struct TransferRecord {
    pub id: Uuid,
    /// Insertion order within the session.
    pub seq: u64,
    pub to: Address,
    /// Value in wei.
    pub value: U256,
    /// Handle, once the broadcast was accepted.
    pub handle: Option<TxHash>,
    /// Final status text of the attempt.
    pub outcome: String,
}

/// Concurrent log of attempts keyed by correlation id.
#[derive(Debug, Default)]
pub struct TransferLog {
    records: DashMap<Uuid, TransferRecord>,
    next_seq: AtomicU64,
}

impl TransferLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly accepted attempt.
    pub fn begin(&self, id: Uuid, to: Address, value: U256) {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.records.insert(
            id,
            TransferRecord {
                id,
                seq,
                to,
                value,
                handle: None,
                outcome: "in flight".to_string(),
            },
        );
    }

    /// Attach the broadcast handle to an attempt.
    pub fn set_handle(&self, id: Uuid, handle: TxHash) {
        if let Some(mut record) = self.records.get_mut(&id) {
            record.handle = Some(handle);
        }
    }

    /// Record the terminal outcome of an attempt.
    pub fn finish(&self, id: Uuid, outcome: String) {
        if let Some(mut record) = self.records.get_mut(&id) {
            record.outcome = outcome;
        }
    }

    /// All attempts in submission order.
    pub fn snapshot(&self) -> Vec<TransferRecord> {
        let mut records: Vec<TransferRecord> =
            self.records.iter().map(|r| r.value().clone()).collect();
        records.sort_by_key(|r| r.seq);
        records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_ordering_and_outcome() {
        let log = TransferLog::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        log.begin(a, Address::ZERO, U256::from(1));
        log.begin(b, Address::ZERO, U256::from(2));

        let handle: TxHash = [0x01u8; 32].into();
        log.set_handle(a, handle);
        log.finish(a, "Transaction confirmed!".to_string());

        let snapshot = log.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].id, a);
        assert_eq!(snapshot[0].handle, Some(handle));
        assert_eq!(snapshot[0].outcome, "Transaction confirmed!");
        assert_eq!(snapshot[1].id, b);
        assert_eq!(snapshot[1].outcome, "in flight");
    }
}
