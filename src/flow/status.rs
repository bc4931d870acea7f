//! Transfer attempt status.

use alloy::primitives::TxHash;
use std::fmt;

/// Lifecycle of a single transfer attempt.
///
/// Transitions are strictly forward: `Idle → Submitting → Confirming →
/// Confirmed`, with `Invalid` and `Failed` as recoverable dead ends that
/// return to `Idle` once the user edits the input again. `Confirmed` is
/// terminal for the attempt; its handle stays visible until the next submit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransactionStatus {
    /// Nothing in flight, input not yet judged.
    #[default]
    Idle,
    /// Input rejected before any wallet interaction.
    Invalid { reason: String },
    /// Broadcast requested from the wallet.
    Submitting,
    /// Broadcast accepted, awaiting the receipt.
    Confirming { handle: TxHash },
    /// Receipt observed with the required depth.
    Confirmed { handle: TxHash },
    /// Broadcast or confirmation failed.
    Failed { reason: String },
}

impl TransactionStatus {
    /// True while a broadcast is outstanding. A new submit must be rejected
    /// in this window.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Submitting | TransactionStatus::Confirming { .. }
        )
    }

    /// The tracked transaction handle, if the attempt produced one.
    pub fn handle(&self) -> Option<TxHash> {
        match self {
            TransactionStatus::Confirming { handle }
            | TransactionStatus::Confirmed { handle } => Some(*handle),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Idle => write!(f, "Ready"),
            TransactionStatus::Invalid { reason } => write!(f, "{}", reason),
            TransactionStatus::Submitting => write!(f, "Processing transaction..."),
            TransactionStatus::Confirming { handle } => {
                write!(f, "Confirming {}...", handle)
            }
            TransactionStatus::Confirmed { .. } => write!(f, "Transaction confirmed!"),
            TransactionStatus::Failed { reason } => {
                write!(f, "Transaction failed: {}", reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_states() {
        assert!(TransactionStatus::Submitting.is_in_flight());
        assert!(TransactionStatus::Confirming {
            handle: TxHash::ZERO
        }
        .is_in_flight());

        assert!(!TransactionStatus::Idle.is_in_flight());
        assert!(!TransactionStatus::Confirmed {
            handle: TxHash::ZERO
        }
        .is_in_flight());
        assert!(!TransactionStatus::Failed {
            reason: "boom".to_string()
        }
        .is_in_flight());
    }

    #[test]
    fn test_handle_visibility() {
        let handle: TxHash = [0x42u8; 32].into();
        assert_eq!(
            TransactionStatus::Confirmed { handle }.handle(),
            Some(handle)
        );
        assert_eq!(TransactionStatus::Submitting.handle(), None);
        assert_eq!(TransactionStatus::Idle.handle(), None);
    }

    #[test]
    fn test_display_strings() {
        assert_eq!(TransactionStatus::Idle.to_string(), "Ready");
        assert_eq!(
            TransactionStatus::Submitting.to_string(),
            "Processing transaction..."
        );
        assert_eq!(
            TransactionStatus::Failed {
                reason: "insufficient funds".to_string()
            }
            .to_string(),
            "Transaction failed: insufficient funds"
        );
        let confirmed = TransactionStatus::Confirmed {
            handle: TxHash::ZERO,
        };
        assert_eq!(confirmed.to_string(), "Transaction confirmed!");
    }
}
