//! Wallet capability seam.
//!
//! The flow controller only ever talks to [`WalletProvider`]; the concrete
//! signer lives behind it. Tests substitute their own implementations.

use alloy::primitives::utils::format_units;
use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use thiserror::Error;

/// Native-asset balance of the connected account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    /// Amount in wei.
    pub amount: U256,
    /// Native asset ticker for the connected network.
    pub symbol: String,
}

impl Balance {
    /// Human-readable form, four decimal places.
    pub fn formatted(&self) -> String {
        let ether = format_units(self.amount, "ether").unwrap_or_else(|_| "0".to_string());
        let value: f64 = ether.parse().unwrap_or(0.0);
        format!("{:.4} {}", value, self.symbol)
    }
}

/// Errors surfaced by a wallet capability.
#[derive(Debug, Error)]
pub enum WalletError {
    /// No connected account is available.
    #[error("wallet not connected: {0}")]
    NotConnected(String),

    /// The signer declined to authorize the transfer.
    #[error("user rejected the request")]
    UserRejected,

    /// Account balance cannot cover value plus gas.
    #[error("insufficient funds")]
    InsufficientFunds,

    /// Transport-level failure talking to the wallet or node.
    #[error("network error: {0}")]
    NetworkError(String),

    /// Balance or chain state could not be read.
    #[error("unavailable: {0}")]
    Unavailable(String),
}

impl WalletError {
    /// Classify a node rejection message into the wallet error taxonomy.
    ///
    /// Node error strings are not standardized across clients; substring
    /// matching against the common phrasings is the best available signal.
    pub fn from_broadcast_failure(detail: &str) -> Self {
        let lower = detail.to_lowercase();
        if lower.contains("insufficient funds") || lower.contains("insufficient balance") {
            WalletError::InsufficientFunds
        } else if lower.contains("rejected") || lower.contains("denied") {
            WalletError::UserRejected
        } else {
            WalletError::NetworkError(detail.to_string())
        }
    }
}

/// Capability of a connected wallet: account identity, balance, network and
/// native-asset transfer broadcast.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Return the connected account address.
    async fn connect(&self) -> Result<Address, WalletError>;

    /// Native-asset balance of the connected account.
    async fn balance(&self) -> Result<Balance, WalletError>;

    /// Chain id the wallet session is on.
    async fn chain_id(&self) -> Result<u64, WalletError>;

    /// Sign and broadcast a native-asset transfer, returning its handle.
    async fn broadcast(&self, to: Address, value: U256) -> Result<TxHash, WalletError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::utils::parse_ether;

    #[test]
    fn test_balance_formatting() {
        let balance = Balance {
            amount: parse_ether("1.23456789").unwrap(),
            symbol: "ETH".to_string(),
        };
        assert_eq!(balance.formatted(), "1.2346 ETH");

        let zero = Balance {
            amount: U256::ZERO,
            symbol: "POL".to_string(),
        };
        assert_eq!(zero.formatted(), "0.0000 POL");
    }

    #[test]
    fn test_broadcast_failure_classification() {
        assert!(matches!(
            WalletError::from_broadcast_failure(
                "insufficient funds for gas * price + value"
            ),
            WalletError::InsufficientFunds
        ));
        assert!(matches!(
            WalletError::from_broadcast_failure("request rejected by user"),
            WalletError::UserRejected
        ));
        assert!(matches!(
            WalletError::from_broadcast_failure("connection reset by peer"),
            WalletError::NetworkError(_)
        ));
    }

    #[test]
    fn test_error_display_strings() {
        assert_eq!(
            WalletError::InsufficientFunds.to_string(),
            "insufficient funds"
        );
        assert_eq!(
            WalletError::UserRejected.to_string(),
            "user rejected the request"
        );
    }
}
