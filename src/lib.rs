//! Wallet session and native-asset transfer flow library.

pub mod chain;
pub mod config;
pub mod display;
pub mod flow;
pub mod observability;
pub mod wallet;

pub use config::WalletflowConfig;
pub use flow::{FlowController, TransactionStatus};
pub use wallet::{SignerWallet, WalletProvider};
