//! Chain access subsystem.
//!
//! # Data Flow
//! ```text
//! Configuration (RPC URLs, chain id)
//!     → client.rs (RPC connection with timeouts and failover)
//!     → watcher.rs (receipt polling until finality)
//!     → network.rs (chain id → display name / explorer lookup)
//! ```
//!
//! All RPC calls have configurable timeouts and the client degrades
//! gracefully when the chain is unreachable.

pub mod client;
pub mod network;
pub mod types;
pub mod watcher;

pub use client::ChainClient;
pub use types::{ChainError, ChainId, ChainResult, ReceiptOutcome};
pub use watcher::{ChainWatcher, ReceiptPoller};
