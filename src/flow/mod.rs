//! Transfer flow subsystem.
//!
//! # Data Flow
//! ```text
//! user input (recipient, amount)
//!     → controller.rs (validate, guard, drive the attempt)
//!     → wallet::WalletProvider (sign + broadcast)
//!     → chain::ChainWatcher (receipt)
//!     → status.rs transitions on a watch channel
//!     → history.rs session record
//! ```

pub mod controller;
pub mod history;
pub mod status;

pub use controller::{FlowController, FlowError, TransferInput};
pub use history::{TransferLog, TransferRecord};
pub use status::TransactionStatus;
