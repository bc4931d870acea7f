//! Display subsystem: the terminal surface over the flow controller.

pub mod session;
pub mod terminal;

pub use session::run_session;
pub use terminal::{print_wallet_info, spawn_status_renderer};
