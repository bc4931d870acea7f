//! Terminal rendering of wallet and flow state.
//!
//! Purely reactive: reads the controller's status stream and prints it. No
//! decisions are made here.

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::chain::network;
use crate::flow::TransactionStatus;
use crate::wallet::WalletProvider;

/// Spawn a task that prints every in-progress status transition.
///
/// Terminal states are left to the caller, which knows whether the session
/// continues. The task ends when the controller (the channel sender) goes
/// away. Watch semantics apply: rapid transitions may coalesce.
pub fn spawn_status_renderer(
    mut rx: watch::Receiver<TransactionStatus>,
    chain_id: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let status = rx.borrow_and_update().clone();
            match &status {
                TransactionStatus::Submitting => println!("{}", status),
                TransactionStatus::Confirming { handle } => {
                    println!("{}", status);
                    println!(
                        "View on explorer: {}",
                        network::explorer_tx_url(chain_id, *handle)
                    );
                }
                _ => {}
            }
        }
    })
}

/// Print the connected account, its network and its balance.
///
/// A balance that cannot be read is shown as unavailable rather than
/// failing the whole view.
pub async fn print_wallet_info(
    wallet: &dyn WalletProvider,
    fallback_chain_id: u64,
) -> Result<(), crate::wallet::WalletError> {
    let address = wallet.connect().await?;
    let chain_id = wallet.chain_id().await.unwrap_or(fallback_chain_id);
    let net = network::lookup(chain_id);

    println!("Account:  {}", address);
    println!("Network:  {} (chain id {})", net.name, chain_id);
    match wallet.balance().await {
        Ok(balance) => println!("Balance:  {}", balance.formatted()),
        Err(e) => println!("Balance:  unavailable ({})", e),
    }
    Ok(())
}
