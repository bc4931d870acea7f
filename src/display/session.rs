//! Interactive transfer session.
//!
//! Line-oriented front end over the flow controller: edit the recipient and
//! amount fields, submit, watch the status stream, inspect the session log.

use std::sync::Arc;

use alloy::primitives::utils::format_units;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::chain::network;
use crate::display::terminal;
use crate::flow::{FlowController, TransactionStatus};
use crate::wallet::WalletProvider;

const HELP: &str = "Commands: to <address>, amount <value>, send, info, history, quit";

/// Run the interactive loop until stdin closes or the user quits.
pub async fn run_session(
    controller: Arc<FlowController>,
    wallet: Arc<dyn WalletProvider>,
    chain_id: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    terminal::print_wallet_info(wallet.as_ref(), chain_id).await?;
    println!("{}", HELP);

    let renderer = terminal::spawn_status_renderer(controller.subscribe(), chain_id);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));

        match cmd {
            "to" => controller.set_recipient(rest.trim()),
            "amount" => controller.set_amount(rest.trim()),
            "send" => match controller.submit().await {
                Ok(status) => {
                    println!("{}", status);
                    if let TransactionStatus::Confirmed { handle } = &status {
                        println!(
                            "View on explorer: {}",
                            network::explorer_tx_url(chain_id, *handle)
                        );
                    }
                }
                Err(e) => println!("{}", e),
            },
            "info" => {
                if let Err(e) = terminal::print_wallet_info(wallet.as_ref(), chain_id).await {
                    println!("{}", e);
                }
            }
            "history" => {
                let records = controller.log().snapshot();
                if records.is_empty() {
                    println!("No transfers this session");
                }
                for record in records {
                    let amount = format_units(record.value, "ether")
                        .unwrap_or_else(|_| record.value.to_string());
                    let handle = record
                        .handle
                        .map(|h| h.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "#{} to {} amount {} tx {} [{}]",
                        record.seq, record.to, amount, handle, record.outcome
                    );
                }
            }
            "quit" | "exit" => break,
            "" | "help" => println!("{}", HELP),
            _ => println!("Unknown command: {} ({})", cmd, HELP),
        }
    }

    renderer.abort();
    Ok(())
}
