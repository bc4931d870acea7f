//! walletflow — terminal wallet session and transfer tool.
//!
//! # Architecture Overview
//!
//! ```text
//!   stdin / CLI args                    JSON-RPC endpoint(s)
//!        │                                      ▲
//!        ▼                                      │
//!   ┌─────────┐    ┌──────────────┐    ┌───────┴──────┐
//!   │ display │───▶│     flow     │───▶│ wallet/chain │
//!   │ surface │◀───│  controller  │◀───│  (alloy)     │
//!   └─────────┘    └──────────────┘    └──────────────┘
//!        ▲                │
//!        └── status watch ┘
//! ```
//!
//! The display surface is purely reactive; all decisions live in the flow
//! controller, and all signing/RPC is delegated to alloy.

use std::path::PathBuf;
use std::sync::Arc;

use alloy::primitives::TxHash;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use walletflow::chain::{network, ChainClient, ChainWatcher, ReceiptOutcome, ReceiptPoller};
use walletflow::config::{load_config, WalletflowConfig};
use walletflow::display;
use walletflow::flow::{FlowController, TransactionStatus};
use walletflow::observability::metrics;
use walletflow::wallet::{SignerWallet, WalletProvider};

#[derive(Parser)]
#[command(name = "walletflow")]
#[command(about = "Connect a wallet, inspect balance/network, send native-asset transfers", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show connected account, network and balance
    Info {
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Send a native-asset transfer and wait for confirmation
    Send {
        /// Recipient address (0x…)
        #[arg(long)]
        to: String,
        /// Amount in the native asset (e.g. 0.01)
        #[arg(long)]
        amount: String,
    },
    /// Await the receipt of an already-broadcast transaction
    Watch {
        /// Transaction hash (0x…)
        #[arg(long)]
        tx: String,
    },
    /// Interactive transfer session
    Session,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => WalletflowConfig::default(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.observability.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        rpc_url = %config.chain.rpc_url,
        chain_id = config.chain.chain_id,
        "walletflow starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let chain_id = config.chain.chain_id;
    let client = ChainClient::new(config.chain.clone()).await?;

    match cli.command {
        Commands::Info { json } => {
            let wallet = SignerWallet::from_env(client)?;
            if json {
                let address = wallet.connect().await?;
                let live_chain_id = wallet.chain_id().await.unwrap_or(chain_id);
                let net = network::lookup(live_chain_id);
                let balance = wallet.balance().await.ok();
                let info = serde_json::json!({
                    "address": address.to_string(),
                    "chain_id": live_chain_id,
                    "network": net.name,
                    "balance": balance.as_ref().map(|b| b.formatted()),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                display::print_wallet_info(&wallet, chain_id).await?;
            }
        }
        Commands::Send { to, amount } => {
            let wallet: Arc<dyn WalletProvider> =
                Arc::new(SignerWallet::from_env(client.clone())?);
            let watcher: Arc<dyn ChainWatcher> = Arc::new(ReceiptPoller::new(client));
            let controller = Arc::new(FlowController::new(wallet, watcher));

            controller.set_recipient(&to);
            controller.set_amount(&amount);

            let renderer = display::spawn_status_renderer(controller.subscribe(), chain_id);
            let status = controller.submit().await?;
            renderer.abort();

            println!("{}", status);
            match &status {
                TransactionStatus::Confirmed { handle } => {
                    println!(
                        "View on explorer: {}",
                        network::explorer_tx_url(chain_id, *handle)
                    );
                }
                TransactionStatus::Invalid { .. } | TransactionStatus::Failed { .. } => {
                    std::process::exit(1);
                }
                _ => {}
            }
        }
        Commands::Watch { tx } => {
            let handle: TxHash = tx
                .parse()
                .map_err(|e| format!("invalid transaction hash '{}': {}", tx, e))?;
            let watcher = ReceiptPoller::new(client);
            match watcher.await_receipt(handle).await? {
                ReceiptOutcome::Success { block_number } => {
                    println!("Confirmed in block {}", block_number);
                }
                ReceiptOutcome::Reverted => {
                    println!("Transaction reverted");
                    std::process::exit(1);
                }
            }
        }
        Commands::Session => {
            let wallet: Arc<dyn WalletProvider> =
                Arc::new(SignerWallet::from_env(client.clone())?);
            let watcher: Arc<dyn ChainWatcher> = Arc::new(ReceiptPoller::new(client));
            let controller = Arc::new(FlowController::new(wallet.clone(), watcher));
            display::run_session(controller, wallet, chain_id).await?;
        }
    }

    Ok(())
}
