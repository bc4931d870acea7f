//! Static chain-id → network lookup table.
//!
//! The set of known networks is fixed at compile time. Anything not in the
//! table renders as "Unknown Network" and falls back to the mainnet explorer.

use alloy::primitives::TxHash;

/// Display metadata for a known network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Network {
    pub chain_id: u64,
    pub name: &'static str,
    /// Native asset ticker.
    pub symbol: &'static str,
    /// Explorer transaction URL prefix.
    pub explorer_tx: &'static str,
}

const KNOWN: &[Network] = &[
    Network {
        chain_id: 1,
        name: "Ethereum Mainnet",
        symbol: "ETH",
        explorer_tx: "https://etherscan.io/tx/",
    },
    Network {
        chain_id: 10,
        name: "Optimism",
        symbol: "ETH",
        explorer_tx: "https://optimistic.etherscan.io/tx/",
    },
    Network {
        chain_id: 137,
        name: "Polygon",
        symbol: "POL",
        explorer_tx: "https://polygonscan.com/tx/",
    },
    Network {
        chain_id: 42161,
        name: "Arbitrum",
        symbol: "ETH",
        explorer_tx: "https://arbiscan.io/tx/",
    },
    Network {
        chain_id: 11155111,
        name: "Sepolia Testnet",
        symbol: "ETH",
        explorer_tx: "https://sepolia.etherscan.io/tx/",
    },
];

/// Look up a network by chain id. Unknown ids get a placeholder entry.
pub fn lookup(chain_id: u64) -> Network {
    KNOWN
        .iter()
        .copied()
        .find(|n| n.chain_id == chain_id)
        .unwrap_or(Network {
            chain_id,
            name: "Unknown Network",
            symbol: "ETH",
            explorer_tx: "https://etherscan.io/tx/",
        })
}

/// Explorer link for a transaction hash. Informational only, never fetched.
pub fn explorer_tx_url(chain_id: u64, handle: TxHash) -> String {
    format!("{}{}", lookup(chain_id).explorer_tx, handle)
}
