//! Chain RPC client with timeout and failover handling.
//!
//! # Responsibilities
//! - Connect to one or more JSON-RPC endpoints
//! - Query chain state (chain id, block number, balances, receipts)
//! - Broadcast signed transactions
//! - Surface timeouts and network errors instead of hanging

use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionReceipt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::chain::types::{ChainError, ChainId, ChainResult};
use crate::config::ChainConfig;
use crate::observability::metrics;

/// RPC client wrapper over a primary endpoint plus optional failovers.
///
/// Every call walks the provider list in order; the first that answers within
/// the timeout wins. Failures are logged and the next provider is tried.
#[derive(Clone)]
pub struct ChainClient {
    providers: Vec<Arc<dyn Provider + Send + Sync>>,
    config: ChainConfig,
    timeout_duration: Duration,
}

impl ChainClient {
    /// Create a client from configuration.
    ///
    /// Succeeds even when the endpoint is unreachable; a chain-id mismatch at
    /// startup is logged as a warning rather than treated as fatal.
    pub async fn new(config: ChainConfig) -> ChainResult<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);
        let mut providers = Vec::new();

        let primary: url::Url = config.rpc_url.parse().map_err(|e| {
            ChainError::Rpc(format!("invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        providers.push(
            Arc::new(ProviderBuilder::new().connect_http(primary)) as Arc<dyn Provider + Send + Sync>
        );

        for url_str in &config.failover_urls {
            match url_str.parse() {
                Ok(url) => providers.push(Arc::new(ProviderBuilder::new().connect_http(url))
                    as Arc<dyn Provider + Send + Sync>),
                Err(_) => tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL"),
            }
        }

        let client = Self {
            providers,
            config: config.clone(),
            timeout_duration,
        };

        match client.verify_chain_id().await {
            Ok(()) => {
                tracing::info!(
                    rpc_url = %config.rpc_url,
                    chain_id = config.chain_id,
                    "Chain client initialized"
                );
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Chain client initialized but chain verification failed"
                );
            }
        }

        Ok(client)
    }

    /// Check that the node agrees with the configured chain id.
    pub async fn verify_chain_id(&self) -> ChainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != self.config.chain_id {
            return Err(ChainError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Chain id as reported by the node.
    pub async fn get_chain_id(&self) -> ChainResult<ChainId> {
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, provider.get_chain_id()).await {
                Ok(Ok(id)) => return Ok(ChainId(id)),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, error = %e, "RPC error, trying next provider")
                }
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout, trying next provider"),
            }
        }
        Err(ChainError::Rpc("all RPC providers failed".to_string()))
    }

    /// Latest block number.
    pub async fn get_block_number(&self) -> ChainResult<u64> {
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, provider.get_block_number()).await {
                Ok(Ok(n)) => return Ok(n),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        Err(ChainError::Rpc(
            "all providers failed to get block number".to_string(),
        ))
    }

    /// Native-asset balance of an address, in wei.
    pub async fn get_balance(&self, address: Address) -> ChainResult<U256> {
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, provider.get_balance(address)).await {
                Ok(Ok(bal)) => return Ok(bal),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        Err(ChainError::Rpc(
            "all providers failed to get balance".to_string(),
        ))
    }

    /// Transaction count (next nonce) for an address.
    pub async fn get_transaction_count(&self, address: Address) -> ChainResult<u64> {
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, provider.get_transaction_count(address)).await {
                Ok(Ok(n)) => return Ok(n),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        Err(ChainError::Rpc(
            "all providers failed to get transaction count".to_string(),
        ))
    }

    /// Receipt for a transaction hash, `None` while still pending.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> ChainResult<Option<TransactionReceipt>> {
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, provider.get_transaction_receipt(tx_hash)).await {
                Ok(Ok(receipt)) => return Ok(receipt),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        Err(ChainError::Rpc(
            "all providers failed to get receipt".to_string(),
        ))
    }

    /// Current gas price in wei.
    pub async fn get_gas_price(&self) -> ChainResult<u128> {
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, provider.get_gas_price()).await {
                Ok(Ok(price)) => return Ok(price),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        Err(ChainError::Rpc(
            "all providers failed to get gas price".to_string(),
        ))
    }

    /// Broadcast an already-signed transaction, returning its hash.
    ///
    /// Node-side rejections (insufficient funds, nonce conflicts) come back as
    /// `ChainError::Rpc` carrying the node's message verbatim.
    pub async fn send_raw_transaction(&self, encoded: &[u8]) -> ChainResult<TxHash> {
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, provider.send_raw_transaction(encoded)).await {
                Ok(Ok(pending)) => return Ok(*pending.tx_hash()),
                Ok(Err(e)) => {
                    // A rejection is a definitive answer from the node, not a
                    // transport failure. Do not re-broadcast on a failover.
                    return Err(ChainError::Rpc(e.to_string()));
                }
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout, trying next provider"),
            }
        }
        Err(ChainError::Rpc(
            "all providers failed to broadcast transaction".to_string(),
        ))
    }

    /// True when the node answers a block-number query.
    pub async fn is_healthy(&self) -> bool {
        let healthy = self.get_block_number().await.is_ok();
        metrics::record_rpc_health(healthy);
        healthy
    }

    /// Client configuration.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Confirmation depth required before a receipt counts as final.
    pub fn confirmation_blocks(&self) -> u32 {
        self.config.confirmation_blocks
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ChainConfig {
        ChainConfig {
            rpc_url: "http://localhost:8545".to_string(),
            failover_urls: Vec::new(),
            chain_id: 31337, // Anvil default
            rpc_timeout_secs: 2,
            confirmation_blocks: 1,
            receipt_timeout_secs: 30,
            gas_price_multiplier: 1.0,
            max_gas_price_gwei: 100,
        }
    }

    #[tokio::test]
    async fn test_client_creation_without_node() {
        // Creation should succeed even when nothing listens on the endpoint.
        let result = ChainClient::new(test_config()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_rpc_url_rejected() {
        let mut config = test_config();
        config.rpc_url = "not a url".to_string();
        let result = ChainClient::new(config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("invalid RPC URL"));
    }

    #[tokio::test]
    async fn test_all_providers_failing() {
        let mut config = test_config();
        config.failover_urls.push("http://invalid:8545".to_string());

        let client = ChainClient::new(config).await.unwrap();
        let result = client.get_chain_id().await;
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("all RPC providers failed"));
    }
}
