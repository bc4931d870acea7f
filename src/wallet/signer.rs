//! Local signer-backed wallet.
//!
//! # Security
//! - The private key is loaded ONLY from an environment variable
//! - Key material is never logged or serialized
//! - EIP-155 replay protection via the configured chain id

use alloy::eips::eip2718::Encodable2718;
use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;

use crate::chain::network;
use crate::chain::ChainClient;
use crate::wallet::provider::{Balance, WalletError, WalletProvider};

/// Environment variable holding the hex-encoded private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "WALLETFLOW_PRIVATE_KEY";

/// Gas limit of a plain native-asset transfer.
const TRANSFER_GAS_LIMIT: u64 = 21_000;

/// [`WalletProvider`] backed by a local private key and an RPC client.
pub struct SignerWallet {
    signer: PrivateKeySigner,
    wallet: EthereumWallet,
    client: ChainClient,
    chain_id: u64,
}

impl SignerWallet {
    /// Create a wallet from a hex-encoded private key (with or without the
    /// 0x prefix). The key is parsed once and never logged.
    pub fn from_private_key(private_key_hex: &str, client: ChainClient) -> Result<Self, WalletError> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex.parse().map_err(|e| {
            WalletError::NotConnected(format!("invalid private key format: {}", e))
        })?;

        let chain_id = client.config().chain_id;
        tracing::info!(
            address = %signer.address(),
            chain_id = chain_id,
            "Wallet initialized"
        );

        let wallet = EthereumWallet::from(signer.clone());
        Ok(Self {
            signer,
            wallet,
            client,
            chain_id,
        })
    }

    /// Load the wallet key from [`PRIVATE_KEY_ENV_VAR`].
    pub fn from_env(client: ChainClient) -> Result<Self, WalletError> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            WalletError::NotConnected(format!(
                "environment variable {} not set",
                PRIVATE_KEY_ENV_VAR
            ))
        })?;

        Self::from_private_key(&private_key, client)
    }

    /// Address of the signing account.
    pub fn address(&self) -> Address {
        self.signer.address()
    }
}

#[async_trait]
impl WalletProvider for SignerWallet {
    async fn connect(&self) -> Result<Address, WalletError> {
        // A session is only "connected" when the node answers and agrees on
        // the chain id the key was configured for.
        self.client
            .verify_chain_id()
            .await
            .map_err(|e| WalletError::NotConnected(e.to_string()))?;
        Ok(self.signer.address())
    }

    async fn balance(&self) -> Result<Balance, WalletError> {
        let amount = self
            .client
            .get_balance(self.signer.address())
            .await
            .map_err(|e| WalletError::Unavailable(e.to_string()))?;

        Ok(Balance {
            amount,
            symbol: network::lookup(self.chain_id).symbol.to_string(),
        })
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        let id = self
            .client
            .get_chain_id()
            .await
            .map_err(|e| WalletError::NetworkError(e.to_string()))?;
        Ok(id.into())
    }

    async fn broadcast(&self, to: Address, value: U256) -> Result<TxHash, WalletError> {
        let from = self.signer.address();

        let nonce = self
            .client
            .get_transaction_count(from)
            .await
            .map_err(|e| WalletError::NetworkError(e.to_string()))?;

        let gas_price = self
            .client
            .get_gas_price()
            .await
            .map_err(|e| WalletError::NetworkError(e.to_string()))?;

        let config = self.client.config();
        let gas_price_gwei = (gas_price / 1_000_000_000) as u64;
        if gas_price_gwei > config.max_gas_price_gwei {
            return Err(WalletError::NetworkError(format!(
                "gas price {} gwei exceeds maximum {} gwei",
                gas_price_gwei, config.max_gas_price_gwei
            )));
        }
        let adjusted_gas_price = (gas_price as f64 * config.gas_price_multiplier) as u128;

        let tx = TransactionRequest::default()
            .with_to(to)
            .with_value(value)
            .with_nonce(nonce)
            .with_gas_price(adjusted_gas_price)
            .with_chain_id(self.chain_id)
            .with_gas_limit(TRANSFER_GAS_LIMIT);

        let envelope = tx
            .build(&self.wallet)
            .await
            .map_err(|e| WalletError::NetworkError(format!("signing failed: {}", e)))?;

        match self.client.send_raw_transaction(&envelope.encoded_2718()).await {
            Ok(handle) => {
                tracing::info!(tx_hash = %handle, to = %to, value = %value, "Transfer broadcast");
                Ok(handle)
            }
            Err(e) => Err(WalletError::from_broadcast_failure(&e.to_string())),
        }
    }
}

impl std::fmt::Debug for SignerWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerWallet")
            .field("address", &self.signer.address())
            .field("chain_id", &self.chain_id)
            .finish()
    }
}
