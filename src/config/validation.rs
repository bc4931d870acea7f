//! Configuration validation.
//!
//! Semantic checks on top of what serde already guarantees syntactically.
//! All violations are reported at once, not just the first.

use crate::config::schema::WalletflowConfig;

/// A single configuration violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &WalletflowConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.chain.rpc_url.parse::<url::Url>().is_err() {
        errors.push(ValidationError {
            field: "chain.rpc_url",
            message: format!("not a valid URL: '{}'", config.chain.rpc_url),
        });
    }

    for url in &config.chain.failover_urls {
        if url.parse::<url::Url>().is_err() {
            errors.push(ValidationError {
                field: "chain.failover_urls",
                message: format!("not a valid URL: '{}'", url),
            });
        }
    }

    if config.chain.chain_id == 0 {
        errors.push(ValidationError {
            field: "chain.chain_id",
            message: "must be non-zero".to_string(),
        });
    }

    if config.chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "chain.rpc_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.chain.receipt_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "chain.receipt_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.chain.gas_price_multiplier < 1.0 {
        errors.push(ValidationError {
            field: "chain.gas_price_multiplier",
            message: "must be at least 1.0".to_string(),
        });
    }

    if config.chain.max_gas_price_gwei == 0 {
        errors.push(ValidationError {
            field: "chain.max_gas_price_gwei",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address",
            message: format!(
                "not a valid socket address: '{}'",
                config.observability.metrics_address
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&WalletflowConfig::default()).is_ok());
    }

    #[test]
    fn test_all_errors_reported() {
        let mut config = WalletflowConfig::default();
        config.chain.rpc_url = "not a url".to_string();
        config.chain.chain_id = 0;
        config.chain.rpc_timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.field == "chain.rpc_url"));
        assert!(errors.iter().any(|e| e.field == "chain.chain_id"));
        assert!(errors.iter().any(|e| e.field == "chain.rpc_timeout_secs"));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = WalletflowConfig::default();
        config.observability.metrics_address = "nope".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_gas_multiplier_floor() {
        let mut config = WalletflowConfig::default();
        config.chain.gas_price_multiplier = 0.5;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "chain.gas_price_multiplier");
    }
}
