//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::WalletflowConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<WalletflowConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: WalletflowConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_missing_file() {
        let result = load_config(Path::new("/nonexistent/walletflow.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_valid_file() {
        let mut file = tempfile_path("valid");
        writeln!(
            file.1,
            "[chain]\nrpc_url = \"https://rpc.example.org\"\nchain_id = 137"
        )
        .unwrap();

        let config = load_config(&file.0).unwrap();
        assert_eq!(config.chain.chain_id, 137);
        std::fs::remove_file(&file.0).ok();
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = tempfile_path("invalid");
        writeln!(file.1, "[chain]\nrpc_url = \"\"\nrpc_timeout_secs = 0").unwrap();

        let result = load_config(&file.0);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
        std::fs::remove_file(&file.0).ok();
    }

    fn tempfile_path(tag: &str) -> (std::path::PathBuf, std::fs::File) {
        let path = std::env::temp_dir().join(format!(
            "walletflow-config-test-{}-{}.toml",
            tag,
            std::process::id()
        ));
        let file = std::fs::File::create(&path).unwrap();
        (path, file)
    }
}
