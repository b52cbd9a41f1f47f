//! Configuration for the staking console

use anyhow::Result;
use clap::{Parser, ValueEnum};
use ogn_registry::Network;
use std::time::Duration;

#[derive(Clone, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned table, one role per line
    #[default]
    Text,
    /// Single JSON document
    Json,
}

/// OGN Staking Console
///
/// Connects to an Ethereum RPC endpoint and binds the OGN staking contracts
/// (token, fee vault, series, seasons) deployed on that network.
///
/// # Examples
///
/// ```bash
/// # Resolve against a local fork
/// ogn-console --rpc-url http://127.0.0.1:8545
///
/// # Mainnet with the 1inch token list for the OGN token
/// ogn-console --token-list https://tokens.1inch.eth.link --format json
///
/// # No network access, just show the Goerli bindings
/// ogn-console --offline --network goerli
/// ```
#[derive(Parser, Debug)]
#[command(name = "ogn-console")]
#[command(about = "Bind OGN staking contracts for the connected network", long_about = None)]
pub struct Config {
    /// Ethereum JSON-RPC URL
    #[arg(long, env = "ETH_RPC_URL", default_value = "http://127.0.0.1:8545")]
    pub rpc_url: String,

    /// Chain id to resolve instead of the one reported by the endpoint
    #[arg(long, conflicts_with = "network")]
    pub chain_id: Option<u64>,

    /// Network name to resolve (mainnet, rinkeby, goerli)
    #[arg(long)]
    pub network: Option<Network>,

    /// Do not contact the RPC endpoint (requires --chain-id or --network)
    #[arg(long)]
    pub offline: bool,

    /// Token lists used to find tokens without a fixed address (paths or http(s) URLs)
    ///
    /// Example: --token-list ./tokens.json,https://tokens.1inch.eth.link
    #[arg(long, env = "OGN_TOKEN_LISTS", value_delimiter = ',')]
    pub token_list: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Retries for the initial eth_chainId call
    #[arg(long, default_value = "3")]
    pub retries: u32,

    /// Initial backoff between connection retries, in milliseconds
    #[arg(long, default_value = "500")]
    pub retry_backoff_ms: u64,

    /// Print the built-in contract tables and exit
    #[arg(long)]
    pub list_networks: bool,
}

impl Config {
    /// Chain id requested on the command line, if any.
    pub fn requested_chain_id(&self) -> Option<u64> {
        self.chain_id.or_else(|| self.network.map(Network::chain_id))
    }

    pub fn retry_policy(&self) -> ogn_registry::RetryPolicy {
        ogn_registry::RetryPolicy {
            max_retries: self.retries,
            initial_backoff: Duration::from_millis(self.retry_backoff_ms),
            ..ogn_registry::RetryPolicy::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.offline && self.requested_chain_id().is_none() {
            anyhow::bail!("--offline requires --chain-id or --network");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("ogn-console").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.requested_chain_id(), None);
        assert!(!config.offline);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_network_name_sets_chain() {
        let config = parse(&["--network", "goerli"]);
        assert_eq!(config.requested_chain_id(), Some(5));
    }

    #[test]
    fn test_chain_id_conflicts_with_network() {
        assert!(Config::try_parse_from(["ogn-console", "--chain-id", "1", "--network", "goerli"])
            .is_err());
    }

    #[test]
    fn test_offline_needs_chain() {
        assert!(parse(&["--offline"]).validate().is_err());
        assert!(parse(&["--offline", "--chain-id", "4"]).validate().is_ok());
    }

    #[test]
    fn test_token_lists_split_on_comma() {
        let config = parse(&["--token-list", "a.json,https://example.invalid/list.json"]);
        assert_eq!(config.token_list, ["a.json", "https://example.invalid/list.json"]);
    }

    #[test]
    fn test_retry_policy_from_flags() {
        let policy = parse(&["--retries", "0", "--retry-backoff-ms", "10"]).retry_policy();
        assert_eq!(policy.max_retries, 0);
        assert_eq!(policy.initial_backoff, Duration::from_millis(10));
    }
}
