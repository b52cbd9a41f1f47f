//! OGN Console - staking contract bindings for the connected network.
//!
//! Connects to an Ethereum JSON-RPC endpoint, asks it which chain it serves
//! and binds the OGN staking contracts deployed there:
//!
//! - `token`: OGN (test token on Rinkeby/Goerli, token list lookup on mainnet)
//! - `vault`: FeeVault
//! - `series`: staking Series
//! - `season_one`, `season_two`, `season_three`: staking Seasons
//!
//! Networks without a deployment resolve to an empty namespace.
//!
//! # Usage
//!
//! ```bash
//! # Local fork, endpoint decides the network
//! ogn-console --rpc-url http://127.0.0.1:8545
//!
//! # Mainnet token via a token list
//! ogn-console --token-list ./tokens.json --format json
//!
//! # Inspect the built-in tables
//! ogn-console --list-networks
//! ```

mod config;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Config, OutputFormat};
use ogn_registry::network::describe_chain;
use ogn_registry::{ContractTables, JsonRpcConnection, RegistryResolver, TokenList};
use output::NamespaceView;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    run_console(config).await
}

async fn run_console(config: Config) -> Result<()> {
    if config.list_networks {
        println!("{}", output::render_tables(&ContractTables::builtin()));
        return Ok(());
    }

    config.validate()?;

    let connection = if config.offline {
        let chain_id = config
            .requested_chain_id()
            .context("--offline requires a chain id")?;
        tracing::info!("Offline mode, resolving chain {} without RPC", chain_id);
        JsonRpcConnection::with_chain_id(&config.rpc_url, chain_id)?
    } else {
        tracing::info!("RPC URL: {}", config.rpc_url);
        JsonRpcConnection::connect(&config.rpc_url, &config.retry_policy()).await?
    };

    let chain_id = select_chain_id(config.requested_chain_id(), connection.chain_id())?;

    let mut resolver = RegistryResolver::builtin();
    if let Some(tokens) = load_token_lists(&config.token_list).await {
        resolver = resolver.with_token_registry(Arc::new(tokens));
    }

    let registry = resolver.resolve(chain_id, &connection).await?;

    if registry.is_empty() {
        tracing::warn!(
            "No OGN staking contracts known for chain {}; known chains: {:?}",
            chain_id,
            resolver.tables().chain_ids()
        );
    }
    for role in registry.unresolved_roles() {
        tracing::warn!(
            "Role '{}' is unresolved; install a token list that carries it (--token-list)",
            role
        );
    }

    let rpc_url = (!config.offline).then(|| connection.url().to_string());
    let view = NamespaceView::new(&registry, rpc_url);
    match config.format {
        OutputFormat::Text => print!("{}", view.render_text()),
        OutputFormat::Json => println!("{}", view.render_json()?),
    }

    Ok(())
}

/// Chain to resolve: the one the session is on.
///
/// A requested chain must match it. Offline sessions are built with the
/// requested id, so only a live endpoint on another network can disagree.
fn select_chain_id(requested: Option<u64>, connected: u64) -> Result<u64> {
    match requested {
        Some(requested) if requested != connected => anyhow::bail!(
            "Endpoint serves {} (chain id {connected}) but {} (chain id {requested}) was \
             requested; use --offline to inspect another network",
            describe_chain(connected),
            describe_chain(requested)
        ),
        _ => Ok(connected),
    }
}

/// Load and merge every configured token list. Lists that fail to load are
/// skipped; the roles they would have provided stay unresolved.
async fn load_token_lists(sources: &[String]) -> Option<TokenList> {
    let mut merged: Option<TokenList> = None;

    for source in sources {
        match TokenList::load(source).await {
            Ok(list) => {
                tracing::info!("Loaded token list {} ({} tokens)", source, list.len());
                merged = Some(match merged {
                    Some(existing) => existing.merge(list),
                    None => list,
                });
            }
            Err(e) => {
                tracing::warn!("Skipping token list {}: {}", source, e);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_defaults_to_session() {
        assert_eq!(select_chain_id(None, 5).unwrap(), 5);
        assert_eq!(select_chain_id(Some(5), 5).unwrap(), 5);
    }

    #[test]
    fn test_chain_id_mismatch_is_rejected() {
        let err = select_chain_id(Some(1), 5).unwrap_err().to_string();
        assert!(err.contains("goerli (chain id 5)"), "{err}");
        assert!(err.contains("mainnet (chain id 1)"), "{err}");
    }

    #[test]
    fn test_offline_session_takes_requested_chain() {
        let conn = JsonRpcConnection::with_chain_id("http://127.0.0.1:8545", 4).unwrap();
        assert_eq!(select_chain_id(Some(4), conn.chain_id()).unwrap(), 4);
    }
}
