//! Token metadata registry.
//!
//! Some roles are not deployed by us and have no fixed address in the
//! tables (the real OGN token on mainnet). Those are looked up by symbol in
//! a token list, the same JSON format published by Uniswap, 1inch and others:
//!
//! ```json
//! {
//!   "name": "...",
//!   "tokens": [{ "chainId": 1, "address": "0x...", "symbol": "OGN", "decimals": 18 }]
//! }
//! ```
//!
//! A symbol missing from every installed list is an expected outcome, so
//! lookups return [`TokenLookup::NotFound`] instead of an error. Entries
//! that do not parse are skipped so one bad token cannot hide the others.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use alloy_primitives::Address;
use serde::Deserialize;

use crate::error::{RegistryError, Result};

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Metadata for one token on one chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub chain_id: u64,
    pub address: Address,
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
}

/// Result of a symbol lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenLookup {
    Found(TokenInfo),
    NotFound,
}

impl TokenLookup {
    pub fn found(self) -> Option<TokenInfo> {
        match self {
            TokenLookup::Found(info) => Some(info),
            TokenLookup::NotFound => None,
        }
    }
}

/// Source of token metadata, queried by symbol.
pub trait TokenRegistry: Send + Sync {
    fn lookup_by_symbol(&self, chain_id: u64, symbol: &str) -> TokenLookup;
}

#[derive(Debug, Deserialize)]
struct TokenListFile {
    #[serde(default)]
    name: Option<String>,
    tokens: Vec<serde_json::Value>,
}

/// One or more merged token lists, indexed by `(chain_id, SYMBOL)`.
#[derive(Debug, Clone, Default)]
pub struct TokenList {
    names: Vec<String>,
    by_symbol: HashMap<(u64, String), TokenInfo>,
}

impl TokenList {
    pub fn from_tokens(
        name: impl Into<String>,
        tokens: impl IntoIterator<Item = TokenInfo>,
    ) -> Self {
        let mut list = Self {
            names: vec![name.into()],
            by_symbol: HashMap::new(),
        };
        for token in tokens {
            list.insert(token);
        }
        list
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: TokenListFile =
            serde_json::from_str(json).map_err(|e| RegistryError::TokenList(e.to_string()))?;
        let name = file.name.unwrap_or_else(|| "unnamed".to_string());

        let tokens = file
            .tokens
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| match serde_json::from_value::<TokenInfo>(raw) {
                Ok(token) => Some(token),
                Err(e) => {
                    tracing::debug!(
                        target: "ogn_registry::tokens",
                        list = %name,
                        index,
                        error = %e,
                        "Skipping malformed token entry"
                    );
                    None
                }
            })
            .collect::<Vec<_>>();

        Ok(Self::from_tokens(name, tokens))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            RegistryError::TokenList(format!("Failed to read {}: {e}", path.display()))
        })?;
        let list = Self::from_json(&json)?;
        tracing::debug!(
            target: "ogn_registry::tokens",
            path = %path.display(),
            tokens = list.len(),
            "Loaded token list"
        );
        Ok(list)
    }

    /// Download a token list over HTTP(S).
    pub async fn fetch(url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| RegistryError::TokenList(e.to_string()))?;
        Self::fetch_with(&client, url).await
    }

    async fn fetch_with(client: &reqwest::Client, url: &str) -> Result<Self> {
        let resp = client
            .get(url)
            .send()
            .await
            .map_err(|e| RegistryError::TokenList(format!("Failed to fetch {url}: {e}")))?;

        if !resp.status().is_success() {
            return Err(RegistryError::TokenList(format!(
                "Failed to fetch {url}: HTTP {}",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| RegistryError::TokenList(format!("Failed to read {url}: {e}")))?;
        let list = Self::from_json(&body)?;
        tracing::debug!(
            target: "ogn_registry::tokens",
            url = %url,
            tokens = list.len(),
            "Fetched token list"
        );
        Ok(list)
    }

    /// Load from a path or, for `http(s)://` sources, over the network.
    pub async fn load(source: &str) -> Result<Self> {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::fetch(source).await
        } else {
            Self::from_path(source)
        }
    }

    /// Merge `other` into this list. Entries already present win.
    pub fn merge(mut self, other: TokenList) -> Self {
        self.names.extend(other.names);
        for (key, token) in other.by_symbol {
            self.by_symbol.entry(key).or_insert(token);
        }
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }

    fn insert(&mut self, token: TokenInfo) {
        let key = (token.chain_id, token.symbol.to_ascii_uppercase());
        self.by_symbol.entry(key).or_insert(token);
    }
}

impl TokenRegistry for TokenList {
    fn lookup_by_symbol(&self, chain_id: u64, symbol: &str) -> TokenLookup {
        self.by_symbol
            .get(&(chain_id, symbol.to_ascii_uppercase()))
            .cloned()
            .map_or(TokenLookup::NotFound, TokenLookup::Found)
    }
}
