//! Interface definitions (ABIs) bound to registry roles.
//!
//! The staking contracts ship their ABIs as JSON under `abi/`. They are
//! compiled into the binary and parsed once, on first use.

use std::fmt;
use std::sync::{Arc, LazyLock};

use alloy_json_abi::JsonAbi;

use crate::error::{RegistryError, Result};

/// A named contract interface.
///
/// Cloning is cheap; the parsed ABI is shared behind an `Arc`.
#[derive(Clone, PartialEq, Eq)]
pub struct InterfaceDefinition {
    name: String,
    abi: Arc<JsonAbi>,
}

impl InterfaceDefinition {
    pub fn new(name: impl Into<String>, abi: JsonAbi) -> Self {
        Self {
            name: name.into(),
            abi: Arc::new(abi),
        }
    }

    /// Parse a Solidity JSON ABI (the array form emitted by solc/hardhat).
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self> {
        let name = name.into();
        let abi: JsonAbi =
            serde_json::from_str(json).map_err(|e| RegistryError::InvalidInterface {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self::new(name, abi))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    /// True when the ABI declares nothing callable and no events.
    pub fn is_empty(&self) -> bool {
        self.abi.functions.is_empty()
            && self.abi.events.is_empty()
            && self.abi.constructor.is_none()
            && self.abi.receive.is_none()
            && self.abi.fallback.is_none()
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.abi.functions.contains_key(name)
    }

    pub fn has_event(&self, name: &str) -> bool {
        self.abi.events.contains_key(name)
    }

    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.abi.functions.keys().map(String::as_str)
    }
}

impl fmt::Debug for InterfaceDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceDefinition")
            .field("name", &self.name)
            .field("functions", &self.abi.functions.len())
            .field("events", &self.abi.events.len())
            .finish()
    }
}

fn builtin(name: &'static str, json: &'static str) -> InterfaceDefinition {
    InterfaceDefinition::from_json(name, json)
        .unwrap_or_else(|e| panic!("compiled-in ABI {name} is malformed: {e}"))
}

static FEE_VAULT: LazyLock<InterfaceDefinition> =
    LazyLock::new(|| builtin("fee_vault", include_str!("../abi/fee_vault.json")));
static SERIES: LazyLock<InterfaceDefinition> =
    LazyLock::new(|| builtin("series", include_str!("../abi/series.json")));
static SEASON: LazyLock<InterfaceDefinition> =
    LazyLock::new(|| builtin("season", include_str!("../abi/season.json")));
static MOCK_OGN: LazyLock<InterfaceDefinition> =
    LazyLock::new(|| builtin("mock_ogn", include_str!("../abi/mock_ogn.json")));

/// FeeVault: holds staking rewards, governed, pausable.
pub fn fee_vault() -> InterfaceDefinition {
    FEE_VAULT.clone()
}

/// Series: staking entry point that rolls stakes across seasons.
pub fn series() -> InterfaceDefinition {
    SERIES.clone()
}

/// Season: one staking season (points, rewards, claim window).
pub fn season() -> InterfaceDefinition {
    SEASON.clone()
}

/// ERC20 interface of the OGN test token; also used for the real OGN token.
pub fn mock_ogn() -> InterfaceDefinition {
    MOCK_OGN.clone()
}
