//! OGN registry - contract bindings for staking console sessions.
//!
//! Given the chain a session is connected to, this crate binds the OGN
//! staking contracts (token, fee vault, series and seasons) deployed on that
//! chain to the session's client connection. Deployment addresses and ABIs
//! are compiled in; networks without a deployment simply resolve to nothing.

pub mod abi;
pub mod connection;
pub mod error;
pub mod network;
pub mod registry;
pub mod tokens;

pub use abi::InterfaceDefinition;
pub use connection::{BoundContract, ClientConnection, JsonRpcConnection, RetryPolicy};
pub use error::{RegistryError, Result};
pub use network::Network;
pub use registry::{
    roles, Binding, ContractEntry, ContractTables, NetworkContractTable, RegistryResolver,
    ResolvedRegistry, RoleSource,
};
pub use tokens::{TokenInfo, TokenList, TokenLookup, TokenRegistry};

// Re-exported so downstream crates need not depend on alloy directly
pub use alloy_json_abi;
pub use alloy_primitives;
pub use async_trait::async_trait;
