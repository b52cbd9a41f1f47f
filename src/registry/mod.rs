//! Network-aware contract registry.
//!
//! Resolution picks the [`NetworkContractTable`] for the active chain and
//! asks the client connection to bind each of its roles:
//!
//! ```text
//! chain_id ──► ContractTables ──► NetworkContractTable
//!                                        │
//!                  TokenRegistry ◄───────┤ (roles published in token lists)
//!                                        ▼
//!                        ClientConnection::construct_handle
//!                                        │
//!                                        ▼
//!                                ResolvedRegistry
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use ogn_registry::{JsonRpcConnection, RegistryResolver, RetryPolicy, TokenList};
//!
//! let conn = JsonRpcConnection::connect(&rpc_url, &RetryPolicy::default()).await?;
//! let resolver = RegistryResolver::builtin()
//!     .with_token_registry(Arc::new(TokenList::load("tokens.json").await?));
//!
//! let registry = resolver.resolve(conn.chain_id(), &conn).await?;
//! if registry.is_unresolved("token") {
//!     // install a token list that carries OGN
//! }
//! ```

mod resolved;
mod resolver;
mod table;

pub use resolved::{Binding, ResolvedRegistry};
pub use resolver::RegistryResolver;
pub use table::{
    roles, ContractEntry, ContractTables, NetworkContractTable, RoleSource, OGN_SYMBOL,
};
