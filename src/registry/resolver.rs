//! Chain id + client connection → [`ResolvedRegistry`].

use std::sync::Arc;

use alloy_primitives::Address;
use futures::future::join_all;

use super::resolved::{Binding, ResolvedRegistry};
use super::table::{ContractEntry, ContractTables, RoleSource};
use crate::abi::InterfaceDefinition;
use crate::connection::ClientConnection;
use crate::error::{RegistryError, Result};
use crate::network::describe_chain;
use crate::tokens::{TokenLookup, TokenRegistry};

/// What to do for one role once external lookups are done.
enum Plan<'a> {
    Bind {
        address: Address,
        interface: &'a InterfaceDefinition,
    },
    Unresolved {
        symbol: &'a str,
    },
}

/// Binds the contracts of the active network to a client connection.
///
/// Stateless apart from its immutable tables; `resolve` may be called any
/// number of times, concurrently, and every call returns a fresh registry.
#[derive(Clone)]
pub struct RegistryResolver {
    tables: Arc<ContractTables>,
    token_registry: Option<Arc<dyn TokenRegistry>>,
}

impl RegistryResolver {
    pub fn new(tables: Arc<ContractTables>) -> Self {
        Self {
            tables,
            token_registry: None,
        }
    }

    /// Resolver over the compiled-in tables.
    pub fn builtin() -> Self {
        Self::new(ContractTables::builtin())
    }

    /// Use `registry` for roles published in token lists.
    ///
    /// Without one, those roles always come back unresolved.
    pub fn with_token_registry(mut self, registry: Arc<dyn TokenRegistry>) -> Self {
        self.token_registry = Some(registry);
        self
    }

    pub fn tables(&self) -> &ContractTables {
        &self.tables
    }

    /// Resolve every role declared for `chain_id`.
    ///
    /// Unknown chains yield an empty registry. Roles whose token lookup
    /// misses are returned as [`Binding::Unresolved`]. A connection error
    /// aborts the call and is returned as [`RegistryError::Connection`].
    pub async fn resolve<C>(
        &self,
        chain_id: u64,
        connection: &C,
    ) -> Result<ResolvedRegistry<C::Handle>>
    where
        C: ClientConnection,
    {
        let Some(table) = self.tables.get(chain_id) else {
            tracing::debug!(
                target: "ogn_registry::registry::resolver",
                chain_id,
                "No contract table for chain, nothing to resolve"
            );
            return Ok(ResolvedRegistry::empty(chain_id));
        };

        let plans: Vec<(&str, Plan<'_>)> = table
            .entries()
            .iter()
            .map(|entry| (entry.role(), self.plan(chain_id, entry)))
            .collect();

        let constructions = plans.iter().map(|(role, plan)| async move {
            match plan {
                Plan::Bind { address, interface } => connection
                    .construct_handle(*address, interface)
                    .await
                    .map(Binding::Bound)
                    .map_err(|source| RegistryError::Connection {
                        role: (*role).to_string(),
                        address: *address,
                        source,
                    }),
                Plan::Unresolved { symbol } => Ok(Binding::Unresolved {
                    symbol: (*symbol).to_string(),
                }),
            }
        });
        let outcomes = join_all(constructions).await;

        let mut registry = ResolvedRegistry::empty(chain_id);
        for ((role, _), outcome) in plans.iter().zip(outcomes) {
            registry.push(*role, outcome?);
        }

        tracing::info!(
            target: "ogn_registry::registry::resolver",
            chain_id,
            network = %describe_chain(chain_id),
            bound = registry.bound_roles().count(),
            unresolved = registry.unresolved_roles().count(),
            "Resolved contract registry"
        );

        Ok(registry)
    }

    fn plan<'a>(&self, chain_id: u64, entry: &'a ContractEntry) -> Plan<'a> {
        match entry.source() {
            RoleSource::Deployed { address, interface } => Plan::Bind {
                address: *address,
                interface,
            },
            RoleSource::TokenList { symbol, interface } => {
                let lookup = self
                    .token_registry
                    .as_ref()
                    .map_or(TokenLookup::NotFound, |registry| {
                        registry.lookup_by_symbol(chain_id, symbol)
                    });

                match lookup {
                    TokenLookup::Found(info) => {
                        tracing::debug!(
                            target: "ogn_registry::registry::resolver",
                            role = entry.role(),
                            symbol = %symbol,
                            address = %info.address,
                            "Token resolved from token list"
                        );
                        Plan::Bind {
                            address: info.address,
                            interface,
                        }
                    }
                    TokenLookup::NotFound => {
                        tracing::warn!(
                            target: "ogn_registry::registry::resolver",
                            role = entry.role(),
                            symbol = %symbol,
                            "Token not found in any installed token list, leaving unresolved"
                        );
                        Plan::Unresolved {
                            symbol: symbol.as_str(),
                        }
                    }
                }
            }
        }
    }
}

impl Default for RegistryResolver {
    fn default() -> Self {
        Self::builtin()
    }
}
