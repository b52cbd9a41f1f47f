//! Rendering of the resolved session namespace.

use itertools::Itertools;
use ogn_registry::network::describe_chain;
use ogn_registry::{Binding, BoundContract, ContractTables, ResolvedRegistry, RoleSource};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct NamespaceView {
    pub chain_id: u64,
    pub network: String,
    pub rpc_url: Option<String>,
    pub contracts: Vec<ContractView>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ContractView {
    pub role: String,
    pub address: Option<String>,
    pub interface: Option<String>,
    /// Symbol that could not be found, for unresolved roles
    pub unresolved_symbol: Option<String>,
    pub functions: usize,
}

impl NamespaceView {
    pub fn new(registry: &ResolvedRegistry<BoundContract>, rpc_url: Option<String>) -> Self {
        let contracts = registry
            .iter()
            .map(|(role, binding)| match binding {
                Binding::Bound(contract) => ContractView {
                    role: role.to_string(),
                    address: Some(contract.address().to_checksum(None)),
                    interface: Some(contract.interface().name().to_string()),
                    unresolved_symbol: None,
                    functions: contract.interface().function_names().count(),
                },
                Binding::Unresolved { symbol } => ContractView {
                    role: role.to_string(),
                    address: None,
                    interface: None,
                    unresolved_symbol: Some(symbol.clone()),
                    functions: 0,
                },
            })
            .collect();

        Self {
            chain_id: registry.chain_id(),
            network: describe_chain(registry.chain_id()),
            rpc_url,
            contracts,
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = format!("network: {} (chain id {})\n", self.network, self.chain_id);
        if let Some(url) = &self.rpc_url {
            out.push_str(&format!("rpc:     {url}\n"));
        }

        if self.contracts.is_empty() {
            out.push_str("no contracts deployed on this network\n");
            return out;
        }

        let width = self.contracts.iter().map(|c| c.role.len()).max().unwrap_or(0);
        for contract in &self.contracts {
            let line = match (&contract.address, &contract.interface) {
                (Some(address), Some(interface)) => format!(
                    "{:<width$}  {address}  {interface} ({} functions)",
                    contract.role, contract.functions
                ),
                _ => format!(
                    "{:<width$}  unresolved ({})",
                    contract.role,
                    contract.unresolved_symbol.as_deref().unwrap_or("?")
                ),
            };
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Summary of the compiled-in tables, one network per block.
pub fn render_tables(tables: &ContractTables) -> String {
    tables
        .chain_ids()
        .into_iter()
        .filter_map(|chain_id| tables.get(chain_id))
        .map(|table| {
            let rows = table
                .entries()
                .iter()
                .map(|entry| match entry.source() {
                    RoleSource::Deployed { address, interface } => format!(
                        "  {:<14}{}  {}",
                        entry.role(),
                        address.to_checksum(None),
                        interface.name()
                    ),
                    RoleSource::TokenList { symbol, interface } => format!(
                        "  {:<14}token list symbol {symbol}  {}",
                        entry.role(),
                        interface.name()
                    ),
                })
                .join("\n");
            format!(
                "{} (chain id {})\n{rows}",
                describe_chain(table.chain_id()),
                table.chain_id()
            )
        })
        .join("\n\n")
}
