//! Static per-network contract tables.
//!
//! A [`NetworkContractTable`] lists, in order, the roles deployed on one chain
//! and where to find them. [`ContractTables`] keys those tables by chain id.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock};

use alloy_primitives::{address, Address};

use crate::abi::{self, InterfaceDefinition};
use crate::error::{RegistryError, Result};
use crate::network::Network;

/// Role names used by the built-in tables.
pub mod roles {
    pub const TOKEN: &str = "token";
    pub const VAULT: &str = "vault";
    pub const SERIES: &str = "series";
    pub const SEASON_ONE: &str = "season_one";
    pub const SEASON_TWO: &str = "season_two";
    pub const SEASON_THREE: &str = "season_three";
}

/// Symbol the OGN token is published under in token lists.
pub const OGN_SYMBOL: &str = "OGN";

/// Where a role's contract comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleSource {
    /// Fixed deployment address on this network.
    Deployed {
        address: Address,
        interface: InterfaceDefinition,
    },
    /// Address looked up by symbol in the token metadata registry.
    TokenList {
        symbol: String,
        interface: InterfaceDefinition,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractEntry {
    role: String,
    source: RoleSource,
}

impl ContractEntry {
    pub fn deployed(
        role: impl Into<String>,
        address: Address,
        interface: InterfaceDefinition,
    ) -> Self {
        Self {
            role: role.into(),
            source: RoleSource::Deployed { address, interface },
        }
    }

    pub fn token_list(
        role: impl Into<String>,
        symbol: impl Into<String>,
        interface: InterfaceDefinition,
    ) -> Self {
        Self {
            role: role.into(),
            source: RoleSource::TokenList {
                symbol: symbol.into(),
                interface,
            },
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn source(&self) -> &RoleSource {
        &self.source
    }

    pub fn interface(&self) -> &InterfaceDefinition {
        match &self.source {
            RoleSource::Deployed { interface, .. } | RoleSource::TokenList { interface, .. } => {
                interface
            }
        }
    }

    /// Fixed address, if the role has one.
    pub fn address(&self) -> Option<Address> {
        match &self.source {
            RoleSource::Deployed { address, .. } => Some(*address),
            RoleSource::TokenList { .. } => None,
        }
    }
}

/// Ordered role → contract table for one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkContractTable {
    chain_id: u64,
    entries: Vec<ContractEntry>,
}

impl NetworkContractTable {
    /// Build a table, rejecting duplicate role names.
    pub fn new(chain_id: u64, entries: Vec<ContractEntry>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.role()) {
                return Err(RegistryError::DuplicateRole {
                    chain_id,
                    role: entry.role().to_string(),
                });
            }
        }
        Ok(Self { chain_id, entries })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn entries(&self) -> &[ContractEntry] {
        &self.entries
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(ContractEntry::role)
    }

    pub fn get(&self, role: &str) -> Option<&ContractEntry> {
        self.entries.iter().find(|e| e.role() == role)
    }

    /// Fixed addresses declared by this table.
    pub fn addresses(&self) -> impl Iterator<Item = Address> + '_ {
        self.entries.iter().filter_map(ContractEntry::address)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All known tables, keyed by chain id.
#[derive(Debug, Clone, Default)]
pub struct ContractTables {
    tables: HashMap<u64, NetworkContractTable>,
}

impl ContractTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table. Each chain id may only have one.
    pub fn with_table(mut self, table: NetworkContractTable) -> Result<Self> {
        let chain_id = table.chain_id();
        if self.tables.contains_key(&chain_id) {
            return Err(RegistryError::DuplicateNetwork(chain_id));
        }
        tracing::debug!(
            target: "ogn_registry::registry::table",
            chain_id,
            roles = table.len(),
            "Registered contract table"
        );
        self.tables.insert(chain_id, table);
        Ok(self)
    }

    pub fn get(&self, chain_id: u64) -> Option<&NetworkContractTable> {
        self.tables.get(&chain_id)
    }

    pub fn contains(&self, chain_id: u64) -> bool {
        self.tables.contains_key(&chain_id)
    }

    /// Registered chain ids, ascending.
    pub fn chain_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.tables.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Tables for the networks the staking contracts are deployed on.
    pub fn builtin() -> Arc<ContractTables> {
        BUILTIN.clone()
    }
}

static BUILTIN: LazyLock<Arc<ContractTables>> = LazyLock::new(|| {
    let tables =
        build_builtin().unwrap_or_else(|e| panic!("built-in contract tables are invalid: {e}"));
    Arc::new(tables)
});

fn build_builtin() -> Result<ContractTables> {
    ContractTables::new()
        .with_table(mainnet_table()?)?
        .with_table(rinkeby_table()?)?
        .with_table(goerli_table()?)
}

fn mainnet_table() -> Result<NetworkContractTable> {
    NetworkContractTable::new(
        Network::Mainnet.chain_id(),
        vec![
            ContractEntry::token_list(roles::TOKEN, OGN_SYMBOL, abi::mock_ogn()),
            ContractEntry::deployed(
                roles::VAULT,
                address!("c626F08Cf88972332CFcb48B227409658be67a1c"),
                abi::fee_vault(),
            ),
            ContractEntry::deployed(
                roles::SERIES,
                address!("CcE8E784c777fb9435F89f4E45f8b7FC49f7669f"),
                abi::series(),
            ),
            ContractEntry::deployed(
                roles::SEASON_ONE,
                address!("f198fB4efd100B9be9654C79158704BFC0BABa90"),
                abi::season(),
            ),
            ContractEntry::deployed(
                roles::SEASON_TWO,
                address!("6639CdB3EA7A48b0aD95B47bEc78023c6F706160"),
                abi::season(),
            ),
            ContractEntry::deployed(
                roles::SEASON_THREE,
                address!("07B0226465A50300F91c8A7930f90aEcae3D6Ed4"),
                abi::season(),
            ),
        ],
    )
}

fn rinkeby_table() -> Result<NetworkContractTable> {
    NetworkContractTable::new(
        Network::Rinkeby.chain_id(),
        vec![
            ContractEntry::deployed(
                roles::TOKEN,
                address!("e9E5dDb56c378de1899187aeAcd8c6e23C764F52"),
                abi::mock_ogn(),
            ),
            ContractEntry::deployed(
                roles::VAULT,
                address!("8e7Ba749F14df053Eb579B5142201E98887D27f5"),
                abi::fee_vault(),
            ),
            ContractEntry::deployed(
                roles::SERIES,
                address!("cFE44b7c64a6794B57eeB6b52cd5ae98CDc5B0B5"),
                abi::series(),
            ),
            ContractEntry::deployed(
                roles::SEASON_ONE,
                address!("d34cD8D7C9400286B695C9F846c8c100ae439B34"),
                abi::season(),
            ),
        ],
    )
}

fn goerli_table() -> Result<NetworkContractTable> {
    NetworkContractTable::new(
        Network::Goerli.chain_id(),
        vec![
            ContractEntry::deployed(
                roles::TOKEN,
                address!("de4E13E34D441415ECc7E30E4d39f97d933801f4"),
                abi::mock_ogn(),
            ),
            ContractEntry::deployed(
                roles::VAULT,
                address!("F149A3E8f6556ce67BB256359a655aE765854aA5"),
                abi::fee_vault(),
            ),
            ContractEntry::deployed(
                roles::SERIES,
                address!("D8cf309416C5B039C7804Cad2c3ED0E338451ba5"),
                abi::series(),
            ),
            ContractEntry::deployed(
                roles::SEASON_ONE,
                address!("5f450F4318592c428DfE52e2b0CbCd57591B93dc"),
                abi::season(),
            ),
            ContractEntry::deployed(
                roles::SEASON_TWO,
                address!("fDF5BBd2F07178d23F3217882452f5463F04cecD"),
                abi::season(),
            ),
            ContractEntry::deployed(
                roles::SEASON_THREE,
                address!("0EF91735FF851Ddc6C44801798483B70CC466A15"),
                abi::season(),
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_known_networks() {
        let tables = ContractTables::builtin();
        assert_eq!(tables.chain_ids(), vec![1, 4, 5]);
        assert!(!tables.contains(999));
    }

    #[test]
    fn test_builtin_role_sets() {
        let tables = ContractTables::builtin();

        let goerli: Vec<&str> = tables.get(5).unwrap().roles().collect();
        assert_eq!(
            goerli,
            ["token", "vault", "series", "season_one", "season_two", "season_three"]
        );

        let rinkeby: Vec<&str> = tables.get(4).unwrap().roles().collect();
        assert_eq!(rinkeby, ["token", "vault", "series", "season_one"]);

        let mainnet = tables.get(1).unwrap();
        assert_eq!(mainnet.len(), 6);
        assert!(matches!(
            mainnet.get(roles::TOKEN).unwrap().source(),
            RoleSource::TokenList { symbol, .. } if symbol == OGN_SYMBOL
        ));
    }

    #[test]
    fn test_builtin_tables_do_not_share_addresses() {
        let tables = ContractTables::builtin();
        let ids = tables.chain_ids();
        for a in &ids {
            for b in &ids {
                if a == b {
                    continue;
                }
                let theirs: HashSet<Address> = tables.get(*b).unwrap().addresses().collect();
                assert!(tables.get(*a).unwrap().addresses().all(|addr| !theirs.contains(&addr)));
            }
        }
    }

    #[test]
    fn test_duplicate_role_rejected() {
        let err = NetworkContractTable::new(
            5,
            vec![
                ContractEntry::deployed("vault", Address::ZERO, abi::fee_vault()),
                ContractEntry::deployed("vault", Address::repeat_byte(1), abi::fee_vault()),
            ],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::DuplicateRole { chain_id: 5, ref role } if role == "vault"
        ));
    }

    #[test]
    fn test_duplicate_network_rejected() {
        let table = NetworkContractTable::new(10, Vec::new()).unwrap();
        let err = ContractTables::new()
            .with_table(table.clone())
            .unwrap()
            .with_table(table)
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateNetwork(10)));
    }

    #[test]
    fn test_entry_accessors() {
        let entry = ContractEntry::deployed("series", Address::repeat_byte(7), abi::series());
        assert_eq!(entry.role(), "series");
        assert_eq!(entry.address(), Some(Address::repeat_byte(7)));
        assert_eq!(entry.interface().name(), "series");

        let token = ContractEntry::token_list("token", "OGN", abi::mock_ogn());
        assert_eq!(token.address(), None);
        assert_eq!(token.interface().name(), "mock_ogn");
    }
}
