//! Known Ethereum networks the built-in tables are deployed on.
//!
//! Resolution itself is keyed by the raw chain id, so networks missing from
//! this enum still work with custom tables.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Network {
    Mainnet,
    Rinkeby,
    Goerli,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Mainnet, Network::Rinkeby, Network::Goerli];

    pub fn chain_id(self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Rinkeby => 4,
            Network::Goerli => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Rinkeby => "rinkeby",
            Network::Goerli => "goerli",
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.chain_id() == chain_id)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|n| n.name() == lower)
            .ok_or_else(|| anyhow::anyhow!("Unknown network: {s}"))
    }
}

/// Human-readable label for a chain id, falling back to the number itself.
pub fn describe_chain(chain_id: u64) -> String {
    Network::from_chain_id(chain_id)
        .map_or_else(|| format!("chain {chain_id}"), |n| n.name().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_round_trip() {
        for network in Network::ALL {
            assert_eq!(Network::from_chain_id(network.chain_id()), Some(network));
        }
        assert_eq!(Network::from_chain_id(999), None);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Goerli".parse::<Network>().unwrap(), Network::Goerli);
        assert_eq!(" mainnet ".parse::<Network>().unwrap(), Network::Mainnet);
        assert!("sepolia".parse::<Network>().is_err());
    }

    #[test]
    fn test_describe_chain() {
        assert_eq!(describe_chain(4), "rinkeby");
        assert_eq!(describe_chain(42161), "chain 42161");
    }
}
