use alloy_primitives::Address;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Client connection failed to bind {role} at {address}: {source}")]
    Connection {
        role: String,
        address: Address,
        #[source]
        source: anyhow::Error,
    },
    #[error("Role {role} declared twice in table for chain {chain_id}")]
    DuplicateRole { chain_id: u64, role: String },
    #[error("Table already registered for chain {0}")]
    DuplicateNetwork(u64),
    #[error("Invalid interface definition {name}: {reason}")]
    InvalidInterface { name: String, reason: String },
    #[error("Token list error: {0}")]
    TokenList(String),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
