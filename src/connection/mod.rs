//! Client connections that turn `(address, interface)` pairs into handles.
//!
//! The resolver is generic over [`ClientConnection`], so the handle type is
//! whatever the connection produces. [`JsonRpcConnection`] is the stock
//! implementation used by the console.

pub mod retry;
pub mod rpc;

use alloy_primitives::Address;
use anyhow::Result;
use async_trait::async_trait;

use crate::abi::InterfaceDefinition;

pub use retry::RetryPolicy;
pub use rpc::{BoundContract, JsonRpcConnection};

/// A live client session able to bind deployed contracts.
///
/// Implementations must not touch chain state when constructing a handle.
/// Construction may perform I/O; each call is independent of the others and
/// may run concurrently with them.
#[async_trait]
pub trait ClientConnection: Send + Sync {
    type Handle: Send;

    async fn construct_handle(
        &self,
        address: Address,
        interface: &InterfaceDefinition,
    ) -> Result<Self::Handle>;
}
