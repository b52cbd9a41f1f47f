//! Ethereum JSON-RPC connection over HTTP.
//!
//! Connecting performs a single `eth_chainId` round-trip so the session knows
//! which network it is on. Binding a contract afterwards is purely local.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy_primitives::{Address, Selector};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use super::{ClientConnection, RetryPolicy};
use crate::abi::InterfaceDefinition;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// A contract bound to an address on the connection's chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundContract {
    address: Address,
    interface: InterfaceDefinition,
    chain_id: u64,
}

impl BoundContract {
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn interface(&self) -> &InterfaceDefinition {
        &self.interface
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// 4-byte selector of `function` (first overload if several exist).
    pub fn selector(&self, function: &str) -> Option<Selector> {
        self.interface
            .abi()
            .function(function)
            .and_then(|overloads| overloads.first())
            .map(alloy_json_abi::Function::selector)
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

pub struct JsonRpcConnection {
    client: reqwest::Client,
    url: Url,
    chain_id: u64,
    next_id: AtomicU64,
}

impl JsonRpcConnection {
    /// Connect to `url` and learn the chain id, retrying per `retry`.
    pub async fn connect(url: &str, retry: &RetryPolicy) -> Result<Self> {
        let mut connection = Self::with_chain_id(url, 0)?;

        let chain_id = retry
            .execute("eth_chainId", || connection.fetch_chain_id())
            .await
            .with_context(|| format!("Failed to reach RPC endpoint {}", connection.url))?;
        connection.chain_id = chain_id;

        tracing::info!(
            target: "ogn_registry::connection::rpc",
            url = %connection.url,
            chain_id,
            "Connected"
        );
        Ok(connection)
    }

    /// Build a session for a known chain id without contacting the endpoint.
    pub fn with_chain_id(url: &str, chain_id: u64) -> Result<Self> {
        let url = Url::parse(url).with_context(|| format!("Invalid RPC URL {url}"))?;
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            url,
            chain_id,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Issue a raw JSON-RPC request.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let resp = self
            .client
            .post(self.url.clone())
            .json(&body)
            .send()
            .await
            .with_context(|| format!("{method} request failed"))?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("{method} returned HTTP {status}");
        }

        let text = resp
            .text()
            .await
            .with_context(|| format!("Failed to read {method} response"))?;
        decode_response(method, &text)
    }

    async fn fetch_chain_id(&self) -> Result<u64> {
        let raw: String = self.request("eth_chainId", serde_json::json!([])).await?;
        parse_quantity(&raw)
    }
}

#[async_trait]
impl ClientConnection for JsonRpcConnection {
    type Handle = BoundContract;

    async fn construct_handle(
        &self,
        address: Address,
        interface: &InterfaceDefinition,
    ) -> Result<BoundContract> {
        if interface.is_empty() {
            anyhow::bail!(
                "Interface {} declares no functions or events",
                interface.name()
            );
        }

        tracing::trace!(
            target: "ogn_registry::connection::rpc",
            address = %address,
            interface = interface.name(),
            "Bound contract"
        );

        Ok(BoundContract {
            address,
            interface: interface.clone(),
            chain_id: self.chain_id,
        })
    }
}

fn decode_response<T: DeserializeOwned>(method: &str, text: &str) -> Result<T> {
    let resp: RpcResponse<T> = serde_json::from_str(text)
        .with_context(|| format!("Malformed {method} response"))?;

    if let Some(err) = resp.error {
        anyhow::bail!("{method} failed ({}): {}", err.code, err.message);
    }
    resp.result
        .with_context(|| format!("{method} response has no result"))
}

/// Parse an Ethereum hex quantity such as `"0x5"`.
fn parse_quantity(raw: &str) -> Result<u64> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .with_context(|| format!("Quantity {raw} is missing 0x prefix"))?;
    u64::from_str_radix(digits, 16).with_context(|| format!("Invalid quantity {raw}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi;
    use alloy_primitives::address;

    fn offline(chain_id: u64) -> JsonRpcConnection {
        JsonRpcConnection::with_chain_id("http://127.0.0.1:8545", chain_id).unwrap()
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0x1").unwrap(), 1);
        assert_eq!(parse_quantity("0x5").unwrap(), 5);
        assert_eq!(parse_quantity("0xa4b1").unwrap(), 42161);
        assert!(parse_quantity("5").is_err());
        assert!(parse_quantity("0xzz").is_err());
    }

    #[test]
    fn test_decode_response() {
        let ok: String =
            decode_response("eth_chainId", r#"{"jsonrpc":"2.0","id":1,"result":"0x5"}"#).unwrap();
        assert_eq!(ok, "0x5");

        let err = decode_response::<String>(
            "eth_chainId",
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"method not found"}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("method not found"));

        assert!(decode_response::<String>("eth_chainId", "<html>").is_err());
        assert!(decode_response::<String>("eth_chainId", r#"{"jsonrpc":"2.0","id":1}"#).is_err());
    }

    #[tokio::test]
    async fn test_construct_handle_binds_locally() {
        let conn = offline(5);
        let vault = address!("F149A3E8f6556ce67BB256359a655aE765854aA5");

        let handle = conn.construct_handle(vault, &abi::fee_vault()).await.unwrap();
        assert_eq!(handle.address(), vault);
        assert_eq!(handle.chain_id(), 5);
        assert_eq!(handle.interface().name(), "fee_vault");
    }

    #[tokio::test]
    async fn test_construct_handle_rejects_empty_interface() {
        let conn = offline(1);
        let empty = InterfaceDefinition::from_json("empty", "[]").unwrap();
        assert!(conn.construct_handle(Address::ZERO, &empty).await.is_err());
    }

    #[tokio::test]
    async fn test_selector_lookup() {
        let conn = offline(1);
        let token = conn
            .construct_handle(Address::ZERO, &abi::mock_ogn())
            .await
            .unwrap();

        // transfer(address,uint256)
        assert_eq!(
            token.selector("transfer").unwrap(),
            Selector::from([0xa9, 0x05, 0x9c, 0xbb])
        );
        assert!(token.selector("notAFunction").is_none());
    }

    #[tokio::test]
    async fn test_connect_rejects_bad_url() {
        assert!(JsonRpcConnection::connect("not a url", &RetryPolicy::no_retry())
            .await
            .is_err());
    }
}
