// Ethereum JSON-RPC chain client
//
// Implements `ChainClient` over plain HTTP JSON-RPC 2.0:
// - reads and simulation via eth_call
// - gas estimation via eth_estimateGas
// - writes via eth_sendTransaction (the node or injected wallet signs)
// - confirmation by polling eth_getTransactionReceipt

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy_primitives::{Bytes, B256, U256};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::{ChainClient, ContractCall, SimulatedRequest, TransactionReceipt, TxHash};
use crate::config::ChainConfig;
use crate::{FriendPayError, Result};

/// JSON-RPC error object
#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

/// Receipt as the node returns it (hex quantities)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    transaction_hash: B256,
    #[serde(default)]
    block_number: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    gas_used: Option<String>,
}

impl RpcReceipt {
    fn into_receipt(self) -> Result<TransactionReceipt> {
        let block_number = self.block_number.as_deref().map(parse_quantity).transpose()?;
        // Pre-Byzantium receipts have no status field; inclusion is all we know.
        let success = match self.status.as_deref() {
            Some(status) => parse_quantity(status)? == 1,
            None => true,
        };
        let gas_used = self
            .gas_used
            .as_deref()
            .map(|raw| {
                U256::from_str_radix(strip_hex_prefix(raw), 16).map_err(|e| {
                    FriendPayError::InvalidResponse(format!("Bad gasUsed '{}': {}", raw, e))
                })
            })
            .transpose()?;

        Ok(TransactionReceipt {
            transaction_hash: self.transaction_hash,
            block_number,
            success,
            gas_used,
        })
    }
}

/// HTTP JSON-RPC implementation of [`ChainClient`]
///
/// Holds no per-call state apart from the request id counter, so one
/// instance can be shared by every page behind an `Arc`.
///
/// Writes use `eth_sendTransaction`: this client never holds keys. They go to
/// [`ChainConfig::signer_url`] when set, otherwise to the read endpoint, and
/// fail with `SubmissionFailed` unless that endpoint has the sending account
/// unlocked. The default public BSC testnet node has none.
pub struct JsonRpcClient {
    /// HTTP client (reqwest::Client is internally Arc-based)
    http_client: reqwest::Client,
    url: String,
    signer_url: String,
    chain_id: u64,
    receipt_poll_interval: Duration,
    receipt_max_attempts: u32,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    /// Create a client without touching the network
    pub fn with_config(config: &ChainConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            url: config.rpc_url.clone(),
            signer_url: config.write_url().to_string(),
            chain_id: config.chain_id,
            receipt_poll_interval: config.receipt_poll_interval,
            receipt_max_attempts: config.receipt_max_attempts,
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a client and check that the endpoint serves the configured chain
    pub async fn connect(config: &ChainConfig) -> Result<Self> {
        log::info!("🔌 Connecting to {}", config.rpc_url);
        let client = Self::with_config(config);

        let remote = client.chain_id().await.map_err(|e| {
            log::error!("   ❌ Connection failed: {}", e);
            FriendPayError::connection_failed(format!("{}: {}", config.rpc_url, e))
        })?;

        if remote != config.chain_id {
            log::error!(
                "   ❌ Chain id mismatch: expected {}, node reports {}",
                config.chain_id,
                remote
            );
            return Err(FriendPayError::connection_failed(format!(
                "expected chain id {}, node reports {}",
                config.chain_id, remote
            )));
        }

        log::info!("   ✅ Connected to chain {}", remote);
        Ok(client)
    }

    pub fn configured_chain_id(&self) -> u64 {
        self.chain_id
    }

    /// `eth_chainId`
    pub async fn chain_id(&self) -> Result<u64> {
        let raw: String = self.request("eth_chainId", json!([])).await?;
        parse_quantity(&raw)
    }

    /// Endpoint `write_contract` sends to
    pub fn signer_url(&self) -> &str {
        &self.signer_url
    }

    async fn request<T: serde::de::DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        self.request_at(&self.url, method, params).await
    }

    async fn request_at<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        method: &str,
        params: Value,
    ) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        log::debug!("   📨 {} #{}", method, id);

        let response = self
            .http_client
            .post(url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": method,
                "params": params,
            }))
            .send()
            .await
            .map_err(|e| {
                log::error!("   ❌ HTTP request failed: {}", e);
                FriendPayError::connection_failed(format!("HTTP error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            log::error!("   ❌ HTTP error: {}", status);
            return Err(FriendPayError::InvalidResponse(format!(
                "{} returned HTTP {}",
                method, status
            )));
        }

        let body: RpcResponse = response.json().await.map_err(|e| {
            log::error!("   ❌ JSON parse failed: {}", e);
            FriendPayError::InvalidResponse(format!("Invalid JSON: {}", e))
        })?;

        if let Some(error) = body.error {
            log::debug!("   RPC error data: {:?}", error.data);
            return Err(FriendPayError::QueryFailed(format!(
                "{} failed ({}): {}",
                method, error.code, error.message
            )));
        }

        let result = body.result.unwrap_or(Value::Null);
        serde_json::from_value(result).map_err(|e| {
            FriendPayError::InvalidResponse(format!("Unexpected {} result: {}", method, e))
        })
    }
}

impl ChainClient for JsonRpcClient {
    async fn read_contract(&self, call: &ContractCall) -> Result<Bytes> {
        log::info!("🔍 Reading {} on {}", call.function, call.address);
        let raw: String = self
            .request("eth_call", json!([transaction_object(call, None), "latest"]))
            .await?;
        decode_hex_data(&raw)
    }

    async fn simulate_contract(&self, call: &ContractCall) -> Result<SimulatedRequest> {
        if call.from.is_none() {
            return Err(FriendPayError::WalletNotConnected);
        }
        let tx = transaction_object(call, None);

        let raw: String = self
            .request("eth_call", json!([tx.clone(), "latest"]))
            .await
            .map_err(|e| FriendPayError::SimulationFailed(e.to_string()))?;
        let result = decode_hex_data(&raw)?;

        let raw_gas: String = self
            .request("eth_estimateGas", json!([tx]))
            .await
            .map_err(|e| FriendPayError::SimulationFailed(e.to_string()))?;
        let gas = parse_quantity(&raw_gas)?;

        Ok(SimulatedRequest {
            call: call.clone(),
            gas: Some(gas),
            result,
        })
    }

    async fn write_contract(&self, request: &SimulatedRequest) -> Result<TxHash> {
        log::debug!("   Signer endpoint: {}", self.signer_url);
        let raw: String = self
            .request_at(
                &self.signer_url,
                "eth_sendTransaction",
                json!([transaction_object(&request.call, request.gas)]),
            )
            .await
            .map_err(|e| FriendPayError::SubmissionFailed(e.to_string()))?;

        raw.parse::<B256>().map_err(|e| {
            FriendPayError::SubmissionFailed(format!("Node returned bad tx hash '{}': {}", raw, e))
        })
    }

    async fn wait_for_transaction_receipt(&self, hash: TxHash) -> Result<TransactionReceipt> {
        for attempt in 1..=self.receipt_max_attempts {
            let receipt: Option<RpcReceipt> = self
                .request("eth_getTransactionReceipt", json!([hash]))
                .await
                .map_err(|e| FriendPayError::confirmation_failed(hash.to_string(), e.to_string()))?;

            if let Some(receipt) = receipt {
                log::debug!("   Receipt found on attempt {}", attempt);
                return receipt
                    .into_receipt()
                    .map_err(|e| FriendPayError::confirmation_failed(hash.to_string(), e.to_string()));
            }

            log::debug!(
                "   ⏱️  No receipt yet ({}/{})",
                attempt,
                self.receipt_max_attempts
            );
            tokio::time::sleep(self.receipt_poll_interval).await;
        }

        Err(FriendPayError::confirmation_failed(
            hash.to_string(),
            format!("no receipt after {} attempts", self.receipt_max_attempts),
        ))
    }
}

/// Build the `{from, to, data, gas}` transaction object
fn transaction_object(call: &ContractCall, gas: Option<u64>) -> Value {
    let mut tx = json!({
        "to": call.address.to_string(),
        "data": format!("0x{}", hex::encode(&call.calldata)),
    });
    if let Some(from) = call.from {
        tx["from"] = json!(from.to_string());
    }
    if let Some(gas) = gas {
        tx["gas"] = json!(format!("0x{:x}", gas));
    }
    tx
}

fn strip_hex_prefix(raw: &str) -> &str {
    raw.strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw)
}

/// Parse a hex quantity such as `"0x61"`
fn parse_quantity(raw: &str) -> Result<u64> {
    u64::from_str_radix(strip_hex_prefix(raw), 16)
        .map_err(|e| FriendPayError::InvalidResponse(format!("Bad quantity '{}': {}", raw, e)))
}

fn decode_hex_data(raw: &str) -> Result<Bytes> {
    hex::decode(strip_hex_prefix(raw))
        .map(Bytes::from)
        .map_err(|e| FriendPayError::InvalidResponse(format!("Bad hex data: {}", e)))
}
