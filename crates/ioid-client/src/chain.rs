//! JSON-RPC ledger client and the registration transaction submitter.

use ioid_core::crypto::{abi, LegacyTransaction, Wallet};
use ioid_core::{Address, IoidError, Result, TxReceipt};
use reqwest::Client as HttpClient;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default timeout for a single RPC round trip
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default interval between receipt polls
const DEFAULT_RECEIPT_INTERVAL: Duration = Duration::from_secs(2);

/// Default number of receipt polls before giving up
const DEFAULT_RECEIPT_ATTEMPTS: u32 = 60;

/// Client for an EVM-compatible JSON-RPC endpoint.
///
/// Covers the reads the registration protocol needs (chain id, registry
/// nonce, gas price, account nonce) and the write half of the Registration
/// Submitter: estimate, sign locally, broadcast, await the receipt.
#[derive(Clone)]
pub struct ChainClient {
    http: HttpClient,
    rpc_url: String,
    receipt_interval: Duration,
    receipt_attempts: u32,
}

impl ChainClient {
    /// Create a client for the given RPC endpoint
    #[must_use]
    pub fn new(rpc_url: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");
        Self {
            http,
            rpc_url: rpc_url.into(),
            receipt_interval: DEFAULT_RECEIPT_INTERVAL,
            receipt_attempts: DEFAULT_RECEIPT_ATTEMPTS,
        }
    }

    /// Override the receipt polling schedule
    #[must_use]
    pub const fn with_receipt_polling(mut self, interval: Duration, attempts: u32) -> Self {
        self.receipt_interval = interval;
        self.receipt_attempts = attempts;
        self
    }

    /// Send a JSON-RPC request and return the `result` field
    async fn rpc_call(&self, method: &str, params: Value) -> Result<Value> {
        let body = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });
        debug!(url = %self.rpc_url, method, "RPC request");

        let rpc_err = |message: String| IoidError::Rpc {
            method: method.to_string(),
            message,
        };

        let response = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    rpc_err("request timed out".to_string())
                } else {
                    rpc_err(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(rpc_err(format!("HTTP {status}")));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| rpc_err(format!("invalid JSON response: {e}")))?;

        if let Some(error) = json.get("error") {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown RPC error");
            return Err(rpc_err(message.to_string()));
        }

        json.get("result")
            .cloned()
            .ok_or_else(|| rpc_err("response missing 'result' field".to_string()))
    }

    /// The ledger's chain identifier, from `eth_chainId`
    pub async fn chain_id(&self) -> Result<u64> {
        let result = self.rpc_call("eth_chainId", json!([])).await?;
        quantity_u64("eth_chainId", &result)
    }

    /// Read the registry's current permit nonce for `device`.
    ///
    /// Must be called immediately before digest construction and never
    /// cached; a failed read means no digest can be built.
    pub async fn registry_nonce(&self, registry: Address, device: Address) -> Result<u64> {
        let data = abi::nonces_call(device);
        let word = self
            .call(registry, &data)
            .await
            .map_err(|e| IoidError::DigestUnavailable(e.to_string()))?;
        abi::decode_u64(&word).map_err(|e| IoidError::DigestUnavailable(e.to_string()))
    }

    /// Perform a read-only `eth_call` against `to` and return the raw
    /// return data
    pub async fn call(&self, to: Address, data: &[u8]) -> Result<Vec<u8>> {
        let result = self
            .rpc_call(
                "eth_call",
                json!([{ "to": to.to_hex(), "data": hex_prefixed(data) }, "latest"]),
            )
            .await?;
        decode_hex("eth_call", &result)
    }

    /// The sender's next account nonce, from `eth_getTransactionCount`
    pub async fn transaction_count(&self, account: Address) -> Result<u64> {
        let result = self
            .rpc_call("eth_getTransactionCount", json!([account.to_hex(), "pending"]))
            .await?;
        quantity_u64("eth_getTransactionCount", &result)
    }

    /// Current network gas price, from `eth_gasPrice`
    pub async fn gas_price(&self) -> Result<u128> {
        let result = self.rpc_call("eth_gasPrice", json!([])).await?;
        quantity_u128("eth_gasPrice", &result)
    }

    /// Estimate gas for a call. A failure here means the call would revert
    /// (stale nonce, wrong signer, token not owned by the caller, ...) and is
    /// surfaced before anything irreversible happens.
    pub async fn estimate_gas(&self, from: Address, to: Address, data: &[u8]) -> Result<u64> {
        let result = self
            .rpc_call(
                "eth_estimateGas",
                json!([{ "from": from.to_hex(), "to": to.to_hex(), "data": hex_prefixed(data) }]),
            )
            .await
            .map_err(|e| IoidError::EstimationFailed(e.to_string()))?;
        quantity_u64("eth_estimateGas", &result)
            .map_err(|e| IoidError::EstimationFailed(e.to_string()))
    }

    /// Broadcast a signed raw transaction and return its hash
    pub async fn send_raw_transaction(&self, raw: &[u8]) -> Result<String> {
        let result = self
            .rpc_call("eth_sendRawTransaction", json!([hex_prefixed(raw)]))
            .await
            .map_err(|e| IoidError::SubmissionFailed(e.to_string()))?;
        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| IoidError::SubmissionFailed("non-string transaction hash".into()))
    }

    /// Poll for the receipt of `tx_hash` until it is mined.
    ///
    /// A receipt with failure status is a [`IoidError::Reverted`]: the ledger
    /// has consumed the permit nonce regardless, so any retry must rebuild a
    /// fresh digest.
    pub async fn wait_for_receipt(&self, tx_hash: &str) -> Result<TxReceipt> {
        for _ in 0..self.receipt_attempts {
            let receipt = self
                .rpc_call("eth_getTransactionReceipt", json!([tx_hash]))
                .await?;
            if receipt.is_null() {
                tokio::time::sleep(self.receipt_interval).await;
                continue;
            }

            let status = receipt.get("status").and_then(Value::as_str).unwrap_or("0x0");
            if status == "0x0" {
                warn!(tx_hash, "transaction reverted on-chain");
                return Err(IoidError::Reverted {
                    tx_hash: tx_hash.to_string(),
                });
            }

            let block_number = receipt
                .get("blockNumber")
                .and_then(Value::as_str)
                .map_or(Ok(0), |s| quantity_u64("eth_getTransactionReceipt", &json!(s)))?;
            return Ok(TxReceipt {
                transaction_hash: tx_hash.to_string(),
                block_number,
            });
        }

        Err(IoidError::SubmissionFailed(format!(
            "timed out waiting for receipt of {tx_hash}; the transaction may still be mined"
        )))
    }

    /// Estimate, price, sign, broadcast, and confirm a contract call from
    /// `wallet`. No automatic retry: any failure is reported to the caller.
    pub async fn submit_call(&self, wallet: &Wallet, to: Address, data: Vec<u8>) -> Result<TxReceipt> {
        let from = wallet.address();
        let chain_id = self.chain_id().await?;
        let gas_limit = self.estimate_gas(from, to, &data).await?;
        let gas_price = self.gas_price().await?;
        let nonce = self.transaction_count(from).await?;

        let tx = LegacyTransaction {
            nonce,
            gas_price,
            gas_limit,
            to,
            value: 0,
            data,
        };
        let raw = tx.sign(wallet, chain_id)?;

        let tx_hash = self.send_raw_transaction(&raw).await?;
        info!(tx_hash, gas_limit, "transaction broadcast, awaiting confirmation");
        self.wait_for_receipt(&tx_hash).await
    }
}

fn hex_prefixed(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

fn decode_hex(method: &str, value: &Value) -> Result<Vec<u8>> {
    let s = value.as_str().ok_or_else(|| IoidError::Rpc {
        method: method.to_string(),
        message: format!("expected hex string result, got {value}"),
    })?;
    hex::decode(s.strip_prefix("0x").unwrap_or(s)).map_err(|e| IoidError::Rpc {
        method: method.to_string(),
        message: format!("invalid hex result {s}: {e}"),
    })
}

fn quantity_u128(method: &str, value: &Value) -> Result<u128> {
    let s = value.as_str().ok_or_else(|| IoidError::Rpc {
        method: method.to_string(),
        message: format!("expected quantity result, got {value}"),
    })?;
    let digits = s.strip_prefix("0x").unwrap_or(s);
    u128::from_str_radix(digits, 16).map_err(|e| IoidError::Rpc {
        method: method.to_string(),
        message: format!("invalid quantity {s}: {e}"),
    })
}

fn quantity_u64(method: &str, value: &Value) -> Result<u64> {
    let q = quantity_u128(method, value)?;
    u64::try_from(q).map_err(|_| IoidError::Rpc {
        method: method.to_string(),
        message: format!("quantity {q} out of range"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_parsing() {
        assert_eq!(quantity_u64("t", &json!("0x0")).unwrap(), 0);
        assert_eq!(quantity_u64("t", &json!("0x1252")).unwrap(), 0x1252);
        assert_eq!(quantity_u128("t", &json!("0x3b9aca00")).unwrap(), 1_000_000_000);
        assert!(quantity_u64("t", &json!("0xzz")).is_err());
        assert!(quantity_u64("t", &json!(12)).is_err());
    }

    #[test]
    fn hex_decoding() {
        assert_eq!(decode_hex("t", &json!("0xdeadbeef")).unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert!(decode_hex("t", &json!(null)).is_err());
    }
}
