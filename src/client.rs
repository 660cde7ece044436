//! Chain client seam
//!
//! The pages and the submission controller only see this trait. The
//! production implementation is [`crate::rpc::JsonRpcClient`]; tests plug in
//! an in-memory client.

use std::future::Future;

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Transaction hash
pub type TxHash = B256;

/// A single contract function invocation
///
/// `calldata` is the ABI-encoded selector and arguments. `function` is kept
/// alongside for logs and error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    /// Target contract
    pub address: Address,
    /// Solidity function name, e.g. `createGroup`
    pub function: &'static str,
    /// Selector followed by ABI-encoded positional arguments
    pub calldata: Bytes,
    /// Sender; required for simulate/write, optional for reads
    pub from: Option<Address>,
}

impl ContractCall {
    pub fn new(address: Address, function: &'static str, calldata: impl Into<Bytes>) -> Self {
        Self {
            address,
            function,
            calldata: calldata.into(),
            from: None,
        }
    }

    /// Set the sending account
    pub fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }
}

/// A write that passed simulation and is ready to be signed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedRequest {
    pub call: ContractCall,
    /// Gas estimate from the dry run, if the client produced one
    pub gas: Option<u64>,
    /// Raw return data of the dry run
    pub result: Bytes,
}

/// Inclusion receipt for a broadcast transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    /// `false` when the transaction was included but reverted
    pub success: bool,
    pub gas_used: Option<U256>,
}

/// Read/write access to a single target network
///
/// Implementations are shared behind `Arc` and must be stateless between
/// calls: reads are idempotent and each write is signed independently.
pub trait ChainClient: Send + Sync {
    /// Execute a read-only call and return the raw ABI-encoded result
    fn read_contract(&self, call: &ContractCall) -> impl Future<Output = Result<Bytes>> + Send;

    /// Dry-run a write as `call.from` and return a signable request
    fn simulate_contract(
        &self,
        call: &ContractCall,
    ) -> impl Future<Output = Result<SimulatedRequest>> + Send;

    /// Sign and broadcast a simulated request
    fn write_contract(
        &self,
        request: &SimulatedRequest,
    ) -> impl Future<Output = Result<TxHash>> + Send;

    /// Wait until `hash` is included and return its receipt
    fn wait_for_transaction_receipt(
        &self,
        hash: TxHash,
    ) -> impl Future<Output = Result<TransactionReceipt>> + Send;
}
