//! Common test utilities for friend-pay integration tests
//!
//! This module provides shared test infrastructure including:
//! - An in-memory `ChainClient` that records every call
//! - ABI encoders for canned contract responses
//! - Page/context construction with a short refresh delay

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolValue;
use friend_pay::{
    AppContext, ChainClient, ChainConfig, ContractCall, FriendPayError, SimulatedRequest,
    TransactionReceipt, TxHash, WalletSession,
};

pub const GROUP_CONTRACT: Address = Address::repeat_byte(0xc1);
pub const EVENT_CONTRACT: Address = Address::repeat_byte(0xc2);

/// Load environment variables from .env file and set up logging
pub fn load_env() {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push(".env");
    dotenv::from_path(&path).ok();
    init_logging();
}

/// Initialize logging (only once, subsequent calls are no-ops)
pub fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

/// Which adapter entry point a recorded call went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Read,
    Simulate,
    Write,
    Confirm,
}

#[derive(Default)]
struct MockState {
    reads: HashMap<&'static str, Result<Bytes, FriendPayError>>,
    simulate_error: Option<FriendPayError>,
    write_error: Option<FriendPayError>,
    receipt_error: Option<FriendPayError>,
    receipt_success: bool,
    receipt_delay: Option<Duration>,
    calls: Vec<(Phase, ContractCall)>,
}

/// In-memory chain: canned reads, scriptable write outcomes
pub struct MockChainClient {
    state: Mutex<MockState>,
}

impl MockChainClient {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                receipt_success: true,
                ..Default::default()
            }),
        }
    }

    pub fn set_read(&self, function: &'static str, data: Vec<u8>) {
        self.state.lock().unwrap().reads.insert(function, Ok(data.into()));
    }

    pub fn fail_read(&self, function: &'static str, error: FriendPayError) {
        self.state.lock().unwrap().reads.insert(function, Err(error));
    }

    pub fn fail_simulation(&self, error: FriendPayError) {
        self.state.lock().unwrap().simulate_error = Some(error);
    }

    pub fn fail_write(&self, error: FriendPayError) {
        self.state.lock().unwrap().write_error = Some(error);
    }

    pub fn fail_receipt(&self, error: FriendPayError) {
        self.state.lock().unwrap().receipt_error = Some(error);
    }

    pub fn revert_transactions(&self) {
        self.state.lock().unwrap().receipt_success = false;
    }

    pub fn delay_receipts(&self, delay: Duration) {
        self.state.lock().unwrap().receipt_delay = Some(delay);
    }

    pub fn clear_receipt_delay(&self) {
        self.state.lock().unwrap().receipt_delay = None;
    }

    /// Canned `getAllGroups` + `getGroupCount` with the count matching the
    /// names array
    pub fn set_groups(
        &self,
        names: &[&str],
        descriptions: &[&str],
        amounts: &[U256],
        recipients: &[Vec<Address>],
    ) {
        self.set_read(
            "getAllGroups",
            encode_groups(names, descriptions, amounts, recipients),
        );
        self.set_read(
            "getGroupCount",
            (U256::from(names.len()),).abi_encode_params(),
        );
    }

    pub fn set_events(&self, events: &[(&str, &str, Address)]) {
        let events: Vec<(String, String, Address)> = events
            .iter()
            .map(|(name, description, owner)| (name.to_string(), description.to_string(), *owner))
            .collect();
        self.set_read("getAllEvents", (events,).abi_encode_params());
    }

    pub fn calls(&self) -> Vec<(Phase, ContractCall)> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn calls_in(&self, phase: Phase) -> Vec<ContractCall> {
        self.calls()
            .into_iter()
            .filter(|(p, _)| *p == phase)
            .map(|(_, call)| call)
            .collect()
    }

    pub fn reads_of(&self, function: &str) -> usize {
        self.calls_in(Phase::Read)
            .iter()
            .filter(|call| call.function == function)
            .count()
    }

    fn record(&self, phase: Phase, call: &ContractCall) {
        self.state.lock().unwrap().calls.push((phase, call.clone()));
    }
}

fn tx_hash_for(call: &ContractCall) -> TxHash {
    B256::left_padding_from(&call.calldata[..4])
}

impl ChainClient for MockChainClient {
    async fn read_contract(&self, call: &ContractCall) -> friend_pay::Result<Bytes> {
        self.record(Phase::Read, call);
        let state = self.state.lock().unwrap();
        state.reads.get(call.function).cloned().unwrap_or_else(|| {
            Err(FriendPayError::QueryFailed(format!(
                "no canned response for {}",
                call.function
            )))
        })
    }

    async fn simulate_contract(&self, call: &ContractCall) -> friend_pay::Result<SimulatedRequest> {
        self.record(Phase::Simulate, call);
        if let Some(error) = self.state.lock().unwrap().simulate_error.clone() {
            return Err(error);
        }
        Ok(SimulatedRequest {
            call: call.clone(),
            gas: Some(100_000),
            result: Bytes::new(),
        })
    }

    async fn write_contract(&self, request: &SimulatedRequest) -> friend_pay::Result<TxHash> {
        self.record(Phase::Write, &request.call);
        if let Some(error) = self.state.lock().unwrap().write_error.clone() {
            return Err(error);
        }
        Ok(tx_hash_for(&request.call))
    }

    async fn wait_for_transaction_receipt(
        &self,
        hash: TxHash,
    ) -> friend_pay::Result<TransactionReceipt> {
        let (delay, error, success) = {
            let state = self.state.lock().unwrap();
            (
                state.receipt_delay,
                state.receipt_error.clone(),
                state.receipt_success,
            )
        };
        let marker = ContractCall::new(Address::ZERO, "receipt", hash.to_vec());
        self.record(Phase::Confirm, &marker);

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = error {
            return Err(error);
        }

        Ok(TransactionReceipt {
            transaction_hash: hash,
            block_number: Some(1),
            success,
            gas_used: Some(U256::from(21_000u64)),
        })
    }
}

pub fn encode_groups(
    names: &[&str],
    descriptions: &[&str],
    amounts: &[U256],
    recipients: &[Vec<Address>],
) -> Vec<u8> {
    (
        names.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        descriptions.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        amounts.to_vec(),
        recipients.to_vec(),
    )
        .abi_encode_params()
}

pub fn encode_group_detail(
    name: &str,
    description: &str,
    amount: U256,
    recipients: Vec<Address>,
) -> Vec<u8> {
    (name.to_string(), description.to_string(), amount, recipients).abi_encode_params()
}

pub fn test_config() -> ChainConfig {
    ChainConfig {
        group_contract: GROUP_CONTRACT,
        event_contract: EVENT_CONTRACT,
        refresh_delay: Duration::from_millis(10),
        ..Default::default()
    }
}

pub fn context(wallet: WalletSession) -> (Arc<MockChainClient>, AppContext<MockChainClient>) {
    let client = Arc::new(MockChainClient::new());
    let ctx = AppContext::new(Arc::clone(&client), test_config(), wallet);
    (client, ctx)
}

pub fn me() -> Address {
    Address::repeat_byte(0x11)
}
