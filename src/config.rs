//! Chain configuration from environment variables
//!
//! Selects the JSON-RPC endpoint, the two contract addresses and the timing
//! knobs used by the submission pipeline. Defaults target BSC testnet.

use std::env;
use std::time::Duration;

use alloy_primitives::Address;

use crate::{FriendPayError, Result};

/// Default JSON-RPC endpoint (BSC testnet public node)
pub const DEFAULT_RPC_URL: &str = "https://data-seed-prebsc-1-s1.binance.org:8545";

/// BSC testnet chain id
pub const DEFAULT_CHAIN_ID: u64 = 97;

/// Delay before the listing is re-fetched after a successful write
pub const DEFAULT_REFRESH_DELAY: Duration = Duration::from_millis(2000);

#[derive(Clone, Debug)]
pub struct ChainConfig {
    /// JSON-RPC HTTP endpoint for reads, simulation and receipts
    pub rpc_url: String,
    /// Endpoint that holds the sending account and signs
    /// `eth_sendTransaction` (a local node or wallet bridge). Falls back to
    /// `rpc_url`, which only works if that node has the account unlocked;
    /// public nodes such as the default do not.
    pub signer_url: Option<String>,
    /// Expected chain id, checked by `JsonRpcClient::connect`
    pub chain_id: u64,
    /// Group payments contract
    pub group_contract: Address,
    /// Event registry contract
    pub event_contract: Address,
    /// Wait before re-reading the listing after a confirmed write
    ///
    /// Gives the node time to index the new state. Not a guarantee: if the
    /// node lags longer, the new record is missing until the next refresh.
    pub refresh_delay: Duration,
    /// Interval between `eth_getTransactionReceipt` polls
    pub receipt_poll_interval: Duration,
    /// Polls before confirmation is reported as failed
    pub receipt_max_attempts: u32,
}

impl ChainConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `FRIEND_PAY_RPC_URL`: JSON-RPC endpoint (default: BSC testnet)
    /// - `FRIEND_PAY_SIGNER_URL`: signing endpoint for writes (default: `rpc_url`)
    /// - `FRIEND_PAY_CHAIN_ID`: expected chain id (default: 97)
    /// - `FRIEND_PAY_GROUP_CONTRACT`: group contract address
    /// - `FRIEND_PAY_EVENT_CONTRACT`: event contract address
    /// - `FRIEND_PAY_REFRESH_DELAY_MS`: post-write refresh delay (default: 2000)
    /// - `FRIEND_PAY_RECEIPT_POLL_MS`: receipt poll interval (default: 1500)
    /// - `FRIEND_PAY_RECEIPT_MAX_ATTEMPTS`: receipt polls (default: 60)
    ///
    /// Unset variables fall back to `Default`. Set but unparseable values are
    /// an error rather than a silent fallback.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let rpc_url = env::var("FRIEND_PAY_RPC_URL").unwrap_or_else(|_| {
            log::info!("📡 RPC URL: {} (default)", DEFAULT_RPC_URL);
            defaults.rpc_url.clone()
        });

        let signer_url = match env::var("FRIEND_PAY_SIGNER_URL") {
            Ok(url) => {
                log::info!("✍️  Signer URL: {}", url);
                Some(url)
            }
            Err(_) => {
                log::warn!("⚠️  FRIEND_PAY_SIGNER_URL not set, writes go to the RPC URL");
                None
            }
        };

        let chain_id = parse_var("FRIEND_PAY_CHAIN_ID", defaults.chain_id)?;
        if chain_id == DEFAULT_CHAIN_ID {
            log::info!("🌐 Using BSC TESTNET (chain id {})", chain_id);
        } else {
            log::info!("🔧 Using chain id {}", chain_id);
        }

        let group_contract = address_var("FRIEND_PAY_GROUP_CONTRACT", defaults.group_contract)?;
        let event_contract = address_var("FRIEND_PAY_EVENT_CONTRACT", defaults.event_contract)?;
        if group_contract.is_zero() || event_contract.is_zero() {
            log::warn!("⚠️  Contract address not configured, calls will target the zero address");
        }

        let refresh_delay = Duration::from_millis(parse_var(
            "FRIEND_PAY_REFRESH_DELAY_MS",
            defaults.refresh_delay.as_millis() as u64,
        )?);
        let receipt_poll_interval = Duration::from_millis(parse_var(
            "FRIEND_PAY_RECEIPT_POLL_MS",
            defaults.receipt_poll_interval.as_millis() as u64,
        )?);
        let receipt_max_attempts =
            parse_var("FRIEND_PAY_RECEIPT_MAX_ATTEMPTS", defaults.receipt_max_attempts)?;

        log::debug!(
            "   Refresh delay: {:?}, receipt polling: {} x {:?}",
            refresh_delay,
            receipt_max_attempts,
            receipt_poll_interval
        );

        Ok(Self {
            rpc_url,
            signer_url,
            chain_id,
            group_contract,
            event_contract,
            refresh_delay,
            receipt_poll_interval,
            receipt_max_attempts,
        })
    }

    /// Where `eth_sendTransaction` is sent
    pub fn write_url(&self) -> &str {
        self.signer_url.as_deref().unwrap_or(&self.rpc_url)
    }

    /// Upper bound on how long confirmation may take
    pub fn confirmation_timeout(&self) -> Duration {
        self.receipt_poll_interval * self.receipt_max_attempts
    }
}

impl Default for ChainConfig {
    /// Default configuration (BSC testnet, contracts unset)
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            signer_url: None,
            chain_id: DEFAULT_CHAIN_ID,
            group_contract: Address::ZERO,
            event_contract: Address::ZERO,
            refresh_delay: DEFAULT_REFRESH_DELAY,
            receipt_poll_interval: Duration::from_millis(1500),
            receipt_max_attempts: 60,
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| FriendPayError::Config(format!("{}='{}': {}", name, raw, e))),
        Err(_) => Ok(default),
    }
}

fn address_var(name: &str, default: Address) -> Result<Address> {
    match env::var(name) {
        Ok(raw) => {
            let address = raw
                .trim()
                .parse::<Address>()
                .map_err(|e| FriendPayError::Config(format!("{}='{}': {}", name, raw, e)))?;
            log::info!("📜 {}: {}", name, address);
            Ok(address)
        }
        Err(_) => Ok(default),
    }
}
