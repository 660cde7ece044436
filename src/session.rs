//! Injected wallet and client context
//!
//! Pages and controllers receive the chain client and the wallet connection
//! state explicitly instead of reaching for process-wide globals.

use std::sync::Arc;

use alloy_primitives::Address;

use crate::bindings::{EventContract, GroupContract};
use crate::client::ChainClient;
use crate::config::ChainConfig;
use crate::{FriendPayError, Result};

/// Connection state of the user's wallet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalletSession {
    account: Option<Address>,
}

impl WalletSession {
    pub fn connected(account: Address) -> Self {
        Self {
            account: Some(account),
        }
    }

    pub fn disconnected() -> Self {
        Self { account: None }
    }

    pub fn account(&self) -> Option<Address> {
        self.account
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    /// Account to sign with, or `WalletNotConnected`
    pub fn require_account(&self) -> Result<Address> {
        self.account.ok_or(FriendPayError::WalletNotConnected)
    }

    pub fn connect(&mut self, account: Address) {
        log::info!("🔗 Wallet connected: {}", account);
        self.account = Some(account);
    }

    pub fn disconnect(&mut self) {
        if let Some(account) = self.account.take() {
            log::info!("🔌 Wallet disconnected: {}", account);
        }
    }
}

/// Everything a page needs from its surroundings
///
/// Cheap to clone: the client is shared behind an `Arc`.
pub struct AppContext<C> {
    pub client: Arc<C>,
    pub config: ChainConfig,
    pub wallet: WalletSession,
}

impl<C> Clone for AppContext<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            config: self.config.clone(),
            wallet: self.wallet,
        }
    }
}

impl<C: ChainClient> AppContext<C> {
    pub fn new(client: Arc<C>, config: ChainConfig, wallet: WalletSession) -> Self {
        Self {
            client,
            config,
            wallet,
        }
    }

    pub fn group_contract(&self) -> GroupContract {
        GroupContract::new(self.config.group_contract)
    }

    pub fn event_contract(&self) -> EventContract {
        EventContract::new(self.config.event_contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_account() {
        let mut wallet = WalletSession::disconnected();
        assert_eq!(
            wallet.require_account(),
            Err(FriendPayError::WalletNotConnected)
        );

        let account = Address::repeat_byte(0x11);
        wallet.connect(account);
        assert_eq!(wallet.require_account(), Ok(account));

        wallet.disconnect();
        assert!(!wallet.is_connected());
    }
}
