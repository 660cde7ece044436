//! friend-pay: group payments and events over an EVM contract
//!
//! This crate holds the client-side logic of the Friend dApp. Users create
//! **groups** (shared-payment pools with several recipients) and **events**
//! (single-owner collections that accept deposits). Custody, withdrawal rules
//! and accounting live in the contract; this crate reads its state, shapes it
//! for display and drives the writes.
//!
//! # Architecture
//!
//! - **Chain client** ([`ChainClient`], [`JsonRpcClient`]): read, simulate,
//!   write and await receipts against one network
//! - **Mapper** ([`mapper`]): raw contract results to view records
//! - **Drafts** ([`GroupDraft`], [`EventDraft`]): form state before submission
//! - **Submission** ([`SubmissionController`]): simulate, sign and send,
//!   confirm, with a single-flight guard
//! - **Pages** ([`GroupPage`], [`EventPage`]): own the above and schedule a
//!   listing refresh after a successful write
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use friend_pay::{AppContext, ChainConfig, GroupPage, JsonRpcClient, WalletSession};
//!
//! let config = ChainConfig::from_env()?;
//! let client = Arc::new(JsonRpcClient::connect(&config).await?);
//! let ctx = AppContext::new(client, config, WalletSession::connected(my_address));
//!
//! let mut page = GroupPage::new(ctx);
//! page.refresh().await;
//!
//! page.draft.name = "Trip".into();
//! page.draft.description = "Iceland".into();
//! page.draft.shared_amount = "0.5".into();
//! page.draft.update_input_row(1, "0xAAA...1");
//! page.draft.commit_row(1)?;
//!
//! page.create_group().await?;
//! println!("{}", page.success_message().unwrap_or_default());
//! page.run_pending_refresh().await;
//! ```

// Public modules
pub mod bindings;
pub mod client;
pub mod config;
pub mod draft;
pub mod error;
pub mod mapper;
pub mod pages;
pub mod reminders;
pub mod rpc;
pub mod session;
pub mod submission;
pub mod units;

// Re-exports for convenience
pub use bindings::{EventContract, GroupContract, RawEvent, RawGroupDetail, RawGroups};
pub use client::{ChainClient, ContractCall, SimulatedRequest, TransactionReceipt, TxHash};
pub use config::ChainConfig;
pub use draft::{CommitRejection, EventDraft, GroupDraft, Recipient, RecipientInput};
pub use error::FriendPayError;
pub use mapper::{
    map_events, map_group_detail, map_groups, Creator, EventView, GroupView, Sourced,
};
pub use pages::{EventPage, GroupPage, PageLifetime};
pub use reminders::{Priority, Reminder, ReminderFeed, ReminderTab};
pub use rpc::JsonRpcClient;
pub use session::{AppContext, WalletSession};
pub use submission::{execute_write, SubmissionController, SubmissionState};
pub use units::{format_display, format_units, parse_units};

// Re-export commonly used EVM types
pub use alloy_primitives::{Address, Bytes, U256};

// Common result type
pub type Result<T> = std::result::Result<T, FriendPayError>;
