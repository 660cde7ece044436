//! JSON-RPC Live Tests
//!
//! Reads the deployed group and event contracts through `JsonRpcClient`.
//! Only read paths are exercised; nothing is signed or sent.
//!
//! Requirements:
//! - Reachable JSON-RPC endpoint
//! - FRIEND_PAY_RPC_URL, FRIEND_PAY_GROUP_CONTRACT and
//!   FRIEND_PAY_EVENT_CONTRACT set (or present in .env)
//!
//! Run with: cargo test --test rpc_live_test -- --ignored --nocapture

mod common;

use std::sync::Arc;

use friend_pay::{AppContext, ChainConfig, EventPage, GroupPage, JsonRpcClient, WalletSession};

async fn live_context() -> anyhow::Result<AppContext<JsonRpcClient>> {
    common::load_env();
    let config = ChainConfig::from_env()?;
    let client = JsonRpcClient::connect(&config).await?;
    let chain_id = client.chain_id().await?;
    assert_eq!(chain_id, config.chain_id);
    log::info!("✅ Connected to chain {}", chain_id);

    Ok(AppContext::new(
        Arc::new(client),
        config,
        WalletSession::disconnected(),
    ))
}

#[tokio::test]
#[ignore = "requires a live JSON-RPC endpoint"]
async fn test_live_group_listing() -> anyhow::Result<()> {
    let ctx = live_context().await?;
    let page = GroupPage::new(ctx);

    let groups = page.fetch_groups().await?;
    log::info!("📋 {} groups on chain", groups.len());

    for (i, group) in groups.iter().enumerate() {
        assert_eq!(group.group_index, i as u64);
        log::info!(
            "   {} | {} | {} | {} recipients",
            group.name,
            group.description,
            group.display_total(4),
            group.recipients.len()
        );
    }
    Ok(())
}

#[tokio::test]
#[ignore = "requires a live JSON-RPC endpoint"]
async fn test_live_event_listing() -> anyhow::Result<()> {
    let ctx = live_context().await?;
    let page = EventPage::new(ctx);

    let events = page.fetch_events().await?;
    log::info!("📋 {} events on chain", events.len());

    for event in &events {
        assert!(event.balance.is_synthesized());
        log::info!("   {} | owner {}", event.name, event.wallet_address);
    }
    Ok(())
}
