//! Event page: listing, event creation and the deposit/withdraw stubs

use chrono::Utc;

use crate::bindings::EventContract;
use crate::client::{ChainClient, TransactionReceipt};
use crate::draft::EventDraft;
use crate::mapper::{map_events, EventView};
use crate::session::{AppContext, WalletSession};
use crate::submission::SubmissionController;
use crate::units::parse_units;
use crate::{FriendPayError, Result};

use super::{PageLifetime, PendingRefresh};

pub const DEPOSIT_UNAVAILABLE: &str = "Deposit functionality not available in current contract";
pub const WITHDRAW_UNAVAILABLE: &str = "Withdrawal not available in current contract";

pub struct EventPage<C> {
    ctx: AppContext<C>,
    events: Vec<EventView>,
    selected_event_id: Option<String>,
    /// Form state for the next event
    pub draft: EventDraft,
    controller: SubmissionController<C>,
    error: Option<String>,
    lifetime: PageLifetime,
    pending_refresh: PendingRefresh,
}

impl<C: ChainClient> EventPage<C> {
    pub fn new(ctx: AppContext<C>) -> Self {
        let controller = SubmissionController::new(ctx.client.clone());
        Self {
            ctx,
            events: Vec::new(),
            selected_event_id: None,
            draft: EventDraft::default(),
            controller,
            error: None,
            lifetime: PageLifetime::new(),
            pending_refresh: PendingRefresh::default(),
        }
    }

    pub fn events(&self) -> &[EventView] {
        &self.events
    }

    pub fn controller(&self) -> &SubmissionController<C> {
        &self.controller
    }

    pub fn error_message(&self) -> Option<String> {
        self.error
            .clone()
            .or_else(|| self.controller.error_message())
    }

    pub fn success_message(&self) -> Option<String> {
        self.controller.success_message()
    }

    pub fn set_wallet(&mut self, wallet: WalletSession) {
        self.ctx.wallet = wallet;
    }

    pub fn lifetime(&self) -> PageLifetime {
        self.lifetime.clone()
    }

    pub fn close(&mut self) {
        log::debug!("🚪 Event page closed");
        self.lifetime.close();
        self.controller.abandon();
    }

    /// Select an event for the deposit dialog
    pub fn select_event(&mut self, event_id: &str) -> Option<&EventView> {
        let event = self.events.iter().find(|e| e.id == event_id)?;
        self.selected_event_id = Some(event.id.clone());
        Some(event)
    }

    pub fn selected_event(&self) -> Option<&EventView> {
        let id = self.selected_event_id.as_deref()?;
        self.events.iter().find(|e| e.id == id)
    }

    pub async fn fetch_events(&self) -> Result<Vec<EventView>> {
        let contract = self.ctx.event_contract();
        let data = self
            .ctx
            .client
            .read_contract(&contract.get_all_events())
            .await?;
        let raw = EventContract::decode_all_events(&data)?;
        log::debug!("   Events data: {} events", raw.len());

        Ok(map_events(&raw, Utc::now()))
    }

    /// Re-read the listing; fails soft like the group page
    pub async fn refresh(&mut self) -> bool {
        if !self.lifetime.is_alive() {
            return false;
        }

        match self.fetch_events().await {
            Ok(events) => {
                log::info!("📋 Loaded {} events", events.len());
                self.events = events;
                true
            }
            Err(e) => {
                log::error!("Error fetching events: {}", e);
                false
            }
        }
    }

    pub async fn create_event(&mut self) -> Result<TransactionReceipt> {
        self.error = None;

        let contract = self.ctx.event_contract();
        let receipt = self
            .controller
            .submit_event(contract, &self.ctx.wallet, &mut self.draft)
            .await?;

        self.pending_refresh.schedule(self.ctx.config.refresh_delay);
        Ok(receipt)
    }

    pub fn has_pending_refresh(&self) -> bool {
        self.pending_refresh.is_pending()
    }

    /// Same contract as `GroupPage::run_pending_refresh`
    pub async fn run_pending_refresh(&mut self) -> bool {
        if self.pending_refresh.wait(&self.lifetime).await {
            self.refresh().await
        } else {
            false
        }
    }

    /// Deposit into the selected event
    ///
    /// The event contract exposes no deposit entry point, so any positive
    /// amount is refused with `Unsupported` and the dialog selection is
    /// cleared. Unparseable amounts are `InvalidAmount`, zero is rejected as
    /// a validation error.
    pub fn deposit(&mut self, amount: &str) -> Result<()> {
        let value = parse_units(amount)?;
        if value.is_zero() {
            return Err(FriendPayError::validation("deposit amount must be positive"));
        }

        log::warn!(
            "⚠️  Deposit of {} requested for event {:?}",
            amount,
            self.selected_event_id
        );
        self.selected_event_id = None;
        self.error = Some(DEPOSIT_UNAVAILABLE.to_string());
        Err(FriendPayError::Unsupported(DEPOSIT_UNAVAILABLE.to_string()))
    }

    /// Withdraw from an event; not exposed by the contract either
    pub fn withdraw(&mut self, event_id: &str) -> Result<()> {
        log::info!("Withdrawing from event: {}", event_id);
        self.error = Some(WITHDRAW_UNAVAILABLE.to_string());
        Err(FriendPayError::Unsupported(WITHDRAW_UNAVAILABLE.to_string()))
    }
}
