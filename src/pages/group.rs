//! Group page: listing, details and group creation

use crate::bindings::GroupContract;
use crate::client::{ChainClient, TransactionReceipt};
use crate::draft::GroupDraft;
use crate::mapper::{map_group_detail, map_groups, validate_group_count, GroupView};
use crate::session::{AppContext, WalletSession};
use crate::submission::SubmissionController;
use crate::{FriendPayError, Result};

use super::{PageLifetime, PendingRefresh};

pub const GROUP_DETAILS_ERROR: &str = "Failed to fetch group details";

pub struct GroupPage<C> {
    ctx: AppContext<C>,
    groups: Vec<GroupView>,
    selected: Option<GroupView>,
    /// Form state for the next group
    pub draft: GroupDraft,
    controller: SubmissionController<C>,
    error: Option<String>,
    lifetime: PageLifetime,
    pending_refresh: PendingRefresh,
}

impl<C: ChainClient> GroupPage<C> {
    pub fn new(ctx: AppContext<C>) -> Self {
        let controller = SubmissionController::new(ctx.client.clone());
        Self {
            ctx,
            groups: Vec::new(),
            selected: None,
            draft: GroupDraft::new(),
            controller,
            error: None,
            lifetime: PageLifetime::new(),
            pending_refresh: PendingRefresh::default(),
        }
    }

    pub fn groups(&self) -> &[GroupView] {
        &self.groups
    }

    /// Group shown in the details view, if any
    pub fn selected_group(&self) -> Option<&GroupView> {
        self.selected.as_ref()
    }

    pub fn close_details(&mut self) {
        self.selected = None;
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

    /// Handle for closing the page from elsewhere
    pub fn lifetime(&self) -> PageLifetime {
        self.lifetime.clone()
    }

    /// Unmount: pending refreshes are dropped and any in-flight submission
    /// state is cleared
    pub fn close(&mut self) {
        log::debug!("🚪 Group page closed");
        self.lifetime.close();
        self.controller.abandon();
    }

    fn contract(&self) -> GroupContract {
        self.ctx.group_contract()
    }

    /// Read and map the full listing without touching page state
    pub async fn fetch_groups(&self) -> Result<Vec<GroupView>> {
        let contract = self.contract();
        let client = &self.ctx.client;

        let data = client.read_contract(&contract.get_all_groups()).await?;
        let raw = GroupContract::decode_all_groups(&data)?;
        log::debug!(
            "   Groups data: {} names, {} descriptions, {} amounts, {} recipient lists",
            raw.names.len(),
            raw.descriptions.len(),
            raw.total_amounts.len(),
            raw.recipients.len()
        );

        let groups = map_groups(&raw, self.ctx.wallet.account())?;

        // Cross-check only: the two reads are not atomic.
        let count = client
            .read_contract(&contract.get_group_count())
            .await
            .and_then(|data| GroupContract::decode_group_count(&data));
        match count {
            Ok(count) => {
                if let Err(e) = validate_group_count(&groups, count) {
                    log::warn!("⚠️  {}", e);
                }
            }
            Err(e) => log::warn!("⚠️  Could not read group count: {}", e),
        }
        Ok(groups)
    }

    /// Re-read the listing
    ///
    /// Fails soft: on any error the previous listing stays and `false` is
    /// returned. Nothing is shown to the user.
    pub async fn refresh(&mut self) -> bool {
        if !self.lifetime.is_alive() {
            return false;
        }

        match self.fetch_groups().await {
            Ok(groups) => {
                log::info!("📋 Loaded {} groups", groups.len());
                self.groups = groups;
                true
            }
            Err(e) => {
                log::error!("Error fetching groups: {}", e);
                false
            }
        }
    }

    /// Fetch fresh details for a listed group and select it
    pub async fn view_group_details(&mut self, group_index: u64) -> Result<&GroupView> {
        let result = self.fetch_group_details(group_index).await;

        match result {
            Ok(group) => Ok(&*self.selected.insert(group)),
            Err(e) => {
                log::error!("Error fetching group details: {}", e);
                self.error = Some(GROUP_DETAILS_ERROR.to_string());
                Err(e)
            }
        }
    }

    async fn fetch_group_details(&self, group_index: u64) -> Result<GroupView> {
        let summary = self
            .groups
            .iter()
            .find(|g| g.group_index == group_index)
            .ok_or_else(|| {
                FriendPayError::validation(format!("group {} is not listed", group_index))
            })?;

        let call = self.contract().get_group_details_by_id(group_index);
        let data = self.ctx.client.read_contract(&call).await?;
        let detail = GroupContract::decode_group_detail(&data)?;

        Ok(map_group_detail(&detail, summary))
    }

    /// Submit the draft and return once the receipt is in
    ///
    /// On success one listing re-fetch is scheduled `refresh_delay` later;
    /// see [`run_pending_refresh`](Self::run_pending_refresh).
    pub async fn create_group(&mut self) -> Result<TransactionReceipt> {
        self.error = None;

        let contract = self.contract();
        let receipt = self
            .controller
            .submit_group(contract, &self.ctx.wallet, &mut self.draft)
            .await?;

        self.pending_refresh.schedule(self.ctx.config.refresh_delay);
        Ok(receipt)
    }

    pub fn has_pending_refresh(&self) -> bool {
        self.pending_refresh.is_pending()
    }

    /// Wait out a scheduled re-fetch and run it
    ///
    /// Returns whether the listing was replaced. Nothing happens when no
    /// refresh is scheduled or the page closes before the deadline.
    pub async fn run_pending_refresh(&mut self) -> bool {
        if self.pending_refresh.wait(&self.lifetime).await {
            self.refresh().await
        } else {
            false
        }
    }
}
