//! Submission controller: simulate, sign and send, await receipt
//!
//! Drives one on-chain write at a time. Local preconditions are checked before
//! any chain call. The three chain phases run strictly in order and none is
//! retried. Every failure ends in [`SubmissionState::Failed`] with a message
//! fit for the user.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::bindings::{EventContract, GroupContract};
use crate::client::{ChainClient, ContractCall, TransactionReceipt, TxHash};
use crate::draft::{EventDraft, GroupDraft};
use crate::session::WalletSession;
use crate::{FriendPayError, Result};

pub const GROUP_CREATED_MESSAGE: &str = "Group created successfully!";
pub const EVENT_CREATED_MESSAGE: &str = "Event created successfully!";

/// Where the controller is in the submit lifecycle
///
/// `Succeeded` and `Failed` persist until the next submission attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded {
        message: String,
        tx_hash: TxHash,
    },
    Failed {
        message: String,
        error: FriendPayError,
    },
}

/// Single-flight write driver
///
/// Clones share one state, so a handle kept by the UI sees (and is refused
/// by) a submission started through the page.
pub struct SubmissionController<C> {
    client: Arc<C>,
    state: Arc<Mutex<SubmissionState>>,
}

impl<C> Clone for SubmissionController<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            state: Arc::clone(&self.state),
        }
    }
}

/// Releases `Submitting` when an attempt ends without settling, e.g. when
/// its future is dropped before the receipt arrives
struct AttemptGuard<'a> {
    state: &'a Mutex<SubmissionState>,
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        let mut state = lock(self.state);
        if matches!(*state, SubmissionState::Submitting) {
            log::warn!("⚠️  Submission dropped before completion, releasing guard");
            *state = SubmissionState::Idle;
        }
    }
}

// A panic while holding the lock leaves a plain enum behind; keep using it.
fn lock(state: &Mutex<SubmissionState>) -> MutexGuard<'_, SubmissionState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<C: ChainClient> SubmissionController<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(SubmissionState::Idle)),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SubmissionState {
        lock(&self.state).clone()
    }

    /// The submit action must be disabled while this is true
    pub fn is_submitting(&self) -> bool {
        matches!(*lock(&self.state), SubmissionState::Submitting)
    }

    pub fn success_message(&self) -> Option<String> {
        match &*lock(&self.state) {
            SubmissionState::Succeeded { message, .. } => Some(message.clone()),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        match &*lock(&self.state) {
            SubmissionState::Failed { message, .. } => Some(message.clone()),
            _ => None,
        }
    }

    /// Forget an in-flight submission (page teardown)
    ///
    /// The transaction, if already broadcast, is not affected.
    pub fn abandon(&self) {
        let mut state = lock(&self.state);
        if matches!(*state, SubmissionState::Submitting) {
            log::warn!("⚠️  Abandoning in-flight submission");
            *state = SubmissionState::Idle;
        }
    }

    /// Create a group from `draft`
    ///
    /// `totalAmount` is the draft's shared amount in base units and the
    /// recipients are the committed ones in commit order. The draft is reset
    /// only on success.
    pub async fn submit_group(
        &self,
        contract: GroupContract,
        wallet: &WalletSession,
        draft: &mut GroupDraft,
    ) -> Result<TransactionReceipt> {
        let _attempt = self.begin_attempt()?;

        let call = match build_group_call(contract, wallet, draft) {
            Ok(call) => call,
            Err(e) => return Err(self.fail("group", e)),
        };

        log::info!(
            "👥 Creating group '{}' with {} recipients",
            draft.name,
            draft.recipients().len()
        );

        let receipt = self.run(call, "group").await?;
        draft.reset();
        self.succeed(GROUP_CREATED_MESSAGE, receipt.transaction_hash);
        Ok(receipt)
    }

    /// Create an event from `draft`
    pub async fn submit_event(
        &self,
        contract: EventContract,
        wallet: &WalletSession,
        draft: &mut EventDraft,
    ) -> Result<TransactionReceipt> {
        let _attempt = self.begin_attempt()?;

        let call = match build_event_call(contract, wallet, draft) {
            Ok(call) => call,
            Err(e) => return Err(self.fail("event", e)),
        };

        log::info!("🎉 Creating event '{}'", draft.name);

        let receipt = self.run(call, "event").await?;
        draft.reset();
        self.succeed(EVENT_CREATED_MESSAGE, receipt.transaction_hash);
        Ok(receipt)
    }

    /// Claim the single-flight slot; messages from the previous attempt are
    /// cleared here, not earlier
    fn begin_attempt(&self) -> Result<AttemptGuard<'_>> {
        let mut state = lock(&self.state);
        if matches!(*state, SubmissionState::Submitting) {
            log::warn!("⚠️  Submit ignored: another submission is in flight");
            return Err(FriendPayError::SubmissionInFlight);
        }
        *state = SubmissionState::Submitting;
        Ok(AttemptGuard { state: &self.state })
    }

    async fn run(&self, call: ContractCall, subject: &str) -> Result<TransactionReceipt> {
        match execute_write(self.client.as_ref(), &call).await {
            Ok(receipt) => Ok(receipt),
            Err(e) => Err(self.fail(subject, e)),
        }
    }

    fn succeed(&self, message: &str, tx_hash: TxHash) {
        log::info!("   ✅ {} (tx {})", message, tx_hash);
        *lock(&self.state) = SubmissionState::Succeeded {
            message: message.to_string(),
            tx_hash,
        };
    }

    fn fail(&self, subject: &str, error: FriendPayError) -> FriendPayError {
        log::error!("   ❌ Error creating {}: {}", subject, error);
        *lock(&self.state) = SubmissionState::Failed {
            message: error.user_message(subject),
            error: error.clone(),
        };
        error
    }
}

fn build_group_call(
    contract: GroupContract,
    wallet: &WalletSession,
    draft: &GroupDraft,
) -> Result<ContractCall> {
    let account = wallet.require_account()?;
    draft.validate()?;

    let total_amount = draft.shared_amount_base_units()?;
    let recipients = draft.recipient_addresses()?;

    log::debug!(
        "   totalAmount={} base units, recipients={:?}",
        total_amount,
        recipients
    );

    Ok(contract
        .create_group(&draft.name, &draft.description, total_amount, recipients)
        .with_from(account))
}

fn build_event_call(
    contract: EventContract,
    wallet: &WalletSession,
    draft: &EventDraft,
) -> Result<ContractCall> {
    let account = wallet.require_account()?;
    draft.validate()?;
    let owner = draft.owner()?;

    Ok(contract
        .create_event(&draft.name, &draft.description, owner)
        .with_from(account))
}

/// Simulate, write, then wait for the receipt
///
/// Each phase's failure is reported as its own error kind. A reverted
/// receipt counts as a confirmation failure.
pub async fn execute_write<C: ChainClient>(
    client: &C,
    call: &ContractCall,
) -> Result<TransactionReceipt> {
    log::info!("🧪 Simulating {} on {}", call.function, call.address);
    let request = client.simulate_contract(call).await.map_err(|e| match e {
        e @ FriendPayError::SimulationFailed(_) => e,
        other => FriendPayError::SimulationFailed(other.to_string()),
    })?;
    log::debug!("   Simulation ok, gas estimate: {:?}", request.gas);

    log::info!("✍️  Sending {} for signature", call.function);
    let tx_hash = client.write_contract(&request).await.map_err(|e| match e {
        e @ FriendPayError::SubmissionFailed(_) => e,
        other => FriendPayError::SubmissionFailed(other.to_string()),
    })?;
    log::info!("   📤 Broadcast: {}", tx_hash);

    log::info!("⏳ Waiting for receipt of {}", tx_hash);
    let receipt = client
        .wait_for_transaction_receipt(tx_hash)
        .await
        .map_err(|e| match e {
            e @ FriendPayError::ConfirmationFailed { .. } => e,
            other => FriendPayError::confirmation_failed(tx_hash.to_string(), other.to_string()),
        })?;

    if !receipt.success {
        return Err(FriendPayError::confirmation_failed(
            tx_hash.to_string(),
            "transaction reverted",
        ));
    }

    log::info!(
        "   ✅ Included in block {}",
        receipt
            .block_number
            .map_or_else(|| "unknown".to_string(), |n| n.to_string())
    );
    Ok(receipt)
}
