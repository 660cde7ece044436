//! Draft state for group and event creation forms
//!
//! A group draft keeps two independent lists: editable input rows, where the
//! user types addresses, and committed recipients, which are what gets
//! submitted. Committing a row copies it into the recipient list and blanks
//! the row so it can be reused.

use std::fmt;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::units::parse_units;
use crate::{FriendPayError, Result};

/// Description given to recipients when the shared description is empty
pub const DEFAULT_RECIPIENT_DESCRIPTION: &str = "Payment";

/// One editable address row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientInput {
    pub input_id: u32,
    pub address: String,
}

impl RecipientInput {
    fn blank(input_id: u32) -> Self {
        Self {
            input_id,
            address: String::new(),
        }
    }
}

/// A recipient committed to the draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: Uuid,
    pub address: String,
    /// Base units
    pub amount: U256,
    pub description: String,
}

/// Why `commit_row` left the draft unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitRejection {
    UnknownRow(u32),
    EmptyAddress,
    MissingSharedAmount,
    InvalidAmount(String),
}

impl fmt::Display for CommitRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRow(id) => write!(f, "No input row with id {}", id),
            Self::EmptyAddress => write!(f, "Enter a recipient address first"),
            Self::MissingSharedAmount => write!(f, "Set the shared amount first"),
            Self::InvalidAmount(msg) => write!(f, "Shared amount is invalid: {}", msg),
        }
    }
}

impl std::error::Error for CommitRejection {}

/// Group creation form state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDraft {
    pub name: String,
    pub description: String,
    /// Decimal string in display units
    pub shared_amount: String,
    inputs: Vec<RecipientInput>,
    recipients: Vec<Recipient>,
    /// Highest input id ever handed out; ids are never reused
    last_input_id: u32,
}

impl Default for GroupDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupDraft {
    /// Empty draft with one blank input row
    pub fn new() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            shared_amount: String::new(),
            inputs: vec![RecipientInput::blank(1)],
            recipients: Vec::new(),
            last_input_id: 1,
        }
    }

    pub fn inputs(&self) -> &[RecipientInput] {
        &self.inputs
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    /// Append a blank row and return its id
    pub fn add_input_row(&mut self) -> u32 {
        self.last_input_id += 1;
        self.inputs.push(RecipientInput::blank(self.last_input_id));
        self.last_input_id
    }

    /// Remove a row; refused for the last remaining row
    pub fn remove_input_row(&mut self, input_id: u32) -> bool {
        if self.inputs.len() <= 1 {
            return false;
        }
        let before = self.inputs.len();
        self.inputs.retain(|input| input.input_id != input_id);
        self.inputs.len() != before
    }

    pub fn update_input_row(&mut self, input_id: u32, address: impl Into<String>) -> bool {
        match self.inputs.iter_mut().find(|i| i.input_id == input_id) {
            Some(input) => {
                input.address = address.into();
                true
            }
            None => false,
        }
    }

    /// Move a row's address into the committed recipients
    ///
    /// Needs a non-empty address on the row and a parseable shared amount.
    /// On success the row stays but its address is cleared.
    pub fn commit_row(&mut self, input_id: u32) -> std::result::Result<&Recipient, CommitRejection> {
        let input = self
            .inputs
            .iter_mut()
            .find(|i| i.input_id == input_id)
            .ok_or(CommitRejection::UnknownRow(input_id))?;

        if input.address.trim().is_empty() {
            return Err(CommitRejection::EmptyAddress);
        }
        if self.shared_amount.trim().is_empty() {
            return Err(CommitRejection::MissingSharedAmount);
        }
        let amount = parse_units(&self.shared_amount)
            .map_err(|e| CommitRejection::InvalidAmount(e.to_string()))?;

        let description = if self.description.is_empty() {
            DEFAULT_RECIPIENT_DESCRIPTION.to_string()
        } else {
            self.description.clone()
        };

        let recipient = Recipient {
            id: Uuid::new_v4(),
            address: std::mem::take(&mut input.address),
            amount,
            description,
        };
        log::debug!("➕ Recipient {} added ({})", recipient.address, recipient.id);

        self.recipients.push(recipient);
        Ok(&self.recipients[self.recipients.len() - 1])
    }

    /// Remove a committed recipient; input rows are untouched
    pub fn remove_recipient(&mut self, recipient_id: Uuid) -> bool {
        let before = self.recipients.len();
        self.recipients.retain(|r| r.id != recipient_id);
        self.recipients.len() != before
    }

    /// Sum of committed amounts, for display only
    pub fn total_committed_amount(&self) -> U256 {
        self.recipients
            .iter()
            .fold(U256::ZERO, |sum, r| sum.saturating_add(r.amount))
    }

    /// Back to one blank row, no recipients, empty fields
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Whether the submit action should be enabled
    pub fn is_submittable(&self) -> bool {
        self.validate().is_ok()
    }

    /// Check every field `createGroup` needs
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FriendPayError::validation("group name is required"));
        }
        if self.description.trim().is_empty() {
            return Err(FriendPayError::validation("description is required"));
        }
        if self.shared_amount.trim().is_empty() {
            return Err(FriendPayError::validation("shared amount is required"));
        }
        if self.recipients.is_empty() {
            return Err(FriendPayError::validation(
                "at least one recipient is required",
            ));
        }
        Ok(())
    }

    /// Parsed shared amount in base units
    pub fn shared_amount_base_units(&self) -> Result<U256> {
        parse_units(&self.shared_amount)
    }

    /// Committed addresses in commit order
    pub fn recipient_addresses(&self) -> Result<Vec<Address>> {
        self.recipients
            .iter()
            .map(|r| parse_address(&r.address))
            .collect()
    }
}

/// Event creation form state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub name: String,
    pub description: String,
    /// Address that will own the event's funds
    pub owner_address: String,
    /// Kept for the form only; `createEvent` has no end date parameter
    pub active_until: String,
}

impl EventDraft {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FriendPayError::validation("event name is required"));
        }
        if self.description.trim().is_empty() {
            return Err(FriendPayError::validation("description is required"));
        }
        if self.owner_address.trim().is_empty() {
            return Err(FriendPayError::validation("wallet address is required"));
        }
        Ok(())
    }

    pub fn is_submittable(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn owner(&self) -> Result<Address> {
        parse_address(&self.owner_address)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Parse a hex address typed by the user
///
/// ENS-style names are not resolved here and are rejected.
pub fn parse_address(raw: &str) -> Result<Address> {
    raw.trim()
        .parse::<Address>()
        .map_err(|e| FriendPayError::InvalidAddress(format!("'{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR_A: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1";
    const ADDR_B: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb2";

    fn draft_with_amount(amount: &str) -> GroupDraft {
        let mut draft = GroupDraft::new();
        draft.shared_amount = amount.to_string();
        draft
    }

    #[test]
    fn test_new_draft_has_one_blank_row() {
        let draft = GroupDraft::new();
        assert_eq!(draft.inputs(), &[RecipientInput::blank(1)]);
        assert!(draft.recipients().is_empty());
    }

    #[test]
    fn test_remove_last_row_is_noop() {
        let mut draft = GroupDraft::new();
        let before = draft.clone();
        assert!(!draft.remove_input_row(1));
        assert_eq!(draft, before);
    }

    #[test]
    fn test_input_ids_never_reused() {
        let mut draft = GroupDraft::new();
        let second = draft.add_input_row();
        assert!(draft.remove_input_row(second));
        let third = draft.add_input_row();
        let fourth = draft.add_input_row();

        assert!(second > 1);
        assert!(third > second);
        assert!(fourth > third);
        let ids: Vec<u32> = draft.inputs().iter().map(|i| i.input_id).collect();
        assert_eq!(ids, vec![1, third, fourth]);
    }

    #[test]
    fn test_update_unknown_row() {
        let mut draft = GroupDraft::new();
        assert!(!draft.update_input_row(42, ADDR_A));
        assert!(draft.update_input_row(1, ADDR_A));
        assert_eq!(draft.inputs()[0].address, ADDR_A);
    }

    #[test]
    fn test_commit_empty_address_is_noop() {
        let mut draft = draft_with_amount("1");
        assert_eq!(draft.commit_row(1), Err(CommitRejection::EmptyAddress));
        assert!(draft.recipients().is_empty());
    }

    #[test]
    fn test_commit_requires_shared_amount() {
        let mut draft = GroupDraft::new();
        draft.update_input_row(1, ADDR_A);
        assert_eq!(draft.commit_row(1), Err(CommitRejection::MissingSharedAmount));
        assert_eq!(draft.inputs()[0].address, ADDR_A);
        assert!(draft.recipients().is_empty());
    }

    #[test]
    fn test_commit_rejects_bad_amount() {
        let mut draft = draft_with_amount("lots");
        draft.update_input_row(1, ADDR_A);
        assert!(matches!(
            draft.commit_row(1),
            Err(CommitRejection::InvalidAmount(_))
        ));
        assert!(draft.recipients().is_empty());
    }

    #[test]
    fn test_commit_clears_row_and_defaults_description() {
        let mut draft = draft_with_amount("0.5");
        draft.update_input_row(1, ADDR_A);

        let recipient = draft.commit_row(1).unwrap().clone();
        assert_eq!(recipient.address, ADDR_A);
        assert_eq!(recipient.amount, U256::from(500_000_000_000_000_000u64));
        assert_eq!(recipient.description, DEFAULT_RECIPIENT_DESCRIPTION);

        assert_eq!(draft.inputs().len(), 1);
        assert!(draft.inputs()[0].address.is_empty());
        assert_eq!(draft.recipients().len(), 1);
    }

    #[test]
    fn test_recipient_ids_unique() {
        let mut draft = draft_with_amount("1");
        draft.description = "Rent".to_string();
        draft.update_input_row(1, ADDR_A);
        let first = draft.commit_row(1).unwrap().id;
        draft.update_input_row(1, ADDR_B);
        let second = draft.commit_row(1).unwrap().id;

        assert_ne!(first, second);
        assert!(draft.recipients().iter().all(|r| r.description == "Rent"));
    }

    #[test]
    fn test_remove_recipient_leaves_inputs() {
        let mut draft = draft_with_amount("1");
        draft.add_input_row();
        draft.update_input_row(1, ADDR_A);
        let id = draft.commit_row(1).unwrap().id;

        assert!(draft.remove_recipient(id));
        assert!(!draft.remove_recipient(id));
        assert!(draft.recipients().is_empty());
        assert_eq!(draft.inputs().len(), 2);
    }

    #[test]
    fn test_total_committed_amount() {
        let mut draft = draft_with_amount("0.25");
        draft.update_input_row(1, ADDR_A);
        draft.commit_row(1).unwrap();
        draft.update_input_row(1, ADDR_B);
        draft.commit_row(1).unwrap();

        assert_eq!(
            draft.total_committed_amount(),
            U256::from(500_000_000_000_000_000u64)
        );
    }

    #[test]
    fn test_reset_clears_both_lists() {
        let mut draft = draft_with_amount("1");
        draft.name = "Trip".to_string();
        draft.add_input_row();
        draft.add_input_row();
        draft.update_input_row(1, ADDR_A);
        draft.commit_row(1).unwrap();

        draft.reset();
        assert_eq!(draft, GroupDraft::new());
    }

    #[test]
    fn test_validate_names_missing_field() {
        let mut draft = draft_with_amount("1");
        draft.name = "Trip".to_string();
        draft.description = "Iceland".to_string();
        assert_eq!(
            draft.validate(),
            Err(FriendPayError::validation("at least one recipient is required"))
        );

        draft.update_input_row(1, ADDR_A);
        draft.commit_row(1).unwrap();
        assert!(draft.is_submittable());
    }

    #[test]
    fn test_recipient_addresses_rejects_ens() {
        let mut draft = draft_with_amount("1");
        draft.update_input_row(1, "alice.eth");
        draft.commit_row(1).unwrap();
        assert!(matches!(
            draft.recipient_addresses(),
            Err(FriendPayError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_event_draft_validation() {
        let mut draft = EventDraft {
            name: "Party".to_string(),
            description: "Beach".to_string(),
            ..Default::default()
        };
        assert!(!draft.is_submittable());

        draft.owner_address = ADDR_A.to_string();
        assert!(draft.is_submittable());
        assert!(draft.owner().is_ok());

        draft.reset();
        assert_eq!(draft, EventDraft::default());
    }
}
