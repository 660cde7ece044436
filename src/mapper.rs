//! View-model mapping
//!
//! Pure conversions from raw contract results into display records. No I/O,
//! and the current time is passed in so the output is reproducible.
//!
//! The contract stores neither timestamps, balances nor group creators. The
//! fields that stand in for them are typed as [`Sourced::Synthesized`] or
//! [`Creator::Unknown`] so a renderer can show them as unavailable.

use std::fmt;

use alloy_primitives::{Address, U256};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::bindings::{RawEvent, RawGroupDetail, RawGroups};
use crate::units::{format_display, format_units};
use crate::{FriendPayError, Result};

/// A field value together with where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum Sourced<T> {
    /// Read from the contract
    OnChain(T),
    /// Placeholder; the contract does not expose this field
    Synthesized(T),
}

impl<T> Sourced<T> {
    pub fn value(&self) -> &T {
        match self {
            Self::OnChain(v) | Self::Synthesized(v) => v,
        }
    }

    pub fn is_synthesized(&self) -> bool {
        matches!(self, Self::Synthesized(_))
    }

    /// The value only if it came from the contract
    pub fn on_chain(&self) -> Option<&T> {
        match self {
            Self::OnChain(v) => Some(v),
            Self::Synthesized(_) => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Sourced<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnChain(v) => write!(f, "{}", v),
            Self::Synthesized(_) => write!(f, "unavailable"),
        }
    }
}

/// Best-effort group creator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Creator {
    /// Currently connected wallet, substituted because the contract has no
    /// creator field
    ConnectedWallet(Address),
    Unknown,
}

impl Creator {
    pub fn from_hint(hint: Option<Address>) -> Self {
        hint.map_or(Self::Unknown, Self::ConnectedWallet)
    }

    pub fn address(&self) -> Option<Address> {
        match self {
            Self::ConnectedWallet(address) => Some(*address),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for Creator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectedWallet(address) => write!(f, "{}", address),
            Self::Unknown => write!(f, "Unknown Creator"),
        }
    }
}

/// Display record for one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupView {
    pub name: String,
    pub description: String,
    /// Base units (10^18 per display unit)
    pub total_amount: U256,
    pub recipients: Vec<Address>,
    pub creator: Creator,
    /// Position in `getAllGroups()`; only valid while the contract's
    /// collection is append-only
    pub group_index: u64,
}

impl GroupView {
    /// Exact decimal total, e.g. `"0.5"`
    pub fn total_amount_decimal(&self) -> String {
        format_units(self.total_amount)
    }

    /// Total truncated to `places` decimals
    pub fn display_total(&self, places: usize) -> String {
        format_display(self.total_amount, places)
    }
}

/// Display record for one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventView {
    /// Stringified array index, not a durable identifier
    pub id: String,
    pub name: String,
    pub description: String,
    /// Contract-reported owner
    pub wallet_address: Address,
    pub created_date: Sourced<DateTime<Utc>>,
    pub end_date: Sourced<DateTime<Utc>>,
    pub active_until: Sourced<DateTime<Utc>>,
    pub balance: Sourced<U256>,
}

/// Map `getAllEvents()` into event views
///
/// Element `i` gets id `i`, a creation date `i` days before `now` and an
/// end date `i` days after it, all synthesized. Never fails.
pub fn map_events(raw: &[RawEvent], now: DateTime<Utc>) -> Vec<EventView> {
    raw.iter()
        .enumerate()
        .map(|(index, event)| {
            let offset = Duration::days(index as i64);
            EventView {
                id: index.to_string(),
                name: event.name.clone(),
                description: event.description.clone(),
                wallet_address: event.owner,
                created_date: Sourced::Synthesized(now - offset),
                end_date: Sourced::Synthesized(now + offset),
                active_until: Sourced::Synthesized(now + offset),
                balance: Sourced::Synthesized(U256::ZERO),
            }
        })
        .collect()
}

/// Map the four parallel `getAllGroups()` arrays into group views
///
/// All arrays must have the same length; otherwise `ShapeMismatch` is
/// returned and nothing is produced.
pub fn map_groups(raw: &RawGroups, creator_hint: Option<Address>) -> Result<Vec<GroupView>> {
    let len = raw.names.len();
    if raw.descriptions.len() != len
        || raw.total_amounts.len() != len
        || raw.recipients.len() != len
    {
        return Err(FriendPayError::shape_mismatch(format!(
            "getAllGroups array lengths differ: names={}, descriptions={}, totalAmounts={}, recipients={}",
            len,
            raw.descriptions.len(),
            raw.total_amounts.len(),
            raw.recipients.len()
        )));
    }

    let creator = Creator::from_hint(creator_hint);

    Ok((0..len)
        .map(|i| GroupView {
            name: raw.names[i].clone(),
            description: raw.descriptions[i].clone(),
            total_amount: raw.total_amounts[i],
            recipients: raw.recipients[i].clone(),
            creator,
            group_index: i as u64,
        })
        .collect())
}

/// Overlay a fresh `getGroupDetailsById` result onto a listed summary
///
/// Detail fields win; `creator` and `group_index` are kept from `fallback`.
pub fn map_group_detail(raw: &RawGroupDetail, fallback: &GroupView) -> GroupView {
    GroupView {
        name: raw.name.clone(),
        description: raw.description.clone(),
        total_amount: raw.total_amount,
        recipients: raw.recipients.clone(),
        creator: fallback.creator,
        group_index: fallback.group_index,
    }
}

/// Check the listing against `getGroupCount()`
pub fn validate_group_count(groups: &[GroupView], count: U256) -> Result<()> {
    if U256::from(groups.len()) != count {
        return Err(FriendPayError::shape_mismatch(format!(
            "getGroupCount returned {} but getAllGroups listed {}",
            count,
            groups.len()
        )));
    }
    Ok(())
}
