//! Reminder feed
//!
//! The reminder page shows notifications about group invitations, due
//! payments and upcoming events. There is no backend for them yet, so the
//! feed is built from fixed mock data.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    GroupInvite,
    PaymentDue,
    EventInvite,
    EventReminder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    Pending,
    Overdue,
    Upcoming,
}

impl fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Overdue => write!(f, "overdue"),
            Self::Upcoming => write!(f, "upcoming"),
        }
    }
}

/// Declared most urgent first so the derived `Ord` sorts urgent to the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Urgent => write!(f, "urgent"),
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderTab {
    Groups,
    Events,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: u32,
    pub kind: ReminderKind,
    pub title: String,
    pub message: String,
    /// Group or event the reminder is about
    pub subject: String,
    /// Amount label for group reminders, e.g. `"$75"`
    pub amount: Option<String>,
    /// Event date label for event reminders
    pub date: Option<String>,
    /// Relative age label, e.g. `"2 hours ago"`
    pub time: String,
    pub status: ReminderStatus,
    pub priority: Priority,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderFeed {
    pub groups: Vec<Reminder>,
    pub events: Vec<Reminder>,
}

impl Reminder {
    fn new(id: u32, kind: ReminderKind, title: &str, message: &str, subject: &str) -> Self {
        Self {
            id,
            kind,
            title: title.to_string(),
            message: message.to_string(),
            subject: subject.to_string(),
            amount: None,
            date: None,
            time: String::new(),
            status: ReminderStatus::Pending,
            priority: Priority::Medium,
        }
    }

    fn amount(mut self, amount: &str) -> Self {
        self.amount = Some(amount.to_string());
        self
    }

    fn date(mut self, date: &str) -> Self {
        self.date = Some(date.to_string());
        self
    }

    fn at(mut self, time: &str, status: ReminderStatus, priority: Priority) -> Self {
        self.time = time.to_string();
        self.status = status;
        self.priority = priority;
        self
    }
}

impl ReminderFeed {
    /// Fixed demo feed: three group and three event reminders
    pub fn mock() -> Self {
        use Priority::*;
        use ReminderKind::*;
        use ReminderStatus::*;

        Self {
            groups: vec![
                Reminder::new(
                    1,
                    GroupInvite,
                    "New Group Invitation",
                    "Alice added you as a recipient in \"Room Rent Split\" group",
                    "Room Rent Split",
                )
                .amount("$500")
                .at("2 hours ago", Pending, High),
                Reminder::new(
                    2,
                    PaymentDue,
                    "Payment Reminder",
                    "You have a pending payment of $75 for \"Utility Bills\" group",
                    "Utility Bills",
                )
                .amount("$75")
                .at("1 day ago", Overdue, Urgent),
                Reminder::new(
                    3,
                    GroupInvite,
                    "New Group Invitation",
                    "Bob invited you to join \"Vacation Fund\" group",
                    "Vacation Fund",
                )
                .amount("$200")
                .at("3 days ago", Pending, Medium),
            ],
            events: vec![
                Reminder::new(
                    1,
                    EventInvite,
                    "Event Invitation",
                    "Sarah invited you to \"Birthday Party\" event",
                    "Birthday Party",
                )
                .date("Dec 15, 2024")
                .at("1 hour ago", Pending, High),
                Reminder::new(
                    2,
                    EventReminder,
                    "Event Reminder",
                    "Your \"Team Dinner\" event is tomorrow",
                    "Team Dinner",
                )
                .date("Dec 10, 2024")
                .at("2 days ago", Upcoming, Medium),
                Reminder::new(
                    3,
                    EventInvite,
                    "Event Invitation",
                    "Mike invited you to \"New Year Party\" event",
                    "New Year Party",
                )
                .date("Dec 31, 2024")
                .at("5 days ago", Pending, Low),
            ],
        }
    }

    pub fn tab(&self, tab: ReminderTab) -> &[Reminder] {
        match tab {
            ReminderTab::Groups => &self.groups,
            ReminderTab::Events => &self.events,
        }
    }

    /// `(groups, events)` counts for the tab labels
    pub fn counts(&self) -> (usize, usize) {
        (self.groups.len(), self.events.len())
    }

    /// Reminders of a tab, most urgent first; ties keep feed order
    pub fn by_priority(&self, tab: ReminderTab) -> Vec<&Reminder> {
        let mut reminders: Vec<&Reminder> = self.tab(tab).iter().collect();
        reminders.sort_by_key(|r| r.priority);
        reminders
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_counts() {
        let feed = ReminderFeed::mock();
        assert_eq!(feed.counts(), (3, 3));
        assert!(feed.tab(ReminderTab::Groups).iter().all(|r| r.amount.is_some()));
        assert!(feed.tab(ReminderTab::Events).iter().all(|r| r.date.is_some()));
    }

    #[test]
    fn test_by_priority() {
        let feed = ReminderFeed::mock();

        let groups: Vec<&str> = feed
            .by_priority(ReminderTab::Groups)
            .iter()
            .map(|r| r.subject.as_str())
            .collect();
        assert_eq!(groups, vec!["Utility Bills", "Room Rent Split", "Vacation Fund"]);

        let events = feed.by_priority(ReminderTab::Events);
        assert_eq!(events[0].priority, Priority::High);
        assert_eq!(events[2].priority, Priority::Low);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Priority::Urgent.to_string(), "urgent");
        assert_eq!(ReminderStatus::Overdue.to_string(), "overdue");
    }

    #[test]
    fn test_mock_fields() {
        let feed = ReminderFeed::mock();
        let due = &feed.tab(ReminderTab::Groups)[1];
        assert_eq!(due.kind, ReminderKind::PaymentDue);
        assert_eq!(due.amount.as_deref(), Some("$75"));
        assert_eq!(due.time, "1 day ago");
        assert_eq!(due.status, ReminderStatus::Overdue);
        assert!(due.date.is_none());

        let party = &feed.tab(ReminderTab::Events)[2];
        assert_eq!(party.date.as_deref(), Some("Dec 31, 2024"));
        assert_eq!(party.priority, Priority::Low);
        assert!(party.amount.is_none());
    }
}
