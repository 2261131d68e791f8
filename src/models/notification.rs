use serde::{Deserialize, Serialize};

use super::money::Money;
use crate::config::BADGE_COUNT_CAP;

// ---------------------------------------------------------------------------
// NotificationAction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationAction {
    ChoreAssigned,
    ChorePending,
    ChoreCompleted,
    TransactionAdded,
    TransactionSettled,
    ReviewSubmitted,
    /// Any action this client does not know about yet.
    #[serde(untagged)]
    Other(String),
}

impl NotificationAction {
    /// Verb phrase shown after the actor's name.
    pub fn text(&self) -> String {
        match self {
            NotificationAction::ChoreAssigned => "was assigned".into(),
            NotificationAction::ChorePending => "has a pending".into(),
            NotificationAction::ChoreCompleted => "completed".into(),
            NotificationAction::TransactionAdded => "added a transaction".into(),
            NotificationAction::TransactionSettled => "settled a transaction".into(),
            NotificationAction::ReviewSubmitted => "submitted a review".into(),
            NotificationAction::Other(raw) => raw.to_lowercase(),
        }
    }
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorInfo {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreInfo {
    pub chore_id: String,
    pub account_chore_id: String,
    pub title: String,
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInfo {
    pub review_id: String,
    pub review: String,
    pub chore_name: Option<String>,
    pub account_chore_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfo {
    pub transaction_id: String,
    pub description: String,
    pub amount_in_cents: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitInfo {
    pub id: String,
    pub amount_in_cents: Money,
    pub owed_by_id: String,
    pub owed_to_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub owed_by_name: String,
    #[serde(default)]
    pub owed_to_name: String,
}

// ---------------------------------------------------------------------------
// Notification: One entry of an account's feed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(default)]
    pub seen: bool,
    pub created_at: String,
    pub action: NotificationAction,
    pub actor: ActorInfo,
    pub chore_info: Option<ChoreInfo>,
    pub review_info: Option<ReviewInfo>,
    pub transaction_info: Option<TransactionInfo>,
    pub split_info: Option<SplitInfo>,
}

impl Notification {
    /// Body text: the chore title, transaction description, or review text,
    /// whichever attachment is present first.
    pub fn content(&self) -> &str {
        if let Some(chore) = &self.chore_info {
            return &chore.title;
        }
        if let Some(tx) = &self.transaction_info {
            return &tx.description;
        }
        if let Some(review) = &self.review_info {
            return &review.review;
        }
        ""
    }

    /// Whether `viewer_id` may review the chore this notification is about.
    ///
    /// Only completed chores can be reviewed, and never by the person who
    /// completed them.
    pub fn can_review(&self, viewer_id: &str) -> bool {
        self.action == NotificationAction::ChoreCompleted
            && self.actor.id != viewer_id
            && self.chore_info.is_some()
    }
}

// ---------------------------------------------------------------------------
// Feed helpers
// ---------------------------------------------------------------------------

pub fn unseen_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.seen).count()
}

pub fn unseen_ids(notifications: &[Notification]) -> Vec<String> {
    notifications
        .iter()
        .filter(|n| !n.seen)
        .map(|n| n.id.clone())
        .collect()
}

/// Badge text for an unseen count; `None` hides the badge.
pub fn badge_text(count: usize) -> Option<String> {
    match count {
        0 => None,
        n if n > BADGE_COUNT_CAP => Some(format!("{}+", BADGE_COUNT_CAP)),
        n => Some(n.to_string()),
    }
}

/// Request body for marking several notifications seen at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkSeenParams {
    pub notification_ids: Vec<String>,
}
