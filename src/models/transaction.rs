use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::money::Money;
use super::null_to_default;
use crate::error::{HouseholdError, Result};

// ---------------------------------------------------------------------------
// TransactionMember: Name card for one side of a split
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMember {
    pub id: String,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Transaction: A shared expense as recorded by its payer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub amount_in_cents: Money,
    pub account_id: Option<String>,
    pub household_id: Option<String>,
    pub spent_at: Option<String>,
}

// ---------------------------------------------------------------------------
// TransactionSplit: One party's share of a transaction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSplit {
    pub id: String,
    pub transaction_id: String,
    #[serde(default)]
    pub description: String,
    pub spent_at: Option<String>,
    pub owed_by_id: String,
    pub owed_to_id: String,
    pub amount_in_cents: Money,
    #[serde(default)]
    pub is_settled: bool,
    pub settled_at: Option<String>,
    pub owed_by: TransactionMember,
    pub owed_to: TransactionMember,
}

/// Which way a split points, seen from one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDirection {
    /// The viewer paid and the other party owes them.
    OwedToViewer,
    /// The viewer owes the other party.
    OwedByViewer,
}

impl TransactionSplit {
    pub fn direction(&self, viewer_id: &str) -> SplitDirection {
        if self.owed_to_id == viewer_id {
            SplitDirection::OwedToViewer
        } else {
            SplitDirection::OwedByViewer
        }
    }

    /// The other party of the split.
    pub fn counterparty(&self, viewer_id: &str) -> &TransactionMember {
        match self.direction(viewer_id) {
            SplitDirection::OwedToViewer => &self.owed_by,
            SplitDirection::OwedByViewer => &self.owed_to,
        }
    }

    /// Caption shown under a split, e.g. `"Owed by Sam"` or `"You owe Alex"`.
    pub fn caption(&self, viewer_id: &str) -> String {
        let name = &self.counterparty(viewer_id).name;
        match self.direction(viewer_id) {
            SplitDirection::OwedToViewer => format!("Owed by {}", name),
            SplitDirection::OwedByViewer => format!("You owe {}", name),
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionSummary: Monthly balance for one account
// ---------------------------------------------------------------------------

/// Splits others owe the viewer, grouped by debtor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOwedDetail {
    pub owed_by_id: String,
    pub owed_by_name: String,
    pub amount_in_cents: Money,
    #[serde(default, deserialize_with = "null_to_default")]
    pub splits: Vec<TransactionSplit>,
}

/// Splits the viewer owes others, grouped by creditor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOwingDetail {
    pub owed_to_id: String,
    pub owed_to_name: String,
    pub amount_in_cents: Money,
    #[serde(default, deserialize_with = "null_to_default")]
    pub splits: Vec<TransactionSplit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub month: String,
    pub total_owed: Money,
    pub total_owing: Money,
    #[serde(default, deserialize_with = "null_to_default")]
    pub owed_details: Vec<TransactionOwedDetail>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub owing_details: Vec<TransactionOwingDetail>,
}

impl TransactionSummary {
    /// Every split in the summary, owing splits first.
    pub fn all_splits(&self) -> Vec<TransactionSplit> {
        self.owing_details
            .iter()
            .flat_map(|d| d.splits.iter().cloned())
            .chain(self.owed_details.iter().flat_map(|d| d.splits.iter().cloned()))
            .collect()
    }

    /// What others owe minus what the viewer owes.
    pub fn net_balance(&self) -> Money {
        Money::from_cents(self.total_owed.cents().saturating_sub(self.total_owing.cents()))
    }
}

// ---------------------------------------------------------------------------
// CreateTransactionParams: Request body for expense creation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionParams {
    pub description: String,
    pub amount_in_cents: Money,
    pub spent_at: String,
}

impl CreateTransactionParams {
    pub fn new(description: &str, amount: Money, spent_at: DateTime<Utc>) -> Self {
        Self {
            description: description.trim().to_string(),
            amount_in_cents: amount,
            spent_at: spent_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Build from a typed-in amount such as `"12.50"`.
    pub fn from_text(description: &str, amount: &str, spent_at: DateTime<Utc>) -> Result<Self> {
        let amount = Money::parse(amount)?;
        Ok(Self::new(description, amount, spent_at))
    }

    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(HouseholdError::InvalidArgument(
                "transaction description must not be empty".into(),
            ));
        }
        if !self.amount_in_cents.is_positive() {
            return Err(HouseholdError::InvalidArgument(
                "transaction amount must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
