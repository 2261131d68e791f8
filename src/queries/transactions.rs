//! Expense splits: monthly summary, creation and settlement.

use chrono::NaiveDate;

use crate::clock::{self, Clock};
use crate::connection::Connection;
use crate::error::{HouseholdError, Result};
use crate::grouping::{self, Grouped};
use crate::models::{CreateTransactionParams, TransactionSplit, TransactionSummary};

use super::{member_path, require_id};

// ---------------------------------------------------------------------------
// MonthlyTransactions
// ---------------------------------------------------------------------------

/// A month's summary together with its splits grouped by day.
#[derive(Debug, Clone)]
pub struct MonthlyTransactions {
    pub summary: TransactionSummary,
    pub groups: Grouped<TransactionSplit>,
}

// ---------------------------------------------------------------------------
// TransactionQuery
// ---------------------------------------------------------------------------

/// Query interface for an account's transactions within a household.
pub struct TransactionQuery<'a> {
    conn: &'a Connection,
    clock: &'a dyn Clock,
}

impl<'a> TransactionQuery<'a> {
    /// Create a new `TransactionQuery` bound to the given connection.
    pub fn new(conn: &'a Connection, clock: &'a dyn Clock) -> Self {
        Self { conn, clock }
    }

    /// Summary for `month` (`YYYY-MM`), or the server's default month when
    /// `None`.
    pub fn summary(
        &self,
        account_id: &str,
        household_id: &str,
        month: Option<&str>,
    ) -> Result<TransactionSummary> {
        let path = format!("{}/transactions/summary", member_path(account_id, household_id)?);
        match month {
            Some(m) => {
                validate_month(m)?;
                self.conn.get_with_query(&path, &[("month", m)])
            }
            None => self.conn.get(&path),
        }
    }

    /// Summary for the current month according to the SDK clock.
    pub fn current_summary(&self, account_id: &str, household_id: &str) -> Result<TransactionSummary> {
        let month = clock::current_month(self.clock);
        self.summary(account_id, household_id, Some(&month))
    }

    /// Summary plus every split grouped by the day it was spent, newest first.
    pub fn monthly(
        &self,
        account_id: &str,
        household_id: &str,
        month: Option<&str>,
    ) -> Result<MonthlyTransactions> {
        let summary = self.summary(account_id, household_id, month)?;
        let groups = grouping::group_splits(summary.all_splits(), self.clock);
        Ok(MonthlyTransactions { summary, groups })
    }

    /// Record an expense paid by `account_id`.
    pub fn create(
        &self,
        account_id: &str,
        household_id: &str,
        params: &CreateTransactionParams,
    ) -> Result<()> {
        params.validate()?;
        let path = format!("{}/transactions", member_path(account_id, household_id)?);
        self.conn.post_unit(&path, params)?;
        self.conn.invalidate("transactions");
        Ok(())
    }

    /// Mark a split as paid back.
    pub fn settle(&self, account_id: &str, household_id: &str, split_id: &str) -> Result<()> {
        let split_id = require_id("split id", split_id)?;
        let path = format!(
            "{}/transactions/{}/settle",
            member_path(account_id, household_id)?,
            split_id
        );
        self.conn.put::<()>(&path, None)?;
        self.conn.invalidate("transactions");
        Ok(())
    }
}

/// Accept only `YYYY-MM` with a real month.
fn validate_month(month: &str) -> Result<()> {
    let valid = month.len() == 7
        && NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d").is_ok();
    if valid {
        Ok(())
    } else {
        Err(HouseholdError::InvalidArgument(format!(
            "month must be YYYY-MM, got {:?}",
            month
        )))
    }
}
