//! Query modules for the household SDK.
//!
//! Each module provides a query struct that borrows from a
//! [`Connection`](crate::connection::Connection) and exposes methods returning
//! `Result<T>` with typed payloads from [`models`](crate::models).

pub mod accounts;
pub mod chores;
pub mod households;
pub mod notifications;
pub mod reviews;
pub mod transactions;

pub use accounts::AccountQuery;
pub use chores::ChoreQuery;
pub use households::HouseholdQuery;
pub use notifications::NotificationQuery;
pub use reviews::ReviewQuery;
pub use transactions::{MonthlyTransactions, TransactionQuery};

use crate::error::{HouseholdError, Result};

/// Check an identifier before splicing it into a request path.
pub(crate) fn require_id<'v>(what: &str, value: &'v str) -> Result<&'v str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(HouseholdError::InvalidArgument(format!("{} must not be empty", what)));
    }
    if trimmed.contains(['/', '?', '#']) {
        return Err(HouseholdError::InvalidArgument(format!(
            "{} contains path characters: {:?}",
            what, value
        )));
    }
    Ok(trimmed)
}

/// Path prefix shared by every per-account, per-household resource.
pub(crate) fn member_path(account_id: &str, household_id: &str) -> Result<String> {
    let account_id = require_id("account id", account_id)?;
    let household_id = require_id("household id", household_id)?;
    Ok(format!("/accounts/{}/households/{}", account_id, household_id))
}
