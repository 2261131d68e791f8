//! Chore listings, chore creation, and the grouped week views.

use crate::clock::Clock;
use crate::connection::Connection;
use crate::error::Result;
use crate::grouping::{self, Grouped};
use crate::models::{AccountChore, Chore, CreateChoreParams};

use super::{member_path, require_id};

// ---------------------------------------------------------------------------
// ChoreQuery
// ---------------------------------------------------------------------------

/// Query interface for chore assignments.
pub struct ChoreQuery<'a> {
    conn: &'a Connection,
    clock: &'a dyn Clock,
}

impl<'a> ChoreQuery<'a> {
    /// Create a new `ChoreQuery` bound to the given connection.
    ///
    /// `clock` supplies "today" for the grouped views.
    pub fn new(conn: &'a Connection, clock: &'a dyn Clock) -> Self {
        Self { conn, clock }
    }

    /// Every assignment in the household.
    pub fn household_chores(&self, household_id: &str) -> Result<Vec<AccountChore>> {
        let id = require_id("household id", household_id)?;
        self.conn.get(&format!("/households/{}/chores", id))
    }

    /// Assignments of one account within a household.
    pub fn account_chores(&self, account_id: &str, household_id: &str) -> Result<Vec<AccountChore>> {
        let path = format!("{}/chores", member_path(account_id, household_id)?);
        self.conn.get(&path)
    }

    /// Create a chore after checking the request locally.
    pub fn create(&self, household_id: &str, params: &CreateChoreParams) -> Result<Chore> {
        let id = require_id("household id", household_id)?;
        params.validate()?;
        let chore = self.conn.post(&format!("/households/{}/chores", id), params)?;
        self.conn.invalidate("chores");
        Ok(chore)
    }

    /// The household's assignments grouped by due day.
    pub fn week(&self, household_id: &str) -> Result<Grouped<AccountChore>> {
        let chores = self.household_chores(household_id)?;
        Ok(grouping::group_chores(chores, self.clock))
    }

    /// One account's assignments grouped by due day.
    pub fn my_chores(&self, account_id: &str, household_id: &str) -> Result<Grouped<AccountChore>> {
        let chores = self.account_chores(account_id, household_id)?;
        Ok(grouping::group_chores(chores, self.clock))
    }
}
