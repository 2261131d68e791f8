//! Household membership, members and leaderboard.

use crate::connection::Connection;
use crate::error::{HouseholdError, Result};
use crate::models::{
    CreateHouseholdParams, Household, HouseholdMember, JoinHouseholdParams, LeaderboardEntry,
};

use super::require_id;

// ---------------------------------------------------------------------------
// HouseholdQuery
// ---------------------------------------------------------------------------

/// Query interface for households.
pub struct HouseholdQuery<'a> {
    conn: &'a Connection,
}

impl<'a> HouseholdQuery<'a> {
    /// Create a new `HouseholdQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Households the account belongs to.
    pub fn list(&self, account_id: &str) -> Result<Vec<Household>> {
        let id = require_id("account id", account_id)?;
        self.conn.get(&format!("/accounts/{}/households", id))
    }

    /// Create a household owned by `account_id`.
    pub fn create(&self, account_id: &str, params: &CreateHouseholdParams) -> Result<Household> {
        let id = require_id("account id", account_id)?;
        if params.name.trim().is_empty() {
            return Err(HouseholdError::InvalidArgument(
                "household name must not be empty".into(),
            ));
        }
        let path = format!("/accounts/{}/households", id);
        let household = self.conn.post(&path, params)?;
        self.conn.invalidate(&path);
        Ok(household)
    }

    /// Join an existing household with its password.
    pub fn join(&self, params: &JoinHouseholdParams) -> Result<()> {
        let account_id = require_id("account id", &params.account_id)?;
        require_id("household id", &params.household_id)?;
        self.conn.post_unit("/households/join", params)?;
        self.conn
            .invalidate(&format!("/accounts/{}/households", account_id));
        Ok(())
    }

    pub fn members(&self, household_id: &str) -> Result<Vec<HouseholdMember>> {
        let id = require_id("household id", household_id)?;
        self.conn.get(&format!("/households/{}/members", id))
    }

    /// Points standings, highest first. Ties keep the server's order.
    pub fn leaderboard(&self, household_id: &str) -> Result<Vec<LeaderboardEntry>> {
        let id = require_id("household id", household_id)?;
        let mut entries: Vec<LeaderboardEntry> =
            self.conn.get(&format!("/households/{}/leaderboard", id))?;
        entries.sort_by(|a, b| b.points.cmp(&a.points));
        Ok(entries)
    }
}
