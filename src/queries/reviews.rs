//! Reviews of completed chore assignments.

use crate::connection::Connection;
use crate::error::Result;
use crate::models::{ChoreReview, CreateReviewParams};

use super::{member_path, require_id};

// ---------------------------------------------------------------------------
// ReviewQuery
// ---------------------------------------------------------------------------

/// Query interface for chore reviews.
pub struct ReviewQuery<'a> {
    conn: &'a Connection,
}

impl<'a> ReviewQuery<'a> {
    /// Create a new `ReviewQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn reviews_path(&self, account_id: &str, household_id: &str, account_chore_id: &str) -> Result<String> {
        let chore_id = require_id("account chore id", account_chore_id)?;
        Ok(format!(
            "{}/chores/{}/reviews",
            member_path(account_id, household_id)?,
            chore_id
        ))
    }

    /// Submit a review of a completed assignment as `account_id`.
    pub fn submit(
        &self,
        account_id: &str,
        household_id: &str,
        account_chore_id: &str,
        params: &CreateReviewParams,
    ) -> Result<()> {
        let path = self.reviews_path(account_id, household_id, account_chore_id)?;
        self.conn.post_unit(&path, params)?;
        self.conn.invalidate("notifications");
        Ok(())
    }

    pub fn get(
        &self,
        account_id: &str,
        household_id: &str,
        account_chore_id: &str,
        review_id: &str,
    ) -> Result<ChoreReview> {
        let review_id = require_id("review id", review_id)?;
        let path = format!(
            "{}/{}",
            self.reviews_path(account_id, household_id, account_chore_id)?,
            review_id
        );
        self.conn.get(&path)
    }
}
