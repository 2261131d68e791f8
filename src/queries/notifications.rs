//! Notification feed and seen-state updates.

use crate::connection::Connection;
use crate::error::Result;
use crate::models::{self, MarkSeenParams, Notification};

use super::{member_path, require_id};

// ---------------------------------------------------------------------------
// NotificationQuery
// ---------------------------------------------------------------------------

/// Query interface for an account's notification feed in a household.
pub struct NotificationQuery<'a> {
    conn: &'a Connection,
}

impl<'a> NotificationQuery<'a> {
    /// Create a new `NotificationQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn list(&self, account_id: &str, household_id: &str) -> Result<Vec<Notification>> {
        let path = format!("{}/notifications", member_path(account_id, household_id)?);
        self.conn.get(&path)
    }

    pub fn unseen_count(&self, account_id: &str, household_id: &str) -> Result<usize> {
        let feed = self.list(account_id, household_id)?;
        Ok(models::unseen_count(&feed))
    }

    /// Badge text for the unseen count, `None` when everything is seen.
    pub fn badge(&self, account_id: &str, household_id: &str) -> Result<Option<String>> {
        Ok(models::badge_text(self.unseen_count(account_id, household_id)?))
    }

    pub fn mark_seen(&self, account_id: &str, household_id: &str, notification_id: &str) -> Result<()> {
        let id = require_id("notification id", notification_id)?;
        let path = format!(
            "{}/notifications/{}/seen",
            member_path(account_id, household_id)?,
            id
        );
        self.conn.put::<()>(&path, None)?;
        self.conn.invalidate("notifications");
        Ok(())
    }

    /// Mark several notifications seen in one request. Does nothing for an
    /// empty list.
    pub fn mark_many_seen(
        &self,
        account_id: &str,
        household_id: &str,
        notification_ids: &[String],
    ) -> Result<()> {
        let path = format!("{}/notifications/seen", member_path(account_id, household_id)?);
        if notification_ids.is_empty() {
            return Ok(());
        }
        let body = MarkSeenParams {
            notification_ids: notification_ids.to_vec(),
        };
        self.conn.put(&path, Some(&body))?;
        self.conn.invalidate("notifications");
        Ok(())
    }

    /// Fetch the feed and mark every unseen entry seen.
    ///
    /// Returns how many notifications were marked.
    pub fn mark_feed_seen(&self, account_id: &str, household_id: &str) -> Result<usize> {
        let feed = self.list(account_id, household_id)?;
        let ids = models::unseen_ids(&feed);
        self.mark_many_seen(account_id, household_id, &ids)?;
        Ok(ids.len())
    }
}
