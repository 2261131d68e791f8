//! Account lookup and creation.

use crate::connection::Connection;
use crate::error::{HouseholdError, Result};
use crate::models::{Account, CreateAccountParams};

use super::require_id;

// ---------------------------------------------------------------------------
// AccountQuery
// ---------------------------------------------------------------------------

/// Query interface for accounts.
pub struct AccountQuery<'a> {
    conn: &'a Connection,
}

impl<'a> AccountQuery<'a> {
    /// Create a new `AccountQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get(&self, account_id: &str) -> Result<Account> {
        let id = require_id("account id", account_id)?;
        self.conn.get(&format!("/account/{}", id))
    }

    /// Look up the account linked to a Google identity.
    ///
    /// Returns `None` when the server answers 404.
    pub fn find_by_google_id(&self, google_id: &str) -> Result<Option<Account>> {
        let id = require_id("google id", google_id)?;
        match self.conn.get(&format!("/account/google/{}", id)) {
            Ok(account) => Ok(Some(account)),
            Err(HouseholdError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn create(&self, params: &CreateAccountParams) -> Result<Account> {
        require_id("google id", &params.google_id)?;
        if params.name.trim().is_empty() {
            return Err(HouseholdError::InvalidArgument("account name must not be empty".into()));
        }
        self.conn.post("/account", params)
    }

    /// Return the account for `google_id`, creating it on first sign-in.
    pub fn sign_in(&self, google_id: &str, name: &str) -> Result<Account> {
        if let Some(account) = self.find_by_google_id(google_id)? {
            return Ok(account);
        }
        log::info!("No account for Google id {}; creating one", google_id);
        self.create(&CreateAccountParams {
            google_id: google_id.to_string(),
            name: name.to_string(),
        })
    }
}
