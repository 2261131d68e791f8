use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Account: A signed-up user
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub google_id: Option<String>,
}

// ---------------------------------------------------------------------------
// CreateAccountParams: Request body for account creation
// ---------------------------------------------------------------------------

/// The account endpoint takes snake_case keys, unlike the rest of the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountParams {
    pub google_id: String,
    pub name: String,
}
