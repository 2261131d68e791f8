//! Account and household query integration tests.

mod common;

use common::FixtureServer;
use household_sdk::models::{CreateAccountParams, JoinHouseholdParams};
use household_sdk::HouseholdError;
use serde_json::json;

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[test]
fn sign_in_returns_existing_account() {
    let server = FixtureServer::start();
    server.respond(
        "GET",
        "/account/google/g-123",
        200,
        json!({ "id": "acc-1", "name": "Alex", "googleId": "g-123" }),
    );
    let (sdk, _tmp) = server.sdk();

    let account = sdk.accounts().sign_in("g-123", "Alex").unwrap();
    assert_eq!(account.id, "acc-1");
    assert_eq!(account.google_id.as_deref(), Some("g-123"));
    assert!(server.requests_to("POST", "/account").is_empty());
}

#[test]
fn sign_in_creates_missing_account() {
    let server = FixtureServer::start();
    server.respond(
        "GET",
        "/account/google/g-456",
        404,
        json!({ "error": "Account not found" }),
    );
    server.respond(
        "POST",
        "/account",
        201,
        json!({ "id": "acc-9", "name": "Robin" }),
    );
    let (sdk, _tmp) = server.sdk();

    let account = sdk.accounts().sign_in("g-456", "Robin").unwrap();
    assert_eq!(account.id, "acc-9");
    assert_eq!(account.google_id, None);

    let body = server.requests_to("POST", "/account")[0].json();
    assert_eq!(body, json!({ "google_id": "g-456", "name": "Robin" }));
}

#[test]
fn find_by_google_id_surfaces_other_errors() {
    let server = FixtureServer::start();
    server.respond(
        "GET",
        "/account/google/g-1",
        500,
        json!({ "error": "Database unavailable" }),
    );
    let (sdk, _tmp) = server.sdk();

    let err = sdk.accounts().find_by_google_id("g-1").unwrap_err();
    assert!(matches!(err, HouseholdError::Api { status: 500, .. }));
}

#[test]
fn account_lookup_by_id() {
    let server = FixtureServer::start();
    server.respond(
        "GET",
        "/account/acc-1",
        200,
        json!({ "data": { "id": "acc-1", "name": "Alex" } }),
    );
    let (sdk, _tmp) = server.sdk();

    assert_eq!(sdk.accounts().get("acc-1").unwrap().name, "Alex");
}

#[test]
fn create_account_requires_a_name() {
    let server = FixtureServer::start();
    let (sdk, _tmp) = server.sdk();

    let err = sdk
        .accounts()
        .create(&CreateAccountParams {
            google_id: "g-1".into(),
            name: "   ".into(),
        })
        .unwrap_err();
    assert!(matches!(err, HouseholdError::InvalidArgument(_)));
    assert!(server.requests().is_empty());
}

// ---------------------------------------------------------------------------
// Households
// ---------------------------------------------------------------------------

#[test]
fn join_posts_credentials_and_refreshes_list() {
    let server = FixtureServer::start();
    server.respond(
        "GET",
        "/accounts/acc-1/households",
        200,
        json!([{ "id": "house-1", "name": "Maple St" }]),
    );
    server.respond_raw("POST", "/households/join", 200, "");
    let (sdk, _tmp) = server.sdk();
    sdk.households().list("acc-1").unwrap();

    sdk.households()
        .join(&JoinHouseholdParams {
            household_id: "house-2".into(),
            account_id: "acc-1".into(),
            password: "hunter2".into(),
        })
        .unwrap();

    let body = server.requests_to("POST", "/households/join")[0].json();
    assert_eq!(
        body,
        json!({ "householdId": "house-2", "accountId": "acc-1", "password": "hunter2" })
    );
    assert!(!sdk.connection().cache.contains("/accounts/acc-1/households"));
}

#[test]
fn blank_household_names_are_rejected() {
    let server = FixtureServer::start();
    let (sdk, _tmp) = server.sdk();

    let err = sdk
        .households()
        .create(
            "acc-1",
            &household_sdk::models::CreateHouseholdParams {
                name: "".into(),
                password: "pw".into(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, HouseholdError::InvalidArgument(_)));
}

#[test]
fn members_are_listed() {
    let server = FixtureServer::start();
    server.respond(
        "GET",
        "/households/house-1/members",
        200,
        json!([{ "id": "acc-1", "name": "Alex" }, { "id": "acc-2", "name": "Sam" }]),
    );
    let (sdk, _tmp) = server.sdk();

    let members = sdk.households().members("house-1").unwrap();
    let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Alex", "Sam"]);
}

#[test]
fn leaderboard_is_sorted_by_points() {
    let server = FixtureServer::start();
    server.respond(
        "GET",
        "/households/house-1/leaderboard",
        200,
        json!([
            { "accountId": "acc-1", "accountName": "Alex", "points": 20 },
            { "accountId": "acc-2", "accountName": "Sam", "points": 45 },
            { "accountId": "acc-3", "accountName": "Robin", "points": 20 }
        ]),
    );
    let (sdk, _tmp) = server.sdk();

    let board = sdk.households().leaderboard("house-1").unwrap();
    let order: Vec<&str> = board.iter().map(|e| e.account_name.as_str()).collect();
    assert_eq!(order, vec!["Sam", "Alex", "Robin"]);
}
