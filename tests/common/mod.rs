//! Shared test fixtures for the household SDK integration tests.
//!
//! Provides [`FixtureServer`], an in-process axum server that answers canned
//! JSON per `(method, path)` and records every request it receives, plus JSON
//! builders for the API payloads and an SDK constructor wired to a temporary
//! cache directory and a clock frozen at Monday 2024-06-10.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::TcpListener as StdTcpListener;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::Router;
use household_sdk::{FixedClock, HouseholdSdk};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Route every test logs through `env_logger`; safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Monday 2024-06-10, midnight UTC.
pub fn monday() -> FixedClock {
    FixedClock::at_date(2024, 6, 10).unwrap()
}

// ---------------------------------------------------------------------------
// FixtureServer
// ---------------------------------------------------------------------------

/// One request as seen by the fixture server. `path` excludes the `/api`
/// prefix so it matches the paths the SDK builds.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

#[derive(Default)]
struct Shared {
    routes: Mutex<HashMap<(String, String), (u16, String)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// An HTTP server on an ephemeral localhost port, running on its own Tokio
/// runtime in a background thread for the lifetime of the test process.
pub struct FixtureServer {
    pub base_url: String,
    shared: Arc<Shared>,
}

impl FixtureServer {
    pub fn start() -> Self {
        init_logging();
        let listener = StdTcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let addr = listener.local_addr().unwrap();
        let shared = Arc::new(Shared::default());

        let app = Router::new().fallback(handle).with_state(shared.clone());
        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });

        Self {
            base_url: format!("http://{}/api", addr),
            shared,
        }
    }

    /// Answer `method path` with `status` and a JSON body.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.respond_raw(method, path, status, &body.to_string())
    }

    /// Answer `method path` with `status` and a verbatim body.
    pub fn respond_raw(&self, method: &str, path: &str, status: u16, body: &str) -> &Self {
        self.shared
            .routes
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().unwrap().clone()
    }

    /// Requests received for `method path`, oldest first.
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    /// An SDK pointed at this server with a fresh cache directory.
    pub fn sdk(&self) -> (HouseholdSdk, TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let sdk = HouseholdSdk::builder()
            .base_url(&self.base_url)
            .cache_dir(tmp.path())
            .clock(monday())
            .build()
            .unwrap();
        (sdk, tmp)
    }

    /// An SDK pointed at this server that reuses an existing cache directory.
    pub fn sdk_with_cache(&self, cache: &TempDir) -> HouseholdSdk {
        HouseholdSdk::builder()
            .base_url(&self.base_url)
            .cache_dir(cache.path())
            .clock(monday())
            .build()
            .unwrap()
    }
}

async fn handle(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let path = uri.path().strip_prefix("/api").unwrap_or(uri.path()).to_string();
    shared.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        body,
    });

    let canned = shared
        .routes
        .lock()
        .unwrap()
        .get(&(method.to_string(), path.clone()))
        .cloned();
    let (status, body) = canned.unwrap_or_else(|| {
        (404, json!({ "error": format!("no fixture for {} {}", method, path) }).to_string())
    });
    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}

/// A base URL nothing listens on.
pub fn unreachable_base_url() -> String {
    let listener = StdTcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

/// An SDK that reads `cache` but cannot reach any server.
pub fn unreachable_sdk(cache: &TempDir) -> HouseholdSdk {
    HouseholdSdk::builder()
        .base_url(&unreachable_base_url())
        .cache_dir(cache.path())
        .clock(monday())
        .build()
        .unwrap()
}

// ---------------------------------------------------------------------------
// JSON builders
// ---------------------------------------------------------------------------

/// An account-chore assignment as the chore listing endpoints return it.
pub fn chore_json(id: &str, title: &str, due_date: Option<&str>) -> Value {
    json!({
        "id": id,
        "choreId": format!("chore-{}", id),
        "accountId": "acc-1",
        "accountName": "Alex",
        "dueDate": due_date,
        "status": "PENDING",
        "completedAt": null,
        "points": 10,
        "chore": {
            "id": format!("chore-{}", id),
            "title": title,
            "description": "",
            "type": "ONE_TIME",
            "householdId": "house-1",
            "createdAt": "2024-06-01T09:00:00Z"
        }
    })
}

/// A split of `cents` owed by `by` to `to`, each given as `(id, name)`.
pub fn split_json(
    id: &str,
    spent_at: Option<&str>,
    by: (&str, &str),
    to: (&str, &str),
    cents: i64,
) -> Value {
    json!({
        "id": id,
        "transactionId": format!("tx-{}", id),
        "description": format!("expense {}", id),
        "spentAt": spent_at,
        "owedById": by.0,
        "owedToId": to.0,
        "amountInCents": cents,
        "isSettled": false,
        "settledAt": null,
        "owedBy": { "id": by.0, "name": by.1 },
        "owedTo": { "id": to.0, "name": to.1 }
    })
}

/// A monthly summary for `acc-1` (Alex) against `acc-2` (Sam).
///
/// `owed` are splits Sam owes Alex; `owing` are splits Alex owes Sam.
pub fn summary_json(month: &str, owed: Vec<Value>, owing: Vec<Value>) -> Value {
    let total = |splits: &[Value]| -> i64 {
        splits
            .iter()
            .map(|s| s["amountInCents"].as_i64().unwrap())
            .sum()
    };
    let total_owed = total(&owed);
    let total_owing = total(&owing);
    json!({
        "month": month,
        "totalOwed": total_owed,
        "totalOwing": total_owing,
        "owedDetails": [{
            "owedById": "acc-2",
            "owedByName": "Sam",
            "amountInCents": total_owed,
            "splits": owed
        }],
        "owingDetails": [{
            "owedToId": "acc-2",
            "owedToName": "Sam",
            "amountInCents": total_owing,
            "splits": owing
        }]
    })
}

/// A notification about a chore, from actor `actor_id`.
pub fn notification_json(id: &str, action: &str, actor_id: &str, seen: bool) -> Value {
    json!({
        "id": id,
        "seen": seen,
        "createdAt": "2024-06-10T08:00:00Z",
        "action": action,
        "actor": { "id": actor_id, "name": "Sam" },
        "choreInfo": {
            "choreId": "chore-1",
            "accountChoreId": "ac-1",
            "title": "Dishes",
            "dueDate": "2024-06-11T00:00:00Z"
        },
        "reviewInfo": null,
        "transactionInfo": null,
        "splitInfo": null
    })
}
