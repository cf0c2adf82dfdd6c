//! Integration tests for the full smoke suite.
//!
//! These drive the complete runner against a scripted in-memory API
//! that behaves like a healthy (or deliberately broken) server, and
//! verify gating, bearer-token attachment, id capture/reflection, and
//! the aggregate report.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use fincheck_application::ports::{Clock, HttpClient, HttpClientError, Reporter};
use fincheck_application::SmokeRunner;
use fincheck_domain::{CheckOutcome, HttpMethod, RequestSpec, ResponseSpec, RunConfig, RunReport};

const BASE: &str = "http://localhost:5051";
const TOKEN: &str = "tok-123";

/// How the scripted server behaves for a given test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behavior {
    /// Everything works.
    Healthy,
    /// Login returns 200 but no `access_token` field.
    LoginWithoutToken,
    /// Every connection is refused.
    Unreachable,
    /// Healthy, except the analytics dashboard returns 500.
    DashboardDown,
    /// Healthy, except listing accounts omits the created account.
    ListMissingCreated,
}

/// Scripted `HttpClient` that records every request it receives.
struct ScriptedApi {
    behavior: Behavior,
    requests: Arc<Mutex<Vec<RequestSpec>>>,
}

impl ScriptedApi {
    fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn requests(&self) -> Arc<Mutex<Vec<RequestSpec>>> {
        Arc::clone(&self.requests)
    }
}

fn json_response(status: u16, body: &serde_json::Value) -> ResponseSpec {
    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    ResponseSpec::new(
        status,
        headers,
        body.to_string().into_bytes(),
        Duration::from_millis(5),
    )
}

fn respond(behavior: Behavior, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
    if behavior == Behavior::Unreachable {
        return Err(HttpClientError::ConnectionRefused {
            host: "localhost".to_string(),
            port: 5051,
        });
    }

    let path = request.url.strip_prefix(BASE).unwrap_or(&request.url);
    let bearer = format!("Bearer {TOKEN}");
    let authed = request.headers.get("Authorization") == Some(bearer.as_str());

    match (request.method, path) {
        (HttpMethod::Get, "" | "/") => Ok(json_response(200, &json!({"status": "ok"}))),
        (HttpMethod::Post, "/api/v1/auth/register") => {
            Ok(json_response(201, &json!({"message": "registered"})))
        }
        (HttpMethod::Post, "/api/v1/auth/login") => {
            if behavior == Behavior::LoginWithoutToken {
                Ok(json_response(200, &json!({"message": "ok"})))
            } else {
                Ok(json_response(
                    200,
                    &json!({"access_token": TOKEN, "token_type": "bearer"}),
                ))
            }
        }
        _ if !authed => Ok(json_response(401, &json!({"error": "unauthorized"}))),
        (HttpMethod::Get, "/api/v1/auth/me") => {
            Ok(json_response(200, &json!({"email": "test@example.com"})))
        }
        (HttpMethod::Post, "/api/v1/accounts") => {
            // Resource-specific id field, to exercise the fallback
            Ok(json_response(201, &json!({"account_id": 17})))
        }
        (HttpMethod::Get, "/api/v1/accounts") => {
            if behavior == Behavior::ListMissingCreated {
                Ok(json_response(200, &json!([{"id": 999}])))
            } else {
                Ok(json_response(
                    200,
                    &json!([{"id": 17, "name": "Test Checking Account"}]),
                ))
            }
        }
        (HttpMethod::Get, "/api/v1/accounts/17") => Ok(json_response(200, &json!({"id": 17}))),
        (HttpMethod::Post, "/api/v1/categories") => {
            Ok(json_response(200, &json!({"id": "cat-1"})))
        }
        (HttpMethod::Get, "/api/v1/categories") => {
            Ok(json_response(200, &json!([{"id": "cat-1"}])))
        }
        (HttpMethod::Post, "/api/v1/transactions") => Ok(json_response(201, &json!({"id": 99}))),
        (HttpMethod::Get, "/api/v1/transactions") => {
            Ok(json_response(200, &json!([{"id": 99}])))
        }
        (HttpMethod::Get, "/api/v1/transactions/99") => Ok(json_response(200, &json!({"id": 99}))),
        (HttpMethod::Put, "/api/v1/transactions/99") => {
            Ok(json_response(200, &json!({"id": 99, "amount": -55.0})))
        }
        (HttpMethod::Post, "/api/v1/budgets") => Ok(json_response(201, &json!({"budget_id": 5}))),
        (HttpMethod::Get, "/api/v1/budgets") => {
            Ok(json_response(200, &json!([{"budget_id": 5}])))
        }
        (HttpMethod::Post, "/api/v1/groups") => Ok(json_response(201, &json!({"id": 7}))),
        (HttpMethod::Get, "/api/v1/groups") => Ok(json_response(200, &json!([{"id": 7}]))),
        (HttpMethod::Get, "/api/v1/analytics/dashboard") => {
            if behavior == Behavior::DashboardDown {
                Ok(json_response(500, &json!({"error": "aggregation failed"})))
            } else {
                Ok(json_response(200, &json!({"net_worth": 1000.0})))
            }
        }
        (HttpMethod::Get, "/api/v1/analytics/spending-by-category")
        | (HttpMethod::Get, "/api/v1/analytics/monthly-trends") => {
            Ok(json_response(200, &json!([])))
        }
        (HttpMethod::Get, "/api/v1/currencies") => {
            Ok(json_response(200, &json!(["USD", "EUR", "GBP"])))
        }
        _ => Ok(json_response(404, &json!({"error": "not found"}))),
    }
}

impl HttpClient for ScriptedApi {
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + '_>> {
        self.requests.lock().unwrap().push(request.clone());
        let result = respond(self.behavior, request);
        Box::pin(std::future::ready(result))
    }
}

/// Deterministic clock.
struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

/// Reporter that records everything it is told.
#[derive(Default)]
struct Recorded {
    sections: Vec<String>,
    outcomes: Vec<CheckOutcome>,
    aborts: Vec<String>,
    summary: Option<RunReport>,
}

#[derive(Clone, Default)]
struct RecordingReporter {
    state: Arc<Mutex<Recorded>>,
}

impl Reporter for RecordingReporter {
    fn started(&mut self, _base_url: &str, _api_base: &str, _at: DateTime<Utc>) {}

    fn section(&mut self, title: &str) {
        self.state.lock().unwrap().sections.push(title.to_string());
    }

    fn outcome(&mut self, outcome: &CheckOutcome) {
        self.state.lock().unwrap().outcomes.push(outcome.clone());
    }

    fn aborted(&mut self, message: &str) {
        self.state.lock().unwrap().aborts.push(message.to_string());
    }

    fn summary(&mut self, report: &RunReport) {
        self.state.lock().unwrap().summary = Some(report.clone());
    }
}

async fn run_suite(
    behavior: Behavior,
) -> (RunReport, Arc<Mutex<Recorded>>, Arc<Mutex<Vec<RequestSpec>>>) {
    let client = ScriptedApi::new(behavior);
    let requests = client.requests();
    let reporter = RecordingReporter::default();
    let state = Arc::clone(&reporter.state);
    let config = RunConfig::new(BASE, "/api/v1").unwrap();

    let runner = SmokeRunner::new(client, FixedClock(fixed_time()), reporter, config);
    let report = runner.run().await;
    (report, state, requests)
}

#[tokio::test]
async fn healthy_server_passes_every_check() {
    let (report, state, _) = run_suite(Behavior::Healthy).await;

    assert!(report.all_passed(), "failures: {:?}", failed_names(&report));
    assert_eq!(report.total, 22);
    assert_eq!(report.passed, 22);
    assert!(!report.aborted);

    let state = state.lock().unwrap();
    assert!(state.aborts.is_empty());
    assert_eq!(state.outcomes.len(), 22);
    assert!(state.summary.is_some());
    assert_eq!(
        state.sections,
        vec![
            "HEALTH CHECK",
            "USER REGISTRATION",
            "USER LOGIN",
            "ACCOUNT MANAGEMENT",
            "CATEGORY MANAGEMENT",
            "TRANSACTION MANAGEMENT",
            "BUDGET MANAGEMENT",
            "GROUP MANAGEMENT",
            "ANALYTICS",
            "CURRENCIES",
            "AUTHORIZATION",
        ]
    );
}

#[tokio::test]
async fn captured_ids_flow_into_later_checks() {
    let (report, _, requests) = run_suite(Behavior::Healthy).await;
    assert!(report.all_passed());

    let requests = requests.lock().unwrap();
    let urls: Vec<_> = requests.iter().map(|r| r.url.as_str()).collect();

    // Ids captured from create responses drive the detail/update calls,
    // including the account id that arrived under `account_id`.
    assert!(urls.contains(&"http://localhost:5051/api/v1/accounts/17"));
    assert!(urls.contains(&"http://localhost:5051/api/v1/transactions/99"));

    // The transaction payload references both captured ids.
    let create_txn = requests
        .iter()
        .find(|r| r.method == HttpMethod::Post && r.url.ends_with("/transactions"))
        .unwrap();
    let body = create_txn.body.as_ref().unwrap();
    assert_eq!(body["account_id"], json!("17"));
    assert_eq!(body["category_id"], json!("cat-1"));
    assert_eq!(body["date"], json!(fixed_time().to_rfc3339()));
}

#[tokio::test]
async fn bearer_token_attached_after_login() {
    let (report, _, requests) = run_suite(Behavior::Healthy).await;
    assert!(report.all_passed());

    let requests = requests.lock().unwrap();
    let expected = format!("Bearer {TOKEN}");

    // health, register, login run before a token exists; the final
    // missing-token probe deliberately omits it.
    let (unauthed, authed): (Vec<_>, Vec<_>) = requests
        .iter()
        .partition(|r| r.headers.get("Authorization") != Some(expected.as_str()));
    assert_eq!(authed.len(), 18);
    assert_eq!(unauthed.len(), 4);

    let last = requests.last().unwrap();
    assert!(!last.is_authenticated());
    assert!(last.url.ends_with("/accounts"));
}

#[tokio::test]
async fn generated_credentials_are_deterministic_per_clock() {
    let (_, _, requests) = run_suite(Behavior::Healthy).await;
    let requests = requests.lock().unwrap();

    let register = &requests[1];
    let body = register.body.as_ref().unwrap();
    let expected_email = format!("test_{}@example.com", fixed_time().timestamp_millis());
    assert_eq!(body["email"], json!(expected_email));
    assert_eq!(body["password"], body["confirm_password"]);
}

#[tokio::test]
async fn unreachable_server_aborts_after_health_check() {
    let (report, state, requests) = run_suite(Behavior::Unreachable).await;

    assert!(report.aborted);
    assert_eq!(report.total, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(requests.lock().unwrap().len(), 1);

    let state = state.lock().unwrap();
    assert_eq!(
        state.aborts,
        vec!["Server is not responding. Cannot continue checks."]
    );
    let details = state.outcomes[0].details.clone().unwrap();
    assert!(details.contains("connection refused"), "{details}");
}

#[tokio::test]
async fn login_without_token_aborts_the_run() {
    let (report, state, _) = run_suite(Behavior::LoginWithoutToken).await;

    assert!(report.aborted);
    assert_eq!(report.total, 3);
    assert_eq!(report.passed, 2);
    assert_eq!(report.failed, 1);

    let state = state.lock().unwrap();
    assert_eq!(state.aborts, vec!["Login failed. Cannot continue checks."]);
    let login = state.outcomes.last().unwrap();
    assert!(!login.passed);
    assert!(login
        .details
        .as_deref()
        .unwrap()
        .contains("access_token"));
}

#[tokio::test]
async fn non_gating_failure_does_not_stop_the_run() {
    let (report, state, _) = run_suite(Behavior::DashboardDown).await;

    assert!(!report.all_passed());
    assert!(!report.aborted);
    assert_eq!(report.total, 22);
    assert_eq!(report.failed, 1);

    let state = state.lock().unwrap();
    let dashboard = state
        .outcomes
        .iter()
        .find(|o| o.name == "Dashboard stats")
        .unwrap();
    assert!(!dashboard.passed);
    let details = dashboard.details.as_deref().unwrap();
    assert!(details.contains("Status: 500"), "{details}");
    assert!(details.contains("aggregation failed"), "{details}");

    // Checks after the failure still ran.
    assert!(state.outcomes.iter().any(|o| o.name == "List currencies"));
    assert!(state
        .outcomes
        .iter()
        .any(|o| o.name == "Reject missing token"));
}

#[tokio::test]
async fn created_id_must_be_reflected_in_list() {
    let (report, state, _) = run_suite(Behavior::ListMissingCreated).await;

    assert!(!report.all_passed());

    let state = state.lock().unwrap();
    let list = state
        .outcomes
        .iter()
        .find(|o| o.name == "List accounts")
        .unwrap();
    assert!(!list.passed);
    assert_eq!(
        list.details.as_deref(),
        Some("Created account 17 missing from list")
    );
}

fn failed_names(report: &RunReport) -> Vec<&str> {
    report
        .outcomes
        .iter()
        .filter(|o| !o.passed)
        .map(|o| o.name.as_str())
        .collect()
}
