//! The smoke suite runner.
//!
//! Drives a fixed, partially-gated sequence of HTTP calls against the
//! target server. The first three steps (health, registration, login)
//! are gating: if one fails the run stops, because every later check
//! assumes a valid session. All remaining checks run unconditionally
//! and independently; a failure is reported and the runner proceeds.
//!
//! Transport errors, unexpected statuses, and missing JSON fields are
//! all converted into failed outcomes; nothing panics or propagates.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde_json::json;

use fincheck_domain::config::HEALTH_TIMEOUT;
use fincheck_domain::{
    CheckOutcome, Credentials, RequestSpec, Resource, ResponseSpec, RunConfig, RunReport, Session,
    StatusExpectation,
};

use crate::extract;
use crate::ports::{Clock, HttpClient, Reporter};

/// Sequential smoke suite runner.
///
/// Generic over its ports so tests can script the HTTP exchange and
/// record reporting calls.
pub struct SmokeRunner<C, K, R> {
    client: C,
    clock: K,
    reporter: R,
    config: RunConfig,
    session: Session,
    outcomes: Vec<CheckOutcome>,
}

impl<C, K, R> SmokeRunner<C, K, R>
where
    C: HttpClient,
    K: Clock,
    R: Reporter,
{
    /// Creates a runner over the given ports and configuration.
    #[must_use]
    pub fn new(client: C, clock: K, reporter: R, config: RunConfig) -> Self {
        Self {
            client,
            clock,
            reporter,
            config,
            session: Session::new(),
            outcomes: Vec::new(),
        }
    }

    /// Runs the full suite and returns the aggregate report.
    pub async fn run(mut self) -> RunReport {
        let started_at = self.clock.now();
        let timer = Instant::now();
        self.reporter
            .started(&self.config.base(), &self.config.api_base(), started_at);

        let credentials = self
            .config
            .credentials
            .clone()
            .unwrap_or_else(|| Credentials::generated(started_at));

        if !self.health_check().await {
            self.reporter
                .aborted("Server is not responding. Cannot continue checks.");
            return self.finish(started_at, &timer, true);
        }
        if !self.registration(&credentials).await {
            self.reporter
                .aborted("Registration failed. Cannot continue checks.");
            return self.finish(started_at, &timer, true);
        }
        if !self.login(&credentials).await {
            self.reporter.aborted("Login failed. Cannot continue checks.");
            return self.finish(started_at, &timer, true);
        }

        self.current_user().await;
        self.accounts().await;
        self.categories().await;
        self.transactions().await;
        self.budgets().await;
        self.groups().await;
        self.analytics().await;
        self.currencies().await;
        self.authorization().await;

        self.finish(started_at, &timer, false)
    }

    fn finish(mut self, started_at: DateTime<Utc>, timer: &Instant, aborted: bool) -> RunReport {
        let duration_ms = timer.elapsed().as_millis() as u64;
        let outcomes = std::mem::take(&mut self.outcomes);
        let report = RunReport::new(started_at, outcomes, duration_ms, aborted);
        self.reporter.summary(&report);
        report
    }

    /// Records an outcome and returns whether it passed.
    fn record(&mut self, outcome: CheckOutcome) -> bool {
        self.reporter.outcome(&outcome);
        let passed = outcome.passed;
        self.outcomes.push(outcome);
        passed
    }

    /// Applies the run timeout and, once login has succeeded, the
    /// bearer token to a request.
    fn request(&self, spec: RequestSpec) -> RequestSpec {
        let spec = spec.with_timeout(self.config.timeout);
        match self.session.token() {
            Some(token) => spec.with_bearer(token),
            None => spec,
        }
    }

    /// Executes a request and verifies the status expectation.
    ///
    /// On an unexpected status or transport error a failed outcome is
    /// recorded and `None` is returned; on success the response is
    /// handed back so the caller can record its own pass details.
    async fn execute(
        &mut self,
        name: &str,
        request: RequestSpec,
        expected: &StatusExpectation,
    ) -> Option<ResponseSpec> {
        match self.client.execute(&request).await {
            Ok(response) if expected.matches(response.status) => Some(response),
            Ok(response) => {
                let details = if response.body.is_empty() {
                    format!("Status: {}", response.status_code())
                } else {
                    format!(
                        "Status: {}, Response: {}",
                        response.status_code(),
                        response.body_preview()
                    )
                };
                self.record(CheckOutcome::fail(name, details));
                None
            }
            Err(error) => {
                self.record(CheckOutcome::fail(name, error.to_string()));
                None
            }
        }
    }

    /// Executes a request and records a plain status-based outcome.
    async fn check(
        &mut self,
        name: &str,
        request: RequestSpec,
        expected: &StatusExpectation,
    ) -> bool {
        let Some(response) = self.execute(name, request, expected).await else {
            return false;
        };
        self.record(CheckOutcome::pass_with(
            name,
            format!("Status: {}", response.status_code()),
        ))
    }

    async fn health_check(&mut self) -> bool {
        self.reporter.section("HEALTH CHECK");
        let request = RequestSpec::get(self.config.base()).with_timeout(HEALTH_TIMEOUT);
        let Some(response) = self
            .execute("Server responding", request, &StatusExpectation::responsive())
            .await
        else {
            return false;
        };
        self.record(CheckOutcome::pass_with(
            "Server responding",
            format!("Status: {}", response.status_code()),
        ))
    }

    async fn registration(&mut self, credentials: &Credentials) -> bool {
        self.reporter.section("USER REGISTRATION");
        let payload = json!({
            "email": credentials.email,
            "password": credentials.password,
            "confirm_password": credentials.password,
        });
        let request = self.request(RequestSpec::post(
            self.config.endpoint("auth/register"),
            payload,
        ));
        if self
            .execute("User registration", request, &StatusExpectation::created())
            .await
            .is_none()
        {
            return false;
        }
        self.record(CheckOutcome::pass_with(
            "User registration",
            format!("User: {}", credentials.email),
        ))
    }

    async fn login(&mut self, credentials: &Credentials) -> bool {
        self.reporter.section("USER LOGIN");
        let payload = json!({
            "email": credentials.email,
            "password": credentials.password,
        });
        let request = self.request(RequestSpec::post(
            self.config.endpoint("auth/login"),
            payload,
        ));
        let Some(response) = self
            .execute("User login", request, &StatusExpectation::exact(200))
            .await
        else {
            return false;
        };
        match extract::bearer_token(&response) {
            Ok(token) => {
                self.session.set_token(token);
                self.record(CheckOutcome::pass_with("User login", "Token received"))
            }
            Err(error) => self.record(CheckOutcome::fail("User login", error.to_string())),
        }
    }

    async fn current_user(&mut self) {
        let request = self.request(RequestSpec::get(self.config.endpoint("auth/me")));
        self.check(
            "Fetch current user",
            request,
            &StatusExpectation::exact(200),
        )
        .await;
    }

    async fn accounts(&mut self) {
        self.reporter.section("ACCOUNT MANAGEMENT");
        let payload = json!({
            "name": "Test Checking Account",
            "account_type": "checking",
            "balance": 1000.00,
            "currency": "USD",
        });
        self.create(Resource::Accounts, payload).await;
        self.list(Resource::Accounts).await;
        self.get_by_id(Resource::Accounts).await;
    }

    async fn categories(&mut self) {
        self.reporter.section("CATEGORY MANAGEMENT");
        let payload = json!({
            "name": "Test Groceries",
            "type": "expense",
            "color": "#FF5733",
        });
        self.create(Resource::Categories, payload).await;
        self.list(Resource::Categories).await;
    }

    async fn transactions(&mut self) {
        self.reporter.section("TRANSACTION MANAGEMENT");
        let account = self.session.captured(Resource::Accounts).cloned();
        let category = self.session.captured(Resource::Categories).cloned();
        let (Some(account_id), Some(category_id)) = (account, category) else {
            self.record(CheckOutcome::fail(
                "Create transaction",
                "Missing account or category",
            ));
            return;
        };

        let payload = json!({
            "account_id": account_id.as_str(),
            "category_id": category_id.as_str(),
            "amount": -50.00,
            "description": "Test grocery purchase",
            "date": self.clock.now().to_rfc3339(),
            "type": "expense",
        });
        self.create(Resource::Transactions, payload).await;
        self.list(Resource::Transactions).await;
        self.get_by_id(Resource::Transactions).await;
        self.update(
            Resource::Transactions,
            json!({
                "amount": -55.00,
                "description": "Updated grocery purchase",
            }),
        )
        .await;
    }

    async fn budgets(&mut self) {
        self.reporter.section("BUDGET MANAGEMENT");
        let Some(category_id) = self.session.captured(Resource::Categories).cloned() else {
            self.record(CheckOutcome::fail("Create budget", "Missing category"));
            return;
        };

        let payload = json!({
            "category_id": category_id.as_str(),
            "amount": 500.00,
            "period": "monthly",
            "start_date": self.clock.now().to_rfc3339(),
        });
        self.create(Resource::Budgets, payload).await;
        self.list(Resource::Budgets).await;
    }

    async fn groups(&mut self) {
        self.reporter.section("GROUP MANAGEMENT");
        let payload = json!({
            "name": "Test Household",
            "description": "Test household group",
        });
        self.create(Resource::Groups, payload).await;
        self.list(Resource::Groups).await;
    }

    async fn analytics(&mut self) {
        self.reporter.section("ANALYTICS");
        let endpoints = [
            ("Dashboard stats", "analytics/dashboard"),
            ("Spending by category", "analytics/spending-by-category"),
            ("Monthly trends", "analytics/monthly-trends"),
        ];
        for (name, path) in endpoints {
            let request = self.request(RequestSpec::get(self.config.endpoint(path)));
            self.check(name, request, &StatusExpectation::exact(200))
                .await;
        }
    }

    async fn currencies(&mut self) {
        self.reporter.section("CURRENCIES");
        let request = self.request(RequestSpec::get(self.config.endpoint("currencies")));
        let Some(response) = self
            .execute(
                "List currencies",
                request,
                &StatusExpectation::exact(200),
            )
            .await
        else {
            return;
        };
        let details = extract::list_len(&response).map_or_else(
            || format!("Status: {}", response.status_code()),
            |n| format!("Found {n} currencies"),
        );
        self.record(CheckOutcome::pass_with("List currencies", details));
    }

    /// Protected endpoints must reject a request that carries no
    /// bearer token.
    async fn authorization(&mut self) {
        self.reporter.section("AUTHORIZATION");
        let request = RequestSpec::get(self.config.endpoint("accounts"))
            .with_timeout(self.config.timeout);
        self.check(
            "Reject missing token",
            request,
            &StatusExpectation::exact(401),
        )
        .await;
    }

    /// POST to a resource collection, capturing the returned id.
    async fn create(&mut self, resource: Resource, payload: serde_json::Value) -> bool {
        let name = format!("Create {}", resource.singular());
        let request = self.request(RequestSpec::post(
            self.config.endpoint(resource.collection()),
            payload,
        ));
        let Some(response) = self
            .execute(&name, request, &StatusExpectation::created())
            .await
        else {
            return false;
        };

        match extract::created_id(resource, &response) {
            Some(id) => {
                let details = format!("{} ID: {id}", title_case(resource.singular()));
                self.session.capture(resource, id);
                self.record(CheckOutcome::pass_with(name, details))
            }
            None => self.record(CheckOutcome::pass_with(
                name,
                "Created (no id field in response)",
            )),
        }
    }

    /// GET a resource collection, verifying a previously captured id
    /// is reflected in the listing.
    async fn list(&mut self, resource: Resource) {
        let name = format!("List {}", resource.collection());
        let request = self.request(RequestSpec::get(
            self.config.endpoint(resource.collection()),
        ));
        let Some(response) = self
            .execute(&name, request, &StatusExpectation::exact(200))
            .await
        else {
            return;
        };

        let captured = self.session.captured(resource).cloned();
        let outcome = match (extract::list_len(&response), captured) {
            (Some(n), Some(id)) => {
                if extract::id_reflected(resource, &response, &id) == Some(false) {
                    CheckOutcome::fail(
                        name,
                        format!("Created {} {id} missing from list", resource.singular()),
                    )
                } else {
                    CheckOutcome::pass_with(name, format!("Found {n} {}", resource.collection()))
                }
            }
            (Some(n), None) => {
                CheckOutcome::pass_with(name, format!("Found {n} {}", resource.collection()))
            }
            (None, _) => {
                CheckOutcome::pass_with(name, format!("Status: {}", response.status_code()))
            }
        };
        self.record(outcome);
    }

    /// GET a single entity by its captured id.
    async fn get_by_id(&mut self, resource: Resource) {
        let name = format!("Get {} details", resource.singular());
        let Some(id) = self.session.captured(resource).cloned() else {
            self.record(CheckOutcome::fail(
                name,
                format!("No {} id captured", resource.singular()),
            ));
            return;
        };
        let request = self.request(RequestSpec::get(
            self.config.endpoint(&format!("{}/{id}", resource.collection())),
        ));
        self.check(&name, request, &StatusExpectation::exact(200))
            .await;
    }

    /// PUT a partial update to a single entity by its captured id.
    async fn update(&mut self, resource: Resource, patch: serde_json::Value) {
        let name = format!("Update {}", resource.singular());
        let Some(id) = self.session.captured(resource).cloned() else {
            self.record(CheckOutcome::fail(
                name,
                format!("No {} id captured", resource.singular()),
            ));
            return;
        };
        let request = self.request(RequestSpec::put(
            self.config.endpoint(&format!("{}/{id}", resource.collection())),
            patch,
        ));
        self.check(&name, request, &StatusExpectation::exact(200))
            .await;
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}
