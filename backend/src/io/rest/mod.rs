//! # REST API Interface Layer
//!
//! HTTP endpoints for every DailyLife page, mounted under `/api`.
//! This layer handles:
//! - JSON request/response serialization
//! - Resolving the bearer token to a user before any per-user operation
//! - Parsing path dates and calendar query parameters
//! - Translating [`AppError`](crate::error::AppError) into status codes
//!
//! Handlers stay thin: business rules live in the domain services.

pub mod auth_apis;
pub mod exercise_apis;
pub mod extractors;
pub mod finance_apis;
pub mod logging_apis;
pub mod meal_apis;
pub mod pantry_apis;
pub mod recipe_apis;
pub mod task_apis;

use axum::Router;

use crate::AppState;

/// All API routes, to be nested under `/api`
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/users", auth_apis::users_router())
        .nest("/auth", auth_apis::router())
        .nest("/tasks", task_apis::router())
        .nest("/calendar-sync", task_apis::calendar_sync_router())
        .nest("/meals", meal_apis::router())
        .nest("/recipes", recipe_apis::router())
        .nest("/pantry", pantry_apis::router())
        .nest("/exercise", exercise_apis::router())
        .nest("/finance", finance_apis::router())
        .nest("/logs", logging_apis::router())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::storage::test_utils::TestEnvironment;
    use crate::{build_app_state, create_router};

    struct TestApp {
        router: Router,
        _env: TestEnvironment,
    }

    impl TestApp {
        fn new() -> Self {
            let env = TestEnvironment::new();
            let config = Config::from_lookup(|_| None).unwrap();
            let state = build_app_state(env.store.clone(), &config);
            let router = create_router(state, &config).unwrap();
            Self { router, _env: env }
        }

        async fn send(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header("authorization", format!("Bearer {}", token));
            }
            let request = match body {
                Some(body) => builder
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, value)
        }

        async fn sign_in(&self) -> String {
            let (status, body) = self
                .send(
                    "POST",
                    "/api/auth/sign-in",
                    None,
                    Some(json!({"email": "john@example.com", "password": "password123"})),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
            body["token"].as_str().unwrap().to_string()
        }
    }

    #[tokio::test]
    async fn test_requests_without_token_are_rejected() {
        let app = TestApp::new();

        let (status, body) = app.send("GET", "/api/tasks/2025-03-14", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Please sign in to continue");

        let (status, _) = app.send("GET", "/api/finance/summary", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_sign_in_and_session() {
        let app = TestApp::new();

        let (status, body) = app
            .send(
                "POST",
                "/api/auth/sign-in",
                None,
                Some(json!({"email": "john@example.com", "password": "nope"})),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid email or password");

        app.sign_in().await;
        let (_, session) = app.send("GET", "/api/auth/session", None, None).await;
        assert_eq!(session["authenticated"], true);
        assert_eq!(session["user"]["username"], "john_doe");

        let (status, _) = app.send("POST", "/api/auth/sign-out", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let (_, session) = app.send("GET", "/api/auth/session", None, None).await;
        assert_eq!(session["authenticated"], false);
    }

    #[tokio::test]
    async fn test_sign_up_conflict() {
        let app = TestApp::new();
        let (status, body) = app
            .send(
                "POST",
                "/api/auth/sign-up",
                None,
                Some(json!({
                    "username": "johnny",
                    "email": "john@example.com",
                    "password": "pw",
                    "agreed_to_terms": true
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "User with this email already exists");
    }

    #[tokio::test]
    async fn test_task_flow() {
        let app = TestApp::new();
        let token = app.sign_in().await;

        let (status, task) = app
            .send("POST", "/api/tasks/2025-03-14", Some(&token), Some(json!({"text": "Buy milk"})))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = task["id"].as_str().unwrap().to_string();

        let (status, toggled) = app
            .send("POST", &format!("/api/tasks/2025-03-14/{}/toggle", id), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(toggled["completed"], true);

        let (_, list) = app.send("GET", "/api/tasks/2025-03-14", Some(&token), None).await;
        assert_eq!(list["date"], "2025-03-14");
        assert_eq!(list["tasks"].as_array().unwrap().len(), 1);

        let (_, calendar) = app
            .send("GET", "/api/tasks/calendar?month=3&year=2025&selected=2025-03-14", Some(&token), None)
            .await;
        assert_eq!(calendar["month_label"], "March 2025");
        let marked: Vec<_> = calendar["days"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|d| d["summary"]["item_count"] == 1)
            .collect();
        assert_eq!(marked.len(), 1);

        let (status, _) = app
            .send("DELETE", &format!("/api/tasks/2025-03-14/{}", id), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = app
            .send("DELETE", &format!("/api/tasks/2025-03-14/{}", id), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bad_path_values_are_bad_requests() {
        let app = TestApp::new();
        let token = app.sign_in().await;

        let (status, body) = app.send("GET", "/api/tasks/14-03-2025", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("YYYY-MM-DD"));

        let (status, _) = app
            .send(
                "POST",
                "/api/meals/2025-03-14/brunch",
                Some(&token),
                Some(json!({"name": "Eggs", "calories": "200"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .send("GET", "/api/finance/calendar?month=13", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_meal_totals() {
        let app = TestApp::new();
        let token = app.sign_in().await;

        for (meal, name, calories) in [("breakfast", "Toast", "250"), ("dinner", "Curry", "700kcal")] {
            let (status, _) = app
                .send(
                    "POST",
                    &format!("/api/meals/2025-03-14/{}", meal),
                    Some(&token),
                    Some(json!({"name": name, "calories": calories})),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, day) = app.send("GET", "/api/meals/2025-03-14", Some(&token), None).await;
        assert_eq!(day["total_calories"], 950);
        assert_eq!(day["calories_by_meal"]["dinner"], 700);
    }

    #[tokio::test]
    async fn test_finance_flow() {
        let app = TestApp::new();
        let token = app.sign_in().await;

        app.send(
            "POST",
            "/api/finance/transactions",
            Some(&token),
            Some(json!({"description": "Pay", "amount": "$1,000", "kind": "income", "category": "Salary"})),
        )
        .await;
        let (status, _) = app
            .send(
                "POST",
                "/api/finance/transactions",
                Some(&token),
                Some(json!({"description": "Food", "amount": "250", "kind": "expense", "category": "Food"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, summary) = app.send("GET", "/api/finance/summary", Some(&token), None).await;
        assert_eq!(summary["balance"], 750.0);

        app.send(
            "POST",
            "/api/finance/recurring/2025-03-01",
            Some(&token),
            Some(json!({"description": "Rent", "amount": "800", "kind": "expense", "frequency": "monthly"})),
        )
        .await;
        let (_, projection) = app.send("GET", "/api/finance/projection", Some(&token), None).await;
        assert_eq!(projection["net"], -800.0);

        let (_, categories) = app.send("GET", "/api/finance/categories", None, None).await;
        assert_eq!(categories["income"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_recipe_suggestions_use_pantry() {
        let app = TestApp::new();
        let token = app.sign_in().await;

        let (status, _) = app
            .send("POST", "/api/recipes/suggestions", Some(&token), Some(json!({})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        app.send(
            "POST",
            "/api/pantry",
            Some(&token),
            Some(json!({"name": "Tomato", "quantity": 3.0, "category": "Vegetables"})),
        )
        .await;
        let (status, body) = app
            .send("POST", "/api/recipes/suggestions", Some(&token), Some(json!({"meal_type": "breakfast"})))
            .await;
        assert_eq!(status, StatusCode::OK);
        let recipes = body["recipes"].as_array().unwrap();
        assert_eq!(recipes.len(), 3);
        assert_eq!(recipes[0]["name"], "Fresh Tomato Stir Fry");
        assert_eq!(recipes[1]["name"], "Morning Tomato Scramble");

        let (status, saved) = app
            .send("POST", "/api/recipes/from-suggestion", Some(&token), Some(recipes[0].clone()))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(saved["name"], "Fresh Tomato Stir Fry");
    }

    #[tokio::test]
    async fn test_pantry_expiring_window() {
        let app = TestApp::new();
        let token = app.sign_in().await;
        let today = chrono::Local::now().date_naive();

        for (name, offset) in [("Milk", 2), ("Rice", 10)] {
            let expires = (today + chrono::Duration::days(offset)).format("%Y-%m-%d").to_string();
            let (status, _) = app
                .send(
                    "POST",
                    "/api/pantry",
                    Some(&token),
                    Some(json!({"name": name, "quantity": 1.0, "expiration_date": expires})),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, items) = app.send("GET", "/api/pantry/expiring", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<_> = items.as_array().unwrap().iter().map(|i| i["name"].clone()).collect();
        assert_eq!(names, vec![json!("Milk")]);

        let (_, items) = app.send("GET", "/api/pantry/expiring?days=10", Some(&token), None).await;
        assert_eq!(items.as_array().unwrap().len(), 2);

        let (status, _) = app.send("GET", "/api/pantry/expiring?days=-1", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .send("GET", "/api/pantry/expiring?days=1000000000", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_public_endpoints() {
        let app = TestApp::new();

        let (status, parts) = app.send("GET", "/api/exercise/body-parts", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(parts.as_array().unwrap().len(), 6);

        let (_, sync) = app.send("GET", "/api/calendar-sync/status", None, None).await;
        assert_eq!(sync["available"], false);

        let (status, _) = app
            .send("POST", "/api/logs", None, Some(json!({"level": "warn", "message": "hello"})))
            .await;
        assert_eq!(status, StatusCode::OK);

        let (_, users) = app.send("GET", "/api/users", None, None).await;
        assert_eq!(users["users"].as_array().unwrap().len(), 2);
    }
}
