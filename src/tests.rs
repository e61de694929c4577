#[cfg(test)]
mod integration_tests {
    use crate::test_utils::test_utils::{
        ENGLISH, MATH, TUTOR_EMAIL, TUTOR_PASSWORD, setup_seeded_app, setup_test_app,
        setup_test_app_with_config,
    };
    use crate::config::AppConfig;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    async fn seeded_server() -> (TestServer, crate::test_utils::test_utils::Fixture) {
        let (app, fixture) = setup_seeded_app().await;
        (TestServer::new(app).unwrap(), fixture)
    }

    fn register_body(email: &str) -> Value {
        json!({
            "fname": "Hange",
            "lname": "Zoe",
            "email": email,
            "password": "titans",
            "role": "T",
            "phone": "0812345678",
            "line": null,
            "facebook": null
        })
    }

    #[tokio::test]
    async fn test_timed_out_request_has_error_body() {
        let config = AppConfig {
            request_timeout_secs: 0,
            ..AppConfig::default()
        };
        let server = TestServer::new(setup_test_app_with_config(config).await).unwrap();

        let response = server.get("/api/statistics").await;

        response.assert_status(StatusCode::REQUEST_TIMEOUT);
        let body: Value = response.json();
        assert_eq!(body["error"], "Request timed out");
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = TestServer::new(setup_test_app().await).unwrap();

        let response = server.get("/api/health").await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["message"], "Server is running!");
        assert_eq!(body["database"], "connected");
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let (server, _) = seeded_server().await;

        let response = server
            .post("/api/login")
            .json(&json!({"email": "nobody@example.com", "password": "x"}))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        response.assert_json(&json!({"error": "User not found"}));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (server, _) = seeded_server().await;

        let response = server
            .post("/api/login")
            .json(&json!({"email": TUTOR_EMAIL, "password": "wrong"}))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        response.assert_json(&json!({"error": "Wrong password"}));
    }

    #[tokio::test]
    async fn test_login_success() {
        let (server, fixture) = seeded_server().await;

        let response = server
            .post("/api/login")
            .json(&json!({"email": TUTOR_EMAIL.to_uppercase(), "password": TUTOR_PASSWORD}))
            .await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["account_id"], fixture.account_id);
        assert_eq!(body["role"], "T");
        assert_eq!(body["fname"], "Anong");
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let (server, _) = seeded_server().await;

        let response = server.post("/api/login").json(&json!({"email": "", "password": ""})).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let server = TestServer::new(setup_test_app().await).unwrap();

        let response = server.post("/api/register").json(&register_body("hange@example.com")).await;
        response.assert_status(StatusCode::CREATED);
        let account_id = response.json::<Value>()["account_id"].as_i64().unwrap();

        let tutor = server.get(&format!("/api/getTutorId?account_id={account_id}")).await;
        tutor.assert_status(StatusCode::OK);
        assert!(tutor.json::<Value>()["tutor_id"].as_i64().is_some());

        let login = server
            .post("/api/login")
            .json(&json!({"email": "hange@example.com", "password": "titans"}))
            .await;
        login.assert_status(StatusCode::OK);
        assert_eq!(login.json::<Value>()["account_id"].as_i64(), Some(account_id));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (server, _) = seeded_server().await;

        let response = server.post("/api/register").json(&register_body(TUTOR_EMAIL)).await;

        response.assert_status(StatusCode::CONFLICT);
        response.assert_json(&json!({"error": "Email already registered"}));
    }

    #[tokio::test]
    async fn test_register_invalid_form() {
        let server = TestServer::new(setup_test_app().await).unwrap();

        let mut body = register_body("not-an-email");
        body["role"] = json!("X");
        let response = server.post("/api/register").json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let error = response.json::<Value>()["error"].as_str().unwrap().to_string();
        assert!(error.contains("Invalid email address"));
        assert!(error.contains("Role must be P or T"));
    }

    #[tokio::test]
    async fn test_get_tutor_id() {
        let (server, fixture) = seeded_server().await;

        let missing = server.get("/api/getTutorId").await;
        missing.assert_status(StatusCode::BAD_REQUEST);
        missing.assert_json(&json!({"error": "account_id is required"}));

        let parent = server
            .get(&format!("/api/getTutorId?account_id={}", fixture.parent_account_id))
            .await;
        parent.assert_status(StatusCode::NOT_FOUND);

        let found = server
            .get(&format!("/api/getTutorId?account_id={}", fixture.account_id))
            .await;
        found.assert_status(StatusCode::OK);
        found.assert_json(&json!({"tutor_id": fixture.tutor_id}));
    }

    #[tokio::test]
    async fn test_dashboard_requires_month_and_year() {
        let (server, fixture) = seeded_server().await;

        let response = server
            .get(&format!("/api/dashboard?month=3&tutor_id={}", fixture.tutor_id))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"error": "Month and year are required"}));
    }

    #[tokio::test]
    async fn test_dashboard_values() {
        let (server, fixture) = seeded_server().await;

        let response = server
            .get(&format!("/api/dashboard?month=03&year=2025&tutor_id={}", fixture.tutor_id))
            .await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["total_hours"].as_f64(), Some(4.0));
        assert_eq!(body["total_income"].as_f64(), Some(1100.0));
        assert_eq!(body["total_sessions"], 3);
        assert_eq!(body["total_students"], 2);
        assert_eq!(body["month"], "03");
        assert_eq!(body["year"], "2025");
    }

    #[tokio::test]
    async fn test_course_summary_and_admin_statistics() {
        let (server, fixture) = seeded_server().await;

        let summary = server
            .get(&format!("/api/getCourseSummary?month=3&year=2025&tutor_id={}", fixture.tutor_id))
            .await;
        summary.assert_status(StatusCode::OK);
        let rows: Vec<Value> = summary.json();
        assert_eq!(rows.len(), 2);

        let all = server.get("/api/statistics").await;
        all.assert_status(StatusCode::OK);
        let body: Value = all.json();
        assert_eq!(body["total_sessions"], 4);
        assert_eq!(body["month"], "all");

        let bad = server.get("/api/statistics?month=13&year=2025").await;
        bad.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_pending_overview_groups_students() {
        let (server, fixture) = seeded_server().await;

        let response = server
            .get(&format!("/api/getPendingOverview?current_tutor_id={}", fixture.tutor_id))
            .await;

        response.assert_status(StatusCode::OK);
        let students: Vec<Value> = response.json();
        assert_eq!(students.len(), 2);

        let armin = &students[0];
        assert_eq!(armin["student_name"], "Armin Arlert");
        assert_eq!(armin["total_pending_hours"].as_f64(), Some(2.5));
        assert_eq!(armin["total_outstanding"].as_f64(), Some(750.0));
        assert_eq!(armin["price"].as_f64(), Some(300.0));
        assert_eq!(armin["payment_status"], "overdue");

        let mikasa = &students[1];
        assert_eq!(mikasa["course_options"], json!([MATH, ENGLISH]));
        assert_eq!(mikasa["total_pending_hours"].as_f64(), Some(3.0));
        assert_eq!(mikasa["total_outstanding"].as_f64(), Some(800.0));
        assert_eq!(mikasa["price"], "multiple");
        assert_eq!(mikasa["payment_status"], "pending");
    }

    #[tokio::test]
    async fn test_pending_overview_course_filter() {
        let (server, fixture) = seeded_server().await;

        let response = server
            .get("/api/getPendingOverview")
            .add_query_param("current_tutor_id", fixture.tutor_id)
            .add_query_param("course_name", ENGLISH)
            .await;

        response.assert_status(StatusCode::OK);
        let students: Vec<Value> = response.json();
        let mikasa = &students[1];
        assert_eq!(mikasa["selected_course"], ENGLISH);
        assert_eq!(mikasa["total_outstanding"].as_f64(), Some(200.0));
        assert_eq!(mikasa["price"].as_f64(), Some(200.0));
        // The selector still lists every course
        assert_eq!(mikasa["course_options"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_hours_pending_requires_tutor() {
        let (server, _) = seeded_server().await;

        let response = server.get("/api/getHoursPending").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"error": "current_tutor_id is required"}));
    }

    #[tokio::test]
    async fn test_update_payment_status() {
        let (server, fixture) = seeded_server().await;

        let invalid = server
            .put("/api/updatePaymentStatus")
            .json(&json!({"payment_id": fixture.overdue_payment_id, "status": "LOST"}))
            .await;
        invalid.assert_status(StatusCode::BAD_REQUEST);

        let unknown = server
            .put("/api/updatePaymentStatus")
            .json(&json!({"payment_id": 9999, "status": "PAID"}))
            .await;
        unknown.assert_status(StatusCode::NOT_FOUND);

        let paid = server
            .put("/api/updatePaymentStatus")
            .json(&json!({"payment_id": fixture.overdue_payment_id, "status": "paid"}))
            .await;
        paid.assert_status(StatusCode::OK);
        paid.assert_json(&json!({"success": true}));

        let details = server
            .get(&format!("/api/getDetailPayment?current_tutor_id={}", fixture.tutor_id))
            .await;
        let lines: Vec<Value> = details.json();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["index"], 1);
        assert_eq!(lines[0]["status"], "PAID");
        assert!(lines[0]["paid_date"].is_string());
    }

    #[tokio::test]
    async fn test_tutor_home_and_note_update() {
        let (server, fixture) = seeded_server().await;

        let schedule = server
            .post("/api/TutorHome")
            .json(&json!({"tutor_id": fixture.tutor_id}))
            .await;
        schedule.assert_status(StatusCode::OK);
        let entries: Vec<Value> = schedule.json();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0]["date"], "2025-02-12");

        let updated = server
            .put("/api/updateNote")
            .json(&json!({"session_id": fixture.march_session_id, "note": "Homework p.12"}))
            .await;
        updated.assert_status(StatusCode::OK);
        updated.assert_json(&json!({"success": true}));

        let schedule: Vec<Value> = server
            .post("/api/TutorHome")
            .json(&json!({"tutor_id": fixture.tutor_id}))
            .await
            .json();
        let session = schedule
            .iter()
            .find(|e| e["id"] == fixture.march_session_id)
            .unwrap();
        assert_eq!(session["note"], "Homework p.12");

        let missing = server
            .put("/api/updateNote")
            .json(&json!({"session_id": 9999, "note": "x"}))
            .await;
        missing.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_catalog_endpoints() {
        let (server, _) = seeded_server().await;

        let students: Vec<Value> = server.get("/api/students").await.json();
        assert_eq!(students.len(), 2);

        let march: Vec<Value> = server.get("/api/classsession?month=3&year=2025").await.json();
        assert_eq!(march.len(), 3);

        let everything: Vec<Value> = server.get("/api/classsession").await.json();
        assert_eq!(everything.len(), 4);
    }

    #[tokio::test]
    async fn test_income_statistics_rows() {
        let (server, fixture) = seeded_server().await;

        let response = server
            .get(&format!("/api/income/statistics/{}", fixture.tutor_id))
            .await;

        response.assert_status(StatusCode::OK);
        let rows: Vec<Value> = response.json();
        assert_eq!(rows.len(), 6);
        let outstanding = rows.iter().find(|r| r["period"] == "outstanding").unwrap();
        assert_eq!(outstanding["amount"].as_f64(), Some(1550.0));

        let bad = server.get("/api/income/statistics/abc").await;
        bad.assert_status(StatusCode::BAD_REQUEST);
    }
}
