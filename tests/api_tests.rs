//! API integration tests.
//!
//! These run against a live server with a seeded session token:
//!   MEDTRACK_TEST_TOKEN=<token> cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn auth_token() -> String {
    std::env::var("MEDTRACK_TEST_TOKEN").expect("MEDTRACK_TEST_TOKEN not set")
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_millis() as i64
}

/// Unique serial number per test run
fn serial(prefix: &str) -> String {
    format!("{}-{}", prefix, now_ms())
}

async fn create_equipment(client: &Client, name: &str, serial_number: &str) -> Value {
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .bearer_auth(auth_token())
        .json(&json!({
            "name": name,
            "serialNumber": serial_number,
            "category": "monitoring"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_missing_token_is_rejected() {
    let client = Client::new();

    let response = client
        .get(format!("{}/equipment", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_create_equipment_trims_and_defaults() {
    let client = Client::new();
    let sn = serial("SN-TRIM");

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .bearer_auth(auth_token())
        .json(&json!({
            "name": "  Infusion Pump  ",
            "serialNumber": &sn,
            "model": "   "
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "Infusion Pump");
    assert_eq!(body["status"], "operational");
    assert!(body["model"].is_null());
    assert_eq!(body["createdAt"], body["updatedAt"]);
}

#[tokio::test]
#[ignore]
async fn test_create_equipment_requires_name() {
    let client = Client::new();

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .bearer_auth(auth_token())
        .json(&json!({ "name": "   " }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], "MISSING_REQUIRED_FIELD");
}

#[tokio::test]
#[ignore]
async fn test_duplicate_serial_number_rejected() {
    let client = Client::new();
    let sn = serial("SN-DUP");

    create_equipment(&client, "ECG Monitor A", &sn).await;

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .bearer_auth(auth_token())
        .json(&json!({ "name": "ECG Monitor B", "serialNumber": &sn }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], "DUPLICATE_SERIAL_NUMBER");

    // Only the first row exists
    let listed: Value = client
        .get(format!("{}/equipment", BASE_URL))
        .bearer_auth(auth_token())
        .query(&[("search", sn.as_str())])
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(listed.as_array().expect("array").len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_schedule_requires_existing_equipment() {
    let client = Client::new();

    let response = client
        .post(format!("{}/maintenance-schedules", BASE_URL))
        .bearer_auth(auth_token())
        .json(&json!({
            "equipmentId": 99_999_999,
            "title": "Annual Check"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], "EQUIPMENT_NOT_FOUND");
}

#[tokio::test]
#[ignore]
async fn test_overdue_view_contains_exactly_the_overdue_schedule() {
    let client = Client::new();
    let equipment = create_equipment(&client, "ECG-1", &serial("SN-OVD")).await;
    let equipment_id = equipment["id"].as_i64().expect("id");
    let now = now_ms();

    // One overdue, one inactive overdue, one due in the future
    let cases = [
        ("Overdue Check", now - 1000, true),
        ("Inactive Check", now - 1000, false),
        ("Future Check", now + 86_400_000, true),
    ];
    let mut overdue_id = 0;
    for (title, next_due, is_active) in cases {
        let created: Value = client
            .post(format!("{}/maintenance-schedules", BASE_URL))
            .bearer_auth(auth_token())
            .json(&json!({
                "equipmentId": equipment_id,
                "title": title,
                "nextDue": next_due,
                "isActive": is_active
            }))
            .send()
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse response");
        if title == "Overdue Check" {
            overdue_id = created["id"].as_i64().expect("id");
        }
    }

    let overdue: Value = client
        .get(format!("{}/maintenance-schedules/overdue", BASE_URL))
        .bearer_auth(auth_token())
        .query(&[("limit", "100")])
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let ids: Vec<i64> = overdue
        .as_array()
        .expect("array")
        .iter()
        .filter(|s| s["equipmentId"].as_i64() == Some(equipment_id))
        .map(|s| s["id"].as_i64().expect("id"))
        .collect();
    assert_eq!(ids, vec![overdue_id]);
}

#[tokio::test]
#[ignore]
async fn test_upcoming_view_honors_the_thirty_day_window() {
    let client = Client::new();
    let equipment = create_equipment(&client, "Ventilator-2", &serial("SN-UPC")).await;
    let equipment_id = equipment["id"].as_i64().expect("id");
    let now = now_ms();
    let thirty_days = 2_592_000_000i64;

    let cases = [
        ("Due Soon", now + 3_600_000),
        ("Past Window", now + thirty_days + 3_600_000),
        ("Already Overdue", now - 3_600_000),
    ];
    for (title, next_due) in cases {
        let response = client
            .post(format!("{}/maintenance-schedules", BASE_URL))
            .bearer_auth(auth_token())
            .json(&json!({
                "equipmentId": equipment_id,
                "title": title,
                "nextDue": next_due
            }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);
    }

    let upcoming: Value = client
        .get(format!("{}/maintenance-schedules/upcoming", BASE_URL))
        .bearer_auth(auth_token())
        .query(&[("limit", "100")])
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let titles: Vec<&str> = upcoming
        .as_array()
        .expect("array")
        .iter()
        .filter(|s| s["equipmentId"].as_i64() == Some(equipment_id))
        .map(|s| s["title"].as_str().expect("title"))
        .collect();
    assert_eq!(titles, vec!["Due Soon"]);
}

#[tokio::test]
#[ignore]
async fn test_log_requires_existing_schedule_when_linked() {
    let client = Client::new();
    let equipment = create_equipment(&client, "Infusion Pump B", &serial("SN-LOG")).await;
    let equipment_id = equipment["id"].as_i64().expect("id");

    let response = client
        .post(format!("{}/maintenance-logs", BASE_URL))
        .bearer_auth(auth_token())
        .json(&json!({
            "equipmentId": equipment_id,
            "scheduleId": 99_999_999,
            "title": "Filter swap",
            "type": "preventive",
            "performedBy": "c.dubois",
            "performedAt": now_ms()
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], "SCHEDULE_NOT_FOUND");
}

#[tokio::test]
#[ignore]
async fn test_maintenance_history_is_most_recent_first() {
    let client = Client::new();
    let equipment = create_equipment(&client, "Dialysis Unit", &serial("SN-HIST")).await;
    let equipment_id = equipment["id"].as_i64().expect("id");
    let now = now_ms();

    for (title, performed_at) in [("Older entry", now - 86_400_000), ("Newer entry", now)] {
        let response = client
            .post(format!("{}/maintenance-logs", BASE_URL))
            .bearer_auth(auth_token())
            .json(&json!({
                "equipmentId": equipment_id,
                "title": title,
                "type": "preventive",
                "performedBy": "c.dubois",
                "performedAt": performed_at
            }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);
    }

    let history: Value = client
        .get(format!(
            "{}/equipment/{}/maintenance-history",
            BASE_URL, equipment_id
        ))
        .bearer_auth(auth_token())
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let titles: Vec<&str> = history
        .as_array()
        .expect("array")
        .iter()
        .map(|l| l["title"].as_str().expect("title"))
        .collect();
    assert_eq!(titles, vec!["Newer entry", "Older entry"]);
}

#[tokio::test]
#[ignore]
async fn test_dashboard_status_counts_sum_to_total() {
    let client = Client::new();

    let stats: Value = client
        .get(format!("{}/dashboard/stats", BASE_URL))
        .bearer_auth(auth_token())
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let by_status = &stats["equipmentByStatus"];
    let sum = by_status["operational"].as_i64().expect("count")
        + by_status["maintenance"].as_i64().expect("count")
        + by_status["out_of_service"].as_i64().expect("count")
        + by_status["retired"].as_i64().expect("count");
    assert_eq!(sum, stats["totalEquipment"].as_i64().expect("total"));
}

#[tokio::test]
#[ignore]
async fn test_partial_work_order_update_touches_only_status() {
    let client = Client::new();
    let equipment = create_equipment(&client, "Defibrillator-3", &serial("SN-WO")).await;
    let equipment_id = equipment["id"].as_i64().expect("id");

    let order: Value = client
        .post(format!("{}/work-orders", BASE_URL))
        .bearer_auth(auth_token())
        .json(&json!({
            "equipmentId": equipment_id,
            "title": "Replace battery",
            "type": "repair",
            "priority": "high",
            "assignedTo": "j.moreau"
        }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let updated: Value = client
        .put(format!("{}/work-orders/{}", BASE_URL, order["id"]))
        .bearer_auth(auth_token())
        .json(&json!({ "status": "completed" }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(updated["status"], "completed");
    assert_eq!(updated["title"], order["title"]);
    assert_eq!(updated["priority"], order["priority"]);
    assert_eq!(updated["assignedTo"], order["assignedTo"]);
    assert_eq!(updated["createdAt"], order["createdAt"]);
    assert!(
        updated["updatedAt"].as_i64().expect("updatedAt")
            >= order["updatedAt"].as_i64().expect("updatedAt")
    );
}

#[tokio::test]
#[ignore]
async fn test_delete_equipment_blocked_by_dependent_work_order() {
    let client = Client::new();
    let equipment = create_equipment(&client, "Autoclave-4", &serial("SN-DEL")).await;
    let equipment_id = equipment["id"].as_i64().expect("id");

    let response = client
        .post(format!("{}/work-orders", BASE_URL))
        .bearer_auth(auth_token())
        .json(&json!({
            "equipmentId": equipment_id,
            "title": "Pressure valve inspection",
            "type": "inspection"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let delete_response = client
        .delete(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .bearer_auth(auth_token())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(delete_response.status(), 409);
    let body: Value = delete_response
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["code"], "FOREIGN_KEY_CONSTRAINT");

    // The equipment row still exists
    let get_response = client
        .get(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .bearer_auth(auth_token())
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(get_response.status(), 200);
}

#[tokio::test]
#[ignore]
async fn test_unknown_sort_field_falls_back_silently() {
    let client = Client::new();

    let response = client
        .get(format!("{}/work-orders", BASE_URL))
        .bearer_auth(auth_token())
        .query(&[("sort", "definitelyNotAColumn"), ("limit", "5")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[ignore]
async fn test_non_numeric_id_is_rejected_with_invalid_id() {
    let client = Client::new();

    let response = client
        .get(format!("{}/equipment/not-a-number", BASE_URL))
        .bearer_auth(auth_token())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], "INVALID_ID");
}

#[tokio::test]
#[ignore]
async fn test_get_missing_record_returns_not_found() {
    let client = Client::new();

    let response = client
        .get(format!("{}/maintenance-logs/99999999", BASE_URL))
        .bearer_auth(auth_token())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], "NOT_FOUND");
}
