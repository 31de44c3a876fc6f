// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the complete contact pipeline.
//!
//! Each test creates an isolated TestHarness with temp SQLite (or a mock
//! store) and drives the real router. Tests are independent and
//! order-insensitive.

use std::collections::HashSet;
use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use eerbeek_core::{Subject, SubmissionId, Urgency};
use eerbeek_test_utils::{MockChat, MockStorage, TestHarness};
use serde_json::json;

fn jan_jansen() -> serde_json::Value {
    json!({
        "naam": "Jan Jansen",
        "bedrijf": "",
        "email": "jan@example.nl",
        "telefoon": "",
        "onderwerp": "offerte",
        "bericht": "Graag een offerte voor een nieuw netwerk.",
        "privacy": true,
        "nieuwsbrief": false
    })
}

// ---- Contact submission scenarios ----

#[tokio::test]
async fn test_quote_request_is_accepted_and_stored() {
    let harness = TestHarness::new().await.unwrap();

    let before = Utc::now();
    let (status, body) = harness.submit_contact(&jan_jansen()).await.unwrap();
    let after = Utc::now();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "message": "Bericht succesvol verzonden!"})
    );
    assert_eq!(harness.contact_count().await.unwrap(), 1);

    let saved = harness
        .storage()
        .get_contact(SubmissionId(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(saved.name, "Jan Jansen");
    assert_eq!(saved.email, "jan@example.nl");
    assert_eq!(saved.subject, Subject::QuoteRequest);
    assert_eq!(saved.urgency, Urgency::Normal);
    assert!(saved.company.is_none());
    assert!(saved.phone.is_none());
    assert!(saved.privacy_consent);
    assert!(!saved.newsletter_opt_in);
    // Stored timestamps have microsecond precision.
    let slack = chrono::Duration::milliseconds(1);
    assert!(saved.created_at >= before - slack && saved.created_at <= after + slack);
}

#[tokio::test]
async fn test_refused_consent_stores_nothing() {
    let harness = TestHarness::new().await.unwrap();
    let mut form = jan_jansen();
    form["privacy"] = json!(false);

    let (status, body) = harness.submit_contact(&form).await.unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "consent_required");
    assert_eq!(harness.contact_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_consent_checked_before_choice_validity() {
    let harness = TestHarness::new().await.unwrap();
    let mut form = jan_jansen();
    form["privacy"] = json!(false);
    form["onderwerp"] = json!("onbekend");
    form["urgentie"] = json!("morgen");

    let (status, body) = harness.submit_contact(&form).await.unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "consent_required");
}

#[tokio::test]
async fn test_missing_message_names_field() {
    let harness = TestHarness::new().await.unwrap();
    let mut form = jan_jansen();
    form.as_object_mut().unwrap().remove("bericht");

    let (status, body) = harness.submit_contact(&form).await.unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "bericht");
    assert!(body["error"].as_str().unwrap().contains("bericht"));
    assert_eq!(harness.contact_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_each_required_field_is_enforced() {
    let harness = TestHarness::new().await.unwrap();
    for key in ["naam", "email", "onderwerp", "bericht"] {
        let mut form = jan_jansen();
        form[key] = json!("   ");
        let (status, body) = harness.submit_contact(&form).await.unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST, "{key}");
        assert_eq!(body["code"], "missing_field", "{key}");
        assert_eq!(body["field"], key);
    }
    assert_eq!(harness.contact_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_storage_outage_returns_500_and_stores_nothing() {
    let mock = MockStorage::new();
    let harness = TestHarness::builder()
        .with_mock_storage(mock.clone())
        .build()
        .await
        .unwrap();
    mock.set_failing(true);

    let (status, body) = harness.submit_contact(&jan_jansen()).await.unwrap();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "storage_failure");
    assert!(!body["error"].as_str().unwrap().contains("simulated"));

    mock.set_failing(false);
    assert!(mock.submissions().await.is_empty());
}

#[tokio::test]
async fn test_client_supplied_created_at_is_ignored() {
    let harness = TestHarness::new().await.unwrap();
    let mut form = jan_jansen();
    form["created_at"] = json!("1999-01-01T00:00:00Z");
    form["id"] = json!(42);

    let (status, _) = harness.submit_contact(&form).await.unwrap();
    assert_eq!(status, StatusCode::OK);

    let saved = harness
        .storage()
        .get_contact(SubmissionId(1))
        .await
        .unwrap()
        .unwrap();
    assert!(saved.created_at.timestamp() > 946_684_800);
    assert!(harness.storage().get_contact(SubmissionId(42)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_dutch_choices_are_stored_canonically() {
    let harness = TestHarness::new().await.unwrap();
    let mut form = jan_jansen();
    form["onderwerp"] = json!("Netwerk-Security");
    form["urgentie"] = json!("spoed");
    form["bedrijf"] = json!("Papierfabriek Eerbeek");
    form["telefoon"] = json!("0313-123456");
    form["nieuwsbrief"] = json!(true);

    let (status, _) = harness.submit_contact(&form).await.unwrap();
    assert_eq!(status, StatusCode::OK);

    let saved = harness
        .storage()
        .get_contact(SubmissionId(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(saved.subject, Subject::NetworkSecurity);
    assert_eq!(saved.urgency, Urgency::Urgent);
    assert_eq!(saved.company.as_deref(), Some("Papierfabriek Eerbeek"));
    assert_eq!(saved.phone.as_deref(), Some("0313-123456"));
    assert!(saved.newsletter_opt_in);
}

// ---- Concurrency ----

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_submissions_get_distinct_ids() {
    let harness = Arc::new(TestHarness::new().await.unwrap());
    let mut tasks = tokio::task::JoinSet::new();

    for i in 0..20 {
        let harness = harness.clone();
        tasks.spawn(async move {
            let mut form = jan_jansen();
            form["naam"] = json!(format!("Bezoeker {i}"));
            harness.submit_contact(&form).await.unwrap().0
        });
    }
    while let Some(status) = tasks.join_next().await {
        assert_eq!(status.unwrap(), StatusCode::OK);
    }

    assert_eq!(harness.contact_count().await.unwrap(), 20);
    let mut names = HashSet::new();
    for id in 1..=20 {
        let saved = harness
            .storage()
            .get_contact(SubmissionId(id))
            .await
            .unwrap()
            .unwrap();
        names.insert(saved.name);
    }
    assert_eq!(names.len(), 20);
}

// ---- Pages, health and chat ----

#[tokio::test]
async fn test_site_pages_are_served() {
    let harness = TestHarness::new().await.unwrap();
    for path in ["/", "/diensten", "/over-ons", "/contact", "/privacybeleid"] {
        let (status, body) = harness.get(path).await.unwrap();
        assert_eq!(status, StatusCode::OK, "{path}");
        assert!(body.contains("ICT Eerbeek"), "{path}");
    }
    let (status, _) = harness.get("/nergens").await.unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_endpoint() {
    let harness = TestHarness::new().await.unwrap();
    let (status, body) = harness.get("/health").await.unwrap();
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["storage"], "healthy");
}

#[tokio::test]
async fn test_chat_relay_round_trip() {
    let chat = MockChat::with_replies(vec!["Wij bellen u terug.".to_string()]);
    let harness = TestHarness::builder()
        .with_chat(chat.clone())
        .build()
        .await
        .unwrap();

    let (status, body) = harness
        .post_json("/chat", &json!({"message": "Kunnen jullie mijn wifi repareren?"}))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "Wij bellen u terug.");
    assert_eq!(
        chat.prompts().await,
        vec!["Kunnen jullie mijn wifi repareren?".to_string()]
    );
}

#[tokio::test]
async fn test_chat_upstream_failure_is_502() {
    let harness = TestHarness::builder()
        .with_chat(MockChat::failing())
        .build()
        .await
        .unwrap();
    let (status, body) = harness
        .post_json("/chat", &json!({"message": "Hallo"}))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_chat_disabled_is_503() {
    let harness = TestHarness::new().await.unwrap();
    let (status, body) = harness
        .post_json("/chat", &json!({"message": "Hallo"}))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "chat is not available");
}

#[tokio::test]
async fn test_small_body_limit_rejects_large_forms() {
    let harness = TestHarness::builder()
        .with_max_body_bytes(256)
        .build()
        .await
        .unwrap();
    let mut form = jan_jansen();
    form["bericht"] = json!("a".repeat(1024));

    let (status, _) = harness.post_raw("/contact", form.to_string()).await.unwrap();
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(harness.contact_count().await.unwrap(), 0);
}
