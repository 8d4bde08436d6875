use std::time::Duration;

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde_json::{Value, json};

use crate::helpers::{TEST_JWT_SECRET, TestApp, sample_payload};

#[tokio::test]
async fn test_create_account_returns_record_and_bearer_token() {
    let app = TestApp::spawn().await;
    app.mount_email_mock(200, 1).await;

    let response = app
        .post_account(&sample_payload("alice@example.com"), Some("req-1"))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Failed to parse body");

    let data = &body["data"];
    assert_eq!(data["email"], "alice@example.com");
    assert_eq!(data["name"], "Test User");
    assert!(data.get("password").is_none(), "password must not leak");
    assert!(
        data["referralCode"].as_str().is_some_and(|c| !c.is_empty()),
        "a referral code must be issued"
    );

    let bearer = body["meta"]["bearer"]
        .as_str()
        .expect("bearer token missing");
    assert_eq!(bearer.split('.').count(), 3);

    let claims = decode::<Value>(
        bearer,
        &DecodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
        &Validation::default(),
    )
    .expect("bearer token must verify against the signing secret")
    .claims;
    assert_eq!(claims["email"], "alice@example.com");
    assert!(
        claims["password"]
            .as_str()
            .is_some_and(|digest| digest.starts_with("$argon2")),
        "claims carry the stored hash, never the plaintext"
    );

    let stored = app
        .account_store
        .get("alice@example.com")
        .await
        .expect("account was not persisted");
    assert!(
        stored.attributes()["password"]
            .as_str()
            .is_some_and(|digest| digest.starts_with("$argon2"))
    );
}

#[tokio::test]
async fn test_payload_with_too_few_attributes_is_rejected() {
    let app = TestApp::spawn().await;
    app.mount_email_mock(200, 0).await;

    let mut payload = sample_payload("alice@example.com");
    payload.as_object_mut().unwrap().remove("city");

    let response = app.post_account(&payload, Some("req-1")).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid header or body");
    assert_eq!(app.account_store.count().await, 0);
}

#[tokio::test]
async fn test_payload_with_reserved_attribute_is_rejected() {
    let app = TestApp::spawn().await;
    app.mount_email_mock(200, 0).await;

    for reserved in ["freeSpots", "balance", "referrals"] {
        let mut payload = sample_payload("alice@example.com");
        payload
            .as_object_mut()
            .unwrap()
            .insert(reserved.to_owned(), json!(1));

        let response = app.post_account(&payload, Some("req-1")).await;
        assert_eq!(response.status().as_u16(), 400);
    }

    assert_eq!(app.account_store.count().await, 0);
}

#[tokio::test]
async fn test_request_without_correlation_id_is_rejected() {
    let app = TestApp::spawn().await;
    app.mount_email_mock(200, 0).await;

    let payload = sample_payload("alice@example.com");

    let response = app.post_account(&payload, None).await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app.post_account(&payload, Some("")).await;
    assert_eq!(response.status().as_u16(), 400);

    assert_eq!(app.account_store.count().await, 0);
}

#[tokio::test]
async fn test_non_object_body_is_rejected() {
    let app = TestApp::spawn().await;
    app.mount_email_mock(200, 0).await;

    let response = app.post_account(&json!(["not", "an", "object"]), Some("req-1")).await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn test_duplicate_submission_returns_conflict() {
    let app = TestApp::spawn().await;
    app.mount_email_mock(200, 1).await;

    let payload = sample_payload("alice@example.com");

    let first = app.post_account(&payload, Some("req-1")).await;
    assert_eq!(first.status().as_u16(), 200);

    let second = app.post_account(&payload, Some("req-2")).await;
    assert_eq!(second.status().as_u16(), 409);
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["error"], "An account with that email already exists.");

    assert_eq!(app.account_store.count().await, 1);
}

#[tokio::test]
async fn test_same_email_with_different_attributes_returns_conflict() {
    let app = TestApp::spawn().await;
    app.mount_email_mock(200, 2).await;

    let first = app
        .post_account(&sample_payload("alice@example.com"), Some("req-1"))
        .await;
    assert_eq!(first.status().as_u16(), 200);

    // Different attributes slip past the duplicate lookup, so this one
    // fails on insert against the unique email key.
    let mut payload = sample_payload("alice@example.com");
    payload
        .as_object_mut()
        .unwrap()
        .insert("name".to_owned(), json!("Another Name"));

    let second = app.post_account(&payload, Some("req-2")).await;
    assert_eq!(second.status().as_u16(), 409);
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["error"], "An account with that email already exists.");

    assert_eq!(app.account_store.count().await, 1);
}

#[tokio::test]
async fn test_email_failure_aborts_creation() {
    let app = TestApp::spawn().await;
    app.mount_email_mock(500, 1).await;

    let response = app
        .post_account(&sample_payload("alice@example.com"), Some("req-1"))
        .await;

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Unexpected server error");
    assert_eq!(app.account_store.count().await, 0);
}

#[tokio::test]
async fn test_referral_code_credits_the_referrer() {
    let app = TestApp::spawn().await;
    app.mount_email_mock(200, 2).await;

    let referrer = app
        .post_account(&sample_payload("alice@example.com"), Some("req-1"))
        .await;
    let referrer: Value = referrer.json().await.unwrap();
    let code = referrer["data"]["referralCode"].as_str().unwrap().to_owned();

    let mut payload = sample_payload("bob@example.com");
    payload
        .as_object_mut()
        .unwrap()
        .insert("referralCode".to_owned(), json!(code));

    let response = app.post_account(&payload, Some("req-2")).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_ne!(
        body["data"]["referralCode"].as_str().unwrap(),
        code,
        "the new account gets its own code"
    );

    // The credit runs detached from the request, so poll for it.
    let mut credited = false;
    for _ in 0..50 {
        let stored = app.account_store.get("alice@example.com").await.unwrap();
        if stored.free_spots() == 1 {
            assert_eq!(stored.referrals(), vec!["bob@example.com"]);
            credited = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(credited, "referrer was never credited");
}

#[tokio::test]
async fn test_unknown_referral_code_does_not_block_creation() {
    let app = TestApp::spawn().await;
    app.mount_email_mock(200, 1).await;

    let mut payload = sample_payload("bob@example.com");
    payload
        .as_object_mut()
        .unwrap()
        .insert("referralCode".to_owned(), json!("no-such-code"));

    let response = app.post_account(&payload, Some("req-1")).await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(app.account_store.count().await, 1);
}
