//! End-to-end journey tests covering the HTTP surface.
//!
//! Journey 1: full issuance flow over HTTP (mint, replay, consumed query)
//! Journey 2: admin surface over HTTP (set signer, grant, revoke, gating)
//! Journey 3: rejection status codes (403 / 401 / 400 / 409)
//! Journey 4: redemption and the read surface (balance, supply, events, health)

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use sentinel::http::build_router;
use sentinel::{initialize, AppState, SentinelConfig};
use sentinel_core::{AccountId, DocumentId, LocalSigner, Signer};
use sentinel_gate::sign_document;

const OWNER: AccountId = AccountId([0x01; 20]);
const VALIDATOR: AccountId = AccountId([0x02; 20]);

fn oracle() -> LocalSigner {
    LocalSigner::from_bytes(&[0xAA; 32])
}

/// Server state seeded with the owner, one validator, and the oracle as
/// trusted signer.
fn seeded_state() -> Arc<AppState> {
    let mut config = SentinelConfig::default();
    config.owner = OWNER.to_string();
    config.signer = Some(oracle().account_id().to_string());
    config.validators = vec![VALIDATOR.to_string()];
    Arc::new(initialize(config).unwrap())
}

/// Server state with only the owner configured; signer and validators are
/// driven through the admin endpoints.
fn bare_state() -> Arc<AppState> {
    let mut config = SentinelConfig::default();
    config.owner = OWNER.to_string();
    Arc::new(initialize(config).unwrap())
}

fn attestation_hex(doc: &str) -> (String, String) {
    let doc = DocumentId::new(doc);
    let attestation = sign_document(&doc, &oracle()).unwrap();
    (doc.to_string(), hex::encode(&attestation.signature))
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// Journey 1: issuance over HTTP
// ============================================================================

#[tokio::test]
async fn test_journey_mint_replay_and_consumed_query() {
    let app = build_router(seeded_state());
    let (doc, sig) = attestation_hex("doc1");

    // Mint succeeds once
    let req = post_json(
        "/mint",
        serde_json::json!({
            "caller": VALIDATOR.to_string(),
            "amount": 1000,
            "document_id": doc,
            "signature": sig,
        }),
    );
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["balance"], 1000);
    let consumption_id = body["consumption_id"].as_str().unwrap().to_string();

    // The consumption id reads back as consumed
    let resp = app
        .clone()
        .oneshot(get(&format!("/consumed/{}", consumption_id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["consumed"], true);

    // The exact same attestation bounces, balance untouched
    let req = post_json(
        "/mint",
        serde_json::json!({
            "caller": VALIDATOR.to_string(),
            "amount": 1000,
            "document_id": doc,
            "signature": sig,
        }),
    );
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("consumed"));

    let resp = app
        .oneshot(get(&format!("/balance/{}", VALIDATOR)))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["balance"], 1000);
}

// ============================================================================
// Journey 2: admin surface over HTTP
// ============================================================================

#[tokio::test]
async fn test_journey_admin_configures_gate_over_http() {
    let app = build_router(bare_state());

    // Initially no signer, no validator
    let resp = app.clone().oneshot(get("/signer")).await.unwrap();
    assert_eq!(body_json(resp).await["signer"], serde_json::Value::Null);

    // Mint before any configuration: the caller is not a validator yet
    let (doc, sig) = attestation_hex("doc1");
    let req = post_json(
        "/mint",
        serde_json::json!({
            "caller": VALIDATOR.to_string(),
            "amount": 100,
            "document_id": doc,
            "signature": sig,
        }),
    );
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Owner grants the validator and designates the signer
    let req = post_json(
        "/admin/validators/grant",
        serde_json::json!({
            "caller": OWNER.to_string(),
            "account": VALIDATOR.to_string(),
        }),
    );
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["validator"], true);

    let req = post_json(
        "/admin/signer",
        serde_json::json!({
            "caller": OWNER.to_string(),
            "signer": oracle().account_id().to_string(),
        }),
    );
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.clone().oneshot(get("/signer")).await.unwrap();
    assert_eq!(
        body_json(resp).await["signer"],
        oracle().account_id().to_string()
    );

    // Now the same mint goes through
    let req = post_json(
        "/mint",
        serde_json::json!({
            "caller": VALIDATOR.to_string(),
            "amount": 100,
            "document_id": doc,
            "signature": sig,
        }),
    );
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Revoke and verify membership reads false
    let req = post_json(
        "/admin/validators/revoke",
        serde_json::json!({
            "caller": OWNER.to_string(),
            "account": VALIDATOR.to_string(),
        }),
    );
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(get(&format!("/validators/{}", VALIDATOR)))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["validator"], false);
}

#[tokio::test]
async fn test_journey_admin_gating_and_null_identities() {
    let app = build_router(seeded_state());
    let outsider = AccountId([0x09; 20]);
    let null_account = format!("0x{}", "00".repeat(20));

    // Non-owner admin calls are forbidden
    let req = post_json(
        "/admin/signer",
        serde_json::json!({
            "caller": outsider.to_string(),
            "signer": outsider.to_string(),
        }),
    );
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Null identities are rejected as bad requests
    let req = post_json(
        "/admin/validators/grant",
        serde_json::json!({
            "caller": OWNER.to_string(),
            "account": null_account,
        }),
    );
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Revoking a non-member is fine
    let req = post_json(
        "/admin/validators/revoke",
        serde_json::json!({
            "caller": OWNER.to_string(),
            "account": outsider.to_string(),
        }),
    );
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Journey 3: rejection status codes
// ============================================================================

#[tokio::test]
async fn test_journey_rejections_map_to_statuses() {
    let app = build_router(seeded_state());
    let (doc, sig) = attestation_hex("doc1");

    // 403: caller not a validator, even with a valid attestation
    let req = post_json(
        "/mint",
        serde_json::json!({
            "caller": AccountId([0x33; 20]).to_string(),
            "amount": 1000,
            "document_id": doc,
            "signature": sig,
        }),
    );
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 401: signature from the wrong key
    let forged = sign_document(
        &DocumentId::new("doc1"),
        &LocalSigner::from_bytes(&[0xBB; 32]),
    )
    .unwrap();
    let req = post_json(
        "/mint",
        serde_json::json!({
            "caller": VALIDATOR.to_string(),
            "amount": 1000,
            "document_id": "doc1",
            "signature": hex::encode(&forged.signature),
        }),
    );
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // 400: zero amount
    let req = post_json(
        "/mint",
        serde_json::json!({
            "caller": VALIDATOR.to_string(),
            "amount": 0,
            "document_id": doc,
            "signature": sig,
        }),
    );
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 400: malformed account / signature hex
    let req = post_json(
        "/mint",
        serde_json::json!({
            "caller": "0xnothex",
            "amount": 10,
            "document_id": doc,
            "signature": sig,
        }),
    );
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = post_json(
        "/mint",
        serde_json::json!({
            "caller": VALIDATOR.to_string(),
            "amount": 10,
            "document_id": doc,
            "signature": "zz-not-hex",
        }),
    );
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // None of the rejections consumed the attestation
    let req = post_json(
        "/mint",
        serde_json::json!({
            "caller": VALIDATOR.to_string(),
            "amount": 1000,
            "document_id": doc,
            "signature": sig,
        }),
    );
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
}

// ============================================================================
// Journey 4: redemption and the read surface
// ============================================================================

#[tokio::test]
async fn test_journey_redeem_and_reads() {
    let app = build_router(seeded_state());
    let (doc, sig) = attestation_hex("doc1");

    let req = post_json(
        "/mint",
        serde_json::json!({
            "caller": VALIDATOR.to_string(),
            "amount": 1000,
            "document_id": doc,
            "signature": sig,
        }),
    );
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Redeem part of the balance
    let req = post_json(
        "/redeem",
        serde_json::json!({
            "caller": VALIDATOR.to_string(),
            "amount": 400,
        }),
    );
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["balance"], 600);

    // Over-redemption conflicts, balance unchanged
    let req = post_json(
        "/redeem",
        serde_json::json!({
            "caller": VALIDATOR.to_string(),
            "amount": 10000,
        }),
    );
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = app.clone().oneshot(get("/supply")).await.unwrap();
    assert_eq!(body_json(resp).await["total_supply"], 600);

    // The event log carries one issuance and one redemption, in order
    let resp = app.clone().oneshot(get("/events")).await.unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["total"], 2);
    let events = body["events"].as_array().unwrap();
    assert!(events[0]["kind"]["Issuance"].is_object());
    assert!(events[1]["kind"]["Redemption"].is_object());
    assert_eq!(events[1]["kind"]["Redemption"]["amount"], 400);

    // since= filters by sequence number
    let resp = app.clone().oneshot(get("/events?since=1")).await.unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["events"].as_array().unwrap().len(), 1);

    // Health reports the configured gate
    let resp = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["signer_configured"], true);
    assert_eq!(body["validators"], 1);
    assert_eq!(body["total_supply"], 600);
}
