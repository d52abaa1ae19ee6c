//! Axum HTTP handlers for the Sentinel server.
//!
//! Issuance, redemption, and admin operations mutate the gate under its
//! single-writer lock; read endpoints take the same lock briefly. Error
//! bodies are uniform `{"error": "..."}` JSON with the status code carrying
//! the taxonomy: 403 for authorization failures, 401 for signature
//! failures, 409 for replay and balance conflicts, 400 for malformed input.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::{Arc, Mutex, MutexGuard};

use sentinel_core::{AccountId, ConsumptionId, DocumentId};
use sentinel_gate::{Gate, GateError};

use crate::{
    AppState, ErrorBody, MintRequest, MintResponse, RedeemRequest, RedeemResponse,
    SetSignerRequest, ValidatorRequest,
};

type HandlerError = (StatusCode, Json<ErrorBody>);

/// Build the Axum router with all endpoints.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/mint", post(handle_mint))
        .route("/redeem", post(handle_redeem))
        .route("/admin/signer", post(handle_set_signer))
        .route("/admin/validators/grant", post(handle_grant))
        .route("/admin/validators/revoke", post(handle_revoke))
        .route("/signer", get(handle_get_signer))
        .route("/validators/{account}", get(handle_get_validator))
        .route("/consumed/{id}", get(handle_get_consumed))
        .route("/balance/{account}", get(handle_get_balance))
        .route("/supply", get(handle_get_supply))
        .route("/events", get(handle_get_events))
        .route("/health", get(handle_health))
        .with_state(state)
}

/// Map a gate error to its HTTP status. The 403/401 split for
/// authorization-vs-signature failures mirrors the upstream oracle service.
pub fn status_for(error: &GateError) -> StatusCode {
    match error {
        GateError::Unauthorized | GateError::NotAuthorized => StatusCode::FORBIDDEN,
        GateError::InvalidSignature(_) => StatusCode::UNAUTHORIZED,
        GateError::InvalidAccount | GateError::InvalidAmount => StatusCode::BAD_REQUEST,
        GateError::AlreadyUsed
        | GateError::InsufficientBalance
        | GateError::SupplyOverflow => StatusCode::CONFLICT,
    }
}

fn error_body(status: StatusCode, message: impl Into<String>) -> HandlerError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

fn gate_error(e: GateError) -> HandlerError {
    error_body(status_for(&e), e.to_string())
}

fn parse_account(s: &str) -> Result<AccountId, HandlerError> {
    AccountId::from_hex(s)
        .map_err(|e| error_body(StatusCode::BAD_REQUEST, format!("invalid account: {}", e)))
}

fn parse_signature(s: &str) -> Result<Vec<u8>, HandlerError> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(stripped)
        .map_err(|e| error_body(StatusCode::BAD_REQUEST, format!("invalid signature hex: {}", e)))
}

fn lock_gate(mutex: &Mutex<Gate>) -> Result<MutexGuard<'_, Gate>, HandlerError> {
    mutex
        .lock()
        .map_err(|_| error_body(StatusCode::INTERNAL_SERVER_ERROR, "gate lock poisoned"))
}

// ---------------------------------------------------------------------------
// Issuance and redemption
// ---------------------------------------------------------------------------

/// POST /mint — dual-authorized issuance
async fn handle_mint(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MintRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let caller = parse_account(&req.caller)?;
    let signature = parse_signature(&req.signature)?;
    let document_id = DocumentId::new(req.document_id);

    let mut gate = lock_gate(&state.gate)?;
    let id = gate
        .mint(caller, req.amount, &document_id, &signature)
        .map_err(gate_error)?;

    Ok((
        StatusCode::CREATED,
        Json(MintResponse {
            consumption_id: id.to_string(),
            balance: gate.balance_of(caller),
        }),
    ))
}

/// POST /redeem — self-service burn
async fn handle_redeem(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RedeemRequest>,
) -> Result<Json<RedeemResponse>, HandlerError> {
    let caller = parse_account(&req.caller)?;

    let mut gate = lock_gate(&state.gate)?;
    gate.redeem(caller, req.amount).map_err(gate_error)?;

    Ok(Json(RedeemResponse {
        balance: gate.balance_of(caller),
    }))
}

// ---------------------------------------------------------------------------
// Administrative surface
// ---------------------------------------------------------------------------

/// POST /admin/signer — designate the attestation authority
async fn handle_set_signer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetSignerRequest>,
) -> Result<Json<serde_json::Value>, HandlerError> {
    let caller = parse_account(&req.caller)?;
    let signer = parse_account(&req.signer)?;

    let mut gate = lock_gate(&state.gate)?;
    gate.set_signer(caller, signer).map_err(gate_error)?;

    Ok(Json(serde_json::json!({ "signer": signer.to_string() })))
}

/// POST /admin/validators/grant
async fn handle_grant(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ValidatorRequest>,
) -> Result<Json<serde_json::Value>, HandlerError> {
    let caller = parse_account(&req.caller)?;
    let account = parse_account(&req.account)?;

    let mut gate = lock_gate(&state.gate)?;
    gate.grant_validator(caller, account).map_err(gate_error)?;

    Ok(Json(serde_json::json!({
        "account": account.to_string(),
        "validator": true,
    })))
}

/// POST /admin/validators/revoke
async fn handle_revoke(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ValidatorRequest>,
) -> Result<Json<serde_json::Value>, HandlerError> {
    let caller = parse_account(&req.caller)?;
    let account = parse_account(&req.account)?;

    let mut gate = lock_gate(&state.gate)?;
    gate.revoke_validator(caller, account).map_err(gate_error)?;

    Ok(Json(serde_json::json!({
        "account": account.to_string(),
        "validator": false,
    })))
}

// ---------------------------------------------------------------------------
// Read surface
// ---------------------------------------------------------------------------

/// GET /signer
async fn handle_get_signer(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, HandlerError> {
    let gate = lock_gate(&state.gate)?;
    Ok(Json(serde_json::json!({
        "signer": gate.trusted_signer().map(|s| s.to_string()),
    })))
}

/// GET /validators/{account}
async fn handle_get_validator(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
) -> Result<Json<serde_json::Value>, HandlerError> {
    let account = parse_account(&account)?;
    let gate = lock_gate(&state.gate)?;
    Ok(Json(serde_json::json!({
        "account": account.to_string(),
        "validator": gate.is_validator(account),
    })))
}

/// GET /consumed/{id}
async fn handle_get_consumed(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, HandlerError> {
    let id = ConsumptionId::from_hex(&id)
        .map_err(|e| error_body(StatusCode::BAD_REQUEST, format!("invalid consumption id: {}", e)))?;
    let gate = lock_gate(&state.gate)?;
    Ok(Json(serde_json::json!({
        "consumption_id": id.to_string(),
        "consumed": gate.is_consumed_id(&id),
    })))
}

/// GET /balance/{account}
async fn handle_get_balance(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
) -> Result<Json<serde_json::Value>, HandlerError> {
    let account = parse_account(&account)?;
    let gate = lock_gate(&state.gate)?;
    Ok(Json(serde_json::json!({
        "account": account.to_string(),
        "balance": gate.balance_of(account),
    })))
}

/// GET /supply
async fn handle_get_supply(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, HandlerError> {
    let gate = lock_gate(&state.gate)?;
    Ok(Json(serde_json::json!({ "total_supply": gate.total_supply() })))
}

#[derive(Debug, Deserialize)]
struct EventsQuery {
    #[serde(default)]
    since: u64,
}

/// GET /events?since=N — ordered, append-only event records
async fn handle_get_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<serde_json::Value>, HandlerError> {
    let gate = lock_gate(&state.gate)?;
    let events = gate.events_since(query.since);
    Ok(Json(serde_json::json!({
        "total": gate.events().len(),
        "events": events,
    })))
}

/// GET /health
async fn handle_health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, HandlerError> {
    let gate = lock_gate(&state.gate)?;
    Ok(Json(serde_json::json!({
        "status": "ok",
        "service": "sentinel",
        "version": env!("CARGO_PKG_VERSION"),
        "owner": gate.owner().to_string(),
        "signer_configured": gate.trusted_signer().is_some(),
        "validators": gate.validator_count(),
        "total_supply": gate.total_supply(),
    })))
}
