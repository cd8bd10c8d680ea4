//! Claim API request handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    Json,
};
use sea_orm::DatabaseConnection;

use super::auth::{AuthManager, Officer};
use super::types::*;
use crate::claims::store::{ClaimStore, NewClaim};
use crate::error::{Result, ServerError};

/// Application state shared across handlers
pub struct AppState {
    pub store: ClaimStore,
    pub auth: AuthManager,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            store: ClaimStore::new(db),
            auth: AuthManager::new(),
        }
    }
}

/// Resolve the officer behind the request's Authorization header
fn extract_officer(headers: &HeaderMap, auth: &AuthManager) -> Result<Officer> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or(ServerError::AuthRequired)?;
    let auth_str = auth_header
        .to_str()
        .map_err(|_| ServerError::AuthRequired)?;

    if auth_str.starts_with("Basic ") {
        auth.authenticate_basic(auth_str)
    } else if auth_str.starts_with("Bearer ") {
        auth.validate_bearer(auth_str)
    } else {
        Err(ServerError::AuthRequired)
    }
}

/// GET /api/health
pub async fn health() -> &'static str {
    "ok"
}

/// POST /api/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let token = state.auth.authenticate(&req.username, &req.password)?;
    let officer = state.auth.validate_token(&token.token)?;
    tracing::info!(username = %officer.username, role = %officer.role, "officer logged in");
    Ok(Json(LoginResponse {
        token: token.token,
        officer_id: officer.id,
        role: officer.role,
        scope: officer.scope,
    }))
}

/// GET /api/whoami
pub async fn whoami(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<WhoamiResponse>> {
    let officer = extract_officer(&headers, &state.auth)?;
    Ok(Json(WhoamiResponse {
        officer_id: officer.id,
        username: officer.username,
        role: officer.role,
        scope: officer.scope,
    }))
}

/// POST /api/claims - claimant submission collaborator entry point
pub async fn submit_claim(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<NewClaim>,
) -> Result<Json<ClaimDetail>> {
    // Any authenticated identity may lodge a claim on a claimant's behalf.
    extract_officer(&headers, &state.auth)?;
    let model = state.store.submit(req).await?;
    Ok(Json(model.into()))
}

/// GET /api/claims - jurisdiction-filtered listing
pub async fn list_claims(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ClaimListQuery>,
) -> Result<Json<Vec<ClaimSummary>>> {
    let officer = extract_officer(&headers, &state.auth)?;
    let claims = state.store.list_for(&officer.scope, query.status).await?;
    Ok(Json(claims.iter().map(ClaimSummary::from).collect()))
}

/// GET /api/claims/:id
pub async fn get_claim(
    State(state): State<Arc<AppState>>,
    Path(claim_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ClaimDetail>> {
    let officer = extract_officer(&headers, &state.auth)?;
    let model = state.store.get_for(&officer.scope, &claim_id).await?;
    Ok(Json(model.into()))
}

/// PUT /api/claims/:id/map - save map data drawn at the Gram Sabha stage
pub async fn save_map_data(
    State(state): State<Arc<AppState>>,
    Path(claim_id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<SaveMapRequest>,
) -> Result<Json<ClaimDetail>> {
    let officer = extract_officer(&headers, &state.auth)?;
    let model = state
        .store
        .record_mapping(&officer.actor(), &claim_id, req.areas)
        .await?;
    Ok(Json(model.into()))
}

/// POST /api/claims/:id/begin-review
pub async fn begin_review(
    State(state): State<Arc<AppState>>,
    Path(claim_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ClaimDetail>> {
    let officer = extract_officer(&headers, &state.auth)?;
    let model = state.store.begin_review(&officer.actor(), &claim_id).await?;
    Ok(Json(model.into()))
}

/// POST /api/claims/:id/forward
pub async fn forward_claim(
    State(state): State<Arc<AppState>>,
    Path(claim_id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<ForwardRequest>,
) -> Result<Json<ClaimDetail>> {
    let officer = extract_officer(&headers, &state.auth)?;
    let model = state
        .store
        .forward(&officer.actor(), &claim_id, req.notes)
        .await?;
    Ok(Json(model.into()))
}

/// POST /api/claims/:id/reject
pub async fn reject_claim(
    State(state): State<Arc<AppState>>,
    Path(claim_id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<RejectRequest>,
) -> Result<Json<ClaimDetail>> {
    let officer = extract_officer(&headers, &state.auth)?;
    let model = state
        .store
        .reject(&officer.actor(), &claim_id, &req.reason)
        .await?;
    Ok(Json(model.into()))
}

/// POST /api/claims/:id/approve
pub async fn approve_claim(
    State(state): State<Arc<AppState>>,
    Path(claim_id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<ApproveRequest>,
) -> Result<Json<ClaimDetail>> {
    let officer = extract_officer(&headers, &state.auth)?;
    let model = state
        .store
        .approve(&officer.actor(), &claim_id, req.remarks)
        .await?;
    Ok(Json(model.into()))
}
