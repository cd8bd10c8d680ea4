//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::claims::mapdata::MapArea;
use crate::claims::status::ClaimStatus;
use crate::claims::types::ClaimType;
use crate::db::entities::claim;
use crate::jurisdiction::{subdivision_name, Role, Scope};

// ============================================================================
// Request Types
// ============================================================================

/// POST /api/login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// PUT /api/claims/:id/map request body: the area list produced by the
/// map-drawing UI. The aggregate is recomputed server-side, never trusted
/// from the client.
#[derive(Debug, Deserialize)]
pub struct SaveMapRequest {
    pub areas: Vec<MapArea>,
}

/// POST /api/claims/:id/forward request body
#[derive(Debug, Default, Deserialize)]
pub struct ForwardRequest {
    pub notes: Option<String>,
}

/// POST /api/claims/:id/reject request body
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

/// POST /api/claims/:id/approve request body
#[derive(Debug, Default, Deserialize)]
pub struct ApproveRequest {
    pub remarks: Option<String>,
}

/// Query params for claim listing
#[derive(Debug, Default, Deserialize)]
pub struct ClaimListQuery {
    pub status: Option<ClaimStatus>,
}

// ============================================================================
// Response Types
// ============================================================================

/// POST /api/login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub officer_id: String,
    pub role: Role,
    pub scope: Scope,
}

/// GET /api/whoami response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoamiResponse {
    pub officer_id: String,
    pub username: String,
    pub role: Role,
    pub scope: Scope,
}

/// One row of a dashboard claim list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSummary {
    pub frapattaid: String,
    pub claim_type: ClaimType,
    pub applicant_name: String,
    pub village: String,
    pub gram_panchayat: String,
    pub district: String,
    pub gp_code: String,
    pub subdivision_name: Option<String>,
    pub status: ClaimStatus,
    pub has_map: bool,
    pub total_mapped_area: Option<f64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<&claim::Model> for ClaimSummary {
    fn from(model: &claim::Model) -> Self {
        ClaimSummary {
            frapattaid: model.frapattaid.clone(),
            claim_type: model.claim_type,
            applicant_name: model.applicant.name.clone(),
            village: model.applicant.village.clone(),
            gram_panchayat: model.gram_panchayat.clone(),
            district: model.district.clone(),
            gp_code: model.gp_code.clone(),
            subdivision_name: model
                .subdivision
                .as_deref()
                .map(|code| subdivision_name(code).to_string()),
            status: model.status,
            has_map: model.map_data.is_some(),
            total_mapped_area: model.map_data.as_ref().map(|m| m.total_area),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Full claim document with rendering conveniences. Map data arrives parsed;
/// consumers check `hasMap` instead of probing the attachment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimDetail {
    #[serde(flatten)]
    pub claim: claim::Model,
    pub has_map: bool,
    pub subdivision_name: Option<String>,
}

impl From<claim::Model> for ClaimDetail {
    fn from(model: claim::Model) -> Self {
        let has_map = model.map_data.is_some();
        let subdivision_name = model
            .subdivision
            .as_deref()
            .map(|code| subdivision_name(code).to_string());
        ClaimDetail {
            claim: model,
            has_map,
            subdivision_name,
        }
    }
}
