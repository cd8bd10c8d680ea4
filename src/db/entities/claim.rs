//! Claim document entity.
//!
//! One row per claim. Nested sub-documents (applicant, evidence, workflow,
//! map data, …) live in JSON columns; jurisdiction fields and the workflow
//! status are plain columns so scope filters and status queries stay
//! indexable.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::claims::mapdata::MapData;
use crate::claims::status::ClaimStatus;
use crate::claims::types::{
    ApplicantDetails, ClaimBasis, ClaimType, Eligibility, EvidenceBundle, GramSabhaResolution,
    LandDetails, RightsRequested,
};
use crate::claims::workflow::WorkflowRecord;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "claims")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub frapattaid: String,
    pub claim_type: ClaimType,
    pub gram_panchayat: String,
    pub tehsil: String,
    pub district: String,
    pub gp_code: String,
    /// Parsed subdivision component of `gp_code`; NULL when the code is
    /// malformed, which makes the claim invisible to every scoped filter.
    pub subdivision: Option<String>,
    #[sea_orm(column_type = "Json")]
    pub applicant: ApplicantDetails,
    #[sea_orm(column_type = "Json")]
    pub eligibility: Eligibility,
    #[sea_orm(column_type = "Json")]
    pub land: LandDetails,
    #[sea_orm(column_type = "Json")]
    pub claim_basis: ClaimBasis,
    #[sea_orm(column_type = "Json")]
    pub evidence: EvidenceBundle,
    #[sea_orm(column_type = "Json")]
    pub rights_requested: RightsRequested,
    #[sea_orm(column_type = "Json")]
    pub resolution: GramSabhaResolution,
    pub status: ClaimStatus,
    #[sea_orm(column_type = "Json")]
    pub workflow: WorkflowRecord,
    #[sea_orm(column_type = "Json", nullable)]
    pub map_data: Option<MapData>,
    /// Optimistic-concurrency token, incremented on every write.
    pub version: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
