//! Claim sub-document types.
//!
//! Each of these is persisted as a JSON column on the claim row (SeaORM
//! `FromJsonQueryResult`), with camelCase wire names matching the document
//! store's field names.

use sea_orm::sea_query::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter, FromJsonQueryResult};
use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ClaimType {
    #[sea_orm(string_value = "Individual")]
    Individual,
    #[sea_orm(string_value = "Community")]
    Community,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub name: String,
    pub age: u32,
    pub relation: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicantDetails {
    pub name: String,
    pub guardian_name: String,
    pub spouse_name: String,
    pub address: String,
    pub village: String,
    pub family_members: Vec<FamilyMember>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase", default)]
pub struct Eligibility {
    #[serde(rename = "isST")]
    pub is_st: bool,
    #[serde(rename = "isOTFD")]
    pub is_otfd: bool,
    #[serde(rename = "isSpouseST")]
    pub is_spouse_st: bool,
    pub justification: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase", default)]
pub struct LandDetails {
    /// Extent under habitation, in hectares.
    pub habitation_extent: f64,
    /// Extent under self-cultivation, in hectares.
    pub self_cultivation_extent: f64,
    pub total_claimed_area: f64,
    pub compartment_number: String,
    pub description: String,
}

/// One claim-basis ground: a flag plus free-text justification.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasisGround {
    pub applies: bool,
    pub justification: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimBasis {
    pub dispute: BasisGround,
    pub old_title: BasisGround,
    pub displacement: BasisGround,
    pub forest_village: BasisGround,
    pub other_rights: BasisGround,
}

/// A single uploaded evidence record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceRecord {
    pub file_ref: String,
    pub uploaded_at: i64,
}

/// An elder's testimony carries the elder's identity alongside the file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElderTestimony {
    pub elder_name: String,
    pub elder_age: u32,
    pub file_ref: String,
    pub uploaded_at: i64,
}

/// Four independently typed evidence collections, each ordered by upload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase", default)]
pub struct EvidenceBundle {
    pub government_documents: Vec<EvidenceRecord>,
    pub elder_testimonies: Vec<ElderTestimony>,
    pub physical_proof: Vec<EvidenceRecord>,
    pub old_records: Vec<EvidenceRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RightType {
    Habitation,
    Cultivation,
    MinorForestProduce,
    Grazing,
    HabitatRights,
    CommunityForestManagement,
}

/// The set of rights the claimant requests.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct RightsRequested(pub Vec<RightType>);

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase", default)]
pub struct GramSabhaResolution {
    pub passed: bool,
    pub date: Option<String>,
    pub file_ref: Option<String>,
}
