//! Claim status enumeration and the workflow transition table.
//!
//! The status is a closed enum; every legal move is a row in [`transition`]'s
//! match. Anything not listed there is rejected, so handlers never compare
//! status strings directly. Transitions are one-directional and terminal
//! states accept nothing.

use std::fmt;

use sea_orm::sea_query::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};

use crate::jurisdiction::Role;

/// Workflow states. The serialized strings are the exact case-sensitive
/// values consumed by downstream dashboards; the same strings back the
/// database column, so an unknown status fails at load instead of flowing
/// into handlers as free text.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ClaimStatus {
    #[sea_orm(string_value = "Submitted")]
    Submitted,
    #[sea_orm(string_value = "MappedByGramSabha")]
    MappedByGramSabha,
    #[sea_orm(string_value = "ForwardedToSubdivision")]
    ForwardedToSubdivision,
    #[sea_orm(string_value = "UnderSubdivisionReview")]
    UnderSubdivisionReview,
    #[sea_orm(string_value = "ApprovedBySubdivision")]
    ApprovedBySubdivision,
    #[sea_orm(string_value = "RejectedBySubdivision")]
    RejectedBySubdivision,
    #[sea_orm(string_value = "ForwardedToDistrict")]
    ForwardedToDistrict,
    #[sea_orm(string_value = "UnderDistrictReview")]
    UnderDistrictReview,
    #[serde(rename = "Title Granted")]
    #[sea_orm(string_value = "Title Granted")]
    TitleGranted,
    #[sea_orm(string_value = "FinalRejected")]
    FinalRejected,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Submitted => "Submitted",
            ClaimStatus::MappedByGramSabha => "MappedByGramSabha",
            ClaimStatus::ForwardedToSubdivision => "ForwardedToSubdivision",
            ClaimStatus::UnderSubdivisionReview => "UnderSubdivisionReview",
            ClaimStatus::ApprovedBySubdivision => "ApprovedBySubdivision",
            ClaimStatus::RejectedBySubdivision => "RejectedBySubdivision",
            ClaimStatus::ForwardedToDistrict => "ForwardedToDistrict",
            ClaimStatus::UnderDistrictReview => "UnderDistrictReview",
            ClaimStatus::TitleGranted => "Title Granted",
            ClaimStatus::FinalRejected => "FinalRejected",
        }
    }

    /// Terminal states accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ClaimStatus::RejectedBySubdivision
                | ClaimStatus::TitleGranted
                | ClaimStatus::FinalRejected
        )
    }

}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Officer actions that drive transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    RecordMapping,
    Forward,
    BeginReview,
    Reject,
    Approve,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::RecordMapping => "record_mapping",
            Action::Forward => "forward",
            Action::BeginReview => "begin_review",
            Action::Reject => "reject",
            Action::Approve => "approve",
        };
        f.write_str(s)
    }
}

/// The explicit transition table: (from-state, role, action) → to-state.
///
/// `ApprovedBySubdivision` is a bookkeeping state kept as a forward source so
/// documents written by earlier code still progress; functionally the
/// subdivision forward is the approval that passes the claim onward.
pub fn transition(from: ClaimStatus, role: Role, action: Action) -> Option<ClaimStatus> {
    use Action::*;
    use ClaimStatus::*;
    use Role::*;

    match (from, role, action) {
        (Submitted, GramSabha, RecordMapping) => Some(MappedByGramSabha),
        // Map re-save before hand-off.
        (MappedByGramSabha, GramSabha, RecordMapping) => Some(MappedByGramSabha),
        (MappedByGramSabha, GramSabha, Forward) => Some(ForwardedToSubdivision),

        (MappedByGramSabha, Subdivision, BeginReview) => Some(UnderSubdivisionReview),
        (ForwardedToSubdivision, Subdivision, BeginReview) => Some(UnderSubdivisionReview),
        (MappedByGramSabha, Subdivision, Forward) => Some(ForwardedToDistrict),
        (ForwardedToSubdivision, Subdivision, Forward) => Some(ForwardedToDistrict),
        (UnderSubdivisionReview, Subdivision, Forward) => Some(ForwardedToDistrict),
        (ApprovedBySubdivision, Subdivision, Forward) => Some(ForwardedToDistrict),
        (MappedByGramSabha, Subdivision, Reject) => Some(RejectedBySubdivision),
        (ForwardedToSubdivision, Subdivision, Reject) => Some(RejectedBySubdivision),
        (UnderSubdivisionReview, Subdivision, Reject) => Some(RejectedBySubdivision),

        (ForwardedToDistrict, District, BeginReview) => Some(UnderDistrictReview),
        (ForwardedToDistrict, District, Approve) => Some(TitleGranted),
        (UnderDistrictReview, District, Approve) => Some(TitleGranted),
        (ForwardedToDistrict, District, Reject) => Some(FinalRejected),
        (UnderDistrictReview, District, Reject) => Some(FinalRejected),

        _ => None,
    }
}
