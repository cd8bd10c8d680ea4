//! The role-keyed workflow audit record.
//!
//! One stage sub-record per reviewing role. A stage starts as an empty
//! placeholder (`{}` on the wire, never null/absent) and is filled in when
//! that role acts; entries are only ever added as the claim proceeds, never
//! deleted. Each role carries its own action enum, so a district stage can
//! never record a "mapped" action.

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Actions the Gram Sabha officer can record at their stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GsAction {
    Mapped,
    Forwarded,
}

/// Actions the Subdivision/Block officer can record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubdivisionAction {
    ReviewStarted,
    Forwarded,
    Rejected,
}

/// Actions the District officer can record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistrictAction {
    ReviewStarted,
    Approved,
    Rejected,
}

/// One role's audit entry: who acted, what they did, when, and any remarks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage<A> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub officer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<A>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl<A> Default for Stage<A> {
    fn default() -> Self {
        Stage {
            officer_id: None,
            action: None,
            timestamp: None,
            remarks: None,
        }
    }
}

impl<A> Stage<A> {
    pub fn has_acted(&self) -> bool {
        self.action.is_some()
    }

    /// Fill in (or overwrite, at the role's own stage) this stage's entry.
    pub fn record(&mut self, officer_id: &str, action: A, remarks: Option<String>, now: i64) {
        self.officer_id = Some(officer_id.to_string());
        self.action = Some(action);
        self.timestamp = Some(now);
        self.remarks = remarks;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkflowRecord {
    pub gs_officer: Stage<GsAction>,
    pub subdivision_officer: Stage<SubdivisionAction>,
    pub district_officer: Stage<DistrictAction>,
}
