//! Jurisdiction keys and officer scopes.
//!
//! GP (Gram Panchayat) codes are structured identifiers of the form
//! `GS-<SUBDIVISION>-<VILLAGE>`, e.g. `GS-PHN-134363`. They are parsed once at
//! claim creation; the subdivision component is persisted on the claim row so
//! scope filters are plain column matches, not string-prefix scans. A claim
//! whose GP code fails to parse carries no subdivision and matches no officer
//! scope (fail closed) — only the super-admin view can see it.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::ServerError;

/// Known subdivision codes and their display names, for response payloads.
static SUBDIVISION_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("PHN", "Phanda"),
        ("BRS", "Berasia"),
        ("HZR", "Huzur"),
        ("KLR", "Kolar"),
    ])
});

/// Display name for a subdivision code, falling back to the code itself.
pub fn subdivision_name(code: &str) -> &str {
    SUBDIVISION_NAMES.get(code).copied().unwrap_or(code)
}

/// A parsed Gram Panchayat code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GpCode {
    pub subdivision_code: String,
    pub village_code: String,
}

impl FromStr for GpCode {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some("GS"), Some(sub), Some(village), None)
                if !sub.is_empty() && !village.is_empty() =>
            {
                Ok(GpCode {
                    subdivision_code: sub.to_string(),
                    village_code: village.to_string(),
                })
            }
            _ => Err(ServerError::Validation(format!(
                "malformed GP code: {:?}",
                s
            ))),
        }
    }
}

impl fmt::Display for GpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GS-{}-{}", self.subdivision_code, self.village_code)
    }
}

/// Officer roles in the review chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    GramSabha,
    Subdivision,
    District,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::GramSabha => "GramSabha",
            Role::Subdivision => "Subdivision",
            Role::District => "District",
            Role::Admin => "Admin",
        };
        f.write_str(s)
    }
}

/// An officer's geographic scope. Exactly one variant is meaningful per role;
/// the filter is applied server-side on every list/get, never left to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Scope {
    /// Single village: exact GP-code match.
    GpCode { gp_code: String },
    /// All GP codes whose parsed subdivision component matches.
    Subdivision { subdivision_code: String },
    /// All claims in a district.
    District { district: String },
    /// Super-admin: unrestricted, including claims with malformed GP codes.
    All,
}

impl Scope {
    /// Whether a claim with the given jurisdiction fields falls inside this
    /// scope. `subdivision` is the claim's stored parse result, `None` for
    /// malformed GP codes.
    pub fn contains(&self, gp_code: &str, subdivision: Option<&str>, district: &str) -> bool {
        match self {
            Scope::GpCode { gp_code: assigned } => {
                // Exact match only counts when the code itself is well-formed.
                subdivision.is_some() && gp_code == assigned
            }
            Scope::Subdivision { subdivision_code } => {
                subdivision == Some(subdivision_code.as_str())
            }
            Scope::District { district: assigned } => {
                subdivision.is_some() && district == assigned
            }
            Scope::All => true,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Scope::GpCode { gp_code } => format!("gram panchayat {}", gp_code),
            Scope::Subdivision { subdivision_code } => {
                format!("subdivision {}", subdivision_name(subdivision_code))
            }
            Scope::District { district } => format!("district {}", district),
            Scope::All => "all jurisdictions".to_string(),
        }
    }
}
