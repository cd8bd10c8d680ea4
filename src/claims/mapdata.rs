//! The GIS map attachment drawn at the Gram Sabha stage.
//!
//! One canonical schema: a non-empty list of areas plus an aggregate
//! `totalArea` recomputed inside every write path. Downstream stages read the
//! attachment but never modify it.

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use crate::error::{Result as ServerResult, ServerError};

/// Shape/semantic tag for a drawn area. The map-drawing UI emits both plain
/// geometry tags and semantic land-use tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaKind {
    Polygon,
    Rectangle,
    Circle,
    Pond,
    Forest,
    Government,
    Claimed,
}

/// One drawn area with its measured extent and GeoJSON geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapArea {
    pub id: String,
    /// Measured area in square meters.
    pub area: f64,
    #[serde(rename = "type")]
    pub kind: AreaKind,
    pub geometry: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct MapData {
    pub areas: Vec<MapArea>,
    /// Always the sum of `areas[i].area`; recomputed on every save.
    pub total_area: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl MapData {
    /// Build an attachment from a validated area list, computing the
    /// aggregate. Fails before any mutation when the list is empty or an
    /// area's extent is not a finite non-negative number.
    pub fn from_areas(areas: Vec<MapArea>, now: i64) -> ServerResult<Self> {
        validate_areas(&areas)?;
        let total_area = areas.iter().map(|a| a.area).sum();
        Ok(MapData {
            areas,
            total_area,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the area list on a re-save, keeping the original creation
    /// timestamp and recomputing the aggregate in the same operation.
    pub fn resave(&self, areas: Vec<MapArea>, now: i64) -> ServerResult<Self> {
        validate_areas(&areas)?;
        let total_area = areas.iter().map(|a| a.area).sum();
        Ok(MapData {
            areas,
            total_area,
            created_at: self.created_at,
            updated_at: now,
        })
    }
}

fn validate_areas(areas: &[MapArea]) -> ServerResult<()> {
    if areas.is_empty() {
        return Err(ServerError::Validation(
            "map data must contain at least one area".to_string(),
        ));
    }
    for area in areas {
        if !area.area.is_finite() || area.area < 0.0 {
            return Err(ServerError::Validation(format!(
                "area {} has invalid extent {}",
                area.id, area.area
            )));
        }
    }
    Ok(())
}
