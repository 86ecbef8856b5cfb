use serde::Deserialize;

use crate::survey_types::TransectKind;

/// How a perpendicular offset bearing combines with the baseline heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PerpendicularRotation {
    /// `base_bearing + perp_bearing`
    Clockwise,
    /// `base_bearing - perp_bearing`
    CounterClockwise,
}

pub const DEFAULT_PERPENDICULAR_ROTATION: PerpendicularRotation = PerpendicularRotation::Clockwise;

impl PerpendicularRotation {
    pub fn compose(self, base_bearing: f64, perp_bearing: f64) -> f64 {
        match self {
            Self::Clockwise => base_bearing + perp_bearing,
            Self::CounterClockwise => base_bearing - perp_bearing,
        }
    }
}

impl Default for PerpendicularRotation {
    fn default() -> Self {
        DEFAULT_PERPENDICULAR_ROTATION
    }
}

/// Options for transect grid generation and export.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    /// Which transect kinds to generate (default: all)
    #[serde(default)]
    pub types: Option<Vec<TransectKind>>,

    /// Bearing composition for perpendicular transects (default: clockwise)
    #[serde(default)]
    pub rotation: PerpendicularRotation,

    /// Emit waypoints as Point features next to the lines (default: false)
    #[serde(default)]
    pub include_waypoints: bool,

    /// Include site name, region and position in properties (default: true)
    #[serde(default = "default_true")]
    pub include_metadata: bool,

    /// Tag the collection with a legacy EPSG:4326 `crs` member (default: false)
    #[serde(default)]
    pub include_crs: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            types: None,
            rotation: PerpendicularRotation::default(),
            include_waypoints: false,
            include_metadata: true,
            include_crs: false,
        }
    }
}

impl GridOptions {
    pub fn should_include(&self, kind: TransectKind) -> bool {
        match &self.types {
            None => true,
            Some(types) => types.contains(&kind),
        }
    }
}

fn default_true() -> bool {
    true
}
