use serde::{Deserialize, Serialize};

use crate::geodesic;

/// One row of the site table: where a baseline starts, where it heads and
/// how its perpendicular sub-transects are laid out along it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(alias = "latStart")]
    pub lat_start: f64,
    #[serde(alias = "lonStart")]
    pub lon_start: f64,
    /// Compass heading of the baseline in degrees (0 = north, clockwise).
    #[serde(alias = "baseBearing")]
    pub base_bearing: f64,
    /// Baseline length in km.
    #[serde(alias = "baseDistance")]
    pub base_distance: f64,
    /// Signed angular offset of the sub-transects from the baseline heading.
    #[serde(alias = "perpBearing")]
    pub perp_bearing: f64,
    /// Along-baseline distance (km) of the first sub-transect.
    #[serde(alias = "perpStart")]
    pub perp_start: f64,
    #[serde(alias = "perpSpacing")]
    pub perp_spacing: f64,
    /// Length (km) of every sub-transect.
    #[serde(alias = "perpDistance")]
    pub perp_distance: f64,
}

impl Site {
    pub fn start_point(&self) -> GeoPoint {
        GeoPoint::new(self.lat_start, self.lon_start)
    }
}

/// A position on the sphere in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Location {
    Start,
    End,
}

impl Location {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::End => "End",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransectKind {
    Baseline,
    Perpendicular,
}

impl TransectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Perpendicular => "perpendicular",
        }
    }
}

/// A labelled line vertex produced by the transect builders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    #[serde(flatten)]
    pub point: GeoPoint,
    pub name: String,
    pub region: String,
    pub kind: TransectKind,
    pub location: Location,
    /// Along-baseline offset label such as "T3" (3 m); perpendiculars only.
    pub position: Option<String>,
    pub offset_km: f64,
    /// Identifier shared by all vertices of one line.
    pub key: String,
}

/// An ordered polyline of at least two vertices sharing one key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub key: String,
    pub kind: TransectKind,
    pub name: String,
    pub region: String,
    pub position: Option<String>,
    pub points: Vec<GeoPoint>,
}

impl Line {
    /// Sum of great-circle segment lengths in km.
    pub fn length_km(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| geodesic::haversine_distance_km(pair[0], pair[1]))
            .sum()
    }
}

/// Baseline of one site together with its computed end point.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineTransect {
    pub site: Site,
    pub end_point: GeoPoint,
    pub start: Waypoint,
    pub end: Waypoint,
}

/// One sub-transect branching off the baseline at `offset_km`.
#[derive(Debug, Clone, PartialEq)]
pub struct PerpendicularTransect {
    pub offset_km: f64,
    pub position: String,
    pub along_point: GeoPoint,
    pub end_point: GeoPoint,
    pub start: Waypoint,
    pub end: Waypoint,
}

/// Everything generated for a site table, concatenated in input order.
#[derive(Debug, Default)]
pub struct SurveyGrid {
    pub baselines: Vec<BaselineTransect>,
    pub baseline_waypoints: Vec<Waypoint>,
    pub perpendicular_waypoints: Vec<Waypoint>,
    pub baseline_lines: Vec<Line>,
    pub perpendicular_lines: Vec<Line>,
    pub errors: Vec<crate::error::TransectError>,
}

impl SurveyGrid {
    pub fn waypoints(&self) -> impl Iterator<Item = &Waypoint> {
        self.baseline_waypoints
            .iter()
            .chain(self.perpendicular_waypoints.iter())
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.baseline_lines
            .iter()
            .chain(self.perpendicular_lines.iter())
    }
}
