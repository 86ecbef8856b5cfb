use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::{Map, Value as JsonValue, json};

use crate::options::GridOptions;
use crate::survey_types::*;

/// Convert a generated grid to a GeoJSON FeatureCollection: baseline lines,
/// then perpendicular lines, then (optionally) the waypoints. Skipped sites
/// and dropped lines are listed in an `errors` member.
pub fn to_feature_collection(grid: &SurveyGrid, opts: &GridOptions) -> FeatureCollection {
    let mut features: Vec<Feature> = grid
        .lines()
        .map(|line| line_to_feature(line, opts))
        .collect();

    if opts.include_waypoints {
        features.extend(grid.waypoints().map(|wp| waypoint_to_feature(wp, opts)));
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: foreign_members(grid, opts),
    }
}

fn foreign_members(grid: &SurveyGrid, opts: &GridOptions) -> Option<JsonObject> {
    let mut members = Map::new();
    if opts.include_crs {
        members.insert(
            "crs".to_string(),
            json!({
                "type": "name",
                "properties": { "name": "urn:ogc:def:crs:EPSG::4326" }
            }),
        );
    }
    if !grid.errors.is_empty() {
        let errors = grid
            .errors
            .iter()
            .map(|e| JsonValue::String(e.to_string()))
            .collect();
        members.insert("errors".to_string(), JsonValue::Array(errors));
    }
    (!members.is_empty()).then_some(members)
}

fn line_to_feature(line: &Line, opts: &GridOptions) -> Feature {
    let coords: Vec<Vec<f64>> = line.points.iter().map(|pt| point_coords(*pt)).collect();
    let geometry = Geometry::new(Value::LineString(coords));

    let mut props = Map::new();
    props.insert(
        "transectType".to_string(),
        JsonValue::String(line.kind.as_str().to_string()),
    );
    props.insert("key".to_string(), JsonValue::String(line.key.clone()));
    insert_number(&mut props, "lengthKm", line.length_km());

    if opts.include_metadata {
        props.insert("name".to_string(), JsonValue::String(line.name.clone()));
        props.insert("region".to_string(), JsonValue::String(line.region.clone()));
        insert_optional(&mut props, "position", &line.position);
    }

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: Some(geojson::feature::Id::String(line.key.clone())),
        properties: Some(props),
        foreign_members: None,
    }
}

fn waypoint_to_feature(wp: &Waypoint, opts: &GridOptions) -> Feature {
    let geometry = Geometry::new(Value::Point(point_coords(wp.point)));

    let mut props = Map::new();
    props.insert(
        "transectType".to_string(),
        JsonValue::String(wp.kind.as_str().to_string()),
    );
    props.insert("key".to_string(), JsonValue::String(wp.key.clone()));
    props.insert(
        "location".to_string(),
        JsonValue::String(wp.location.as_str().to_string()),
    );
    insert_number(&mut props, "offsetKm", wp.offset_km);

    if opts.include_metadata {
        props.insert("name".to_string(), JsonValue::String(wp.name.clone()));
        props.insert("region".to_string(), JsonValue::String(wp.region.clone()));
        insert_optional(&mut props, "position", &wp.position);
    }

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

/// Build a [lon, lat] coordinate array.
fn point_coords(pt: GeoPoint) -> Vec<f64> {
    vec![pt.lon, pt.lat]
}

fn insert_number(props: &mut Map<String, JsonValue>, key: &str, value: f64) {
    if let Some(n) = serde_json::Number::from_f64(value) {
        props.insert(key.to_string(), JsonValue::Number(n));
    }
}

fn insert_optional(props: &mut Map<String, JsonValue>, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        props.insert(key.to_string(), JsonValue::String(v.clone()));
    }
}
