pub mod assembler;
pub mod baseline;
pub mod converter;
pub mod error;
pub mod export;
pub mod geodesic;
pub mod grid;
pub mod interval;
pub mod options;
pub mod parser;
pub mod perpendicular;
pub mod survey_types;

use geojson::FeatureCollection;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::options::GridOptions;
use crate::survey_types::{Line, Site, SurveyGrid, Waypoint};

/// Everything `generateTransects` hands back to JavaScript.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransectOutput<'a> {
    geojson: FeatureCollection,
    lines: Vec<&'a Line>,
    waypoints: Vec<&'a Waypoint>,
    errors: Vec<String>,
}

/// An exported document with the errors collected while generating it.
#[derive(Serialize)]
struct ExportOutput {
    content: String,
    errors: Vec<String>,
}

/// Generate the transect grid for an array of site objects, returned as a JS
/// object `{ geojson, lines, waypoints, errors }`.
#[wasm_bindgen(js_name = generateTransects)]
pub fn generate_transects(sites: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let grid = grid::generate_grid(&parse_sites(sites)?, &opts);
    let output = TransectOutput {
        geojson: converter::to_feature_collection(&grid, &opts),
        lines: grid.lines().collect(),
        waypoints: grid.waypoints().collect(),
        errors: error_messages(&grid),
    };
    serde_wasm_bindgen::to_value(&output).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Generate the transect grid for an array of site objects, returned as a
/// GeoJSON string. Per-site errors are listed in its `errors` member.
#[wasm_bindgen(js_name = generateTransectsString)]
pub fn generate_transects_string(sites: JsValue, options: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let grid = grid::generate_grid(&parse_sites(sites)?, &opts);
    geojson_string(&grid, &opts)
}

/// Generate the transect grid from a CSV site table, returned as a GeoJSON
/// string. Per-site errors are listed in its `errors` member.
#[wasm_bindgen(js_name = siteTableToGeoJson)]
pub fn site_table_to_geojson(csv_text: &str, options: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let sites = parser::parse_sites(csv_text)?;
    let grid = grid::generate_grid(&sites, &opts);
    geojson_string(&grid, &opts)
}

/// Waypoint table (one row per waypoint) as `{ content, errors }`, where
/// `content` is CSV text.
#[wasm_bindgen(js_name = exportWaypointsCsv)]
pub fn export_waypoints_csv(sites: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let grid = grid::generate_grid(&parse_sites(sites)?, &opts);
    let content = export::waypoints_to_csv(&grid)?;
    export_output(content, &grid)
}

/// Waypoints and lines as `{ content, errors }`, where `content` is a
/// GPX 1.1 document.
#[wasm_bindgen(js_name = exportGpx)]
pub fn export_gpx(sites: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let grid = grid::generate_grid(&parse_sites(sites)?, &opts);
    let content = export::to_gpx(&grid)?;
    export_output(content, &grid)
}

fn export_output(content: String, grid: &SurveyGrid) -> Result<JsValue, JsValue> {
    let output = ExportOutput {
        content,
        errors: error_messages(grid),
    };
    serde_wasm_bindgen::to_value(&output).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn geojson_string(grid: &SurveyGrid, opts: &GridOptions) -> Result<String, JsValue> {
    let fc = converter::to_feature_collection(grid, opts);
    serde_json::to_string(&fc).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn error_messages(grid: &SurveyGrid) -> Vec<String> {
    grid.errors.iter().map(ToString::to_string).collect()
}

fn parse_sites(sites: JsValue) -> Result<Vec<Site>, JsValue> {
    serde_wasm_bindgen::from_value(sites).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_options(options: JsValue) -> Result<GridOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(GridOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
