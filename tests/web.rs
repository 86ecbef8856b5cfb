//! JavaScript surface checks; run with `wasm-pack test --node`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use transect_grid_wasm::{
    export_gpx, export_waypoints_csv, generate_transects_string, site_table_to_geojson,
};

const TABLE: &str = "name,region,lat_start,lon_start,base_bearing,base_distance,perp_bearing,perp_start,perp_spacing,perp_distance\n\
                     A,Channel Islands,33.0,-119.5,90,0.1,90,0.003,0.006,0.05\n";

fn sites() -> JsValue {
    js_sys::JSON::parse(
        r#"[{"name":"A","region":"Channel Islands","latStart":33.0,"lonStart":-119.5,
            "baseBearing":90,"baseDistance":0.1,"perpBearing":90,"perpStart":0.003,
            "perpSpacing":0.006,"perpDistance":0.05}]"#,
    )
    .unwrap()
}

fn content_and_errors(output: JsValue) -> (String, usize) {
    let content = js_sys::Reflect::get(&output, &JsValue::from_str("content"))
        .unwrap()
        .as_string()
        .unwrap();
    let errors = js_sys::Reflect::get(&output, &JsValue::from_str("errors")).unwrap();
    (content, js_sys::Array::from(&errors).length() as usize)
}

fn feature_count(geojson: &str) -> usize {
    let value: serde_json::Value = serde_json::from_str(geojson).unwrap();
    value["features"].as_array().unwrap().len()
}

#[wasm_bindgen_test]
fn test_site_table_to_geojson() {
    let geojson = site_table_to_geojson(TABLE, JsValue::UNDEFINED).unwrap();
    assert_eq!(feature_count(&geojson), 18);
}

#[wasm_bindgen_test]
fn test_generate_from_js_objects() {
    let geojson = generate_transects_string(sites(), JsValue::NULL).unwrap();
    assert_eq!(feature_count(&geojson), 18);
}

#[wasm_bindgen_test]
fn test_options_are_applied() {
    let opts = js_sys::JSON::parse(r#"{"types":["baseline"]}"#).unwrap();
    let geojson = generate_transects_string(sites(), opts).unwrap();
    assert_eq!(feature_count(&geojson), 1);
}

#[wasm_bindgen_test]
fn test_exports() {
    let (csv_text, errors) =
        content_and_errors(export_waypoints_csv(sites(), JsValue::UNDEFINED).unwrap());
    assert_eq!(csv_text.lines().count(), 37);
    assert_eq!(errors, 0);

    let (gpx, errors) = content_and_errors(export_gpx(sites(), JsValue::UNDEFINED).unwrap());
    assert!(gpx.contains("<rte>"));
    assert_eq!(errors, 0);
}

#[wasm_bindgen_test]
fn test_errors_travel_with_results() {
    let table = format!("{TABLE}B,Channel Islands,33.1,-119.4,0,0.1,90,0.2,0.006,0.05\n");

    let geojson = site_table_to_geojson(&table, JsValue::UNDEFINED).unwrap();
    let value: serde_json::Value = serde_json::from_str(&geojson).unwrap();
    assert_eq!(value["features"].as_array().unwrap().len(), 18);
    assert_eq!(value["errors"].as_array().unwrap().len(), 1);

    let sites = js_sys::JSON::parse(
        r#"[{"name":"B","latStart":33.1,"lonStart":-119.4,"baseBearing":0,
            "baseDistance":0.1,"perpBearing":90,"perpStart":0.2,"perpSpacing":0.006,
            "perpDistance":0.05}]"#,
    )
    .unwrap();
    let (gpx, errors) = content_and_errors(export_gpx(sites, JsValue::UNDEFINED).unwrap());
    assert!(!gpx.contains("<rte>"));
    assert_eq!(errors, 1);
}

#[wasm_bindgen_test]
fn test_bad_table_is_an_error() {
    assert!(site_table_to_geojson("name\nA\n", JsValue::UNDEFINED).is_err());
}
