//! Flat-file exports of a generated grid: CSV tables and GPX.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde::Serialize;

use crate::error::TransectError;
use crate::survey_types::*;

type Result<T> = std::result::Result<T, TransectError>;

const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";
const GPX_CREATOR: &str = "transect-grid-wasm";

#[derive(Serialize)]
struct WaypointRow<'a> {
    name: &'a str,
    region: &'a str,
    transect_type: &'static str,
    location: &'static str,
    position: Option<&'a str>,
    offset_km: f64,
    key: &'a str,
    lat: f64,
    lon: f64,
}

/// One row per waypoint, baselines first, with every attribute.
pub fn waypoints_to_csv(grid: &SurveyGrid) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for wp in grid.waypoints() {
        writer.serialize(WaypointRow {
            name: &wp.name,
            region: &wp.region,
            transect_type: wp.kind.as_str(),
            location: wp.location.as_str(),
            position: wp.position.as_deref(),
            offset_km: wp.offset_km,
            key: &wp.key,
            lat: wp.point.lat,
            lon: wp.point.lon,
        })?;
    }
    finish_csv(writer)
}

/// The input table with each baseline's computed end point appended.
pub fn sites_to_csv(grid: &SurveyGrid) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "name",
        "region",
        "lat_start",
        "lon_start",
        "base_bearing",
        "base_distance",
        "perp_bearing",
        "perp_start",
        "perp_spacing",
        "perp_distance",
        "lat_end",
        "lon_end",
    ])?;
    for baseline in &grid.baselines {
        let site = &baseline.site;
        writer.write_record([
            site.name.clone(),
            site.region.clone(),
            site.lat_start.to_string(),
            site.lon_start.to_string(),
            site.base_bearing.to_string(),
            site.base_distance.to_string(),
            site.perp_bearing.to_string(),
            site.perp_start.to_string(),
            site.perp_spacing.to_string(),
            site.perp_distance.to_string(),
            baseline.end_point.lat.to_string(),
            baseline.end_point.lon.to_string(),
        ])?;
    }
    finish_csv(writer)
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| TransectError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        TransectError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

/// GPX 1.1 document: every waypoint as `<wpt>`, every line as `<rte>`.
pub fn to_gpx(grid: &SurveyGrid) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("gpx").with_attributes([
        ("version", "1.1"),
        ("creator", GPX_CREATOR),
        ("xmlns", GPX_NAMESPACE),
    ])))?;

    for wp in grid.waypoints() {
        write_point(&mut writer, "wpt", wp.point, Some(&wp.key), Some(&wp.region))?;
    }

    for line in grid.lines() {
        writer.write_event(Event::Start(BytesStart::new("rte")))?;
        write_text_element(&mut writer, "name", &line.key)?;
        write_text_element(&mut writer, "type", line.kind.as_str())?;
        for pt in &line.points {
            write_point(&mut writer, "rtept", *pt, None, None)?;
        }
        writer.write_event(Event::End(BytesEnd::new("rte")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("gpx")))?;

    let mut bytes = writer.into_inner();
    bytes.write_all(b"\n")?;
    String::from_utf8(bytes).map_err(|e| {
        TransectError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

fn write_point(
    writer: &mut Writer<Vec<u8>>,
    tag: &str,
    pt: GeoPoint,
    name: Option<&str>,
    desc: Option<&str>,
) -> Result<()> {
    let lat = pt.lat.to_string();
    let lon = pt.lon.to_string();
    let start = BytesStart::new(tag).with_attributes([("lat", lat.as_str()), ("lon", lon.as_str())]);

    if name.is_none() && desc.is_none() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(name) = name {
        write_text_element(writer, "name", name)?;
    }
    if let Some(desc) = desc.filter(|d| !d.is_empty()) {
        write_text_element(writer, "desc", desc)?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
