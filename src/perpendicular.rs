use crate::error::TransectError;
use crate::geodesic;
use crate::interval;
use crate::options::PerpendicularRotation;
use crate::survey_types::{Location, PerpendicularTransect, Site, TransectKind, Waypoint};

type Result<T> = std::result::Result<T, TransectError>;

/// Build one sub-transect per along-baseline offset of `site`, in ascending
/// offset order.
///
/// Offsets closer than a metre can round to the same position label and
/// would share a line key; such a site is rejected.
pub fn build_perpendiculars(
    site: &Site,
    rotation: PerpendicularRotation,
) -> Result<Vec<PerpendicularTransect>> {
    let offsets = interval::sequence(site.perp_start, site.base_distance, site.perp_spacing)?;
    let bearing = rotation.compose(site.base_bearing, site.perp_bearing);

    let perps: Vec<PerpendicularTransect> = offsets
        .into_iter()
        .map(|offset_km| build_at_offset(site, bearing, offset_km))
        .collect();

    // Labels are non-decreasing with the offsets, so repeats are adjacent.
    if let Some(pair) = perps.windows(2).find(|p| p[0].position == p[1].position) {
        return Err(TransectError::invalid_site(
            &site.name,
            format!(
                "perp_spacing {} resolves to duplicate position label {}",
                site.perp_spacing, pair[0].position
            ),
        ));
    }

    Ok(perps)
}

fn build_at_offset(site: &Site, bearing: f64, offset_km: f64) -> PerpendicularTransect {
    let along_point = geodesic::destination(
        site.lat_start,
        site.lon_start,
        site.base_bearing,
        offset_km,
    );
    let end_point = geodesic::destination_from(along_point, bearing, site.perp_distance);

    let position = position_label(offset_km);
    let key = format!("{} {}", site.name, position);

    let waypoint = |location, point| Waypoint {
        point,
        name: site.name.clone(),
        region: site.region.clone(),
        kind: TransectKind::Perpendicular,
        location,
        position: Some(position.clone()),
        offset_km,
        key: key.clone(),
    };

    PerpendicularTransect {
        offset_km,
        start: waypoint(Location::Start, along_point),
        end: waypoint(Location::End, end_point),
        position,
        along_point,
        end_point,
    }
}

/// Offset label in whole metres, e.g. 0.003 km -> "T3".
pub fn position_label(offset_km: f64) -> String {
    format!("T{}", (offset_km * 1000.0).round() as i64)
}
