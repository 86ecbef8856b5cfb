use crate::geodesic;
use crate::survey_types::{BaselineTransect, Location, Site, TransectKind, Waypoint};

/// Compute the end of a site's baseline and its Start/End waypoints.
pub fn build_baseline(site: &Site) -> BaselineTransect {
    let start_point = site.start_point();
    let end_point = geodesic::destination_from(start_point, site.base_bearing, site.base_distance);

    let waypoint = |location: Location, point, offset_km| Waypoint {
        point,
        name: site.name.clone(),
        region: site.region.clone(),
        kind: TransectKind::Baseline,
        location,
        position: None,
        offset_km,
        key: format!("{} {}", site.name, location.as_str()),
    };

    BaselineTransect {
        site: site.clone(),
        end_point,
        start: waypoint(Location::Start, start_point, 0.0),
        end: waypoint(Location::End, end_point, site.base_distance),
    }
}
