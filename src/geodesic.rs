//! Spherical-earth geodesy: the direct problem (destination point) plus the
//! inverse helpers used to measure generated lines.

use crate::survey_types::GeoPoint;

/// Mean earth radius in km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Point reached by travelling `distance_km` from (`lat`, `lon`) along the
/// great circle with initial compass bearing `bearing_deg`.
pub fn destination(lat: f64, lon: f64, bearing_deg: f64, distance_km: f64) -> GeoPoint {
    let angular_distance = distance_km / EARTH_RADIUS_KM;
    let lat_rad = lat.to_radians();
    let bearing = normalize_bearing(bearing_deg).to_radians();

    let dest_lat_rad = (lat_rad.sin() * angular_distance.cos()
        + lat_rad.cos() * angular_distance.sin() * bearing.cos())
    .asin();

    let dest_lon_rad = lon.to_radians()
        + (bearing.sin() * angular_distance.sin() * lat_rad.cos())
            .atan2(angular_distance.cos() - lat_rad.sin() * dest_lat_rad.sin());

    GeoPoint::new(
        dest_lat_rad.to_degrees(),
        normalize_longitude(dest_lon_rad.to_degrees()),
    )
}

/// Same as [`destination`] taking the start as a [`GeoPoint`].
pub fn destination_from(start: GeoPoint, bearing_deg: f64, distance_km: f64) -> GeoPoint {
    destination(start.lat, start.lon, bearing_deg, distance_km)
}

/// Wrap a bearing into [0, 360).
pub fn normalize_bearing(bearing_deg: f64) -> f64 {
    bearing_deg.rem_euclid(360.0)
}

/// Longitudes already inside [-180, 180] are left untouched, anything else
/// wraps into [-180, 180).
pub fn normalize_longitude(lon_deg: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon_deg) {
        lon_deg
    } else {
        (lon_deg + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Great-circle distance in km (haversine).
pub fn haversine_distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Initial compass bearing in [0, 360) of the great circle from `a` to `b`.
pub fn initial_bearing(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    normalize_bearing(y.atan2(x).to_degrees())
}
