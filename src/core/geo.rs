use crate::models::BoundingBox;

/// Earth's radius in miles
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Calculate the Haversine distance between two points in miles
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lng1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lng2` - Longitude of second point in degrees
///
/// # Returns
/// Great-circle distance in miles
#[inline]
pub fn haversine_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Calculate a bounding box around a center point
///
/// This is much faster than Haversine for pre-filtering. The box
/// circumscribes the radius circle, so it over-approximates but never
/// misses a point within the radius.
///
/// # Arguments
/// * `lat` - Center latitude in degrees
/// * `lng` - Center longitude in degrees
/// * `radius_miles` - Radius in miles
///
/// # Returns
/// BoundingBox with min/max lat/lng
pub fn calculate_bounding_box(lat: f64, lng: f64, radius_miles: f64) -> BoundingBox {
    let lat_delta = (radius_miles / EARTH_RADIUS_MILES).to_degrees();

    // 1 degree of longitude shrinks with cos(latitude)
    let lng_delta = (radius_miles / (EARTH_RADIUS_MILES * lat.to_radians().cos())).to_degrees();

    // Near the poles cos(lat) vanishes and the delta diverges; the box
    // then covers the full longitude range.
    let (min_lng, max_lng) = if !lng_delta.is_finite() || lng_delta.abs() >= 180.0 {
        (-180.0, 180.0)
    } else {
        (lng - lng_delta, lng + lng_delta)
    };

    BoundingBox {
        min_lat: lat - lat_delta,
        max_lat: lat + lat_delta,
        min_lng,
        max_lng,
    }
}

/// Check if a point is within a bounding box (inclusive bounds)
#[inline]
pub fn is_within_bounding_box(lat: f64, lng: f64, bbox: &BoundingBox) -> bool {
    lat >= bbox.min_lat
        && lat <= bbox.max_lat
        && lng >= bbox.min_lng
        && lng <= bbox.max_lng
}
