use crate::domain::Coordinate;

/// WGS84 equatorial radius in meters
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Equirectangular projection from WGS84 to planar meters
///
/// - x = lng_rad * R * cos(lat_rad)
/// - y = lat_rad * R
///
/// The origin is fixed at the equator / prime meridian rather than at the
/// polygon itself. Good enough for field-sized polygons (a few km across);
/// distortion grows with distance from the equator, and polygons crossing
/// the ±180° seam or reaching the poles are not handled.
pub fn project(coord: Coordinate) -> (f64, f64) {
    let lat_rad = coord.lat.to_radians();
    let lng_rad = coord.lng.to_radians();

    let x = lng_rad * EARTH_RADIUS_M * lat_rad.cos();
    let y = lat_rad * EARTH_RADIUS_M;

    (x, y)
}

/// Project a slice of coordinates, keeping their order
pub fn project_points(points: &[Coordinate]) -> Vec<(f64, f64)> {
    points.iter().map(|&c| project(c)).collect()
}
