use super::projection::project_points;
use crate::domain::Coordinate;

/// Signed shoelace area of the ring in square meters.
///
/// Positive for counter-clockwise rings in projected (x = east, y = north)
/// space, negative for clockwise. The ring closes implicitly from the last
/// point back to the first. Fewer than 3 points give 0.
pub fn signed_area(points: &[Coordinate]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let projected = project_points(points);
    let n = projected.len();

    let twice_area: f64 = (0..n)
        .map(|i| {
            let (x1, y1) = projected[i];
            let (x2, y2) = projected[(i + 1) % n];
            x1 * y2 - x2 * y1
        })
        .sum();

    twice_area / 2.0
}

/// Area enclosed by a traced field boundary, in square meters.
///
/// Equirectangular projection + shoelace formula; see
/// [`project`](super::project) for the accuracy envelope. Independent of
/// winding direction and of which point the ring starts at.
pub fn compute_area(points: &[Coordinate]) -> f64 {
    signed_area(points).abs()
}
