pub mod area;
pub mod projection;

pub use area::{compute_area, signed_area};
pub use projection::{EARTH_RADIUS_M, project, project_points};
