pub mod boundary;
pub mod catalog;
pub mod coordinate;
pub mod profile;

pub use boundary::{BoundaryParseError, parse_boundary};
pub use catalog::{Catalog, CatalogError};
pub use coordinate::{Coordinate, ParseCoordinateError};
pub use profile::{CropProfile, SoilProfile};
