mod atlas;
mod geo;
mod location;
mod matrix;
mod mode;

pub use atlas::{Atlas, DestinationId, LocationId, OriginId};
pub use geo::Geo;
pub use location::Location;
pub use matrix::{DistanceMatrix, Geocoded, Leg};
pub use mode::Mode;
