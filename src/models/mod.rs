// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Atm, NearbyAtm, BoundingBox, IngestionReport, InsertFailure};
pub use requests::NearbyQuery;
pub use responses::{HealthResponse, ErrorResponse};
