use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters for the proximity search endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    /// Search radius in miles
    pub radius: f64,
}
