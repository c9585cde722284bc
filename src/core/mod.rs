// Core algorithm exports
pub mod geo;
pub mod locator;

pub use geo::{haversine_distance, calculate_bounding_box, is_within_bounding_box};
pub use locator::{Locator, NearbyResult, DEFAULT_MAX_RESULTS};
