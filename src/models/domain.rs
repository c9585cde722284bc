use serde::{Deserialize, Serialize};

/// Stored ATM record
///
/// The `address` payload is kept exactly as the upstream source delivers
/// it; the service never interprets individual address fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Atm {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: serde_json::Value,
}

/// ATM with its computed distance from a search center
///
/// Ephemeral, computed per search, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyAtm {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: serde_json::Value,
    pub distance: f64,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

/// Outcome of one bulk ingestion run
#[derive(Debug, Clone, Serialize)]
pub struct IngestionReport {
    pub succeeded: usize,
    pub failed: Vec<InsertFailure>,
    /// false when pagination stopped early on a fetch failure rather
    /// than reaching natural exhaustion
    pub upstream_complete: bool,
}

impl IngestionReport {
    pub fn new() -> Self {
        Self {
            succeeded: 0,
            failed: Vec::new(),
            upstream_complete: true,
        }
    }
}

impl Default for IngestionReport {
    fn default() -> Self {
        Self::new()
    }
}

/// A single record that could not be ingested
#[derive(Debug, Clone, Serialize)]
pub struct InsertFailure {
    pub id: String,
    pub reason: String,
}
