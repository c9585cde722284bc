use crate::core::geo::{calculate_bounding_box, haversine_distance, is_within_bounding_box};
use crate::models::{Atm, NearbyAtm};

/// Result of a proximity search
#[derive(Debug)]
pub struct NearbyResult {
    pub atms: Vec<NearbyAtm>,
    pub total_candidates: usize,
}

/// Proximity search refinement pipeline
///
/// The store query only applies the coarse bounding-box predicate; this
/// stage refines the candidates with the exact great-circle distance.
///
/// # Pipeline Stages
/// 1. Bounding box re-check
/// 2. Exact Haversine distance filter
/// 3. Sort by distance and cap the result size
#[derive(Debug, Clone, Copy)]
pub struct Locator {
    max_results: usize,
}

/// Result cap shared by the store query and the refinement stage
pub const DEFAULT_MAX_RESULTS: usize = 50;

impl Locator {
    pub fn new(max_results: usize) -> Self {
        Self { max_results }
    }

    pub fn with_default_limit() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Refine bounding-box candidates into the final proximity result
    ///
    /// # Arguments
    /// * `lat` - Search center latitude in degrees
    /// * `lng` - Search center longitude in degrees
    /// * `radius_miles` - Search radius in miles
    /// * `candidates` - Candidate rows from the store's range query
    ///
    /// # Returns
    /// NearbyResult with ATMs within the radius, nearest first
    pub fn find_nearby(
        &self,
        lat: f64,
        lng: f64,
        radius_miles: f64,
        candidates: Vec<Atm>,
    ) -> NearbyResult {
        let total_candidates = candidates.len();

        let bbox = calculate_bounding_box(lat, lng, radius_miles);

        let mut atms: Vec<NearbyAtm> = candidates
            .into_iter()
            // Stage 1: coarse bounding-box re-check
            .filter(|atm| is_within_bounding_box(atm.latitude, atm.longitude, &bbox))
            // Stage 2: exact distance filter
            .filter_map(|atm| {
                let distance = haversine_distance(lat, lng, atm.latitude, atm.longitude);

                if distance <= radius_miles {
                    Some(NearbyAtm {
                        id: atm.id,
                        name: atm.name,
                        latitude: atm.latitude,
                        longitude: atm.longitude,
                        address: atm.address,
                        distance,
                    })
                } else {
                    None
                }
            })
            .collect();

        // Sort by distance (ascending) so the cap keeps the nearest
        atms.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        atms.truncate(self.max_results);

        NearbyResult {
            atms,
            total_candidates,
        }
    }
}

impl Default for Locator {
    fn default() -> Self {
        Self::with_default_limit()
    }
}
