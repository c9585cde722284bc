// Integration tests for the ATM locator search pipeline

use atm_locator::core::{Locator, geo::{haversine_distance, calculate_bounding_box}};
use atm_locator::models::Atm;

fn create_test_atm(id: &str, lat: f64, lng: f64) -> Atm {
    Atm {
        id: id.to_string(),
        name: format!("ATM {}", id),
        latitude: lat,
        longitude: lng,
        address: serde_json::json!({
            "street_number": "100",
            "street_name": "Broadway",
            "city": "New York",
            "state": "NY",
            "zip": "10005"
        }),
    }
}

#[test]
fn test_integration_end_to_end_search() {
    let locator = Locator::with_default_limit();
    let (lat, lng) = (40.7128, -74.0060); // New York

    // Candidates as a bounding-box query would return them, plus a few
    // corner cases that the refinement stage must drop
    let candidates = vec![
        create_test_atm("1", 40.72, -74.01),  // ~0.6mi
        create_test_atm("2", 40.73, -74.02),  // ~1.4mi
        create_test_atm("3", 40.71, -74.00),  // ~0.4mi
        create_test_atm("4", 40.75, -73.99),  // ~2.7mi
        create_test_atm("5", 40.78, -73.95),  // ~5.5mi, beyond the radius
        create_test_atm("6", 40.85, -74.00),  // ~9.5mi, box corner artifact
    ];

    let result = locator.find_nearby(lat, lng, 5.0, candidates);

    assert_eq!(result.total_candidates, 6);
    assert!(result.atms.len() >= 3, "Expected at least 3 ATMs, got {}", result.atms.len());

    // Every returned ATM is within the radius
    for atm in &result.atms {
        assert!(atm.distance <= 5.0, "ATM {} at {}mi exceeds the radius", atm.id, atm.distance);
    }

    // Results are sorted nearest first
    for pair in result.atms.windows(2) {
        assert!(pair[0].distance <= pair[1].distance, "ATMs not sorted by distance");
    }

    // The far candidates never survive refinement
    assert!(result.atms.iter().all(|a| a.id != "5" && a.id != "6"));
}

#[test]
fn test_distance_accuracy() {
    let nyc_lat = 40.7128;
    let nyc_lng = -74.0060;

    // Distance to same point should be 0
    let distance = haversine_distance(nyc_lat, nyc_lng, nyc_lat, nyc_lng);
    assert!(distance.abs() < 0.01);

    // Distance to nearby point
    let distance = haversine_distance(nyc_lat, nyc_lng, 40.72, -74.01);
    assert!(distance > 0.0 && distance < 1.5, "Expected under 1.5mi, got {}", distance);

    // Distance to LA (approximately 2445 miles)
    let la_lat = 34.0522;
    let la_lng = -118.2437;
    let distance = haversine_distance(nyc_lat, nyc_lng, la_lat, la_lng);
    assert!((distance - 2445.0).abs() < 60.0, "Expected ~2445mi, got {}", distance);
}

#[test]
fn test_bounding_box_filtering() {
    let center_lat = 40.7128;
    let center_lng = -74.0060;
    let radius_miles = 10.0;

    let bbox = calculate_bounding_box(center_lat, center_lng, radius_miles);

    // A point well inside the radius
    let distance_to_inside = haversine_distance(center_lat, center_lng, 40.71, -74.0);
    assert!(distance_to_inside < radius_miles);
    assert!(40.71 > bbox.min_lat && 40.71 < bbox.max_lat);

    // A point far outside
    let distance_to_far = haversine_distance(center_lat, center_lng, 50.0, -80.0);
    assert!(distance_to_far > radius_miles * 10.0);
    assert!(50.0 > bbox.max_lat);
}

#[test]
fn test_empty_store_returns_empty_result() {
    let locator = Locator::with_default_limit();

    let result = locator.find_nearby(40.7128, -74.0060, 5.0, vec![]);

    assert!(result.atms.is_empty());
    assert_eq!(result.total_candidates, 0);
}

#[test]
fn test_max_limit_enforcement() {
    let locator = Locator::with_default_limit();
    let (lat, lng) = (40.7128, -74.0060);

    // More in-radius candidates than the cap allows
    let candidates: Vec<Atm> = (0..120)
        .map(|i| create_test_atm(&i.to_string(), lat + (i as f64 * 0.0001), lng))
        .collect();

    let result = locator.find_nearby(lat, lng, 5.0, candidates);

    assert_eq!(result.atms.len(), 50, "Should never exceed 50 results");
}
