use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{calculate_bounding_box, Locator};
use crate::models::{ErrorResponse, HealthResponse, NearbyQuery};
use crate::services::PostgresClient;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PostgresClient>,
    pub locator: Locator,
}

/// Configure all ATM-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/atms/nearby", web::get().to(find_nearby));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Proximity search endpoint
///
/// GET /api/v1/atms/nearby?lat=40.71&lng=-74.00&radius=5
///
/// Responds with a JSON array of ATMs within `radius` miles of the
/// center, nearest first, capped at the configured result limit.
async fn find_nearby(
    state: web::Data<AppState>,
    query: web::Query<NearbyQuery>,
) -> impl Responder {
    // Validate coordinate ranges
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for nearby request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let NearbyQuery { lat, lng, radius } = query.into_inner();

    tracing::info!("Searching ATMs within {}mi of ({}, {})", radius, lat, lng);

    let bbox = calculate_bounding_box(lat, lng, radius);

    // Coarse candidate fetch; the locator refines with exact distance
    let candidates = match state
        .store
        .query_within(&bbox, state.locator.max_results())
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to query ATMs: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to query ATMs".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let result = state.locator.find_nearby(lat, lng, radius, candidates);

    tracing::info!(
        "Returning {} ATMs (from {} candidates)",
        result.atms.len(),
        result.total_candidates
    );

    HttpResponse::Ok().json(result.atms)
}
