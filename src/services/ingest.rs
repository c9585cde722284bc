use serde::Deserialize;
use serde_json::Value;

use crate::models::{Atm, IngestionReport, InsertFailure};
use crate::services::nessie::NessieClient;
use crate::services::store::AtmStore;

/// Upstream ATM record shape, as far as ingestion needs it
#[derive(Debug, Deserialize)]
struct RawAtm {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    address: Value,
    geocode: Geocode,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct Geocode {
    lat: f64,
    lng: f64,
}

/// Parse one raw upstream record into a storable ATM
fn parse_atm(value: &Value) -> Result<Atm, String> {
    let raw: RawAtm =
        serde_json::from_value(value.clone()).map_err(|e| format!("malformed record: {}", e))?;

    Ok(Atm {
        id: raw.id,
        name: raw.name,
        latitude: raw.geocode.lat,
        longitude: raw.geocode.lng,
        address: raw.address,
    })
}

/// Best-effort id for reporting records that fail to parse
fn record_id(value: &Value) -> String {
    value
        .get("_id")
        .and_then(|v| v.as_str())
        .unwrap_or("<unknown>")
        .to_string()
}

/// Fetch every upstream page and insert the records one at a time
///
/// Each record is independent: a malformed record or a store rejection
/// is recorded in the report and the run continues with the next
/// record. No transaction spans records and nothing is rolled back.
/// Inserts happen in arrival order, so the report's failure list is
/// deterministic.
pub async fn run_ingestion<S: AtmStore>(upstream: &NessieClient, store: &S) -> IngestionReport {
    let mut report = IngestionReport::new();
    let mut pages = upstream.pages();

    while let Some(items) = pages.next_page().await {
        tracing::info!("Ingesting page of {} ATM records", items.len());

        for value in &items {
            match parse_atm(value) {
                Ok(atm) => match store.insert_atm(&atm).await {
                    Ok(()) => report.succeeded += 1,
                    Err(e) => {
                        tracing::warn!("Failed to insert ATM {}: {}", atm.id, e);
                        report.failed.push(InsertFailure {
                            id: atm.id,
                            reason: e.to_string(),
                        });
                    }
                },
                Err(reason) => {
                    let id = record_id(value);
                    tracing::warn!("Skipping ATM {}: {}", id, reason);
                    report.failed.push(InsertFailure { id, reason });
                }
            }
        }
    }

    report.upstream_complete = !pages.stopped_early();
    report
}
