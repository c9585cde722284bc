// Service exports
pub mod ingest;
pub mod nessie;
pub mod store;

pub use ingest::run_ingestion;
pub use nessie::{NessieClient, AtmPages, NessieError};
pub use store::{PostgresClient, AtmStore, StoreError};
