pub mod ingestion;
pub mod server;
