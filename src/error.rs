use thiserror::Error;

/// Fatal failure taxonomy. Per-install anomalies (missing directories, NULL
/// aggregates, unreadable paths) are absorbed into zero values by the
/// collector and never reach this type.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Failed to load configuration: {0}")]
    Config(String),
    #[error("Preflight checks failed:\n{0}")]
    Preflight(String),
    #[error("Failed to read cluster identity from {path}: {source}")]
    Identity {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Cluster identity file {0} is empty")]
    EmptyIdentity(String),
    #[error("Inventory API request failed: {0}")]
    Inventory(#[from] reqwest::Error),
    #[error("Inventory API returned status {status} for {url}")]
    InventoryStatus {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("Unrecognized hosting provider tag: {0}")]
    UnknownProvider(String),
    #[error("Database query failed: {0}")]
    DbQuery(String),
}
