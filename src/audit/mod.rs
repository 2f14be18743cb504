pub mod aggregate;
pub mod collect;
pub mod format;
pub mod report;
pub mod vendor;

/// Usage measurements for a single install, assembled by the collector.
///
/// All byte fields are raw counts; unit conversion happens only at render
/// time. `production_db_disk_bytes` is populated only on clusters where the
/// database files are locally addressable, and stays 0 everywhere else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallMetrics {
    pub install_id: String,
    pub is_multisite: bool,
    pub production_disk_bytes: u64,
    pub staging_disk_bytes: u64,
    pub production_db_disk_bytes: u64,
    pub production_db_data_bytes: u64,
    pub staging_db_data_bytes: u64,
}
