use std::io;
use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::vendor::VendorVariant;
use super::InstallMetrics;
use crate::config::AuditConfig;
use crate::error::AuditError;

/// Size reported for a staging directory that was created but never
/// populated. One bare filesystem block is an artifact, not content.
const EMPTY_DIR_BYTES: u64 = 4096;

/// Recursive filesystem measurement seam.
#[async_trait]
pub trait DiskProbe: Send + Sync {
    /// Recursive size of `path` in bytes. `Ok(None)` means the path does not
    /// exist; errors are reserved for failed measurements of present paths.
    async fn directory_size(&self, path: &Path) -> io::Result<Option<u64>>;
}

/// Logical database size seam.
#[async_trait]
pub trait DbProbe: Send + Sync {
    /// `SUM(data_length + index_length)` over the schema's base tables,
    /// routed through the given install's database connection. `Ok(None)`
    /// when the aggregate is NULL (no such schema, or no base tables).
    async fn schema_data_size(&self, install: &str, schema: &str) -> Result<Option<u64>, AuditError>;
}

/// Install inventory lookups that are not size measurements.
#[async_trait]
pub trait SiteInfoProbe: Send + Sync {
    /// Whether the install is a multi-tenant site network. Implementations
    /// report lookup failures as `false`.
    async fn is_multisite(&self, install: &str) -> bool;
}

/// Production schema name for an install.
pub fn production_schema(install: &str) -> String {
    format!("wp_{install}")
}

/// Staging schema name for an install. Staging data lives in a separate
/// snapshot schema, not under the production name.
pub fn staging_schema(install: &str) -> String {
    format!("snapshot_{install}")
}

/// Assembles the per-install metrics record from the external collaborators.
///
/// Per-install anomalies are absorbed: a missing directory or a failed
/// measurement counts as 0 and the audit keeps going. Only database query
/// failures propagate, since a raising query means the cluster context
/// itself is broken.
pub struct InstallCollector<'a> {
    config: &'a AuditConfig,
    disk: &'a dyn DiskProbe,
    db: &'a dyn DbProbe,
    site_info: &'a dyn SiteInfoProbe,
}

impl<'a> InstallCollector<'a> {
    pub fn new(
        config: &'a AuditConfig,
        disk: &'a dyn DiskProbe,
        db: &'a dyn DbProbe,
        site_info: &'a dyn SiteInfoProbe,
    ) -> Self {
        Self {
            config,
            disk,
            db,
            site_info,
        }
    }

    pub async fn collect(
        &self,
        install_id: &str,
        vendor: VendorVariant,
    ) -> Result<InstallMetrics, AuditError> {
        let is_multisite = self.site_info.is_multisite(install_id).await;

        let production_path = Path::new(&self.config.live_content_root).join(install_id);
        let production_disk_bytes = self.measured_or_zero(&production_path).await;

        let production_db_disk_bytes = match vendor {
            VendorVariant::DbColocated => {
                let db_path =
                    Path::new(&self.config.mysql_data_root).join(production_schema(install_id));
                self.measured_or_zero(&db_path).await
            }
            VendorVariant::DbRemote => 0,
        };

        let production_db_data_bytes = self
            .db
            .schema_data_size(install_id, &production_schema(install_id))
            .await?
            .unwrap_or(0);

        let staging_path = Path::new(&self.config.staging_content_root).join(install_id);
        let mut staging_disk_bytes = self.measured_or_zero(&staging_path).await;
        if staging_disk_bytes == EMPTY_DIR_BYTES {
            staging_disk_bytes = 0;
        }

        let staging_db_data_bytes = self
            .db
            .schema_data_size(install_id, &staging_schema(install_id))
            .await?
            .unwrap_or(0);

        Ok(InstallMetrics {
            install_id: install_id.to_string(),
            is_multisite,
            production_disk_bytes,
            staging_disk_bytes,
            production_db_disk_bytes,
            production_db_data_bytes,
            staging_db_data_bytes,
        })
    }

    async fn measured_or_zero(&self, path: &Path) -> u64 {
        match self.disk.directory_size(path).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(path = %path.display(), "Path does not exist, counting as 0.");
                0
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Measurement failed, counting as 0.");
                0
            }
        }
    }
}
