use crate::error::AuditError;

/// Hosting environment variant for the active cluster.
///
/// On `DbColocated` clusters each install's database files live on local
/// disk under the MySQL data root, so their on-disk footprint is measured
/// and reported. `DbRemote` clusters host the database off-node and the
/// on-disk column does not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorVariant {
    DbColocated,
    DbRemote,
}

impl VendorVariant {
    /// Maps the inventory service's provider tag to a variant. Exactly two
    /// providers are recognized; anything else aborts the run before any
    /// per-install work starts.
    pub fn classify(provider: &str) -> Result<Self, AuditError> {
        match provider {
            "google" => Ok(VendorVariant::DbColocated),
            "amazon" => Ok(VendorVariant::DbRemote),
            other => Err(AuditError::UnknownProvider(other.to_string())),
        }
    }
}
