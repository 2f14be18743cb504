use super::vendor::VendorVariant;
use super::InstallMetrics;

/// Cluster-wide running sums, one per numeric metric. Created fresh each
/// run, written once per install, read once at render time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterTotals {
    pub production_disk_bytes: u64,
    pub production_db_disk_bytes: u64,
    pub production_db_data_bytes: u64,
    pub staging_disk_bytes: u64,
    pub staging_db_data_bytes: u64,
}

impl ClusterTotals {
    /// Folds per-install records into cluster totals. The sum is commutative
    /// and associative, so record order cannot affect the result. Fields that
    /// do not apply under the active vendor stay 0 and are simply not shown.
    pub fn aggregate(records: &[InstallMetrics]) -> Self {
        records.iter().fold(Self::default(), |mut totals, metrics| {
            totals.production_disk_bytes += metrics.production_disk_bytes;
            totals.production_db_disk_bytes += metrics.production_db_disk_bytes;
            totals.production_db_data_bytes += metrics.production_db_data_bytes;
            totals.staging_disk_bytes += metrics.staging_disk_bytes;
            totals.staging_db_data_bytes += metrics.staging_db_data_bytes;
            totals
        })
    }

    /// Combined filesystem footprint for the summary line. The on-disk
    /// database directories count only where they are locally addressable.
    pub fn combined_disk_bytes(&self, vendor: VendorVariant) -> u64 {
        let content = self.production_disk_bytes + self.staging_disk_bytes;
        match vendor {
            VendorVariant::DbColocated => content + self.production_db_disk_bytes,
            VendorVariant::DbRemote => content,
        }
    }

    /// Combined logical database size for the summary line.
    pub fn combined_db_bytes(&self) -> u64 {
        self.production_db_data_bytes + self.staging_db_data_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, prod: u64, db_disk: u64, db_data: u64, staging: u64, staging_db: u64) -> InstallMetrics {
        InstallMetrics {
            install_id: id.to_string(),
            is_multisite: false,
            production_disk_bytes: prod,
            staging_disk_bytes: staging,
            production_db_disk_bytes: db_disk,
            production_db_data_bytes: db_data,
            staging_db_data_bytes: staging_db,
        }
    }

    #[test]
    fn sums_every_numeric_field() {
        let records = vec![
            record("a", 100, 10, 1000, 50, 5),
            record("b", 200, 20, 2000, 60, 6),
            record("c", 300, 30, 3000, 70, 7),
        ];
        let totals = ClusterTotals::aggregate(&records);
        assert_eq!(totals.production_disk_bytes, 600);
        assert_eq!(totals.production_db_disk_bytes, 60);
        assert_eq!(totals.production_db_data_bytes, 6000);
        assert_eq!(totals.staging_disk_bytes, 180);
        assert_eq!(totals.staging_db_data_bytes, 18);
    }

    #[test]
    fn aggregation_is_order_independent() {
        let forward = vec![
            record("a", 100, 10, 1000, 50, 5),
            record("b", 200, 20, 2000, 60, 6),
            record("c", 300, 30, 3000, 70, 7),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        let mut rotated = forward.clone();
        rotated.rotate_left(1);

        assert_eq!(ClusterTotals::aggregate(&forward), ClusterTotals::aggregate(&reversed));
        assert_eq!(ClusterTotals::aggregate(&forward), ClusterTotals::aggregate(&rotated));
    }

    #[test]
    fn no_records_means_zero_totals() {
        assert_eq!(ClusterTotals::aggregate(&[]), ClusterTotals::default());
    }

    #[test]
    fn combined_disk_counts_db_directories_only_when_colocated() {
        let totals = ClusterTotals {
            production_disk_bytes: 100,
            staging_disk_bytes: 50,
            production_db_disk_bytes: 25,
            ..Default::default()
        };
        assert_eq!(totals.combined_disk_bytes(VendorVariant::DbColocated), 175);
        assert_eq!(totals.combined_disk_bytes(VendorVariant::DbRemote), 150);
    }

    #[test]
    fn combined_db_spans_production_and_staging() {
        let totals = ClusterTotals {
            production_db_data_bytes: 104857600,
            staging_db_data_bytes: 1024,
            ..Default::default()
        };
        assert_eq!(totals.combined_db_bytes(), 104858624);
    }
}
