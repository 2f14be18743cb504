use async_trait::async_trait;
use tokio::process::Command;
use tracing::warn;

use crate::audit::collect::{DbProbe, SiteInfoProbe};
use crate::config::AuditConfig;
use crate::error::AuditError;

/// Database and install lookups routed through the platform's `wp` CLI and
/// helper script, which hold the per-install credentials so this tool never
/// has to.
pub struct WpCliProbe {
    live_content_root: String,
    site_tools_script: String,
}

impl WpCliProbe {
    pub fn new(config: &AuditConfig) -> Self {
        Self {
            live_content_root: config.live_content_root.clone(),
            site_tools_script: config.site_tools_script.clone(),
        }
    }

    async fn exec_wp(&self, args: &[&str]) -> Result<String, AuditError> {
        let output = Command::new("wp")
            .args(args)
            .output()
            .await
            .map_err(|e| AuditError::DbQuery(format!("failed to spawn wp: {e}")))?;
        if !output.status.success() {
            return Err(AuditError::DbQuery(format!(
                "wp {} exited with {}: {}",
                args.first().copied().unwrap_or_default(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Runs a query through a specific install's database connection.
    async fn run_install_query(&self, install: &str, sql: &str) -> Result<String, AuditError> {
        let path_arg = format!("--path={}/{}", self.live_content_root, install);
        self.exec_wp(&[&path_arg, "db", "query", sql, "--skip-column-names"])
            .await
    }

    /// Runs a query through the install in the current working directory.
    /// The preflight step guarantees the tool runs inside one.
    async fn run_local_query(&self, sql: &str) -> Result<String, AuditError> {
        self.exec_wp(&["db", "query", sql, "--skip-column-names"]).await
    }

    /// Server-wide InnoDB buffer pool size; every install on the node shares
    /// the one database server instance.
    pub async fn buffer_pool_size(&self) -> Result<u64, AuditError> {
        let raw = self
            .run_local_query("SELECT @@GLOBAL.innodb_buffer_pool_size;")
            .await?;
        raw.parse()
            .map_err(|_| AuditError::DbQuery(format!("unexpected buffer pool size value: {raw}")))
    }
}

fn schema_size_sql(schema: &str) -> String {
    format!(
        "SELECT SUM(data_length + index_length) FROM information_schema.TABLES \
         WHERE table_schema = '{schema}' AND TABLE_TYPE = 'BASE TABLE';"
    )
}

/// A NULL aggregate means the schema does not exist or has no base tables.
fn parse_aggregate(raw: &str) -> Result<Option<u64>, AuditError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "NULL" {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| AuditError::DbQuery(format!("unexpected aggregate value: {trimmed}")))
}

#[async_trait]
impl DbProbe for WpCliProbe {
    async fn schema_data_size(
        &self,
        install: &str,
        schema: &str,
    ) -> Result<Option<u64>, AuditError> {
        let raw = self.run_install_query(install, &schema_size_sql(schema)).await?;
        parse_aggregate(&raw)
    }
}

#[async_trait]
impl SiteInfoProbe for WpCliProbe {
    async fn is_multisite(&self, install: &str) -> bool {
        let result = Command::new("php")
            .arg(&self.site_tools_script)
            .args(["option-get", install, "mu"])
            .output()
            .await;
        match result {
            Ok(output) if output.status.success() => {
                String::from_utf8_lossy(&output.stdout).trim() == "1"
            }
            Ok(output) => {
                warn!(install, status = %output.status, "Multisite lookup exited non-zero, assuming not multisite.");
                false
            }
            Err(e) => {
                warn!(install, error = %e, "Multisite lookup failed, assuming not multisite.");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_size_query_covers_base_tables_only() {
        let sql = schema_size_sql("wp_alpha");
        assert!(sql.contains("SUM(data_length + index_length)"));
        assert!(sql.contains("table_schema = 'wp_alpha'"));
        assert!(sql.contains("TABLE_TYPE = 'BASE TABLE'"));
    }

    #[test]
    fn null_aggregate_is_none_not_an_error() {
        assert_eq!(parse_aggregate("NULL").unwrap(), None);
        assert_eq!(parse_aggregate("").unwrap(), None);
        assert_eq!(parse_aggregate("  NULL  ").unwrap(), None);
    }

    #[test]
    fn numeric_aggregates_parse() {
        assert_eq!(parse_aggregate("104857600").unwrap(), Some(104857600));
        assert_eq!(parse_aggregate(" 1024 \n").unwrap(), Some(1024));
    }

    #[test]
    fn garbage_aggregates_are_errors() {
        assert!(parse_aggregate("not-a-number").is_err());
    }
}
