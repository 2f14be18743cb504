use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::error::AuditError;

/// Runtime configuration for the audit. Every field has a production
/// default, so running without a config file is the normal case.
#[derive(Deserialize, Debug, Clone)]
pub struct AuditConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_cluster_id_file")]
    pub cluster_id_file: String,

    #[serde(default = "default_live_content_root")]
    pub live_content_root: String,

    #[serde(default = "default_staging_content_root")]
    pub staging_content_root: String,

    #[serde(default = "default_mysql_data_root")]
    pub mysql_data_root: String,

    #[serde(default = "default_site_tools_script")]
    pub site_tools_script: String,

    #[serde(default = "default_min_free_memory_bytes")]
    pub min_free_memory_bytes: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:8091".to_string()
}

fn default_cluster_id_file() -> String {
    "/etc/cluster-id".to_string()
}

fn default_live_content_root() -> String {
    "/nas/content/live".to_string()
}

fn default_staging_content_root() -> String {
    "/nas/content/staging".to_string()
}

fn default_mysql_data_root() -> String {
    "/nas/mysql".to_string()
}

fn default_site_tools_script() -> String {
    "/nas/wp/www/tools/wpe.php".to_string()
}

fn default_min_free_memory_bytes() -> u64 {
    256 * 1024 * 1024
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            cluster_id_file: default_cluster_id_file(),
            live_content_root: default_live_content_root(),
            staging_content_root: default_staging_content_root(),
            mysql_data_root: default_mysql_data_root(),
            site_tools_script: default_site_tools_script(),
            min_free_memory_bytes: default_min_free_memory_bytes(),
        }
    }
}

impl AuditConfig {
    /// Loads configuration from an optional TOML file. A missing file falls
    /// back to defaults; a present but unparsable file is an error.
    pub fn load(config_path: Option<&str>) -> Result<Self, AuditError> {
        let Some(path_str) = config_path else {
            return Ok(Self::default());
        };

        let path = Path::new(path_str);
        if !path.exists() {
            warn!(path = path_str, "Config file not found, using defaults.");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| AuditError::Config(format!("failed to read {path_str}: {e}")))?;
        toml::from_str(&contents)
            .map_err(|e| AuditError::Config(format!("failed to parse {path_str}: {e}")))
    }
}
