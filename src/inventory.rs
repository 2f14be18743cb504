use serde::Deserialize;

use crate::error::AuditError;

/// Cluster metadata returned by the inventory service. Only the provider
/// tag matters here; the payload carries more fields that are ignored.
#[derive(Deserialize, Debug, Clone)]
pub struct ClusterInfo {
    pub provider: String,
}

/// Client for the internal inventory API. Any transport failure or
/// non-success status is fatal: the vendor variant and install list both
/// come from here, and nothing downstream works without them.
pub struct InventoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl InventoryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn cluster_info(&self, cluster_id: &str) -> Result<ClusterInfo, AuditError> {
        let url = format!("{}/clusters/{cluster_id}", self.base_url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AuditError::InventoryStatus {
                status: response.status(),
                url,
            });
        }
        Ok(response.json().await?)
    }

    /// The active installs on the cluster, used when no explicit install
    /// list was given on the command line.
    pub async fn sites_on_cluster(&self, cluster_id: &str) -> Result<Vec<String>, AuditError> {
        let url = format!("{}/v2/clusters/{cluster_id}/sites", self.base_url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AuditError::InventoryStatus {
                status: response.status(),
                url,
            });
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_info_tolerates_extra_fields() {
        let info: ClusterInfo =
            serde_json::from_str(r#"{"provider": "google", "region": "us-central1", "pod": 1234}"#)
                .unwrap();
        assert_eq!(info.provider, "google");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = InventoryClient::new("http://inventory.internal:9000/");
        assert_eq!(client.base_url, "http://inventory.internal:9000");
    }
}
