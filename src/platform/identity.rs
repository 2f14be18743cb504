use crate::error::AuditError;

/// Reads the node's cluster identity file and returns its first
/// whitespace-delimited token. An unreadable or empty file is fatal: no
/// per-install work is meaningful without the cluster context.
pub fn local_cluster_id(path: &str) -> Result<String, AuditError> {
    let contents = std::fs::read_to_string(path).map_err(|source| AuditError::Identity {
        path: path.to_string(),
        source,
    })?;
    contents
        .split_whitespace()
        .next()
        .map(str::to_string)
        .ok_or_else(|| AuditError::EmptyIdentity(path.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn returns_the_first_token() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1234 extra trailing data").unwrap();
        let id = local_cluster_id(file.path().to_str().unwrap()).unwrap();
        assert_eq!(id, "1234");
    }

    #[test]
    fn empty_file_is_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = local_cluster_id(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, AuditError::EmptyIdentity(_)));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = local_cluster_id("/no/such/cluster-id").unwrap_err();
        assert!(matches!(err, AuditError::Identity { .. }));
    }
}
