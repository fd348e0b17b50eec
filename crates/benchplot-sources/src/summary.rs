//! k6 end-of-test summary loader.

use std::path::Path;

use benchplot_core::Summary;

use crate::error::SourceError;

/// Parse the JSON summary at `path` and tag it with the run `label`.
pub fn load_summary(path: &Path, label: &str) -> Result<Summary, SourceError> {
    let text = std::fs::read_to_string(path).map_err(|e| SourceError::io(path, e))?;
    let document = serde_json::from_str(&text).map_err(|source| SourceError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(label, path = %path.display(), "loaded summary");
    Ok(Summary::new(label, document))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_and_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("k6_summary_TCP_1.json");
        std::fs::write(&path, r#"{"metrics":{"http_reqs":{"rate":120.5}}}"#).unwrap();
        let summary = load_summary(&path, "TCP").unwrap();
        assert_eq!(summary.label, "TCP");
        assert_eq!(summary.document["metrics"]["http_reqs"]["rate"], 120.5);
    }

    #[test]
    fn invalid_json_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load_summary(&path, "QUIC").unwrap_err();
        assert!(matches!(err, SourceError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
