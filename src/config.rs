//! Pipeline parameter loading from `params.yaml`.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, error};

use crate::errors::PipelineError;

/// Resolved pipeline parameters.
#[derive(Clone, Debug, Deserialize)]
pub struct Params {
    /// Feature engineering section.
    pub feature_engineering: FeatureParams,
}

/// Parameters consumed by the feature engineering stage.
#[derive(Clone, Debug, Deserialize)]
pub struct FeatureParams {
    /// Upper bound on the TF-IDF vocabulary size.
    pub max_features: usize,
}

/// Load and parse the params file at `path`.
pub fn load_params(path: impl AsRef<Path>) -> Result<Params, PipelineError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|err| {
        error!("params file not found at {}: {err}", path.display());
        PipelineError::Config(format!("cannot read params file '{}': {err}", path.display()))
    })?;
    let params: Params = serde_yaml::from_str(&raw).map_err(|err| {
        error!("malformed params file {}: {err}", path.display());
        PipelineError::Config(format!("malformed params file '{}': {err}", path.display()))
    })?;
    debug!("params retrieved from {}", path.display());
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_max_features() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.yaml");
        fs::write(&path, "feature_engineering:\n  max_features: 500\n").unwrap();
        let params = load_params(&path).unwrap();
        assert_eq!(params.feature_engineering.max_features, 500);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = load_params("/definitely/not/here/params.yaml").unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.yaml");
        fs::write(&path, "feature_engineering: [not, a, mapping\n").unwrap();
        let err = load_params(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }
}
