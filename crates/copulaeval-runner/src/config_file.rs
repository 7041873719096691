//! Loading experiment parameters from TOML.
//!
//! Every key is optional; missing keys keep the reference values.
//!
//! ```toml
//! trials = 5
//! mask_fraction = 0.2
//!
//! [generator]
//! rows = 500
//! binary_cutoff = "median"
//! ```

use std::fs;
use std::path::Path;

use copulaeval_core::config::ExperimentConfig;

use crate::error::{Result, RunnerError};

/// Parses and validates an experiment configuration from TOML text.
pub fn parse_config(text: &str, origin: &str) -> Result<ExperimentConfig> {
    let config: ExperimentConfig =
        toml::from_str(text).map_err(|e| RunnerError::config(origin, e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Reads, parses and validates an experiment configuration file.
pub fn load_config(path: &Path) -> Result<ExperimentConfig> {
    let origin = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|e| RunnerError::config(&origin, e.to_string()))?;
    parse_config(&text, &origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use copulaeval_core::config::BinaryCutoff;
    use copulaeval_core::schema::{ColumnKind, ColumnSchema};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_file_is_reference() {
        let config = parse_config("", "inline").unwrap();
        assert_eq!(config, ExperimentConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let text = r#"
            trials = 4
            mask_fraction = 0.2

            [generator]
            rows = 300
            binary_cutoff = "median"
        "#;
        let config = parse_config(text, "inline").unwrap();
        assert_eq!(config.trials, 4);
        assert_eq!(config.mask_fraction, 0.2);
        assert_eq!(config.generator.rows, 300);
        assert_eq!(config.generator.binary_cutoff, BinaryCutoff::Median);
        assert_eq!(config.generator.schema, ColumnSchema::reference());
        assert_eq!(config.first_seed, 1);
    }

    #[test]
    fn test_custom_schema() {
        let text = r#"
            [generator.schema]
            kinds = ["continuous", "ordinal"]
        "#;
        let config = parse_config(text, "inline").unwrap();
        assert_eq!(
            config.generator.schema.kinds(),
            &[ColumnKind::Continuous, ColumnKind::Ordinal]
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            parse_config("mask_fraction = 1.0", "inline"),
            Err(RunnerError::Eval(_))
        ));
        assert!(matches!(
            parse_config("trials = \"many\"", "inline"),
            Err(RunnerError::Config { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/copulaeval.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/copulaeval.toml"));
    }
}
