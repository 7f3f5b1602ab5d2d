use std::{fs, path::Path};

use route_recovery_core::RecoveryConfig;
use tracing::{debug, info};

use crate::error::CliError;

/// Read and validate the TOML config, falling back to defaults without a file
pub fn load_config(path: Option<&Path>) -> Result<RecoveryConfig, CliError> {
    let config = match path {
        Some(path) => {
            info!("Reading config from {}", path.display());
            let text = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&text).map_err(|source| CliError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?
        }
        None => RecoveryConfig::default(),
    };
    config.validate()?;
    debug!(?config, "Effective config");
    Ok(config)
}

pub fn render_config(config: &RecoveryConfig) -> Result<String, CliError> {
    Ok(toml::to_string(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[batch]\nwindow_minutes = 30\n\n[diversity]\nsimilarity_threshold = 0.5\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.batch.window_minutes, 30);
        assert_eq!(config.diversity.similarity_threshold, 0.5);
        assert_eq!(config.penalty, RecoveryConfig::default().penalty);
    }

    #[test]
    fn invalid_values_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[batch]\nmin_multiplier = 9.0\n").unwrap();
        assert!(matches!(load_config(Some(&path)), Err(CliError::Core(_))));

        fs::write(&path, "[batch\n").unwrap();
        assert!(matches!(
            load_config(Some(&path)),
            Err(CliError::ConfigParse { .. })
        ));
    }

    #[test]
    fn rendered_config_parses_back() {
        let config = RecoveryConfig::default();
        let text = render_config(&config).unwrap();
        let parsed: RecoveryConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn mapped_ratio_filter_can_be_turned_off() {
        let mut config = RecoveryConfig::default();
        config.resource_constrained.max_mapped_ratio = f64::INFINITY;
        let text = render_config(&config).unwrap();
        let parsed: RecoveryConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.resource_constrained.max_mapped_ratio, f64::INFINITY);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[resource_constrained]\nmax_mapped_ratio = inf\n").unwrap();
        let loaded = load_config(Some(&path)).unwrap();
        assert!(loaded.resource_constrained.max_mapped_ratio.is_infinite());
    }
}
