//! Run configuration: YAML file plus command-line overrides

use std::fs;
use std::path::Path;

use color_eyre::eyre::WrapErr;
use efp_core::config::EfpConfig;

/// Values given on the command line; each replaces the loaded value when present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub num_simulations: Option<usize>,
    pub base_samples: Option<usize>,
}

impl Overrides {
    pub fn apply(&self, config: &mut EfpConfig) {
        if let Some(seed) = self.seed {
            config.simulation.seed = seed;
        }
        if let Some(n) = self.num_simulations {
            config.simulation.num_simulations = n;
        }
        if let Some(n) = self.base_samples {
            config.sensitivity.base_samples = n;
        }
    }
}

/// Parse a YAML configuration. Missing sections and fields take their defaults.
pub fn parse_config(yaml: &str) -> color_eyre::Result<EfpConfig> {
    serde_saphyr::from_str(yaml).wrap_err("failed to parse configuration")
}

/// Load the configuration from `path` (or the defaults), apply overrides, and validate
pub fn load_config(path: Option<&Path>, overrides: &Overrides) -> color_eyre::Result<EfpConfig> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
            tracing::info!(path = %path.display(), "loaded configuration file");
            parse_config(&content)?
        }
        None => EfpConfig::default(),
    };

    overrides.apply(&mut config);
    config.validate().wrap_err("invalid configuration")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_file() {
        let config = load_config(None, &Overrides::default()).unwrap();
        assert_eq!(config, EfpConfig::default());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "simulation:\n  num_simulations: 500\ntarget:\n  width: 10.0\n";
        let config = parse_config(yaml).unwrap();

        assert_eq!(config.simulation.num_simulations, 500);
        assert_eq!(config.simulation.seed, 42);
        assert_eq!(config.target.width, 10.0);
        assert_eq!(config.target.height, 3.6);
        assert_eq!(config.physics, EfpConfig::default().physics);
    }

    #[test]
    fn test_input_override_from_yaml() {
        let yaml = "inputs:\n  vx:\n    mean: 0.0\n    std_dev: 0.25\n";
        let config = parse_config(yaml).unwrap();

        assert_eq!(config.inputs.vx.std_dev, 0.25);
        assert_eq!(config.inputs.vy, EfpConfig::default().inputs.vy);
    }

    #[test]
    fn test_cli_overrides_win() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("efp.yaml");
        fs::write(&path, "simulation:\n  seed: 1\n  num_simulations: 50\n").unwrap();

        let overrides = Overrides {
            seed: Some(9),
            base_samples: Some(128),
            ..Default::default()
        };
        let config = load_config(Some(path.as_path()), &overrides).unwrap();

        assert_eq!(config.simulation.seed, 9);
        assert_eq!(config.simulation.num_simulations, 50);
        assert_eq!(config.sensitivity.base_samples, 128);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let overrides = Overrides {
            num_simulations: Some(0),
            ..Default::default()
        };
        assert!(load_config(None, &overrides).is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.yaml");
        let err = load_config(Some(path.as_path()), &Overrides::default()).unwrap_err();
        assert!(format!("{err}").contains("missing.yaml"));
    }
}
