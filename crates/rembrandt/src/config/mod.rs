pub mod resolve;
pub mod template;

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use rembrandt_core::CompareOptions;
use serde::{Deserialize, Serialize};

pub use self::resolve::{CliOverrides, ResolvedRunConfig};
pub use self::template::{config_file_exists, write_gitignore, write_template};

pub(crate) const CONFIG_DIR: &str = ".rembrandt";
const CONFIG_FILE: &str = "config.toml";

pub fn validate_tolerance(v: f64) -> Result<f64, String> {
    if !v.is_finite() || v < 0.0 {
        return Err(format!("must be a finite value >= 0, got {v}"));
    }
    Ok(v)
}

fn parse_tolerance(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    validate_tolerance(v)
}

/// Comparison tolerances.
///
/// Fields are `Option`: `None` means "use the engine default".
/// Serves both TOML deserialization (`[compare]`) and CLI argument parsing.
#[derive(Clone, Debug, Default, PartialEq, clap::Args, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Color delta below which two pixels match (opaque white vs black is ~27.7)
    #[arg(long, value_parser = parse_tolerance)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_delta: Option<f64>,

    /// Maximum number of failing pixels for the comparison to pass
    #[arg(long, value_parser = parse_tolerance)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_difference: Option<f64>,

    /// Radius in pixels searched for shifted content (0 disables it)
    #[arg(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_offset: Option<u32>,
}

impl CompareConfig {
    /// Overlay non-None fields from `other` onto self.
    pub fn merge(&mut self, other: &CompareConfig) {
        if other.max_delta.is_some() {
            self.max_delta = other.max_delta;
        }
        if other.max_difference.is_some() {
            self.max_difference = other.max_difference;
        }
        if other.max_offset.is_some() {
            self.max_offset = other.max_offset;
        }
    }

    pub fn to_options(&self) -> CompareOptions {
        let defaults = CompareOptions::default();
        CompareOptions {
            max_delta: self.max_delta.unwrap_or(defaults.max_delta),
            max_difference: self.max_difference.unwrap_or(defaults.max_difference),
            max_offset: self.max_offset.unwrap_or(defaults.max_offset),
            render_composition: defaults.render_composition,
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("max_delta", self.max_delta),
            ("max_difference", self.max_difference),
        ] {
            if let Some(v) = value {
                validate_tolerance(v).map_err(|e| anyhow!("compare.{name} {e}"))?;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Concurrent comparisons in `rembrandt test`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<usize>,
}

impl RunConfig {
    pub fn parallel(&self) -> usize {
        self.parallel.unwrap_or(4).max(1)
    }
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub compare: CompareConfig,
    #[serde(default)]
    pub run: RunConfig,
}

/// Load `<root>/config.toml`. A missing file yields the defaults.
pub fn load(root: &Path) -> Result<Config> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    config.compare.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, content: &str) {
        std::fs::write(dir.join(CONFIG_FILE), content).unwrap();
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.compare.to_options(), CompareOptions::default());
        assert_eq!(config.run.parallel(), 4);
    }

    #[test]
    fn parses_all_sections() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "[compare]\nmax_delta = 2.5\nmax_difference = 10.0\nmax_offset = 1\n\n[run]\nparallel = 2\n",
        );
        let config = load(dir.path()).unwrap();
        let options = config.compare.to_options();
        assert_eq!(options.max_delta, 2.5);
        assert_eq!(options.max_difference, 10.0);
        assert_eq!(options.max_offset, 1);
        assert!(!options.render_composition);
        assert_eq!(config.run.parallel(), 2);
    }

    #[test]
    fn negative_tolerance_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "[compare]\nmax_delta = -1.0\n");
        let err = load(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("compare.max_delta"));
    }

    #[test]
    fn unparsable_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "[compare\n");
        let err = load(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }

    #[test]
    fn merge_overlays_only_set_fields() {
        let mut base = CompareConfig {
            max_delta: Some(3.0),
            max_difference: Some(5.0),
            max_offset: None,
        };
        base.merge(&CompareConfig {
            max_delta: None,
            max_difference: Some(0.0),
            max_offset: Some(2),
        });
        assert_eq!(
            base,
            CompareConfig {
                max_delta: Some(3.0),
                max_difference: Some(0.0),
                max_offset: Some(2),
            }
        );
    }

    #[test]
    fn parallel_never_zero() {
        let run = RunConfig { parallel: Some(0) };
        assert_eq!(run.parallel(), 1);
    }
}
