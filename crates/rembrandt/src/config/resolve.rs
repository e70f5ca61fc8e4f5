use std::path::Path;

use anyhow::{Context, Result, anyhow};
use rembrandt_core::CompareOptions;

use super::{CompareConfig, load, validate_tolerance};

/// Values extracted from the CLI that participate in the merge.
#[derive(Default)]
pub struct CliOverrides {
    pub compare: CompareConfig,
    pub parallel: Option<usize>,
}

/// Fully resolved config after CLI > env > file > defaults merge.
#[derive(Debug)]
pub struct ResolvedRunConfig {
    pub options: CompareOptions,
    pub parallel: usize,
}

impl ResolvedRunConfig {
    pub fn new(root: &Path, cli: CliOverrides) -> Result<Self> {
        Self::with_env(root, cli, |key| std::env::var(key).ok())
    }

    /// Same as [`Self::new`] with an explicit environment lookup.
    pub fn with_env(
        root: &Path,
        cli: CliOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        // 1. File layer
        let file_config = load(root)?;

        // 2. Env layer
        let env_compare = CompareConfig {
            max_delta: env_float(&env, "REMBRANDT_MAX_DELTA")?,
            max_difference: env_float(&env, "REMBRANDT_MAX_DIFFERENCE")?,
            max_offset: env("REMBRANDT_MAX_OFFSET")
                .map(|v| v.parse::<u32>())
                .transpose()
                .context("REMBRANDT_MAX_OFFSET must be a non-negative integer")?,
        };

        // 3. CLI > env > file (lowest layer first, overlays on top)
        let mut compare = file_config.compare;
        compare.merge(&env_compare);
        compare.merge(&cli.compare);

        let parallel = cli
            .parallel
            .map(|p| p.max(1))
            .unwrap_or_else(|| file_config.run.parallel());

        Ok(Self {
            options: compare.to_options(),
            parallel,
        })
    }
}

fn env_float(env: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<f64>> {
    let Some(raw) = env(key) else {
        return Ok(None);
    };
    let v: f64 = raw
        .parse()
        .with_context(|| format!("{key} must be a valid float"))?;
    validate_tolerance(v).map_err(|e| anyhow!("{key} {e}"))?;
    Ok(Some(v))
}
