use std::path::Path;

use anyhow::{Context, Result};

use super::CONFIG_FILE;

/// Hand-crafted config template with commented-out keys.
/// Used by `rembrandt init` instead of `toml::to_string_pretty()` so that
/// users can see the available knobs and their defaults.
const CONFIG_TEMPLATE: &str = r#"# ─────────────────────────────────────────────────────────
# Comparison: all fields optional.
# ─────────────────────────────────────────────────────────
[compare]
# max_delta = 1.0                   # color delta below which pixels match (white vs black ~27.7)
# max_difference = 0.01             # max number of failing pixels (a count, not a fraction)
# max_offset = 0                    # neighborhood radius for shifted content (0 = off)

# ─────────────────────────────────────────────────────────
# Batch runs: all fields optional.
# ─────────────────────────────────────────────────────────
[run]
# parallel = 4                      # concurrent comparisons in `rembrandt test`
"#;

pub fn config_file_exists(root: &Path) -> bool {
    root.join(CONFIG_FILE).exists()
}

pub fn write_gitignore(root: &Path, force: bool) -> Result<()> {
    let path = root.join(".gitignore");
    if !force && path.exists() {
        return Ok(());
    }
    std::fs::write(&path, "current/\ndifference/\nreport.html\n")
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Write the hand-crafted config template (with commented-out keys).
pub fn write_template(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root)
        .with_context(|| format!("Failed to create {}", root.display()))?;
    let path = root.join(CONFIG_FILE);
    std::fs::write(&path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, load};

    #[test]
    fn template_parses_to_defaults() {
        let config: Config = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn written_template_round_trips_through_load() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(".rembrandt");
        assert!(!config_file_exists(&root));
        write_template(&root).unwrap();
        assert!(config_file_exists(&root));
        assert_eq!(load(&root).unwrap(), Config::default());
    }

    #[test]
    fn gitignore_kept_unless_forced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".gitignore");
        std::fs::write(&path, "custom\n").unwrap();

        write_gitignore(dir.path(), false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "custom\n");

        write_gitignore(dir.path(), true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("difference/"));
    }
}
