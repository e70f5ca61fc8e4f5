use std::path::Path;

use anyhow::{Result, bail};

use crate::config;

/// `rembrandt init`: create `<root>/config.toml`.
pub fn init(root: &Path, force: bool) -> Result<()> {
    if !force && config::config_file_exists(root) {
        bail!(
            "{}/config.toml already exists (use --force to overwrite)",
            root.display()
        );
    }

    config::write_template(root)?;
    config::write_gitignore(root, force)?;

    let verb = if force { "Regenerated" } else { "Created" };
    println!("{verb} {}/config.toml", root.display());
    println!("  Put reference PNGs in {}/reference/", root.display());
    println!("  Put candidate PNGs in {}/current/ and run `rembrandt test`", root.display());
    Ok(())
}
