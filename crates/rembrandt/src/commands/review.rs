use anyhow::{Context, Result};

use crate::report::html;
use crate::store::Store;

fn open_in_browser(path: &std::path::Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    let cmd = "open";
    #[cfg(target_os = "linux")]
    let cmd = "xdg-open";
    #[cfg(target_os = "windows")]
    let cmd = "explorer";

    std::process::Command::new(cmd)
        .arg(path)
        .spawn()
        .context("Failed to open report in browser")?;
    Ok(())
}

/// `rembrandt review`: generate static HTML report.
pub fn review(store: &Store, open: bool) -> Result<()> {
    let summary = html::generate(store)?;
    println!(
        "Report written to {} ({} failed, {} new)",
        summary.path.display(),
        summary.failed,
        summary.new
    );

    if open {
        let path = std::fs::canonicalize(&summary.path).unwrap_or(summary.path);
        open_in_browser(&path)?;
    }

    Ok(())
}
