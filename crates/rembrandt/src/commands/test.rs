use std::time::Instant;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use rembrandt_core::CompareOptions;
use tracing::debug;

use crate::compare::SnapshotStatus;
use crate::compare::diff;
use crate::config::ResolvedRunConfig;
use crate::imaging;
use crate::report::terminal;
use crate::store::{self, Store};

/// Compare one current snapshot against its reference.
///
/// Failures leave a difference image in `difference/`; any other outcome clears it.
fn check_snapshot(store: &Store, id: &str, options: CompareOptions) -> Result<SnapshotStatus> {
    store.clean_difference(id);

    let current_png = store.read_current(id)?;
    let Some(reference_png) = store.read_reference(id) else {
        return Ok(SnapshotStatus::New);
    };

    let outcome = diff::compare_png(&reference_png, &current_png, options)?;
    if outcome.passed {
        return Ok(SnapshotStatus::Pass);
    }

    if let Some(image) = outcome.difference_image() {
        store.write_difference(id, &imaging::encode_png(&image)?)?;
    }

    Ok(SnapshotStatus::Fail {
        pixel_difference: outcome.pixel_difference,
        percentage_difference: outcome.percentage_difference,
        dimension_mismatch: outcome.dimension_mismatch,
    })
}

/// `rembrandt test`: compare every current snapshot against its reference.
/// Returns exit code: 0 = all pass, 1 = any fail, new or error.
pub async fn test(store: &Store, config: ResolvedRunConfig, filter: Option<&str>) -> Result<i32> {
    let ids: Vec<String> = store
        .list_current_ids()
        .into_iter()
        .filter(|id| store::matches_filter(id, filter))
        .collect();
    if ids.is_empty() {
        println!(
            "No snapshots to compare in {}.",
            store.dir(store::CURRENT_DIR).display()
        );
        return Ok(0);
    }

    let run_start = Instant::now();
    let total = ids.len();
    let options = config.options.with_composition(true);
    debug!(total, parallel = config.parallel, "comparing snapshots");

    let mut results = stream::iter(ids)
        .map(|id| {
            let store = store.clone();
            async move {
                let start = Instant::now();
                let task_id = id.clone();
                let status =
                    tokio::task::spawn_blocking(move || check_snapshot(&store, &task_id, options))
                        .await
                        .context("Diff task panicked")
                        .and_then(|r| r)
                        .unwrap_or_else(|e| SnapshotStatus::Error(format!("{e:#}")));
                (id, status, start.elapsed())
            }
        })
        .buffer_unordered(config.parallel);

    let mut done = 0usize;
    let mut passed = 0usize;
    let mut failed_names: Vec<String> = Vec::new();
    let mut new_names: Vec<String> = Vec::new();
    let mut errored_names: Vec<String> = Vec::new();

    while let Some((name, status, elapsed)) = results.next().await {
        done += 1;
        debug!(done, total, name = %name, "received result");
        terminal::print_line(&name, &status, elapsed);
        match status {
            SnapshotStatus::Pass => passed += 1,
            SnapshotStatus::Fail { .. } => failed_names.push(name),
            SnapshotStatus::New => new_names.push(name),
            SnapshotStatus::Error(_) => errored_names.push(name),
        }
        terminal::show_progress(done, total);
    }

    terminal::print_actionable_summary(&failed_names, &new_names, &errored_names);
    terminal::print_summary(
        total,
        passed,
        failed_names.len(),
        new_names.len(),
        errored_names.len(),
        run_start.elapsed(),
    );

    if failed_names.is_empty() && new_names.is_empty() && errored_names.is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rembrandt_core::PixelBuffer;
    use rembrandt_core::compare::FAIL_COLOR;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    fn png(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
        imaging::encode_png(&PixelBuffer::filled(w, h, rgba)).unwrap()
    }

    fn run_config() -> ResolvedRunConfig {
        ResolvedRunConfig {
            options: CompareOptions::default(),
            parallel: 2,
        }
    }

    #[test]
    fn new_snapshot_without_reference() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        store.write_current("a", &png(2, 2, WHITE)).unwrap();
        let status = check_snapshot(&store, "a", CompareOptions::default()).unwrap();
        assert_eq!(status, SnapshotStatus::New);
    }

    #[test]
    fn failure_writes_composition() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        store.write_reference("a", &png(2, 2, WHITE)).unwrap();
        store.write_current("a", &png(2, 2, BLACK)).unwrap();

        let options = CompareOptions::default().with_composition(true);
        let status = check_snapshot(&store, "a", options).unwrap();
        assert_eq!(
            status,
            SnapshotStatus::Fail {
                pixel_difference: 4,
                percentage_difference: 1.0,
                dimension_mismatch: None,
            }
        );
        let diff_png = std::fs::read(store.file_path(store::DIFFERENCE_DIR, "a")).unwrap();
        assert_eq!(
            imaging::decode(&diff_png).unwrap(),
            PixelBuffer::filled(2, 2, FAIL_COLOR)
        );
    }

    #[test]
    fn pass_clears_stale_difference() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        store.write_reference("a", &png(2, 2, WHITE)).unwrap();
        store.write_current("a", &png(2, 2, WHITE)).unwrap();
        store.write_difference("a", b"stale").unwrap();

        let status = check_snapshot(&store, "a", CompareOptions::default()).unwrap();
        assert_eq!(status, SnapshotStatus::Pass);
        assert!(!store.has_difference("a"));
    }

    #[test]
    fn dimension_change_is_marked_failed() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        store.write_reference("a", &png(2, 2, WHITE)).unwrap();
        store.write_current("a", &png(3, 2, WHITE)).unwrap();

        let status = check_snapshot(&store, "a", CompareOptions::default()).unwrap();
        assert!(matches!(
            status,
            SnapshotStatus::Fail {
                dimension_mismatch: Some((2, 2, 3, 2)),
                ..
            }
        ));
        let diff_png = std::fs::read(store.file_path(store::DIFFERENCE_DIR, "a")).unwrap();
        assert_eq!(
            imaging::decode(&diff_png).unwrap(),
            PixelBuffer::filled(3, 2, FAIL_COLOR)
        );
    }

    #[test]
    fn corrupt_current_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        store.write_reference("a", &png(2, 2, WHITE)).unwrap();
        store.write_current("a", b"not a png").unwrap();
        assert!(check_snapshot(&store, "a", CompareOptions::default()).is_err());
    }

    #[tokio::test]
    async fn exit_code_reflects_results() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        store.write_reference("same", &png(2, 2, WHITE)).unwrap();
        store.write_current("same", &png(2, 2, WHITE)).unwrap();
        assert_eq!(test(&store, run_config(), None).await.unwrap(), 0);

        store.write_reference("changed", &png(2, 2, WHITE)).unwrap();
        store.write_current("changed", &png(2, 2, BLACK)).unwrap();
        assert_eq!(test(&store, run_config(), None).await.unwrap(), 1);
        assert!(store.has_difference("changed"));

        // The filter excludes the failing snapshot.
        assert_eq!(test(&store, run_config(), Some("same")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn empty_current_dir_passes() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        assert_eq!(test(&store, run_config(), None).await.unwrap(), 0);
    }
}
