use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::store::{CURRENT_DIR, DIFFERENCE_DIR, REFERENCE_DIR, Store};

pub const OUTPUT_FILE: &str = "report.html";

#[derive(Debug, PartialEq)]
enum RowKind {
    Failed,
    New,
}

#[derive(Debug)]
struct ReviewRow {
    id: String,
    kind: RowKind,
    has_reference: bool,
}

/// Snapshots worth reviewing: those with a difference image, then those
/// with a current snapshot but no reference.
fn collect_rows(store: &Store) -> Vec<ReviewRow> {
    let references = store.list_reference_ids();
    let differences = store.list_difference_ids();

    let failed = differences.iter().map(|id| ReviewRow {
        id: id.clone(),
        kind: RowKind::Failed,
        has_reference: references.contains(id),
    });
    let new = store
        .list_current_ids()
        .into_iter()
        .filter(|id| !references.contains(id) && !differences.contains(id))
        .map(|id| ReviewRow {
            id,
            kind: RowKind::New,
            has_reference: false,
        });

    failed.chain(new).collect()
}

fn build_html(rows: &[ReviewRow]) -> String {
    let failed = rows.iter().filter(|r| r.kind == RowKind::Failed).count();
    let new = rows.len() - failed;

    let mut body = String::new();
    for row in rows {
        let badge = match row.kind {
            RowKind::Failed => r#"<span class="badge fail">FAIL</span>"#,
            RowKind::New => r#"<span class="badge new">NEW</span>"#,
        };
        let reference = image_cell(REFERENCE_DIR, &row.id, row.has_reference);
        let current = image_cell(CURRENT_DIR, &row.id, true);
        let difference = image_cell(DIFFERENCE_DIR, &row.id, row.kind == RowKind::Failed);
        let _ = writeln!(
            body,
            "      <tr><td class=\"name\">{} {badge}</td><td>{reference}</td><td>{current}</td><td>{difference}</td></tr>",
            html_escape(&row.id),
        );
    }

    let content = if body.is_empty() {
        r#"<p class="empty">Nothing to review: every snapshot matches its reference.</p>"#
            .to_string()
    } else {
        format!(
            "<table>\n    <thead><tr><th>Snapshot</th><th>Reference</th><th>Current</th><th>Difference</th></tr></thead>\n    <tbody>\n{body}    </tbody>\n  </table>"
        )
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>rembrandt review</title>
  <style>
    body {{ font-family: system-ui, sans-serif; margin: 0; padding: 24px; background: #f4f5f7; color: #1d2430; }}
    h1 {{ margin: 0 0 6px; font-size: 20px; }}
    .meta {{ margin-bottom: 16px; color: #5b6472; font-size: 14px; }}
    table {{ width: 100%; border-collapse: collapse; background: #fff; }}
    th, td {{ border: 1px solid #e2e5ea; padding: 8px; vertical-align: top; text-align: left; width: 25%; }}
    th {{ background: #eef1f5; font-size: 14px; }}
    td img {{ max-width: 100%; height: auto; display: block; image-rendering: pixelated; }}
    td.name {{ font-size: 13px; word-break: break-word; }}
    .missing {{ color: #b42318; font-style: italic; font-size: 13px; }}
    .badge {{ font-size: 11px; padding: 1px 6px; border-radius: 3px; font-weight: 600; }}
    .badge.fail {{ background: #fee4e2; color: #b42318; }}
    .badge.new {{ background: #fef3c7; color: #92400e; }}
    .empty {{ text-align: center; padding: 48px; color: #5b6472; }}
  </style>
</head>
<body>
  <h1>rembrandt review</h1>
  <div class="meta">{failed} failed &middot; {new} new &middot; green = pass, red = fail in the difference column</div>
  {content}
</body>
</html>
"##
    )
}

fn image_cell(subdir: &str, id: &str, exists: bool) -> String {
    if !exists {
        return format!(r#"<div class="missing">no {subdir}</div>"#);
    }
    format!(
        r#"<img src="{subdir}/{}.png" alt="{subdir} {}" loading="lazy" />"#,
        url_encode(id),
        html_escape(id)
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn url_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                out.push(b as char)
            }
            _ => {
                let _ = write!(out, "%{b:02X}");
            }
        }
    }
    out
}

/// Summary of a generated report.
pub struct ReviewSummary {
    pub path: PathBuf,
    pub failed: usize,
    pub new: usize,
}

/// Write `<root>/report.html`.
pub fn generate(store: &Store) -> Result<ReviewSummary> {
    let rows = collect_rows(store);
    let failed = rows.iter().filter(|r| r.kind == RowKind::Failed).count();
    let html = build_html(&rows);

    std::fs::create_dir_all(store.root())
        .with_context(|| format!("Failed to create {}", store.root().display()))?;
    let path = store.root().join(OUTPUT_FILE);
    std::fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(ReviewSummary {
        path,
        failed,
        new: rows.len() - failed,
    })
}
