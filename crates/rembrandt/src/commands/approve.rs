use anyhow::Result;

use crate::store::{self, Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    New,
    Failed,
}

/// Which snapshots `approve` should promote.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproveSelection {
    pub new_only: bool,
    pub failed_only: bool,
    pub all: bool,
}

impl ApproveSelection {
    fn accepts(&self, kind: Kind) -> bool {
        if self.all {
            return true;
        }
        match kind {
            Kind::New => !self.failed_only || self.new_only,
            Kind::Failed => !self.new_only || self.failed_only,
        }
    }
}

/// `rembrandt approve`: promote current snapshots to references.
/// Returns the number of approved snapshots.
pub fn approve(store: &Store, filter: Option<&str>, selection: ApproveSelection) -> Result<usize> {
    let ids = store.list_current_ids();
    if ids.is_empty() {
        println!("Nothing to approve, current/ is empty.");
        return Ok(0);
    }

    // Passing snapshots have a reference and no difference: nothing to promote.
    let pending: Vec<(&str, Kind)> = ids
        .iter()
        .filter_map(|id| {
            let kind = if !store.has_reference(id) {
                Kind::New
            } else if store.has_difference(id) {
                Kind::Failed
            } else {
                return None;
            };
            Some((id.as_str(), kind))
        })
        .filter(|(id, kind)| selection.accepts(*kind) && store::matches_filter(id, filter))
        .collect();

    if pending.is_empty() {
        println!("No snapshots matched the given filters.");
        return Ok(0);
    }

    let mut count_new = 0usize;
    let mut count_failed = 0usize;

    for (id, kind) in &pending {
        let png = store.read_current(id)?;
        store.write_reference(id, &png)?;
        let label = match kind {
            Kind::Failed => {
                count_failed += 1;
                "\x1b[31mFAIL\x1b[0m"
            }
            Kind::New => {
                count_new += 1;
                "\x1b[33m NEW\x1b[0m"
            }
        };
        println!("  Approved  {label}  {id}");
    }

    let total = count_new + count_failed;
    println!();
    println!("{total} snapshot(s) approved ({count_new} new, {count_failed} failed).");

    Ok(total)
}
