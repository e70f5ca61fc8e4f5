pub mod diff;

/// Status of a single snapshot comparison.
#[derive(Debug, PartialEq)]
pub enum SnapshotStatus {
    Pass,
    Fail {
        pixel_difference: u64,
        percentage_difference: f64,
        dimension_mismatch: Option<(u32, u32, u32, u32)>,
    },
    New,
    Error(String),
}
