use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::compare::diff::DiffOutcome;

/// Machine-readable verdict printed by `rembrandt compare --json`.
#[derive(Debug, Serialize)]
pub struct CompareReport<'a> {
    pub reference: &'a Path,
    pub candidate: &'a Path,
    pub passed: bool,
    pub pixel_difference: u64,
    pub percentage_difference: f64,
    pub total_pixels: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_mismatch: Option<DimensionMismatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composition: Option<&'a Path>,
}

#[derive(Debug, Serialize)]
pub struct DimensionMismatch {
    pub reference: [u32; 2],
    pub candidate: [u32; 2],
}

impl<'a> CompareReport<'a> {
    pub fn new(
        reference: &'a Path,
        candidate: &'a Path,
        outcome: &DiffOutcome,
        composition: Option<&'a Path>,
    ) -> Self {
        Self {
            reference,
            candidate,
            passed: outcome.passed,
            pixel_difference: outcome.pixel_difference,
            percentage_difference: outcome.percentage_difference,
            total_pixels: outcome.total_pixels,
            dimension_mismatch: outcome
                .dimension_mismatch
                .map(|(rw, rh, cw, ch)| DimensionMismatch {
                    reference: [rw, rh],
                    candidate: [cw, ch],
                }),
            composition,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }
}
