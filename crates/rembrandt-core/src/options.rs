use crate::CompareError;

/// Knobs for a single comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareOptions {
    /// Color delta below which two pixels are considered equal. Also the
    /// tolerance used by the neighborhood search.
    pub max_delta: f64,
    /// Upper bound on the number of failing pixels for the comparison to pass.
    /// Compared against the raw count, not the fraction.
    pub max_difference: f64,
    /// Radius of the neighborhood searched for shifted content. `0` disables it.
    pub max_offset: u32,
    /// Produce the green/red composition buffer.
    pub render_composition: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            max_delta: 1.0,
            max_difference: 0.01,
            max_offset: 0,
            render_composition: false,
        }
    }
}

impl CompareOptions {
    pub fn with_max_delta(mut self, max_delta: f64) -> Self {
        self.max_delta = max_delta;
        self
    }

    pub fn with_max_difference(mut self, max_difference: f64) -> Self {
        self.max_difference = max_difference;
        self
    }

    pub fn with_max_offset(mut self, max_offset: u32) -> Self {
        self.max_offset = max_offset;
        self
    }

    pub fn with_composition(mut self, render: bool) -> Self {
        self.render_composition = render;
        self
    }

    /// Reject negative, NaN or infinite tolerances.
    pub fn validate(&self) -> Result<(), CompareError> {
        for (name, value) in [
            ("max_delta", self.max_delta),
            ("max_difference", self.max_difference),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CompareError::InvalidOptions(format!(
                    "{name} must be a finite value >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}
