//! Kerning matrix run-length compression
//!
//! The row-major NxN kerning matrix is treated as one flat sequence and
//! compressed into (value, count) runs. Merging requires bit-for-bit equal
//! values; the glyph source quantizes kerning to a fixed pixel grid, so
//! equal adjustments compare equal here.

/// A (value, repeat-count) run of the flattened kerning matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KerningRun {
    /// Kerning adjustment (normalized)
    pub value: f32,
    /// Number of consecutive matrix entries with this value
    pub count: u32,
}

/// Compress a flattened matrix into maximal runs
///
/// Runs merge across row boundaries; expanding the result reconstructs the
/// input exactly.
pub fn compress(values: &[f32]) -> Vec<KerningRun> {
    let mut runs: Vec<KerningRun> = Vec::new();
    for &value in values {
        match runs.last_mut() {
            Some(run) if run.value.to_bits() == value.to_bits() => run.count += 1,
            _ => runs.push(KerningRun { value, count: 1 }),
        }
    }
    runs
}

/// Expand runs back into the flattened matrix
pub fn expand(runs: &[KerningRun]) -> Vec<f32> {
    let total: usize = runs.iter().map(|r| r.count as usize).sum();
    let mut values = Vec::with_capacity(total);
    for run in runs {
        for _ in 0..run.count {
            values.push(run.value);
        }
    }
    values
}
