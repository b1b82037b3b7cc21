//! Indicator trait.

/// A rolling computation over a single input series.
///
/// Outputs are compact: the first value corresponds to input position
/// `min_len() - 1`, so a full result has `data.len() - min_len() + 1`
/// entries. Fewer than `min_len()` inputs yield an empty vector.
pub trait Indicator: Send + Sync {
    type Output;

    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Inputs needed before the first output.
    fn min_len(&self) -> usize;

    fn name(&self) -> &str;

    /// Number of outputs `calculate` produces for `input_len` inputs.
    fn output_len(&self, input_len: usize) -> usize {
        (input_len + 1).saturating_sub(self.min_len())
    }
}
