/// Left-pad a compact indicator series with zeros to `len` entries.
///
/// If the series is longer than `len`, only its newest `len` values are kept,
/// so the result is always index-aligned with a raw window of length `len`.
pub fn align<I>(values: I, len: usize) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
    I::IntoIter: ExactSizeIterator,
{
    let values = values.into_iter();
    let count = values.len();

    let mut result = Vec::with_capacity(len);
    result.resize(len.saturating_sub(count), 0.0);
    result.extend(values.skip(count.saturating_sub(len)));
    result
}

/// Pair two compact series by their newest values.
///
/// The longer series loses its oldest entries so both end on the same bar.
pub(crate) fn zip_newest<'a>(a: &'a [f64], b: &'a [f64]) -> impl Iterator<Item = (f64, f64)> + 'a {
    let n = a.len().min(b.len());
    a[a.len() - n..].iter().copied().zip(b[b.len() - n..].iter().copied())
}
