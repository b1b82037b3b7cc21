//! SIMD helpers backing the rolling-window indicators.
//!
//! Four-lane `f64` vectors from the `wide` crate, with a scalar pass over
//! the remainder.

use wide::f64x4;

/// Split `data` into four-lane vectors and the scalar remainder.
fn lanes(data: &[f64]) -> (impl Iterator<Item = f64x4> + '_, &[f64]) {
    let chunks = data.chunks_exact(4);
    let rest = chunks.remainder();
    (chunks.map(|c| f64x4::new([c[0], c[1], c[2], c[3]])), rest)
}

/// Sum of a slice.
pub fn sum_simd(data: &[f64]) -> f64 {
    let (vectors, rest) = lanes(data);
    let total = vectors.fold(f64x4::ZERO, |acc, v| acc + v).reduce_add();
    total + rest.iter().sum::<f64>()
}

/// Population variance of a slice around `mean`.
fn variance(data: &[f64], mean: f64) -> f64 {
    let (vectors, rest) = lanes(data);
    let mean_vec = f64x4::splat(mean);
    let squares = vectors
        .map(|v| {
            let diff = v - mean_vec;
            (diff * diff).reduce_add()
        })
        .sum::<f64>();
    let tail = rest.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>();
    (squares + tail) / data.len() as f64
}

/// Rolling population standard deviation over `period`-sized windows.
pub fn std_dev_simd(data: &[f64], period: usize) -> Vec<f64> {
    if period < 2 || data.len() < period {
        return Vec::new();
    }

    let n = period as f64;
    data.windows(period)
        .map(|window| variance(window, sum_simd(window) / n).sqrt())
        .collect()
}

/// Minimum and maximum of a slice.
pub fn minmax_simd(data: &[f64]) -> Option<(f64, f64)> {
    if data.is_empty() {
        return None;
    }

    let (vectors, rest) = lanes(data);
    let (min_vec, max_vec) = vectors.fold(
        (f64x4::splat(f64::INFINITY), f64x4::splat(f64::NEG_INFINITY)),
        |(lo, hi), v| (lo.min(v), hi.max(v)),
    );

    let lanes_and_rest = min_vec.to_array().into_iter().zip(max_vec.to_array());
    let (min, max) = lanes_and_rest
        .chain(rest.iter().map(|&v| (v, v)))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| {
            (lo.min(a), hi.max(b))
        });

    Some((min, max))
}
