// Numeric kernels for feature-vector comparison
// Single pass over both slices, four independent accumulators per sum so the
// compiler can keep the lanes in flight (same trick as the Redis scalar path).
// Accumulation is done in f64: extractor vectors are a few hundred dims of f32
// and the self-similarity of a vector must come back as exactly 1.

/// Dot product and squared norms of two equal-length slices, in one pass.
///
/// Returns `(a·b, |a|², |b|²)`. Callers must check lengths first; extra
/// elements of the longer slice are ignored.
#[inline]
pub fn dot_and_norms(a: &[f32], b: &[f32]) -> (f64, f64, f64) {
    let mut dot = [0.0f64; 4];
    let mut na = [0.0f64; 4];
    let mut nb = [0.0f64; 4];

    let a_chunks = a.chunks_exact(4);
    let b_chunks = b.chunks_exact(4);
    let a_rem = a_chunks.remainder();
    let b_rem = b_chunks.remainder();

    for (ca, cb) in a_chunks.zip(b_chunks) {
        for lane in 0..4 {
            let x = ca[lane] as f64;
            let y = cb[lane] as f64;
            dot[lane] += x * y;
            na[lane] += x * x;
            nb[lane] += y * y;
        }
    }

    let mut tail_dot = 0.0f64;
    let mut tail_na = 0.0f64;
    let mut tail_nb = 0.0f64;
    for (&x, &y) in a_rem.iter().zip(b_rem.iter()) {
        let (x, y) = (x as f64, y as f64);
        tail_dot += x * y;
        tail_na += x * x;
        tail_nb += y * y;
    }

    (
        dot.iter().sum::<f64>() + tail_dot,
        na.iter().sum::<f64>() + tail_na,
        nb.iter().sum::<f64>() + tail_nb,
    )
}

/// Cosine of the angle between two slices, unclamped.
///
/// `None` when the lengths differ, either slice is empty, or either norm is
/// zero: the pair is incomparable rather than dissimilar.
#[inline]
pub fn cosine(a: &[f32], b: &[f32]) -> Option<f64> {
    if a.is_empty() || a.len() != b.len() {
        return None;
    }

    let (dot, na, nb) = dot_and_norms(a, b);
    let denom = na.sqrt() * nb.sqrt();
    if denom == 0.0 {
        return None;
    }

    Some(dot / denom)
}
