use wide::f32x8;

const LANES: usize = 8;

/// Vector dot product between a flattened image patch and kernel weights.
///
/// The accelerated engine is written against this trait so the summation
/// backend can be chosen at configuration time; both implementations consume
/// the same operands in the same scan order and differ only in summation
/// grouping.
pub trait DotProduct {
    /// Computes `sum(a[i] * b[i])` over two equal-length slices.
    fn dot(&self, a: &[f32], b: &[f32]) -> f32;
}

/// Portable scalar reference implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarDot;

impl DotProduct for ScalarDot {
    fn dot(&self, a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
    }
}

/// 8-lane SIMD implementation on top of `wide::f32x8`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimdDot;

impl DotProduct for SimdDot {
    fn dot(&self, a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len());
        let a_chunks = a.chunks_exact(LANES);
        let b_chunks = b.chunks_exact(LANES);

        let tail: f32 = a_chunks
            .remainder()
            .iter()
            .zip(b_chunks.remainder().iter())
            .map(|(x, y)| x * y)
            .sum();

        let mut acc = f32x8::splat(0.0);
        for (a_chunk, b_chunk) in a_chunks.zip(b_chunks) {
            let a_vec = f32x8::new(a_chunk.try_into().unwrap());
            let b_vec = f32x8::new(b_chunk.try_into().unwrap());
            acc = a_vec.mul_add(b_vec, acc);
        }
        acc.reduce_add() + tail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn scalar_dot_known_values() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        assert_eq!(ScalarDot.dot(&a, &b), 32.0);
    }

    #[test]
    fn simd_matches_scalar_with_remainder() {
        // 21 elements: two full lanes plus a 5-wide tail
        let a: Vec<f32> = (0..21).map(|i| (i as f32 * 0.37).sin()).collect();
        let b: Vec<f32> = (0..21).map(|i| (i as f32 * 0.91).cos()).collect();
        let scalar = ScalarDot.dot(&a, &b);
        let simd = SimdDot.dot(&a, &b);
        assert_relative_eq!(scalar, simd, epsilon = 1e-5);
    }

    #[test]
    fn simd_handles_short_slices() {
        let a = [0.5, -1.5, 2.0];
        let b = [2.0, 2.0, 2.0];
        assert_relative_eq!(SimdDot.dot(&a, &b), 2.0, epsilon = 1e-6);
    }
}
