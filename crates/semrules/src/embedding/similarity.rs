//! Vector math used by the embedding store.

/// Dot product of two equally sized vectors.
///
/// Accumulates four lanes at a time; the summation order only depends on the
/// index, so `dot_product(a, b) == dot_product(b, a)` bit for bit.
#[inline]
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");

    let chunks = a.len() / 4;
    let mut sum = 0.0f32;

    for i in 0..chunks {
        let idx = i * 4;
        sum += a[idx] * b[idx];
        sum += a[idx + 1] * b[idx + 1];
        sum += a[idx + 2] * b[idx + 2];
        sum += a[idx + 3] * b[idx + 3];
    }

    for i in chunks * 4..a.len() {
        sum += a[i] * b[i];
    }

    sum
}

#[inline]
pub fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Scale `v` to unit length in place. Zero vectors are left untouched.
pub fn normalize_vector(v: &mut [f32]) {
    let mag = magnitude(v);
    if mag > 0.0 {
        for x in v.iter_mut() {
            *x /= mag;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_product() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [5.0, 4.0, 3.0, 2.0, 1.0];
        assert!((dot_product(&a, &b) - 35.0).abs() < 1e-6);
        assert_eq!(dot_product(&a, &b), dot_product(&b, &a));
    }

    #[test]
    fn test_magnitude() {
        assert!((magnitude(&[3.0, 4.0]) - 5.0).abs() < 1e-6);
        assert_eq!(magnitude(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_zero_vector() {
        let mut z = [0.0, 0.0];
        normalize_vector(&mut z);
        assert_eq!(z, [0.0, 0.0]);
    }

    #[test]
    fn test_normalize() {
        let mut v = [3.0, 4.0, 0.0];
        normalize_vector(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
        assert!(v[2].abs() < 1e-6);
    }
}
