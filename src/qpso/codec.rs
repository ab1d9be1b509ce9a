//! Smallest-position-value (SPV) codec between real-valued positions and
//! visiting orders.

/// Decodes a position vector into a visiting order.
///
/// Returns the indices of `position` sorted by ascending value. The sort is
/// stable, so ties keep index order, and uses [`f64::total_cmp`], so the
/// output is a permutation of `0..position.len()` even when `position`
/// contains `NaN` or infinities. Only relative order matters: any strictly
/// increasing rescaling of `position` decodes to the same order.
///
/// # Examples
///
/// ```
/// use qpso_route::qpso::decode;
///
/// assert_eq!(decode(&[0.5, 0.1, 0.9]), vec![1, 0, 2]);
/// ```
pub fn decode(position: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..position.len()).collect();
    order.sort_by(|&a, &b| position[a].total_cmp(&position[b]));
    order
}

/// Encodes a visiting order as a position vector that decodes back to it.
///
/// The `k`-th visited destination receives the `k`-th of `n` evenly spaced
/// keys inside `[-spread, spread]`. Returns `None` if `order` is not a
/// permutation of `0..order.len()`.
pub fn encode(order: &[usize], spread: f64) -> Option<Vec<f64>> {
    if !is_permutation(order) {
        return None;
    }
    let n = order.len() as f64;
    let mut position = vec![0.0; order.len()];
    for (rank, &dest) in order.iter().enumerate() {
        position[dest] = -spread + 2.0 * spread * (rank as f64 + 0.5) / n;
    }
    Some(position)
}

/// Whether `order` contains every index in `0..order.len()` exactly once.
pub fn is_permutation(order: &[usize]) -> bool {
    let mut seen = vec![false; order.len()];
    for &i in order {
        match seen.get_mut(i) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_basic() {
        assert_eq!(decode(&[3.0, -1.0, 2.0, 0.0]), vec![1, 3, 2, 0]);
        assert!(decode(&[]).is_empty());
    }

    #[test]
    fn test_decode_ties_are_stable() {
        assert_eq!(decode(&[1.0, 0.0, 1.0, 0.0]), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_decode_non_finite() {
        let order = decode(&[f64::NAN, f64::NEG_INFINITY, 1.0, f64::INFINITY]);
        assert!(is_permutation(&order));
        assert_eq!(order[0], 1);
    }

    #[test]
    fn test_encode_inverts_decode() {
        let order = vec![2, 0, 3, 1];
        let position = encode(&order, 10.0).expect("valid permutation");
        assert_eq!(decode(&position), order);
        assert!(position.iter().all(|x| (-10.0..=10.0).contains(x)));
    }

    #[test]
    fn test_encode_rejects_non_permutation() {
        assert!(encode(&[0, 0, 1], 1.0).is_none());
        assert!(encode(&[0, 3], 1.0).is_none());
        assert_eq!(encode(&[], 1.0), Some(vec![]));
    }

    proptest! {
        #[test]
        fn prop_decode_is_permutation(position in prop::collection::vec(-1e6f64..1e6, 0..64)) {
            let order = decode(&position);
            prop_assert_eq!(order.len(), position.len());
            prop_assert!(is_permutation(&order));
            for w in order.windows(2) {
                prop_assert!(position[w[0]] <= position[w[1]]);
            }
        }

        #[test]
        fn prop_decode_invariant_under_rescale(
            position in prop::collection::vec(-100.0f64..100.0, 1..32),
            exponent in -8i32..8,
        ) {
            // Power-of-two scaling is exact, so no ties are created or broken.
            let scale = 2f64.powi(exponent);
            let rescaled: Vec<f64> = position.iter().map(|x| x * scale).collect();
            prop_assert_eq!(decode(&position), decode(&rescaled));
        }
    }
}
