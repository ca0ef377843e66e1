//! Linear blends of two ordered sequences of possibly different lengths
//!
//! The longer sequence is walked index for index and every element is paired
//! with the element of the shorter sequence at the same relative position.
//! This is nearest-fraction resampling, not geometric correspondence: a
//! six-vertex shape blending toward a twelve-vertex shape pairs vertex `i`
//! of the larger with vertex `round(i * 5 / 11)` of the smaller.

use glam::DVec2;

/// A value that can be mixed with another of its kind
pub trait LinearSum: Clone {
    /// `self * weight + other * (1 - weight)`
    ///
    /// Must return exactly `self` when `other == self`, whatever the weight.
    fn linear_sum(&self, other: &Self, weight: f64) -> Self;
}

impl LinearSum for DVec2 {
    fn linear_sum(&self, other: &Self, weight: f64) -> Self {
        other.lerp(*self, weight)
    }
}

/// Index in a sequence of `shorter_len` paired with index `i` of the longer
///
/// Ties round to even, so index 1 of 3 against 2 maps to 0, not 1.
#[inline]
pub fn partner_index(i: usize, shorter_len: usize, longer_len: usize) -> usize {
    if longer_len <= 1 {
        return i;
    }
    let map_factor = (shorter_len as f64 - 1.0) / (longer_len as f64 - 1.0);
    (i as f64 * map_factor).round_ties_even() as usize
}

/// Blend two sequences, giving `first_weight` to `first`
///
/// The result has as many elements as the longer input. When the lengths
/// match, `second` is walked and `first` supplies the partners. An empty
/// shorter side has no partners, so the longer side comes back unchanged.
pub fn blend_sequences<T: LinearSum>(first: &[T], first_weight: f64, second: &[T]) -> Vec<T> {
    let second_weight = 1.0 - first_weight;

    let (longer, shorter, weight_of_longer) = if first.len() > second.len() {
        (first, second, first_weight)
    } else {
        (second, first, second_weight)
    };

    if shorter.is_empty() {
        return longer.to_vec();
    }

    longer
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let partner = &shorter[partner_index(i, shorter.len(), longer.len())];
            value.linear_sum(partner, weight_of_longer)
        })
        .collect()
}

/// Blend two position sequences
pub fn blend_positions(first: &[DVec2], first_weight: f64, second: &[DVec2]) -> Vec<DVec2> {
    blend_sequences(first, first_weight, second)
}

/// Blend two color sequences
pub fn blend_colors(
    first: &[crate::Color],
    first_weight: f64,
    second: &[crate::Color],
) -> Vec<crate::Color> {
    blend_sequences(first, first_weight, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;
    use proptest::prelude::*;

    fn points(coords: &[(f64, f64)]) -> Vec<DVec2> {
        coords.iter().map(|&(x, y)| DVec2::new(x, y)).collect()
    }

    #[test]
    fn test_equal_lengths_blend_pairwise() {
        let a = points(&[(0.0, 0.0), (10.0, 0.0)]);
        let b = points(&[(0.0, 10.0), (20.0, 10.0)]);
        let mixed = blend_positions(&a, 0.25, &b);
        assert_eq!(mixed.len(), 2);
        assert!((mixed[0] - DVec2::new(0.0, 7.5)).length() < 1e-12);
        assert!((mixed[1] - DVec2::new(17.5, 7.5)).length() < 1e-12);
    }

    #[test]
    fn test_longer_first_keeps_its_weight() {
        let a = points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let b = points(&[(10.0, 0.0)]);
        let mixed = blend_positions(&a, 0.75, &b);
        assert_eq!(mixed.len(), 3);
        // every element of `a` pairs with the single element of `b`
        assert!((mixed[0].x - 2.5).abs() < 1e-12);
        assert!((mixed[1].x - 3.25).abs() < 1e-12);
        assert!((mixed[2].x - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_partner_index_maps_ends_to_ends() {
        assert_eq!(partner_index(0, 6, 12), 0);
        assert_eq!(partner_index(11, 6, 12), 5);
        assert_eq!(partner_index(0, 1, 1), 0);
        assert_eq!(partner_index(4, 1, 9), 0);
    }

    #[test]
    fn test_partner_index_ties_round_to_even() {
        // 1 * (2-1)/(3-1) = 0.5 -> 0
        assert_eq!(partner_index(1, 2, 3), 0);
        // 3 * (3-1)/(5-1) = 1.5 -> 2
        assert_eq!(partner_index(3, 3, 5), 2);
        // 1 * (3-1)/(5-1) = 0.5 -> 0
        assert_eq!(partner_index(1, 3, 5), 0);
    }

    #[test]
    fn test_single_elements_blend() {
        let a = points(&[(4.0, 0.0)]);
        let b = points(&[(0.0, 4.0)]);
        let mixed = blend_positions(&a, 0.5, &b);
        assert_eq!(mixed, points(&[(2.0, 2.0)]));
    }

    #[test]
    fn test_empty_shorter_side_returns_longer() {
        let a = points(&[(1.0, 2.0), (3.0, 4.0)]);
        assert_eq!(blend_positions(&a, 0.3, &[]), a);
        assert_eq!(blend_positions(&[], 0.3, &a), a);
        assert!(blend_positions(&[], 0.3, &[]).is_empty());
    }

    #[test]
    fn test_colors_blend_like_positions() {
        let a = [Color::new(1.0, 0.0, 0.0, 1.0), Color::new(0.0, 1.0, 0.0, 1.0)];
        let b = [Color::new(0.0, 0.0, 1.0, 1.0)];
        let mixed = blend_colors(&a, 0.5, &b);
        assert_eq!(mixed.len(), 2);
        assert!((mixed[0].r - 0.5).abs() < 1e-6);
        assert!((mixed[1].g - 0.5).abs() < 1e-6);
        assert!((mixed[1].b - 0.5).abs() < 1e-6);
    }

    fn arb_points(max_len: usize) -> impl Strategy<Value = Vec<DVec2>> {
        prop::collection::vec(
            (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| DVec2::new(x, y)),
            1..max_len,
        )
    }

    proptest! {
        /// Blending a sequence with itself is the identity for every weight.
        #[test]
        fn blend_with_self_is_identity(seq in arb_points(40), w in 0.0f64..=1.0) {
            prop_assert_eq!(blend_positions(&seq, w, &seq), seq);
        }

        /// The result is as long as the longer input.
        #[test]
        fn blend_length_is_max(a in arb_points(40), b in arb_points(40), w in 0.0f64..=1.0) {
            prop_assert_eq!(blend_positions(&a, w, &b).len(), a.len().max(b.len()));
        }

        /// Partner indices always land inside the shorter sequence.
        #[test]
        fn partner_index_in_bounds(shorter in 1usize..50, extra in 0usize..50) {
            let longer = shorter + extra;
            for i in 0..longer {
                prop_assert!(partner_index(i, shorter, longer) < shorter);
            }
        }
    }
}
