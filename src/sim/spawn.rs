//! Obstacle generation

use rand::Rng;

/// Pick the height of an obstacle's top segment
///
/// The gap centre is drawn uniformly from the range that leaves at least
/// `min_segment` of solid obstacle above and below the gap. The caller must
/// ensure `gap_size + 2 * min_segment < field_height`
/// (see [`crate::Tuning::validate`]).
pub fn random_gap_top<R: Rng + ?Sized>(
    rng: &mut R,
    field_height: f32,
    gap_size: f32,
    min_segment: f32,
) -> f32 {
    let half_gap = gap_size / 2.0;
    let centre_min = half_gap + min_segment;
    let centre_max = field_height - half_gap - min_segment;
    debug_assert!(centre_min < centre_max, "degenerate gap range");

    let centre = centre_min + rng.random::<f32>() * (centre_max - centre_min);
    centre - half_gap
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_gap_top_range_480_field() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..10_000 {
            let top = random_gap_top(&mut rng, 480.0, 150.0, 60.0);
            assert!((15.0..=270.0).contains(&top), "gap top {top} out of range");
            assert!(top >= 60.0);
        }
    }

    #[test]
    fn test_same_seed_same_obstacles() {
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..16 {
            assert_eq!(
                random_gap_top(&mut a, 600.0, 150.0, 60.0),
                random_gap_top(&mut b, 600.0, 150.0, 60.0)
            );
        }
    }

    proptest! {
        #[test]
        fn prop_gap_leaves_clearance(
            seed in any::<u64>(),
            field_height in 300.0f32..2000.0,
            gap_size in 20.0f32..200.0,
            min_segment in 0.0f32..40.0,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let top = random_gap_top(&mut rng, field_height, gap_size, min_segment);
            // Small tolerance for f32 rounding at the range edges
            prop_assert!(top >= min_segment - 1e-3);
            prop_assert!(field_height - (top + gap_size) >= min_segment - 1e-3);
        }
    }
}
