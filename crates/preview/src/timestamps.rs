//! Preview timestamp computation.

/// Compute the preview timestamps for a video of the given duration.
///
/// Durations shorter than `min_duration_secs` (including zero, negative, and
/// non-finite values) are not worth segmenting and yield the single
/// timestamp `[0.0]`. Otherwise the result is the `segments` evenly spaced
/// interior points `duration * i / (segments + 1)`, strictly between 0 and
/// the duration, dividing it into `segments + 1` equal intervals.
pub fn segment_timestamps(duration_secs: f64, segments: u32, min_duration_secs: f64) -> Vec<f64> {
    if !duration_secs.is_finite() || duration_secs < min_duration_secs {
        return vec![0.0];
    }

    (1..=segments)
        .map(|i| duration_secs * i as f64 / (segments + 1) as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ten_seconds_with_three_segments() {
        assert_eq!(segment_timestamps(10.0, 3, 5.0), vec![2.5, 5.0, 7.5]);
    }

    #[test]
    fn short_videos_are_not_segmented() {
        assert_eq!(segment_timestamps(3.0, 3, 5.0), vec![0.0]);
    }

    #[test]
    fn degenerate_durations_never_raise() {
        assert_eq!(segment_timestamps(0.0, 3, 5.0), vec![0.0]);
        assert_eq!(segment_timestamps(-1.0, 3, 5.0), vec![0.0]);
        assert_eq!(segment_timestamps(f64::NAN, 3, 5.0), vec![0.0]);
        assert_eq!(segment_timestamps(f64::INFINITY, 3, 5.0), vec![0.0]);
    }

    #[test]
    fn zero_segments_yield_an_empty_set() {
        assert!(segment_timestamps(60.0, 0, 5.0).is_empty());
    }

    proptest! {
        #[test]
        fn interior_points_are_evenly_spaced(
            duration in 5.0f64..100_000.0,
            segments in 1u32..32,
        ) {
            let timestamps = segment_timestamps(duration, segments, 5.0);
            prop_assert_eq!(timestamps.len(), segments as usize);

            for (i, &t) in timestamps.iter().enumerate() {
                let expected = duration * (i as f64 + 1.0) / (segments as f64 + 1.0);
                prop_assert!((t - expected).abs() < 1e-9 * duration.max(1.0));
                prop_assert!(t > 0.0 && t < duration);
                if i > 0 {
                    prop_assert!(t > timestamps[i - 1]);
                }
            }
        }

        #[test]
        fn short_durations_collapse_to_zero(
            duration in -100.0f64..5.0,
            segments in 0u32..32,
        ) {
            prop_assert_eq!(segment_timestamps(duration, segments, 5.0), vec![0.0]);
        }
    }
}
