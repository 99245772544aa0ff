//! Run-length decoding into a dense bin window.

use crate::core::error::TrackError;
use crate::core::types::RunLengthSegment;

/// Zero-based bin indices `[start_bin, end_bin]` covered by a 1-based
/// inclusive interval.
///
/// `start` must be at least 1, `end` must not be below `start` and
/// `bin_width` must be non-zero. A reversed interval yields a reversed
/// window, which [`decode_segments`] rejects.
#[must_use]
pub fn bin_window(start: u32, end: u32, bin_width: u32) -> (u32, u32) {
    (
        start.saturating_sub(1) / bin_width,
        end.saturating_sub(1) / bin_width,
    )
}

/// Decode ascending, non-overlapping segments into counts for bins
/// `[start_bin, end_bin]`. Bins not covered by any segment are zero.
///
/// Each segment is clamped to the window on both sides. Segments must start
/// before they end, must intersect the window and must not start before the
/// previous segment ended; violations are reported instead of decoded.
///
/// # Errors
///
/// Returns `TrackError::InvalidLocation` if `end_bin < start_bin`, and
/// `TrackError::SegmentOutOfWindow` or `TrackError::SegmentOrder` if the
/// segments break the above preconditions.
pub fn decode_segments(
    start_bin: u32,
    end_bin: u32,
    segments: &[RunLengthSegment],
) -> Result<Vec<u32>, TrackError> {
    let Some(span) = end_bin.checked_sub(start_bin) else {
        return Err(TrackError::InvalidLocation(format!(
            "bin window [{start_bin}, {end_bin}] is reversed"
        )));
    };
    let len = span as usize + 1;
    let mut counts = vec![0u32; len];

    // Exclusive upper bound of the window in bin coordinates
    let window_end = u64::from(start_bin) + len as u64;
    let mut previous_end = 0u32;

    for segment in segments {
        let seg_start = segment.start_bin;
        let seg_end = segment.end_bin;

        if seg_start >= seg_end
            || u64::from(seg_start) >= window_end
            || seg_end <= start_bin
        {
            return Err(TrackError::SegmentOutOfWindow {
                seg_start,
                seg_end,
                start_bin,
                end_bin,
            });
        }

        if seg_start < previous_end {
            return Err(TrackError::SegmentOrder {
                seg_start,
                seg_end,
                previous_end,
            });
        }
        previous_end = seg_end;

        let from = (seg_start.max(start_bin) - start_bin) as usize;
        let to = (u64::from(seg_end).min(window_end) - u64::from(start_bin)) as usize;

        counts[from..to].fill(segment.count);
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: u32, end: u32, count: u32) -> RunLengthSegment {
        RunLengthSegment::new(start, end, count)
    }

    #[test]
    fn test_bin_window() {
        assert_eq!(bin_window(150, 350, 100), (1, 3));
        assert_eq!(bin_window(1, 1000, 10), (0, 99));
        assert_eq!(bin_window(1, 1, 100), (0, 0));
        assert_eq!(bin_window(100, 101, 100), (0, 1));
        assert_eq!(bin_window(500, 100, 100), (4, 0));
    }

    #[test]
    fn test_no_segments_is_all_zero() {
        assert_eq!(decode_segments(5, 9, &[]).unwrap(), vec![0; 5]);
    }

    #[test]
    fn test_single_segment_at_start_of_long_window() {
        let counts = decode_segments(0, 99, &[seg(0, 10, 42)]).unwrap();
        assert_eq!(counts.len(), 100);
        assert!(counts[..10].iter().all(|&c| c == 42));
        assert!(counts[10..].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_segment_spanning_window_fills_everything() {
        let counts = decode_segments(3, 7, &[seg(3, 8, 6)]).unwrap();
        assert_eq!(counts, vec![6; 5]);
    }

    #[test]
    fn test_window_inside_one_segment_is_uniform() {
        let counts = decode_segments(10, 14, &[seg(0, 100, 2)]).unwrap();
        assert_eq!(counts, vec![2; 5]);
    }

    #[test]
    fn test_right_edge_is_clamped() {
        let counts = decode_segments(0, 3, &[seg(2, 50, 9)]).unwrap();
        assert_eq!(counts, vec![0, 0, 9, 9]);
    }

    #[test]
    fn test_left_edge_is_clamped() {
        let counts = decode_segments(4, 7, &[seg(1, 6, 3), seg(7, 9, 1)]).unwrap();
        assert_eq!(counts, vec![3, 3, 0, 1]);
    }

    #[test]
    fn test_gaps_between_segments_are_zero() {
        let counts =
            decode_segments(0, 9, &[seg(0, 2, 1), seg(4, 5, 7), seg(8, 20, 3)]).unwrap();
        assert_eq!(counts, vec![1, 1, 0, 0, 7, 0, 0, 0, 3, 3]);
    }

    #[test]
    fn test_reconstructs_every_covered_bin() {
        let segments = vec![seg(0, 3, 5), seg(3, 4, 8), seg(6, 11, 2), seg(11, 15, 4)];
        let covering = |bin: u32| {
            segments
                .iter()
                .find(|s| s.start_bin <= bin && bin < s.end_bin)
                .map_or(0, |s| s.count)
        };

        for start_bin in 0..16 {
            for end_bin in start_bin..16 {
                let in_window: Vec<_> = segments
                    .iter()
                    .copied()
                    .filter(|s| s.end_bin > start_bin && s.start_bin <= end_bin)
                    .collect();
                let counts = decode_segments(start_bin, end_bin, &in_window).unwrap();
                let expected: Vec<_> = (start_bin..=end_bin).map(covering).collect();
                assert_eq!(counts, expected, "window [{start_bin}, {end_bin}]");
            }
        }
    }

    #[test]
    fn test_segment_outside_window_is_rejected() {
        let err = decode_segments(10, 20, &[seg(0, 10, 1)]).unwrap_err();
        assert!(matches!(err, TrackError::SegmentOutOfWindow { .. }));

        let err = decode_segments(10, 20, &[seg(21, 30, 1)]).unwrap_err();
        assert!(matches!(err, TrackError::SegmentOutOfWindow { .. }));

        let err = decode_segments(10, 20, &[seg(12, 12, 1)]).unwrap_err();
        assert!(matches!(err, TrackError::SegmentOutOfWindow { .. }));
    }

    #[test]
    fn test_overlapping_segments_are_rejected() {
        let err = decode_segments(0, 10, &[seg(0, 5, 1), seg(4, 8, 2)]).unwrap_err();
        assert!(matches!(
            err,
            TrackError::SegmentOrder {
                seg_start: 4,
                previous_end: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_reversed_window_is_rejected() {
        assert!(matches!(
            decode_segments(5, 4, &[]),
            Err(TrackError::InvalidLocation(_))
        ));
    }

    #[test]
    fn test_window_at_u32_limit() {
        let counts = decode_segments(u32::MAX - 1, u32::MAX, &[seg(u32::MAX - 1, u32::MAX, 3)])
            .unwrap();
        assert_eq!(counts, vec![3, 0]);
    }
}
