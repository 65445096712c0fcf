//! Distance from a variant to the nearest donor/acceptor boundary

use super::FeatureContext;
use crate::splicing::SpliceSiteKind;

/// Signed distance from the 0-based variant `[start, end)` to the interbase
/// boundary `boundary` (the first base downstream of the junction).
///
/// - a multi-base variant spanning the boundary is at distance 0;
/// - a variant ending at or before the boundary is upstream: `(end - 1) - boundary`;
/// - anything else is downstream: `start - boundary + 1`, so a single-base
///   variant on the first base after the boundary is at `+1`.
///
/// ```
/// use ferro_splice::features::signed_distance;
///
/// assert_eq!(signed_distance(99, 100, 100), -1);
/// assert_eq!(signed_distance(100, 101, 100), 1);
/// assert_eq!(signed_distance(98, 102, 100), 0);
/// assert_eq!(signed_distance(110, 111, 100), 11);
/// ```
pub fn signed_distance(start: u64, end: u64, boundary: u64) -> i64 {
    let (start, end, boundary) = (start as i64, end as i64, boundary as i64);
    if end - start > 1 && start <= boundary && boundary < end {
        0
    } else if end <= boundary {
        (end - 1) - boundary
    } else {
        start - boundary + 1
    }
}

/// Distance to the nearest `kind` boundary of the transcript; ties go to the
/// boundary that comes first in transcript order.
pub(super) fn closest(ctx: &FeatureContext<'_>, kind: SpliceSiteKind) -> f64 {
    let boundaries = match kind {
        SpliceSiteKind::Donor => ctx.transcript.donor_boundaries(),
        SpliceSiteKind::Acceptor => ctx.transcript.acceptor_boundaries(),
    };
    let vi = ctx.variant.region().interval();
    let mut best: Option<i64> = None;
    for boundary in &boundaries {
        let d = signed_distance(vi.start.value(), vi.end.value(), boundary.start());
        if best.map_or(true, |b| d.abs() < b.abs()) {
            best = Some(d);
        }
    }
    best.map(|d| d as f64).unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deletion_across_boundary_is_zero() {
        assert_eq!(signed_distance(99, 101, 100), 0);
        assert_eq!(signed_distance(100, 102, 100), 0);
    }

    #[test]
    fn test_deletion_ending_at_boundary_is_upstream() {
        assert_eq!(signed_distance(97, 100, 100), -1);
    }

    #[test]
    fn test_far_variants() {
        assert_eq!(signed_distance(50, 51, 100), -50);
        assert_eq!(signed_distance(150, 152, 100), 51);
    }
}
