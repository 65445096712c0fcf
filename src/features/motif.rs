//! Sequence-motif features: k-mer tables and the AG exclusion zone

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::FeatureContext;
use crate::error::FerroError;
use crate::scoring::KmerScores;

static AG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)AG").unwrap());

static YAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)[CT]AG").unwrap());

/// The AG exclusion zone relative to an acceptor boundary `b`:
/// `[b + begin, b + end)` on the transcript strand.
///
/// The default covers 51 to 3 bases upstream of the boundary, leaving the
/// canonical `AG` itself out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgezRegion {
    pub begin: i64,
    pub end: i64,
}

impl Default for AgezRegion {
    fn default() -> Self {
        Self {
            begin: -51,
            end: -3,
        }
    }
}

impl AgezRegion {
    /// The zone must be non-empty and lie upstream of the boundary.
    pub fn validate(&self) -> Result<(), FerroError> {
        if self.begin >= self.end || self.end > 0 {
            return Err(FerroError::config(format!(
                "AG exclusion zone [{}, {}) must satisfy begin < end <= 0",
                self.begin, self.end
            )));
        }
        Ok(())
    }

    /// Zone around acceptor boundary `boundary`, clipped at position 0.
    /// `None` when it lies entirely before the contig start.
    pub fn around(&self, boundary: u64) -> Option<(u64, u64)> {
        let b = boundary as i64;
        let end = b + self.end;
        if end <= 0 {
            return None;
        }
        Some(((b + self.begin).max(0) as u64, end as u64))
    }
}

/// `Σ kmer(ref) - Σ kmer(alt)` over the alleles padded by `k - 1` bases.
pub(super) fn kmer_difference(ctx: &FeatureContext<'_>, table: Option<&KmerScores>) -> f64 {
    let Some(table) = table else {
        return f64::NAN;
    };
    let padding = (table.k() - 1) as u64;
    let renderer = ctx.annotator.renderer();
    let strand = ctx.transcript.strand();
    let reference = renderer.ref_neighbor_snippet(ctx.variant, ctx.sequence, strand, padding);
    let alt = renderer.alt_neighbor_snippet(ctx.variant, ctx.sequence, strand, padding);
    match (reference, alt) {
        (Some(r), Some(a)) => table.sum_over(&r) - table.sum_over(&a),
        _ => f64::NAN,
    }
}

pub(super) fn creates_ag_in_agez(ctx: &FeatureContext<'_>) -> f64 {
    creates_pattern_in_agez(ctx, &AG_PATTERN, 1)
}

pub(super) fn creates_yag_in_agez(ctx: &FeatureContext<'_>) -> f64 {
    creates_pattern_in_agez(ctx, &YAG_PATTERN, 2)
}

/// 1.0 when the variant hits the exclusion zone of any acceptor of the
/// transcript and the padded alt allele has more `pattern` matches than the
/// ref.
fn creates_pattern_in_agez(ctx: &FeatureContext<'_>, pattern: &Regex, padding: u64) -> f64 {
    if !hits_agez(ctx) {
        return 0.0;
    }

    let renderer = ctx.annotator.renderer();
    let strand = ctx.transcript.strand();
    let reference = renderer.ref_neighbor_snippet(ctx.variant, ctx.sequence, strand, padding);
    let alt = renderer.alt_neighbor_snippet(ctx.variant, ctx.sequence, strand, padding);
    match (reference, alt) {
        (Some(r), Some(a)) => {
            let gained = pattern.find_iter(&a).count() > pattern.find_iter(&r).count();
            if gained {
                1.0
            } else {
                0.0
            }
        }
        _ => f64::NAN,
    }
}

// Decided by position alone: in a short intron the zone reaches into the
// donor window.
fn hits_agez(ctx: &FeatureContext<'_>) -> bool {
    let vi = ctx.variant.region().interval();
    let (start, end) = (vi.start.value(), vi.end.value());
    ctx.transcript
        .acceptor_boundaries()
        .iter()
        .filter_map(|boundary| ctx.annotator.agez().around(boundary.start()))
        .any(|(zone_start, zone_end)| start < zone_end && zone_start < end)
}

/// 1.0 when the alt acceptor window reads `[CT]AG` at offsets −5..−3 from the
/// boundary and the reference window does not.
pub(super) fn yag_at_acceptor_minus_three(ctx: &FeatureContext<'_>) -> f64 {
    let Some(site) = ctx.location.acceptor() else {
        return f64::NAN;
    };
    let intronic = ctx.annotator.params().acceptor_intronic as usize;
    let Some(from) = intronic.checked_sub(5) else {
        return f64::NAN;
    };
    let to = from + 3;

    let renderer = ctx.annotator.renderer();
    let reference = renderer.site_snippet(site, ctx.sequence);
    let alt = renderer.site_with_alt_allele(site, ctx.variant, ctx.sequence);
    match (reference, alt) {
        (Some(r), Some(a)) if a.len() >= to => {
            let is_yag = |s: &str| YAG_PATTERN.is_match(&s[from..to]);
            if is_yag(&a) && !is_yag(&r) {
                1.0
            } else {
                0.0
            }
        }
        _ => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agez_default_and_validation() {
        let zone = AgezRegion::default();
        assert!(zone.validate().is_ok());
        assert_eq!(zone.around(300), Some((249, 297)));
        assert_eq!(zone.around(30), Some((0, 27)));
        assert_eq!(zone.around(2), None);

        assert!(AgezRegion { begin: -3, end: -51 }.validate().is_err());
        assert!(AgezRegion { begin: -10, end: 2 }.validate().is_err());
    }

    #[test]
    fn test_patterns_are_case_insensitive() {
        assert_eq!(AG_PATTERN.find_iter("cagTAGag").count(), 3);
        assert_eq!(YAG_PATTERN.find_iter("tagCAGaag").count(), 2);
    }
}
