//! Exon and intron length features

use super::FeatureContext;

/// Indicator for "no exon/intron holds this variant"
const NOT_APPLICABLE: f64 = -1.0;

pub(super) fn exon_length(ctx: &FeatureContext<'_>) -> f64 {
    ctx.location
        .exon_index()
        .and_then(|i| ctx.transcript.exons().get(i))
        .map(|exon| exon.len() as f64)
        .unwrap_or(NOT_APPLICABLE)
}

pub(super) fn intron_length(ctx: &FeatureContext<'_>) -> f64 {
    ctx.location
        .intron_index()
        .and_then(|i| ctx.transcript.introns().get(i))
        .map(|intron| intron.len() as f64)
        .unwrap_or(NOT_APPLICABLE)
}
