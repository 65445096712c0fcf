//! Splice-site strength features: canonical disruption, cryptic activation,
//! strength differential and precomputed site scores

use super::FeatureContext;
use crate::splicing::{SpliceSite, SpliceSiteKind, SplicingPositionType};

/// `Ri(ref) - Ri(alt)` of the governing site; 0 when there is no such site
/// or the variant misses its window.
pub(super) fn canonical(ctx: &FeatureContext<'_>, kind: SpliceSiteKind) -> f64 {
    let Some(site) = ctx.location.site(kind) else {
        return 0.0;
    };
    if !site.window.overlaps(ctx.variant.region()) {
        return 0.0;
    }
    let renderer = ctx.annotator.renderer();
    let pwm = ctx.annotator.matrix(kind);
    let scores = renderer
        .site_snippet(site, ctx.sequence)
        .zip(renderer.site_with_alt_allele(site, ctx.variant, ctx.sequence));
    match scores {
        Some((reference, alt)) => pwm.score(&reference) - pwm.score(&alt),
        None => f64::NAN,
    }
}

/// Best alt neighbourhood window minus the (alt-rendered) governing site
pub(super) fn cryptic(ctx: &FeatureContext<'_>, kind: SpliceSiteKind) -> f64 {
    let Some(site) = ctx.location.site(kind) else {
        return f64::NAN;
    };
    let baseline = alt_site_score(ctx, site);
    best_alt_window(ctx, kind) - baseline
}

/// Highest-scoring `kind` window anywhere in the alt neighbour snippet
/// (padded by window length − 1 on each side).
pub(super) fn best_alt_window(ctx: &FeatureContext<'_>, kind: SpliceSiteKind) -> f64 {
    let len = ctx.annotator.params().window_len(kind) as u64;
    ctx.annotator
        .renderer()
        .alt_neighbor_snippet(
            ctx.variant,
            ctx.sequence,
            ctx.transcript.strand(),
            len.saturating_sub(1),
        )
        .map(|snippet| ctx.annotator.matrix(kind).max_sliding_score(&snippet))
        .unwrap_or(f64::NAN)
}

/// Reference score of the governing site, computed at ingestion
pub(super) fn wild_type_score(ctx: &FeatureContext<'_>, kind: SpliceSiteKind) -> f64 {
    let Some(site) = ctx.location.site(kind) else {
        return f64::NAN;
    };
    match ctx.transcript.introns().get(site.intron_index()) {
        Some(intron) => match kind {
            SpliceSiteKind::Donor => intron.donor_score,
            SpliceSiteKind::Acceptor => intron.acceptor_score,
        },
        None => f64::NAN,
    }
}

/// Alt site score of the variant's exon minus that of the next exon.
///
/// Only defined when both exons carry a `kind` site: donors for exons
/// `0..=n-3`, acceptors for exons `1..=n-2`.
pub(super) fn strength_difference(ctx: &FeatureContext<'_>, kind: SpliceSiteKind) -> f64 {
    let applies = matches!(
        ctx.location.position_type(),
        SplicingPositionType::Exon | SplicingPositionType::Donor | SplicingPositionType::Acceptor
    );
    let Some(exon) = ctx.location.exon_index().filter(|_| applies) else {
        return 0.0;
    };
    let n = ctx.transcript.exon_count();
    let eligible = match kind {
        SpliceSiteKind::Donor => exon + 3 <= n,
        SpliceSiteKind::Acceptor => exon >= 1 && exon + 2 <= n,
    };
    if !eligible {
        return 0.0;
    }

    let params = ctx.annotator.params();
    let this = SpliceSite::for_exon(ctx.transcript, params, kind, exon);
    let next = SpliceSite::for_exon(ctx.transcript, params, kind, exon + 1);
    match (this, next) {
        (Some(this), Some(next)) => alt_site_score(ctx, &this) - alt_site_score(ctx, &next),
        _ => f64::NAN,
    }
}

fn alt_site_score(ctx: &FeatureContext<'_>, site: &SpliceSite) -> f64 {
    ctx.annotator
        .renderer()
        .site_with_alt_allele(site, ctx.variant, ctx.sequence)
        .map(|window| ctx.annotator.matrix(site.kind).score(&window))
        .unwrap_or(f64::NAN)
}
