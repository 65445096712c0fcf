//! Fixed-width reference and alternate windows around splice sites
//!
//! All arithmetic happens on the anchor's strand in 0-based half-open
//! coordinates. A donor window spans `[b - donor_exonic, b + donor_intronic)`
//! and an acceptor window `[b - acceptor_intronic, b + acceptor_exonic)` for
//! a boundary at interbase position `b`.
//!
//! Rendering an alternate allele into a window can change its length. The
//! result is always brought back to the window length:
//!
//! | Situation | Donor | Acceptor |
//! |-----------|-------|----------|
//! | too short | append reference bases downstream | prepend reference bases upstream |
//! | too long | keep the first `L` bases | keep the last `L` bases |
//! | variant hangs over the far edge | drop the overhanging leading alt bases | drop the overhanging trailing alt bases |

use log::debug;

use super::location::SpliceSite;
use super::parameters::{SpliceSiteKind, SplicingParameters};
use crate::coords::{CoordinateSystem, GenomicRegion, GenomicVariant, Strand};
use crate::reference::StrandedSequence;

/// Renders reference/alternate windows and neighbour snippets.
///
/// ```
/// use ferro_splice::coords::{Contig, GenomicRegion, GenomicVariant, Strand};
/// use ferro_splice::reference::StrandedSequence;
/// use ferro_splice::splicing::{AlleleGenerator, SpliceSiteKind, SplicingParameters};
///
/// let chr = Contig::new("chr1", 20);
/// let all = GenomicRegion::zero_based(chr.clone(), Strand::Plus, 0, 20).unwrap();
/// let seq = StrandedSequence::new(all, "AAAAACAGGTAAGTAAAAAA").unwrap();
/// let anchor = GenomicRegion::boundary(chr.clone(), Strand::Plus, 8).unwrap();
///
/// let renderer = AlleleGenerator::new(SplicingParameters::default());
/// assert_eq!(
///     renderer.reference_window(&anchor, &seq, SpliceSiteKind::Donor).as_deref(),
///     Some("CAGGTAAGT")
/// );
///
/// // G>A at the first intronic base (1-based 9)
/// let variant = GenomicVariant::from_vcf(chr, 9, "G", "A").unwrap();
/// assert_eq!(
///     renderer.render(&anchor, &variant, &seq, SpliceSiteKind::Donor).as_deref(),
///     Some("CAGATAAGT")
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlleleGenerator {
    params: SplicingParameters,
}

impl AlleleGenerator {
    pub fn new(params: SplicingParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SplicingParameters {
        &self.params
    }

    /// Unmodified reference bases of the `kind` window around `anchor`.
    pub fn reference_window(
        &self,
        anchor: &GenomicRegion,
        sequence: &StrandedSequence,
        kind: SpliceSiteKind,
    ) -> Option<String> {
        let window = self.params.window_region(anchor, kind)?;
        sequence.subsequence(&window)
    }

    /// Reference window of a located splice site
    pub fn site_snippet(&self, site: &SpliceSite, sequence: &StrandedSequence) -> Option<String> {
        self.reference_window(&site.boundary, sequence, site.kind)
    }

    pub fn donor_site_snippet(&self, anchor: &GenomicRegion, sequence: &StrandedSequence) -> Option<String> {
        self.reference_window(anchor, sequence, SpliceSiteKind::Donor)
    }

    pub fn acceptor_site_snippet(
        &self,
        anchor: &GenomicRegion,
        sequence: &StrandedSequence,
    ) -> Option<String> {
        self.reference_window(anchor, sequence, SpliceSiteKind::Acceptor)
    }

    /// Window of a located splice site with `variant`'s alternate allele applied
    pub fn site_with_alt_allele(
        &self,
        site: &SpliceSite,
        variant: &GenomicVariant,
        sequence: &StrandedSequence,
    ) -> Option<String> {
        self.render(&site.boundary, variant, sequence, site.kind)
    }

    /// Donor window around `anchor` with `variant` applied
    pub fn donor_site_with_alt_allele(
        &self,
        anchor: &GenomicRegion,
        variant: &GenomicVariant,
        sequence: &StrandedSequence,
    ) -> Option<String> {
        self.render(anchor, variant, sequence, SpliceSiteKind::Donor)
    }

    /// Acceptor window around `anchor` with `variant` applied
    pub fn acceptor_site_with_alt_allele(
        &self,
        anchor: &GenomicRegion,
        variant: &GenomicVariant,
        sequence: &StrandedSequence,
    ) -> Option<String> {
        self.render(anchor, variant, sequence, SpliceSiteKind::Acceptor)
    }

    /// The `kind` window around `anchor` with the alternate allele applied.
    ///
    /// Returns exactly the window length, or `None` when the inputs live on
    /// different contigs, the reference does not cover what is needed, or the
    /// variant removes the whole window.
    pub fn render(
        &self,
        anchor: &GenomicRegion,
        variant: &GenomicVariant,
        sequence: &StrandedSequence,
        kind: SpliceSiteKind,
    ) -> Option<String> {
        if !anchor.same_contig(variant.region()) || !anchor.same_contig(sequence.region()) {
            return None;
        }
        let window = self.params.window_region(anchor, kind)?.interval();
        let (w_start, w_end) = (window.start.value(), window.end.value());
        let len = self.params.window_len(kind);

        let v = variant
            .with_strand(anchor.strand())
            .with_coordinate_system(CoordinateSystem::ZeroBased);
        let vi = v.region().interval();
        let (v_start, v_end) = (vi.start.value(), vi.end.value());

        if !window.overlaps(&vi) {
            return sequence.subsequence_near(anchor, w_start, w_end);
        }
        if vi.contains(&window) {
            debug!("{} removes the {:?} window at {}", variant, kind, anchor);
            return None;
        }

        let alt = v.alt_allele();
        let alt = match kind {
            SpliceSiteKind::Donor if v_start < w_start => {
                let skip = ((w_start - v_start) as usize).min(alt.len());
                &alt[skip..]
            }
            SpliceSiteKind::Acceptor if v_end > w_end => {
                let skip = ((v_end - w_end) as usize).min(alt.len());
                &alt[..alt.len() - skip]
            }
            _ => alt,
        };

        let left = sequence.subsequence_near(anchor, w_start, v_start.max(w_start))?;
        let right = sequence.subsequence_near(anchor, v_end.min(w_end), w_end)?;
        let mut spliced = String::with_capacity(len + alt.len());
        spliced.push_str(&left);
        spliced.push_str(alt);
        spliced.push_str(&right);

        if spliced.len() < len {
            let missing = (len - spliced.len()) as u64;
            match kind {
                SpliceSiteKind::Donor => {
                    let from = v_end.max(w_end);
                    let extra = sequence.subsequence_near(anchor, from, from.checked_add(missing)?)?;
                    spliced.push_str(&extra);
                }
                SpliceSiteKind::Acceptor => {
                    let to = v_start.min(w_start);
                    let extra = sequence.subsequence_near(anchor, to.checked_sub(missing)?, to)?;
                    spliced.insert_str(0, &extra);
                }
            }
        } else if spliced.len() > len {
            spliced = match kind {
                SpliceSiteKind::Donor => spliced[..len].to_string(),
                SpliceSiteKind::Acceptor => spliced[spliced.len() - len..].to_string(),
            };
        }
        Some(spliced)
    }

    /// `padding` reference bases upstream of `variant_region`, then `allele`,
    /// then `padding` reference bases downstream, all on the region's strand.
    ///
    /// No length correction is applied; the result grows or shrinks with the
    /// allele.
    pub fn neighbor_snippet(
        &self,
        variant_region: &GenomicRegion,
        sequence: &StrandedSequence,
        allele: &str,
        padding: u64,
    ) -> Option<String> {
        let vi = variant_region
            .with_coordinate_system(CoordinateSystem::ZeroBased)
            .interval();
        let (start, end) = (vi.start.value(), vi.end.value());
        let upstream =
            sequence.subsequence_near(variant_region, start.checked_sub(padding)?, start)?;
        let downstream =
            sequence.subsequence_near(variant_region, end, end.checked_add(padding)?)?;
        Some(format!("{}{}{}", upstream, allele, downstream))
    }

    /// Neighbour snippet of the alternate allele on `strand`
    pub fn alt_neighbor_snippet(
        &self,
        variant: &GenomicVariant,
        sequence: &StrandedSequence,
        strand: Strand,
        padding: u64,
    ) -> Option<String> {
        let v = variant.with_strand(strand);
        self.neighbor_snippet(v.region(), sequence, v.alt_allele(), padding)
    }

    /// Neighbour snippet of the reference allele on `strand`
    pub fn ref_neighbor_snippet(
        &self,
        variant: &GenomicVariant,
        sequence: &StrandedSequence,
        strand: Strand,
        padding: u64,
    ) -> Option<String> {
        let v = variant.with_strand(strand);
        self.neighbor_snippet(v.region(), sequence, v.ref_allele(), padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Contig;

    //                  0         1         2         3
    //                  0123456789012345678901234567890123456789
    const SEQ: &str = "TTTTTTTTTTCCCAGGTAAGTACCCCAAAAAAAAAAAAAA";

    fn chr() -> Contig {
        Contig::new("chr1", SEQ.len() as u64)
    }

    fn sequence() -> StrandedSequence {
        let region = GenomicRegion::zero_based(chr(), Strand::Plus, 0, SEQ.len() as u64).unwrap();
        StrandedSequence::new(region, SEQ).unwrap()
    }

    fn renderer() -> AlleleGenerator {
        AlleleGenerator::new(SplicingParameters::new(3, 6, 2, 4).unwrap())
    }

    // donor boundary at 15: window [12, 21) = "CAGGTAAGT"
    fn donor_anchor() -> GenomicRegion {
        GenomicRegion::boundary(chr(), Strand::Plus, 15).unwrap()
    }

    // acceptor boundary at 15: window [11, 17) = "CCAGGT"
    fn acceptor_anchor() -> GenomicRegion {
        GenomicRegion::boundary(chr(), Strand::Plus, 15).unwrap()
    }

    fn variant(pos0: u64, r: &str, a: &str) -> GenomicVariant {
        GenomicVariant::from_vcf(chr(), pos0 + 1, r, a).unwrap()
    }

    #[test]
    fn test_reference_snippets() {
        let r = renderer();
        assert_eq!(r.donor_site_snippet(&donor_anchor(), &sequence()).as_deref(), Some("CAGGTAAGT"));
        assert_eq!(r.acceptor_site_snippet(&acceptor_anchor(), &sequence()).as_deref(), Some("CCAGGT"));
    }

    fn render_donor(v: &GenomicVariant) -> Option<String> {
        renderer().render(&donor_anchor(), v, &sequence(), SpliceSiteKind::Donor)
    }

    fn render_acceptor(v: &GenomicVariant) -> Option<String> {
        renderer().render(&acceptor_anchor(), v, &sequence(), SpliceSiteKind::Acceptor)
    }

    #[test]
    fn test_reference_windows() {
        let r = renderer();
        let seq = sequence();
        assert_eq!(
            r.reference_window(&donor_anchor(), &seq, SpliceSiteKind::Donor).as_deref(),
            Some("CAGGTAAGT")
        );
        assert_eq!(
            r.reference_window(&acceptor_anchor(), &seq, SpliceSiteKind::Acceptor).as_deref(),
            Some("CCAGGT")
        );
    }

    #[test]
    fn test_non_overlapping_variant_returns_reference() {
        assert_eq!(render_donor(&variant(2, "T", "G")).as_deref(), Some("CAGGTAAGT"));
    }

    #[test]
    fn test_snp_inside_and_at_edges() {
        assert_eq!(render_donor(&variant(15, "G", "A")).as_deref(), Some("CAGATAAGT"));
        assert_eq!(render_donor(&variant(12, "C", "T")).as_deref(), Some("TAGGTAAGT"));
        assert_eq!(render_donor(&variant(20, "T", "C")).as_deref(), Some("CAGGTAAGC"));
        assert_eq!(render_acceptor(&variant(11, "C", "A")).as_deref(), Some("ACAGGT"));
        assert_eq!(render_acceptor(&variant(16, "T", "A")).as_deref(), Some("CCAGGA"));
    }

    #[test]
    fn test_donor_deletion_borrows_downstream() {
        // delete GT at [15, 17) keeping padding G at 14
        assert_eq!(render_donor(&variant(14, "GGT", "G")).as_deref(), Some("CAGAAGTAC"));
    }

    #[test]
    fn test_acceptor_deletion_borrows_upstream() {
        // delete CA at [12, 14) keeping padding C at 11
        assert_eq!(render_acceptor(&variant(11, "CCA", "C")).as_deref(), Some("TCCGGT"));
    }

    #[test]
    fn test_insertion_truncation_direction() {
        // insert AAA after 14
        assert_eq!(render_donor(&variant(14, "G", "GAAA")).as_deref(), Some("CAGAAAGTA"));
        assert_eq!(render_acceptor(&variant(14, "G", "GAAA")).as_deref(), Some("GAAAGT"));
    }

    #[test]
    fn test_window_deleted_entirely() {
        assert_eq!(render_donor(&variant(11, "CCAGGTAAGTA", "C")), None);
    }

    #[test]
    fn test_overhanging_variant_round_trips() {
        // ref == alt spanning the donor window start
        assert_eq!(render_donor(&variant(10, "CCCA", "CCCA")).as_deref(), Some("CAGGTAAGT"));
        // ref == alt spanning the acceptor window end
        assert_eq!(render_acceptor(&variant(15, "GTAA", "GTAA")).as_deref(), Some("CCAGGT"));
    }

    #[test]
    fn test_contig_mismatch() {
        let other = GenomicVariant::from_vcf(Contig::new("chr2", 40), 16, "G", "A").unwrap();
        assert_eq!(render_donor(&other), None);
    }

    #[test]
    fn test_insufficient_sequence() {
        let anchor = GenomicRegion::boundary(chr(), Strand::Plus, 37).unwrap();
        assert_eq!(
            renderer().reference_window(&anchor, &sequence(), SpliceSiteKind::Donor),
            None
        );
    }

    #[test]
    fn test_minus_strand_render() {
        // minus boundary at 25 is forward boundary 15
        let anchor = donor_anchor().with_strand(Strand::Minus);
        let window = renderer()
            .reference_window(&anchor, &sequence(), SpliceSiteKind::Donor)
            .unwrap();
        assert_eq!(window, reverse("TCCCAGGTA"));

        let v = variant(15, "G", "A");
        let alt = renderer()
            .render(&anchor, &v, &sequence(), SpliceSiteKind::Donor)
            .unwrap();
        assert_eq!(alt, reverse("TCCCAGATA"));
    }

    fn reverse(s: &str) -> String {
        crate::coords::reverse_complement(s)
    }

    #[test]
    fn test_neighbor_snippet() {
        let r = renderer();
        let v = variant(15, "G", "GTT");
        assert_eq!(
            r.alt_neighbor_snippet(&v, &sequence(), Strand::Plus, 3).as_deref(),
            Some("CAGGTTTAA")
        );
        assert_eq!(
            r.ref_neighbor_snippet(&v, &sequence(), Strand::Plus, 3).as_deref(),
            Some("CAGGTAA")
        );
        assert_eq!(r.alt_neighbor_snippet(&v, &sequence(), Strand::Plus, 30), None);
    }
}
