//! Classify a variant against a transcript's exon/intron structure

use super::location::{SpliceSite, SplicingLocationData, SplicingPositionType};
use super::parameters::{SpliceSiteKind, SplicingParameters};
use crate::coords::{CoordinateSystem, GenomicVariant};
use crate::reference::TranscriptModel;

/// Places variants into EXON/INTRON/DONOR/ACCEPTOR/OUTSIDE.
///
/// Per intron `i` the tests run donor window, acceptor window, intron body,
/// then exon `i`; the first match wins. A variant matching none of them lies
/// in the last exon.
///
/// ```
/// use ferro_splice::coords::{Contig, GenomicVariant, Strand, ZeroBasedInterval};
/// use ferro_splice::reference::TranscriptModel;
/// use ferro_splice::splicing::{SplicingLocator, SplicingParameters, SplicingPositionType};
///
/// let chr = Contig::new("chr1", 1_000);
/// let tx = TranscriptModel::from_exons(
///     "NM_TEST.1",
///     chr.clone(),
///     Strand::Plus,
///     vec![ZeroBasedInterval::from_raw(100, 200), ZeroBasedInterval::from_raw(300, 400)],
///     &[(8.0, 7.0)],
/// )
/// .unwrap();
/// let locator = SplicingLocator::new(SplicingParameters::default());
///
/// // 1-based 202 is the second intronic base after the donor boundary
/// let variant = GenomicVariant::from_vcf(chr, 202, "T", "G").unwrap();
/// let location = locator.locate(&variant, &tx);
/// assert_eq!(location.position_type(), SplicingPositionType::Donor);
/// assert_eq!(location.intron_index(), Some(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplicingLocator {
    params: SplicingParameters,
}

impl SplicingLocator {
    pub fn new(params: SplicingParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SplicingParameters {
        &self.params
    }

    /// Locate `variant` on `transcript`.
    pub fn locate(&self, variant: &GenomicVariant, transcript: &TranscriptModel) -> SplicingLocationData {
        if variant.region().contig() != transcript.contig() {
            return SplicingLocationData::OUTSIDE;
        }
        let span = transcript.span_region();
        if !span.overlaps(variant.region()) {
            return SplicingLocationData::OUTSIDE;
        }

        let v = variant
            .with_strand(transcript.strand())
            .with_coordinate_system(CoordinateSystem::ZeroBased);
        let vi = v.region().interval();

        if !transcript.is_spliced() {
            return SplicingLocationData::new(SplicingPositionType::Exon, Some(0), None, None, None);
        }

        let site = |kind, exon_idx| SpliceSite::for_exon(transcript, &self.params, kind, exon_idx);
        let hits = |s: &Option<SpliceSite>| {
            s.as_ref()
                .map(|s| s.window.interval().overlaps(&vi))
                .unwrap_or(false)
        };

        let exons = transcript.exons();
        let last_intron = transcript.intron_count() - 1;
        for (i, intron) in transcript.introns().iter().enumerate() {
            let donor = site(SpliceSiteKind::Donor, i);
            let acceptor = site(SpliceSiteKind::Acceptor, i + 1);

            if hits(&donor) {
                let upstream_acceptor = if i > 0 {
                    site(SpliceSiteKind::Acceptor, i)
                } else {
                    None
                };
                return SplicingLocationData::new(
                    SplicingPositionType::Donor,
                    Some(i),
                    Some(i),
                    donor,
                    upstream_acceptor,
                );
            }
            if hits(&acceptor) {
                let downstream_donor = if i < last_intron {
                    site(SpliceSiteKind::Donor, i + 1)
                } else {
                    None
                };
                return SplicingLocationData::new(
                    SplicingPositionType::Acceptor,
                    Some(i + 1),
                    Some(i),
                    downstream_donor,
                    acceptor,
                );
            }
            if intron.interval.overlaps(&vi) {
                return SplicingLocationData::new(
                    SplicingPositionType::Intron,
                    None,
                    Some(i),
                    donor,
                    acceptor,
                );
            }
            if exons[i].overlaps(&vi) {
                let own_acceptor = if i > 0 {
                    site(SpliceSiteKind::Acceptor, i)
                } else {
                    None
                };
                return SplicingLocationData::new(
                    SplicingPositionType::Exon,
                    Some(i),
                    None,
                    donor,
                    own_acceptor,
                );
            }
        }

        let last = transcript.exon_count() - 1;
        SplicingLocationData::new(
            SplicingPositionType::Exon,
            Some(last),
            None,
            None,
            site(SpliceSiteKind::Acceptor, last),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Contig, Strand, ZeroBasedInterval};

    fn chr() -> Contig {
        Contig::new("chr1", 1_000)
    }

    fn three_exon() -> TranscriptModel {
        TranscriptModel::from_exons(
            "NM_TEST.1",
            chr(),
            Strand::Plus,
            vec![
                ZeroBasedInterval::from_raw(100, 200),
                ZeroBasedInterval::from_raw(300, 400),
                ZeroBasedInterval::from_raw(500, 600),
            ],
            &[(8.0, 7.0), (9.0, 6.0)],
        )
        .unwrap()
    }

    fn snv(pos1: u64) -> GenomicVariant {
        GenomicVariant::from_vcf(chr(), pos1, "A", "C").unwrap()
    }

    fn locator() -> SplicingLocator {
        SplicingLocator::new(SplicingParameters::default())
    }

    #[test]
    fn test_donor_attaches_upstream_acceptor() {
        // 0-based 400 is the first intronic base of intron 1
        let loc = locator().locate(&snv(401), &three_exon());
        assert_eq!(loc.position_type(), SplicingPositionType::Donor);
        assert_eq!(loc.exon_index(), Some(1));
        assert_eq!(loc.intron_index(), Some(1));
        assert_eq!(loc.donor().unwrap().position(), 400);
        assert_eq!(loc.acceptor().unwrap().position(), 300);
    }

    #[test]
    fn test_first_donor_has_no_acceptor() {
        let loc = locator().locate(&snv(200), &three_exon());
        assert_eq!(loc.position_type(), SplicingPositionType::Donor);
        assert!(loc.acceptor().is_none());
    }

    #[test]
    fn test_acceptor_attaches_downstream_donor() {
        let loc = locator().locate(&snv(300), &three_exon());
        assert_eq!(loc.position_type(), SplicingPositionType::Acceptor);
        assert_eq!(loc.exon_index(), Some(1));
        assert_eq!(loc.intron_index(), Some(0));
        assert_eq!(loc.donor().unwrap().position(), 400);

        let loc = locator().locate(&snv(500), &three_exon());
        assert_eq!(loc.position_type(), SplicingPositionType::Acceptor);
        assert_eq!(loc.exon_index(), Some(2));
        assert!(loc.donor().is_none());
    }

    #[test]
    fn test_intron_body() {
        let loc = locator().locate(&snv(240), &three_exon());
        assert_eq!(loc.position_type(), SplicingPositionType::Intron);
        assert_eq!(loc.exon_index(), None);
        assert_eq!(loc.intron_index(), Some(0));
        assert!(loc.donor().is_some() && loc.acceptor().is_some());
    }

    #[test]
    fn test_exon_body() {
        let loc = locator().locate(&snv(150), &three_exon());
        assert_eq!(loc.position_type(), SplicingPositionType::Exon);
        assert_eq!(loc.exon_index(), Some(0));
        assert!(loc.acceptor().is_none());

        let loc = locator().locate(&snv(350), &three_exon());
        assert_eq!(loc.exon_index(), Some(1));
        assert!(loc.acceptor().is_some() && loc.donor().is_some());
    }

    #[test]
    fn test_last_exon() {
        let loc = locator().locate(&snv(590), &three_exon());
        assert_eq!(loc.position_type(), SplicingPositionType::Exon);
        assert_eq!(loc.exon_index(), Some(2));
        assert!(loc.donor().is_none());
        assert_eq!(loc.acceptor().unwrap().position(), 500);
    }

    #[test]
    fn test_outside_and_other_contig() {
        assert!(locator().locate(&snv(50), &three_exon()).is_outside());
        assert!(locator().locate(&snv(601), &three_exon()).is_outside());
        let other = GenomicVariant::from_vcf(Contig::new("chr2", 1_000), 150, "A", "C").unwrap();
        assert!(locator().locate(&other, &three_exon()).is_outside());
    }

    #[test]
    fn test_deletion_starting_before_span() {
        let del = GenomicVariant::from_vcf(chr(), 95, "AAAAAAAAAA", "A").unwrap();
        let loc = locator().locate(&del, &three_exon());
        assert_eq!(loc.position_type(), SplicingPositionType::Exon);
        assert_eq!(loc.exon_index(), Some(0));
    }

    #[test]
    fn test_single_exon() {
        let tx = TranscriptModel::from_exons(
            "NR_TEST.1",
            chr(),
            Strand::Plus,
            vec![ZeroBasedInterval::from_raw(100, 200)],
            &[],
        )
        .unwrap();
        let loc = locator().locate(&snv(150), &tx);
        assert_eq!(loc.position_type(), SplicingPositionType::Exon);
        assert_eq!(loc.exon_index(), Some(0));
        assert!(loc.donor().is_none() && loc.acceptor().is_none());
    }

    #[test]
    fn test_minus_strand_transcript() {
        // forward exons [700, 800) and [400, 500) read 5'→3' on minus
        let tx = TranscriptModel::from_forward_exons(
            "NM_MINUS.1",
            chr(),
            Strand::Minus,
            vec![
                ZeroBasedInterval::from_raw(400, 500),
                ZeroBasedInterval::from_raw(700, 800),
            ],
            &[(8.0, 7.0)],
        )
        .unwrap();
        // forward 0-based 699 is the first intronic base after the donor
        let loc = locator().locate(&snv(700), &tx);
        assert_eq!(loc.position_type(), SplicingPositionType::Donor);
        assert_eq!(loc.exon_index(), Some(0));

        // forward 0-based 500 is the last intronic base before the acceptor
        let loc = locator().locate(&snv(501), &tx);
        assert_eq!(loc.position_type(), SplicingPositionType::Acceptor);
        assert_eq!(loc.exon_index(), Some(1));
    }
}
