//! Where a variant sits relative to a transcript's splice sites

use serde::Serialize;
use std::fmt;

use super::parameters::{SpliceSiteKind, SplicingParameters};
use crate::coords::GenomicRegion;
use crate::reference::TranscriptModel;

/// Classification of a variant against a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SplicingPositionType {
    Exon,
    Intron,
    Donor,
    Acceptor,
    Outside,
}

impl fmt::Display for SplicingPositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SplicingPositionType::Exon => "EXON",
            SplicingPositionType::Intron => "INTRON",
            SplicingPositionType::Donor => "DONOR",
            SplicingPositionType::Acceptor => "ACCEPTOR",
            SplicingPositionType::Outside => "OUTSIDE",
        };
        write!(f, "{}", s)
    }
}

/// A donor or acceptor site of one exon: its boundary and scoring window.
///
/// Both regions are 0-based on the transcript's strand. The boundary is
/// zero-length; its start is the first base downstream of the junction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SpliceSite {
    pub kind: SpliceSiteKind,
    /// Exon whose 5' (acceptor) or 3' (donor) end forms this site
    pub exon_index: usize,
    pub boundary: GenomicRegion,
    pub window: GenomicRegion,
}

impl SpliceSite {
    /// The `kind` site of exon `exon_idx`, or `None` if the exon has no such
    /// site or its window would run off the contig.
    pub fn for_exon(
        transcript: &TranscriptModel,
        params: &SplicingParameters,
        kind: SpliceSiteKind,
        exon_idx: usize,
    ) -> Option<Self> {
        let boundary = match kind {
            SpliceSiteKind::Donor => transcript.donor_boundary(exon_idx)?,
            SpliceSiteKind::Acceptor => transcript.acceptor_boundary(exon_idx)?,
        };
        let window = params.window_region(&boundary, kind)?;
        Some(Self {
            kind,
            exon_index: exon_idx,
            boundary,
            window,
        })
    }

    /// Intron on the other side of this site
    pub fn intron_index(&self) -> usize {
        match self.kind {
            SpliceSiteKind::Donor => self.exon_index,
            SpliceSiteKind::Acceptor => self.exon_index - 1,
        }
    }

    /// 0-based interbase position of the boundary
    pub fn position(&self) -> u64 {
        self.boundary.start()
    }
}

/// Result of locating a variant on a transcript.
///
/// Immutable once built. [`SplicingLocationData::OUTSIDE`] is the shared
/// value for variants that do not touch the transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplicingLocationData {
    position_type: SplicingPositionType,
    exon_index: Option<usize>,
    intron_index: Option<usize>,
    donor: Option<SpliceSite>,
    acceptor: Option<SpliceSite>,
}

impl SplicingLocationData {
    /// No overlap with the transcript
    pub const OUTSIDE: SplicingLocationData = SplicingLocationData {
        position_type: SplicingPositionType::Outside,
        exon_index: None,
        intron_index: None,
        donor: None,
        acceptor: None,
    };

    pub(crate) fn new(
        position_type: SplicingPositionType,
        exon_index: Option<usize>,
        intron_index: Option<usize>,
        donor: Option<SpliceSite>,
        acceptor: Option<SpliceSite>,
    ) -> Self {
        Self {
            position_type,
            exon_index,
            intron_index,
            donor,
            acceptor,
        }
    }

    pub fn position_type(&self) -> SplicingPositionType {
        self.position_type
    }

    pub fn is_outside(&self) -> bool {
        self.position_type == SplicingPositionType::Outside
    }

    pub fn exon_index(&self) -> Option<usize> {
        self.exon_index
    }

    pub fn intron_index(&self) -> Option<usize> {
        self.intron_index
    }

    pub fn donor(&self) -> Option<&SpliceSite> {
        self.donor.as_ref()
    }

    pub fn acceptor(&self) -> Option<&SpliceSite> {
        self.acceptor.as_ref()
    }

    pub fn site(&self, kind: SpliceSiteKind) -> Option<&SpliceSite> {
        match kind {
            SpliceSiteKind::Donor => self.donor(),
            SpliceSiteKind::Acceptor => self.acceptor(),
        }
    }
}

impl fmt::Display for SplicingLocationData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position_type)?;
        if let Some(i) = self.exon_index {
            write!(f, " exon={}", i)?;
        }
        if let Some(i) = self.intron_index {
            write!(f, " intron={}", i)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Contig, Strand, ZeroBasedInterval};

    fn tx() -> TranscriptModel {
        TranscriptModel::from_exons(
            "NM_TEST.1",
            Contig::new("chr1", 1_000),
            Strand::Plus,
            vec![
                ZeroBasedInterval::from_raw(100, 200),
                ZeroBasedInterval::from_raw(300, 400),
            ],
            &[(8.0, 7.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_outside_is_empty() {
        let outside = SplicingLocationData::OUTSIDE;
        assert!(outside.is_outside());
        assert_eq!(outside.exon_index(), None);
        assert!(outside.donor().is_none());
        assert_eq!(outside.to_string(), "OUTSIDE");
    }

    #[test]
    fn test_site_for_exon() {
        let params = SplicingParameters::default();
        let donor = SpliceSite::for_exon(&tx(), &params, SpliceSiteKind::Donor, 0).unwrap();
        assert_eq!(donor.position(), 200);
        assert_eq!((donor.window.start(), donor.window.end()), (197, 206));
        assert_eq!(donor.intron_index(), 0);

        let acceptor = SpliceSite::for_exon(&tx(), &params, SpliceSiteKind::Acceptor, 1).unwrap();
        assert_eq!(acceptor.position(), 300);
        assert_eq!(acceptor.intron_index(), 0);

        assert!(SpliceSite::for_exon(&tx(), &params, SpliceSiteKind::Donor, 1).is_none());
        assert!(SpliceSite::for_exon(&tx(), &params, SpliceSiteKind::Acceptor, 0).is_none());
    }
}
