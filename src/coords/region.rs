//! Stranded, coordinate-system-tagged genomic regions

use serde::Serialize;
use std::fmt;

use super::{Contig, CoordinateSystem, Strand, ZeroBasedInterval};
use crate::error::FerroError;

/// A region on a contig carrying its strand and coordinate system.
///
/// Internally the bounds are kept exactly as given in `coordinate_system`;
/// the 0-based half-open view on the region's own strand is available
/// through [`GenomicRegion::interval`]. A zero-length region denotes a
/// boundary between two bases, e.g. the exon/intron junction of a donor site.
///
/// # Examples
///
/// ```
/// use ferro_splice::coords::{Contig, CoordinateSystem, GenomicRegion, Strand};
///
/// let chr = Contig::new("chr1", 1_000);
/// let region = GenomicRegion::one_based(chr, Strand::Plus, 101, 110).unwrap();
/// assert_eq!(region.len(), 10);
///
/// let zero = region.with_coordinate_system(CoordinateSystem::ZeroBased);
/// assert_eq!((zero.start(), zero.end()), (100, 110));
///
/// let minus = zero.with_strand(Strand::Minus);
/// assert_eq!((minus.start(), minus.end()), (890, 900));
/// assert_eq!(minus.with_strand(Strand::Plus), zero);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GenomicRegion {
    contig: Contig,
    strand: Strand,
    coordinate_system: CoordinateSystem,
    start: u64,
    end: u64,
}

impl GenomicRegion {
    /// Create a region, validating the bounds against the coordinate system
    /// and the contig length.
    pub fn new(
        contig: Contig,
        strand: Strand,
        coordinate_system: CoordinateSystem,
        start: u64,
        end: u64,
    ) -> Result<Self, FerroError> {
        let delta = coordinate_system.start_delta();
        if start < delta {
            return Err(FerroError::InvalidCoordinates {
                msg: format!("{} start must be >= {}, got {}", coordinate_system, delta, start),
            });
        }
        if end + delta < start {
            return Err(FerroError::InvalidCoordinates {
                msg: format!("end {} is before start {}", end, start),
            });
        }
        if end > contig.length {
            return Err(FerroError::InvalidCoordinates {
                msg: format!(
                    "end {} exceeds length {} of contig {}",
                    end, contig.length, contig.name
                ),
            });
        }
        Ok(Self {
            contig,
            strand,
            coordinate_system,
            start,
            end,
        })
    }

    /// Create a 0-based half-open region
    pub fn zero_based(
        contig: Contig,
        strand: Strand,
        start: u64,
        end: u64,
    ) -> Result<Self, FerroError> {
        Self::new(contig, strand, CoordinateSystem::ZeroBased, start, end)
    }

    /// Create a 1-based closed region
    pub fn one_based(
        contig: Contig,
        strand: Strand,
        start: u64,
        end: u64,
    ) -> Result<Self, FerroError> {
        Self::new(contig, strand, CoordinateSystem::OneBased, start, end)
    }

    /// A zero-length region between base `pos - 1` and base `pos` (0-based).
    pub fn boundary(contig: Contig, strand: Strand, pos: u64) -> Result<Self, FerroError> {
        Self::zero_based(contig, strand, pos, pos)
    }

    pub fn contig(&self) -> &Contig {
        &self.contig
    }

    pub fn contig_name(&self) -> &str {
        &self.contig.name
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn coordinate_system(&self) -> CoordinateSystem {
        self.coordinate_system
    }

    /// Start in the region's own coordinate system
    pub fn start(&self) -> u64 {
        self.start
    }

    /// End in the region's own coordinate system
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Start expressed in `system`
    pub fn start_with(&self, system: CoordinateSystem) -> u64 {
        self.start - self.coordinate_system.start_delta() + system.start_delta()
    }

    /// End expressed in `system`. Ends coincide in both systems.
    pub fn end_with(&self, _system: CoordinateSystem) -> u64 {
        self.end
    }

    /// Number of bases spanned
    pub fn len(&self) -> u64 {
        self.end - self.start_with(CoordinateSystem::ZeroBased)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 0-based half-open view on the region's own strand
    pub fn interval(&self) -> ZeroBasedInterval {
        ZeroBasedInterval::from_raw(self.start_with(CoordinateSystem::ZeroBased), self.end)
    }

    /// Same biological span expressed in another coordinate system
    pub fn with_coordinate_system(&self, system: CoordinateSystem) -> Self {
        Self {
            contig: self.contig.clone(),
            strand: self.strand,
            coordinate_system: system,
            start: self.start_with(system),
            end: self.end,
        }
    }

    /// Same bases viewed from `strand`; mirrors the bounds around the contig
    /// length when the strand changes.
    pub fn with_strand(&self, strand: Strand) -> Self {
        if strand == self.strand {
            return self.clone();
        }
        let length = self.contig.length;
        let start0 = length - self.end;
        let end0 = length - self.start_with(CoordinateSystem::ZeroBased);
        Self {
            contig: self.contig.clone(),
            strand,
            coordinate_system: self.coordinate_system,
            start: start0 + self.coordinate_system.start_delta(),
            end: end0,
        }
    }

    /// This region expressed on `other`'s strand and coordinate system
    pub fn normalized_to(&self, other: &GenomicRegion) -> Self {
        self.with_strand(other.strand)
            .with_coordinate_system(other.coordinate_system)
    }

    /// Whether both regions live on the same contig. Length is part of the
    /// identity: mirroring onto the other strand depends on it.
    pub fn same_contig(&self, other: &GenomicRegion) -> bool {
        self.contig == other.contig
    }

    /// Whether the regions share at least one base. Regions on different
    /// contigs never overlap.
    pub fn overlaps(&self, other: &GenomicRegion) -> bool {
        self.same_contig(other) && self.interval().overlaps(&other.normalized_to(self).interval())
    }

    /// Whether `other` lies entirely within this region
    pub fn contains(&self, other: &GenomicRegion) -> bool {
        self.same_contig(other) && self.interval().contains(&other.normalized_to(self).interval())
    }

    /// A 0-based region on the same contig and strand, or `None` if the
    /// bounds fall off the contig or are inverted.
    pub fn sibling(&self, start: u64, end: u64) -> Option<Self> {
        GenomicRegion::new(
            self.contig.clone(),
            self.strand,
            CoordinateSystem::ZeroBased,
            start,
            end,
        )
        .ok()
    }

    /// 0-based region grown by `upstream` bases before and `downstream` bases
    /// after, or `None` if that runs off the contig.
    pub fn extended(&self, upstream: u64, downstream: u64) -> Option<Self> {
        let interval = self.interval();
        let start = interval.start.value().checked_sub(upstream)?;
        let end = interval.end.value().checked_add(downstream)?;
        self.sibling(start, end)
    }
}

impl fmt::Display for GenomicRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}({}, {})",
            self.contig, self.start, self.end, self.strand, self.coordinate_system
        )
    }
}
