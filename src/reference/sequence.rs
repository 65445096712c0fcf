//! Strand-aware access to a fetched stretch of reference sequence

use crate::coords::{reverse_complement, CoordinateSystem, GenomicRegion};
use crate::error::FerroError;

/// Nucleotides anchored to a genomic region.
///
/// Produced once per evaluated region by a [`crate::reference::ReferenceProvider`]
/// and shared read-only by every calculator working on that region. Any
/// sub-region that is fully contained can be extracted, on either strand.
///
/// ```
/// use ferro_splice::coords::{Contig, GenomicRegion, Strand};
/// use ferro_splice::reference::StrandedSequence;
///
/// let chr = Contig::new("chr1", 20);
/// let region = GenomicRegion::zero_based(chr.clone(), Strand::Plus, 5, 15).unwrap();
/// let seq = StrandedSequence::new(region, "ACGTACGTAA").unwrap();
///
/// let q = GenomicRegion::zero_based(chr.clone(), Strand::Plus, 7, 10).unwrap();
/// assert_eq!(seq.subsequence(&q).as_deref(), Some("GTA"));
///
/// // the same bases read from the minus strand
/// let q = q.with_strand(Strand::Minus);
/// assert_eq!(seq.subsequence(&q).as_deref(), Some("TAC"));
///
/// let outside = GenomicRegion::zero_based(chr, Strand::Plus, 0, 6).unwrap();
/// assert_eq!(seq.subsequence(&outside), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrandedSequence {
    region: GenomicRegion,
    bases: String,
}

impl StrandedSequence {
    /// Wrap `bases` read 5'→3' on `region`'s strand.
    pub fn new(region: GenomicRegion, bases: impl Into<String>) -> Result<Self, FerroError> {
        let bases = bases.into();
        let region = region.with_coordinate_system(CoordinateSystem::ZeroBased);
        if !bases.is_ascii() {
            return Err(FerroError::InvalidCoordinates {
                msg: format!("sequence for {} contains non-ASCII characters", region),
            });
        }
        if bases.len() as u64 != region.len() {
            return Err(FerroError::InvalidCoordinates {
                msg: format!(
                    "sequence has {} bases but region {} spans {}",
                    bases.len(),
                    region,
                    region.len()
                ),
            });
        }
        Ok(Self { region, bases })
    }

    pub fn region(&self) -> &GenomicRegion {
        &self.region
    }

    pub fn bases(&self) -> &str {
        &self.bases
    }

    /// Bases of `query`, read 5'→3' on the query's strand, or `None` when the
    /// query lies on another contig or is not fully covered.
    pub fn subsequence(&self, query: &GenomicRegion) -> Option<String> {
        if !self.region.contains(query) {
            return None;
        }
        let own = self.region.interval();
        let q = query.with_strand(self.region.strand()).interval();
        let from = (q.start.value() - own.start.value()) as usize;
        let to = (q.end.value() - own.start.value()) as usize;
        let slice = &self.bases[from..to];
        if query.strand() == self.region.strand() {
            Some(slice.to_string())
        } else {
            Some(reverse_complement(slice))
        }
    }

    /// Bases of the 0-based region `[start, end)` on `anchor`'s contig and
    /// strand.
    pub fn subsequence_near(&self, anchor: &GenomicRegion, start: u64, end: u64) -> Option<String> {
        let query = anchor.sibling(start, end)?;
        self.subsequence(&query)
    }
}
