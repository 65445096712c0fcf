//! Transcript models for splicing evaluation
//!
//! # Coordinate System
//!
//! All intervals in this module are **0-based half-open** and expressed on
//! the **transcript's own strand**, so exons are always listed 5'→3' in
//! ascending order regardless of the genomic strand:
//!
//! | Field | Basis | Notes |
//! |-------|-------|-------|
//! | `TranscriptModel.exons` | 0-based, half-open | transcript strand |
//! | `Intron.interval` | 0-based, half-open | transcript strand |
//!
//! The donor boundary of exon *i* is `exons[i].end` and the acceptor boundary
//! of exon *i* is `exons[i].start`; both are interbase coordinates.
//!
//! For type-safe coordinate handling, see [`crate::coords`].

use serde::{Deserialize, Serialize};

use crate::coords::{Contig, GenomicRegion, Strand, ZeroBasedInterval};
use crate::error::FerroError;

/// An intron with the information content of its splice sites
///
/// The scores are computed once at ingestion against the reference genome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intron {
    pub interval: ZeroBasedInterval,
    /// Donor site score in bits
    pub donor_score: f64,
    /// Acceptor site score in bits
    pub acceptor_score: f64,
}

impl Intron {
    pub fn new(interval: ZeroBasedInterval, donor_score: f64, acceptor_score: f64) -> Self {
        Self {
            interval,
            donor_score,
            acceptor_score,
        }
    }

    /// Intron length in bases
    pub fn len(&self) -> u64 {
        self.interval.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interval.is_empty()
    }
}

/// Serialized form of a transcript; validated on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TranscriptRecord {
    accession: String,
    contig: Contig,
    strand: Strand,
    exons: Vec<ZeroBasedInterval>,
    #[serde(default)]
    introns: Vec<Intron>,
}

/// A transcript: alternating, contiguous exons and introns on one strand.
///
/// Invariants (checked by every constructor, including deserialization):
/// - at least one exon, none empty;
/// - exactly `exons.len() - 1` non-empty introns;
/// - `exons[i].end == introns[i].start` and `introns[i].end == exons[i + 1].start`;
/// - the last exon ends within the contig.
///
/// ```
/// use ferro_splice::coords::{Contig, Strand, ZeroBasedInterval};
/// use ferro_splice::reference::TranscriptModel;
///
/// let tx = TranscriptModel::from_exons(
///     "NM_TEST.1",
///     Contig::new("chr1", 1_000),
///     Strand::Plus,
///     vec![ZeroBasedInterval::from_raw(100, 200), ZeroBasedInterval::from_raw(300, 400)],
///     &[(8.5, 9.1)],
/// )
/// .unwrap();
///
/// assert_eq!(tx.intron_count(), 1);
/// assert_eq!(tx.introns()[0].interval, ZeroBasedInterval::from_raw(200, 300));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TranscriptRecord", into = "TranscriptRecord")]
pub struct TranscriptModel {
    accession: String,
    contig: Contig,
    strand: Strand,
    exons: Vec<ZeroBasedInterval>,
    introns: Vec<Intron>,
}

impl TranscriptModel {
    /// Create a transcript from explicit exons and introns.
    pub fn new(
        accession: impl Into<String>,
        contig: Contig,
        strand: Strand,
        exons: Vec<ZeroBasedInterval>,
        introns: Vec<Intron>,
    ) -> Result<Self, FerroError> {
        let tx = Self {
            accession: accession.into(),
            contig,
            strand,
            exons,
            introns,
        };
        tx.validate()?;
        Ok(tx)
    }

    /// Create a transcript from its exons, deriving the introns between them.
    ///
    /// `site_scores[i]` holds the (donor, acceptor) scores of intron `i`.
    pub fn from_exons(
        accession: impl Into<String>,
        contig: Contig,
        strand: Strand,
        exons: Vec<ZeroBasedInterval>,
        site_scores: &[(f64, f64)],
    ) -> Result<Self, FerroError> {
        let accession = accession.into();
        let expected = exons.len().saturating_sub(1);
        if site_scores.len() != expected {
            return Err(FerroError::MalformedTranscript {
                accession,
                msg: format!(
                    "{} exons need {} intron scores, got {}",
                    exons.len(),
                    expected,
                    site_scores.len()
                ),
            });
        }
        let introns = exons
            .windows(2)
            .zip(site_scores)
            .map(|(pair, &(donor, acceptor))| {
                Intron::new(
                    ZeroBasedInterval::new(pair[0].end, pair[1].start),
                    donor,
                    acceptor,
                )
            })
            .collect();
        Self::new(accession, contig, strand, exons, introns)
    }

    /// Create a transcript from exons given on the forward strand (as in
    /// GFF/BED annotations), in any order.
    ///
    /// For minus-strand transcripts the exons are mirrored onto the minus
    /// strand so they read 5'→3'. `site_scores` are in transcript order.
    pub fn from_forward_exons(
        accession: impl Into<String>,
        contig: Contig,
        strand: Strand,
        mut forward_exons: Vec<ZeroBasedInterval>,
        site_scores: &[(f64, f64)],
    ) -> Result<Self, FerroError> {
        let accession = accession.into();
        if let Some(exon) = forward_exons
            .iter()
            .find(|e| e.end.value() > contig.length || e.start > e.end)
        {
            return Err(FerroError::MalformedTranscript {
                accession,
                msg: format!(
                    "exon [{}, {}) is inverted or exceeds contig {} of length {}",
                    exon.start, exon.end, contig.name, contig.length
                ),
            });
        }
        forward_exons.sort_by_key(|e| e.start);
        let exons = match strand {
            Strand::Plus => forward_exons,
            Strand::Minus => forward_exons
                .iter()
                .rev()
                .map(|e| {
                    ZeroBasedInterval::from_raw(
                        contig.length - e.end.value(),
                        contig.length - e.start.value(),
                    )
                })
                .collect(),
        };
        Self::from_exons(accession, contig, strand, exons, site_scores)
    }

    fn malformed(&self, msg: String) -> FerroError {
        FerroError::MalformedTranscript {
            accession: self.accession.clone(),
            msg,
        }
    }

    fn validate(&self) -> Result<(), FerroError> {
        if self.exons.is_empty() {
            return Err(self.malformed("transcript has no exons".to_string()));
        }
        if self.introns.len() + 1 != self.exons.len() {
            return Err(self.malformed(format!(
                "{} exons require {} introns, found {}",
                self.exons.len(),
                self.exons.len() - 1,
                self.introns.len()
            )));
        }
        if let Some(i) = self.exons.iter().position(|e| e.is_empty()) {
            return Err(self.malformed(format!("exon {} is empty", i)));
        }
        for (i, intron) in self.introns.iter().enumerate() {
            if intron.is_empty() {
                return Err(self.malformed(format!("intron {} is empty", i)));
            }
            if self.exons[i].end != intron.interval.start {
                return Err(self.malformed(format!(
                    "intron {} starts at {} but exon {} ends at {}",
                    i, intron.interval.start, i, self.exons[i].end
                )));
            }
            if intron.interval.end != self.exons[i + 1].start {
                return Err(self.malformed(format!(
                    "intron {} ends at {} but exon {} starts at {}",
                    i,
                    intron.interval.end,
                    i + 1,
                    self.exons[i + 1].start
                )));
            }
        }
        let last = self.exons[self.exons.len() - 1];
        if last.end.value() > self.contig.length {
            return Err(self.malformed(format!(
                "transcript ends at {} beyond contig {} of length {}",
                last.end, self.contig.name, self.contig.length
            )));
        }
        Ok(())
    }

    pub fn accession(&self) -> &str {
        &self.accession
    }

    pub fn contig(&self) -> &Contig {
        &self.contig
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn exons(&self) -> &[ZeroBasedInterval] {
        &self.exons
    }

    pub fn introns(&self) -> &[Intron] {
        &self.introns
    }

    pub fn exon_count(&self) -> usize {
        self.exons.len()
    }

    pub fn intron_count(&self) -> usize {
        self.introns.len()
    }

    /// Whether the transcript has any splice sites at all
    pub fn is_spliced(&self) -> bool {
        !self.introns.is_empty()
    }

    /// Transcript span from the first exon start to the last exon end
    pub fn span(&self) -> ZeroBasedInterval {
        ZeroBasedInterval::new(self.exons[0].start, self.exons[self.exons.len() - 1].end)
    }

    /// Transcript span as a stranded genomic region
    pub fn span_region(&self) -> GenomicRegion {
        self.region_for(self.span())
    }

    /// Exon `idx` as a stranded genomic region
    pub fn exon_region(&self, idx: usize) -> Option<GenomicRegion> {
        self.exons.get(idx).map(|e| self.region_for(*e))
    }

    /// Intron `idx` as a stranded genomic region
    pub fn intron_region(&self, idx: usize) -> Option<GenomicRegion> {
        self.introns.get(idx).map(|i| self.region_for(i.interval))
    }

    /// Donor boundary of exon `idx` (absent for the last exon)
    pub fn donor_boundary(&self, exon_idx: usize) -> Option<GenomicRegion> {
        if exon_idx + 1 >= self.exons.len() {
            return None;
        }
        Some(self.boundary_at(self.exons[exon_idx].end.value()))
    }

    /// Acceptor boundary of exon `idx` (absent for the first exon)
    pub fn acceptor_boundary(&self, exon_idx: usize) -> Option<GenomicRegion> {
        if exon_idx == 0 || exon_idx >= self.exons.len() {
            return None;
        }
        Some(self.boundary_at(self.exons[exon_idx].start.value()))
    }

    /// All donor boundaries in transcript order
    pub fn donor_boundaries(&self) -> Vec<GenomicRegion> {
        (0..self.intron_count())
            .filter_map(|i| self.donor_boundary(i))
            .collect()
    }

    /// All acceptor boundaries in transcript order
    pub fn acceptor_boundaries(&self) -> Vec<GenomicRegion> {
        (1..self.exon_count())
            .filter_map(|i| self.acceptor_boundary(i))
            .collect()
    }

    fn region_for(&self, interval: ZeroBasedInterval) -> GenomicRegion {
        // validated against the contig length at construction
        GenomicRegion::zero_based(
            self.contig.clone(),
            self.strand,
            interval.start.value(),
            interval.end.value(),
        )
        .unwrap_or_else(|_| unreachable!("transcript intervals are validated"))
    }

    fn boundary_at(&self, pos: u64) -> GenomicRegion {
        self.region_for(ZeroBasedInterval::from_raw(pos, pos))
    }
}

impl TryFrom<TranscriptRecord> for TranscriptModel {
    type Error = FerroError;

    fn try_from(record: TranscriptRecord) -> Result<Self, Self::Error> {
        if record.introns.is_empty() && record.exons.len() > 1 {
            let scores = vec![(f64::NAN, f64::NAN); record.exons.len() - 1];
            return TranscriptModel::from_exons(
                record.accession,
                record.contig,
                record.strand,
                record.exons,
                &scores,
            );
        }
        TranscriptModel::new(
            record.accession,
            record.contig,
            record.strand,
            record.exons,
            record.introns,
        )
    }
}

impl From<TranscriptModel> for TranscriptRecord {
    fn from(tx: TranscriptModel) -> Self {
        Self {
            accession: tx.accession,
            contig: tx.contig,
            strand: tx.strand,
            exons: tx.exons,
            introns: tx.introns,
        }
    }
}
