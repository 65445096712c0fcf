//! Reference provider trait
//!
//! Defines the interface through which the engine obtains transcripts and
//! reference sequence. All I/O happens behind this trait, before any scoring.

use crate::coords::{Contig, GenomicRegion};
use crate::error::FerroError;
use crate::reference::sequence::StrandedSequence;
use crate::reference::transcript::TranscriptModel;

/// Trait for providing transcripts and reference sequence
///
/// Implementations might include:
/// - MockProvider for testing
/// - a FASTA + annotation backed provider
/// - a provider over a relational transcript store
pub trait ReferenceProvider {
    /// Look up a contig by name, or `None` if it is unknown
    fn contig(&self, name: &str) -> Option<Contig>;

    /// Get a transcript by its accession
    fn transcript_by_accession(&self, id: &str) -> Result<TranscriptModel, FerroError>;

    /// All spliced transcripts (at least two exons) whose span overlaps
    /// `region`, in a stable order.
    fn transcripts_overlapping(&self, region: &GenomicRegion) -> Vec<TranscriptModel>;

    /// Reference sequence covering `region`, read on the region's strand
    ///
    /// # Errors
    ///
    /// Returns [`FerroError::ContigNotFound`] for unknown contigs and
    /// [`FerroError::SequenceNotAvailable`] when the region is not covered.
    fn sequence_for_region(&self, region: &GenomicRegion)
        -> Result<StrandedSequence, FerroError>;

    /// Check if a transcript exists
    fn has_transcript(&self, id: &str) -> bool {
        self.transcript_by_accession(id).is_ok()
    }
}

/// Blanket implementation for boxed trait objects
impl ReferenceProvider for Box<dyn ReferenceProvider + Send + Sync> {
    fn contig(&self, name: &str) -> Option<Contig> {
        (**self).contig(name)
    }

    fn transcript_by_accession(&self, id: &str) -> Result<TranscriptModel, FerroError> {
        (**self).transcript_by_accession(id)
    }

    fn transcripts_overlapping(&self, region: &GenomicRegion) -> Vec<TranscriptModel> {
        (**self).transcripts_overlapping(region)
    }

    fn sequence_for_region(
        &self,
        region: &GenomicRegion,
    ) -> Result<StrandedSequence, FerroError> {
        (**self).sequence_for_region(region)
    }

    fn has_transcript(&self, id: &str) -> bool {
        (**self).has_transcript(id)
    }
}

impl<P: ReferenceProvider + ?Sized> ReferenceProvider for &P {
    fn contig(&self, name: &str) -> Option<Contig> {
        (**self).contig(name)
    }

    fn transcript_by_accession(&self, id: &str) -> Result<TranscriptModel, FerroError> {
        (**self).transcript_by_accession(id)
    }

    fn transcripts_overlapping(&self, region: &GenomicRegion) -> Vec<TranscriptModel> {
        (**self).transcripts_overlapping(region)
    }

    fn sequence_for_region(
        &self,
        region: &GenomicRegion,
    ) -> Result<StrandedSequence, FerroError> {
        (**self).sequence_for_region(region)
    }
}
