//! In-memory reference provider for tests, benchmarks and small JSON fixtures

use crate::coords::{
    reverse_complement, Contig, CoordinateSystem, GenomicRegion, Strand, ZeroBasedInterval,
};
use crate::error::FerroError;
use crate::reference::provider::ReferenceProvider;
use crate::reference::sequence::StrandedSequence;
use crate::reference::transcript::TranscriptModel;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// A forward-strand contig sequence as stored in mock JSON files
#[derive(Debug, Deserialize)]
struct ContigRecord {
    name: String,
    sequence: String,
}

/// Layout of a mock provider JSON file
#[derive(Debug, Deserialize)]
struct MockData {
    #[serde(default)]
    contigs: Vec<ContigRecord>,
    #[serde(default)]
    transcripts: Vec<TranscriptModel>,
}

/// Mock reference provider holding contigs and transcripts in memory
///
/// Genomic sequences are stored on the forward strand and served on
/// whichever strand the requested region uses.
#[derive(Clone)]
pub struct MockProvider {
    transcripts: HashMap<String, TranscriptModel>,
    /// Forward-strand sequences keyed by contig name
    genomic_sequences: HashMap<String, String>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            transcripts: HashMap::new(),
            genomic_sequences: HashMap::new(),
        }
    }

    /// Load contigs and transcripts from a JSON file
    ///
    /// ```json
    /// {
    ///   "contigs": [{"name": "chr1", "sequence": "ACGT..."}],
    ///   "transcripts": [{"accession": "NM_1.1", "contig": {"name": "chr1", "length": 1000},
    ///                    "strand": "+", "exons": [{"start": 10, "end": 20}, ...]}]
    /// }
    /// ```
    pub fn from_json(path: &Path) -> Result<Self, FerroError> {
        let data: MockData = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        let mut provider = Self::new();
        for contig in data.contigs {
            if !contig.sequence.is_ascii() {
                return Err(FerroError::Json {
                    msg: format!("sequence of contig {} contains non-ASCII characters", contig.name),
                });
            }
            provider.add_genomic_sequence(contig.name, contig.sequence);
        }
        for tx in data.transcripts {
            provider.add_transcript(tx);
        }
        Ok(provider)
    }

    /// Register a transcript, replacing one with the same accession
    pub fn add_transcript(&mut self, transcript: TranscriptModel) {
        self.transcripts
            .insert(transcript.accession().to_string(), transcript);
    }

    /// Add a forward-strand genomic sequence for a contig/chromosome
    pub fn add_genomic_sequence(&mut self, contig: impl Into<String>, sequence: impl Into<String>) {
        self.genomic_sequences
            .insert(contig.into(), sequence.into());
    }

    /// Create a provider with a small synthetic genome
    ///
    /// - `chrT` (1000 bp): `NM_SPLICE.1`, plus strand, exons `[100, 200)`,
    ///   `[300, 400)`, `[500, 600)`; `NR_SINGLE.1`, single exon `[700, 800)`.
    /// - `chrR` (800 bp): `NM_MINUS.1`, minus strand, forward exons
    ///   `[100, 200)` and `[400, 500)`, i.e. `[300, 400)` and `[600, 700)` on
    ///   the minus strand.
    ///
    /// Every donor boundary is followed by `GT` and every acceptor boundary
    /// preceded by `AG`, read on the transcript's strand.
    pub fn with_test_data() -> Self {
        let mut provider = Self::new();

        let chr_t = Contig::new("chrT", 1_000);
        let mut plus = synthetic_bases(chr_t.length as usize, 17).into_bytes();
        for donor in [200, 400] {
            plus[donor..donor + 2].copy_from_slice(b"GT");
        }
        for acceptor in [300, 500] {
            plus[acceptor - 2..acceptor].copy_from_slice(b"AG");
        }
        provider.add_genomic_sequence(&chr_t.name, String::from_utf8_lossy(&plus).into_owned());

        let chr_r = Contig::new("chrR", 800);
        let mut minus = synthetic_bases(chr_r.length as usize, 91).into_bytes();
        minus[400..402].copy_from_slice(b"GT");
        minus[598..600].copy_from_slice(b"AG");
        provider.add_genomic_sequence(
            &chr_r.name,
            reverse_complement(&String::from_utf8_lossy(&minus)),
        );

        let iv = ZeroBasedInterval::from_raw;
        let spliced = [
            TranscriptModel::from_exons(
                "NM_SPLICE.1",
                chr_t.clone(),
                Strand::Plus,
                vec![iv(100, 200), iv(300, 400), iv(500, 600)],
                &[(8.6, 7.2), (9.1, 6.4)],
            ),
            TranscriptModel::from_exons(
                "NR_SINGLE.1",
                chr_t,
                Strand::Plus,
                vec![iv(700, 800)],
                &[],
            ),
            TranscriptModel::from_forward_exons(
                "NM_MINUS.1",
                chr_r,
                Strand::Minus,
                vec![iv(100, 200), iv(400, 500)],
                &[(7.7, 5.9)],
            ),
        ];
        for tx in spliced.into_iter().flatten() {
            provider.add_transcript(tx);
        }

        provider
    }

    /// Number of registered transcripts
    pub fn len(&self) -> usize {
        self.transcripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcripts.is_empty()
    }

    /// Registered accessions, sorted
    pub fn transcript_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.transcripts.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceProvider for MockProvider {
    fn contig(&self, name: &str) -> Option<Contig> {
        self.genomic_sequences
            .get(name)
            .map(|seq| Contig::new(name, seq.len() as u64))
    }

    fn transcript_by_accession(&self, id: &str) -> Result<TranscriptModel, FerroError> {
        if let Some(tx) = self.transcripts.get(id) {
            return Ok(tx.clone());
        }

        // unversioned: highest version wins
        let base_id = id.split('.').next().unwrap_or(id);
        let mut candidates: Vec<&TranscriptModel> = self
            .transcripts
            .values()
            .filter(|tx| tx.accession().split('.').next() == Some(base_id))
            .collect();
        candidates.sort_by(|a, b| b.accession().cmp(a.accession()));
        candidates
            .first()
            .map(|tx| (*tx).clone())
            .ok_or_else(|| FerroError::ReferenceNotFound { id: id.to_string() })
    }

    fn transcripts_overlapping(&self, region: &GenomicRegion) -> Vec<TranscriptModel> {
        let mut hits: Vec<TranscriptModel> = self
            .transcripts
            .values()
            .filter(|tx| tx.exon_count() >= 2)
            .filter(|tx| tx.contig().name == region.contig_name())
            .filter(|tx| tx.span_region().overlaps(region))
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.accession().cmp(b.accession()));
        hits
    }

    fn sequence_for_region(
        &self,
        region: &GenomicRegion,
    ) -> Result<StrandedSequence, FerroError> {
        let genomic_seq = self.genomic_sequences.get(region.contig_name()).ok_or_else(|| {
            FerroError::ContigNotFound {
                name: region.contig_name().to_string(),
            }
        })?;

        let forward = region
            .with_strand(Strand::Plus)
            .with_coordinate_system(CoordinateSystem::ZeroBased);
        let (start, end) = (forward.start(), forward.end());
        let slice = genomic_seq
            .get(start as usize..end as usize)
            .filter(|s| s.is_ascii() && region.contig().length == genomic_seq.len() as u64)
            .ok_or_else(|| FerroError::SequenceNotAvailable {
                contig: region.contig_name().to_string(),
                start,
                end,
            })?;
        match region.strand() {
            Strand::Plus => StrandedSequence::new(region.clone(), slice),
            Strand::Minus => StrandedSequence::new(region.clone(), reverse_complement(slice)),
        }
    }
}

/// Deterministic pseudo-random nucleotides (linear congruential generator)
fn synthetic_bases(len: usize, seed: u64) -> String {
    const BASES: [char; 4] = ['A', 'C', 'G', 'T'];
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            BASES[(state >> 62) as usize]
        })
        .collect()
}
