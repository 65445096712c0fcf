//! Drives location, rendering, scoring and classification over every
//! transcript a variant touches

use log::{debug, warn};
use serde::Serialize;

use crate::classifier::{Classifier, Prediction};
use crate::coords::{GenomicRegion, GenomicVariant};
use crate::features::{FeatureMap, SplicingAnnotator};
use crate::reference::{ReferenceProvider, StrandedSequence, TranscriptModel};
use crate::splicing::SplicingLocationData;

/// Longest allele evaluated by default
pub const DEFAULT_MAX_VARIANT_LENGTH: usize = 50;

/// Features and prediction for one transcript
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptEvaluation {
    pub accession: String,
    pub location: SplicingLocationData,
    pub features: FeatureMap,
    pub prediction: Prediction,
}

/// All transcript evaluations for one variant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantEvaluation {
    pub variant: GenomicVariant,
    pub transcripts: Vec<TranscriptEvaluation>,
}

impl VariantEvaluation {
    fn empty(variant: &GenomicVariant) -> Self {
        Self {
            variant: variant.clone(),
            transcripts: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transcripts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transcripts.len()
    }

    pub fn get(&self, accession: &str) -> Option<&TranscriptEvaluation> {
        self.transcripts.iter().find(|t| t.accession == accession)
    }
}

/// Evaluates variants against the transcripts known to a provider.
///
/// # Example
///
/// ```
/// use ferro_splice::classifier::NoClassifier;
/// use ferro_splice::coords::GenomicVariant;
/// use ferro_splice::features::SplicingAnnotator;
/// use ferro_splice::reference::{MockProvider, ReferenceProvider};
/// use ferro_splice::scoring::PositionalWeightMatrix;
/// use ferro_splice::splicing::SplicingParameters;
/// use ferro_splice::Evaluator;
///
/// let params = SplicingParameters::default();
/// let annotator = SplicingAnnotator::new(
///     params,
///     PositionalWeightMatrix::new(vec![[0.25; 4]; params.donor_len()]).unwrap(),
///     PositionalWeightMatrix::new(vec![[0.25; 4]; params.acceptor_len()]).unwrap(),
/// )
/// .unwrap();
///
/// let provider = MockProvider::with_test_data();
/// let chr = provider.contig("chrT").unwrap();
/// let evaluator = Evaluator::new(provider, annotator, NoClassifier);
///
/// let variant = GenomicVariant::from_vcf(chr, 201, "G", "A").unwrap();
/// let result = evaluator.evaluate_variant(&variant);
/// assert_eq!(result.len(), 1);
/// assert!(result.get("NM_SPLICE.1").unwrap().features.contains("canonical_donor"));
/// ```
pub struct Evaluator<P, C> {
    provider: P,
    annotator: SplicingAnnotator,
    classifier: C,
    max_variant_length: usize,
}

impl<P: ReferenceProvider, C: Classifier> Evaluator<P, C> {
    pub fn new(provider: P, annotator: SplicingAnnotator, classifier: C) -> Self {
        Self {
            provider,
            annotator,
            classifier,
            max_variant_length: DEFAULT_MAX_VARIANT_LENGTH,
        }
    }

    /// Skip variants whose longer allele exceeds `length`
    pub fn with_max_variant_length(mut self, length: usize) -> Self {
        self.max_variant_length = length;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn annotator(&self) -> &SplicingAnnotator {
        &self.annotator
    }

    pub fn max_variant_length(&self) -> usize {
        self.max_variant_length
    }

    /// Features of one variant/transcript pair. Empty when the variant is
    /// outside the transcript or no reference sequence is available.
    pub fn evaluate(&self, variant: &GenomicVariant, transcript: &TranscriptModel) -> FeatureMap {
        let location = self.annotator.locate(variant, transcript);
        self.evaluate_located(variant, transcript, &location)
    }

    /// Evaluate `variant` against every spliced transcript it overlaps.
    ///
    /// Unknown contigs, a contig length that disagrees with the provider and
    /// oversized alleles give an empty result without consulting any
    /// transcript. Transcripts yielding no features are left out.
    pub fn evaluate_variant(&self, variant: &GenomicVariant) -> VariantEvaluation {
        let Some(contig) = self.provider.contig(variant.contig_name()) else {
            debug!("unknown contig {}, skipping {}", variant.contig_name(), variant);
            return VariantEvaluation::empty(variant);
        };
        if contig.length != variant.region().contig().length {
            warn!(
                "{} gives contig {} a length of {}, the reference has {}",
                variant,
                contig.name,
                variant.region().contig().length,
                contig.length
            );
            return VariantEvaluation::empty(variant);
        }
        if variant.max_allele_len() > self.max_variant_length {
            warn!(
                "{} has an allele of {} bases, longer than the maximum of {}",
                variant,
                variant.max_allele_len(),
                self.max_variant_length
            );
            return VariantEvaluation::empty(variant);
        }

        let transcripts = self
            .provider
            .transcripts_overlapping(variant.region())
            .into_iter()
            .filter_map(|tx| {
                let location = self.annotator.locate(variant, &tx);
                let features = self.evaluate_located(variant, &tx, &location);
                if features.is_empty() {
                    return None;
                }
                let prediction = self.classifier.predict(&features);
                Some(TranscriptEvaluation {
                    accession: tx.accession().to_string(),
                    location,
                    features,
                    prediction,
                })
            })
            .collect();

        VariantEvaluation {
            variant: variant.clone(),
            transcripts,
        }
    }

    fn evaluate_located(
        &self,
        variant: &GenomicVariant,
        transcript: &TranscriptModel,
        location: &SplicingLocationData,
    ) -> FeatureMap {
        if location.is_outside() {
            return FeatureMap::default();
        }
        match self.sequence_for(transcript) {
            Some(sequence) => self
                .annotator
                .annotate_at(variant, transcript, location, &sequence),
            None => FeatureMap::default(),
        }
    }

    /// Reference sequence over the transcript span padded by the widest
    /// window plus the longest admissible allele, clipped to the contig.
    fn sequence_for(&self, transcript: &TranscriptModel) -> Option<StrandedSequence> {
        let pad = (self.annotator.params().max_window_len() + self.max_variant_length) as u64;
        let span = transcript.span();
        let start = span.start.value().saturating_sub(pad);
        let end = (span.end.value() + pad).min(transcript.contig().length);
        let region: GenomicRegion = transcript.span_region().sibling(start, end)?;
        match self.provider.sequence_for_region(&region) {
            Ok(sequence) => Some(sequence),
            Err(e) => {
                warn!(
                    "no reference sequence for {} ({}): {}",
                    transcript.accession(),
                    region,
                    e
                );
                None
            }
        }
    }
}
