//! Runs the feature catalogue for one variant/transcript pair

use log::debug;

use super::motif::AgezRegion;
use super::{Feature, FeatureContext, FeatureMap};
use crate::coords::{CoordinateSystem, GenomicVariant};
use crate::error::FerroError;
use crate::reference::{StrandedSequence, TranscriptModel};
use crate::scoring::{KmerScores, PositionalWeightMatrix};
use crate::splicing::{
    AlleleGenerator, SpliceSiteKind, SplicingLocationData, SplicingLocator, SplicingParameters,
};

/// Holds the immutable scoring resources and the requested features.
///
/// Built once at startup and shared read-only by every evaluation.
///
/// # Example
///
/// ```
/// use ferro_splice::features::{Feature, SplicingAnnotator};
/// use ferro_splice::scoring::PositionalWeightMatrix;
/// use ferro_splice::splicing::SplicingParameters;
///
/// let params = SplicingParameters::new(3, 6, 2, 25).unwrap();
/// let donor = PositionalWeightMatrix::new(vec![[0.25; 4]; 9]).unwrap();
/// let acceptor = PositionalWeightMatrix::new(vec![[0.25; 4]; 27]).unwrap();
///
/// let annotator = SplicingAnnotator::new(params, donor, acceptor)
///     .unwrap()
///     .with_features(vec![Feature::CanonicalDonor, Feature::ClosestDonor])
///     .unwrap();
/// assert_eq!(annotator.features().len(), 2);
///
/// // hexamer scores need a hexamer table
/// assert!(annotator.clone().with_features(vec![Feature::Hexamer]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct SplicingAnnotator {
    params: SplicingParameters,
    locator: SplicingLocator,
    renderer: AlleleGenerator,
    donor_pwm: PositionalWeightMatrix,
    acceptor_pwm: PositionalWeightMatrix,
    hexamer: Option<KmerScores>,
    septamer: Option<KmerScores>,
    agez: AgezRegion,
    features: Vec<Feature>,
}

impl SplicingAnnotator {
    /// Create an annotator computing every feature that needs only the two
    /// matrices.
    ///
    /// # Errors
    ///
    /// [`FerroError::InvalidConfig`] when a parameter is zero or a matrix
    /// length differs from its window length.
    pub fn new(
        params: SplicingParameters,
        donor_pwm: PositionalWeightMatrix,
        acceptor_pwm: PositionalWeightMatrix,
    ) -> Result<Self, FerroError> {
        params.validate()?;
        if donor_pwm.len() != params.donor_len() {
            return Err(FerroError::config(format!(
                "donor matrix has {} positions but the donor window spans {}",
                donor_pwm.len(),
                params.donor_len()
            )));
        }
        if acceptor_pwm.len() != params.acceptor_len() {
            return Err(FerroError::config(format!(
                "acceptor matrix has {} positions but the acceptor window spans {}",
                acceptor_pwm.len(),
                params.acceptor_len()
            )));
        }
        Ok(Self {
            params,
            locator: SplicingLocator::new(params),
            renderer: AlleleGenerator::new(params),
            donor_pwm,
            acceptor_pwm,
            hexamer: None,
            septamer: None,
            agez: AgezRegion::default(),
            features: Feature::MATRIX_ONLY.to_vec(),
        })
    }

    /// Attach a hexamer table (k must be 6)
    pub fn with_hexamer(mut self, table: KmerScores) -> Result<Self, FerroError> {
        if table.k() != 6 {
            return Err(FerroError::config(format!(
                "hexamer table holds {}-mers",
                table.k()
            )));
        }
        self.hexamer = Some(table);
        Ok(self)
    }

    /// Attach a septamer table (k must be 7)
    pub fn with_septamer(mut self, table: KmerScores) -> Result<Self, FerroError> {
        if table.k() != 7 {
            return Err(FerroError::config(format!(
                "septamer table holds {}-mers",
                table.k()
            )));
        }
        self.septamer = Some(table);
        Ok(self)
    }

    pub fn with_agez(mut self, agez: AgezRegion) -> Result<Self, FerroError> {
        agez.validate()?;
        self.agez = agez;
        Ok(self)
    }

    /// Restrict the computed features. Tables must be attached first.
    pub fn with_features(mut self, features: Vec<Feature>) -> Result<Self, FerroError> {
        for feature in &features {
            let missing = match feature {
                Feature::Hexamer => self.hexamer.is_none(),
                Feature::Septamer => self.septamer.is_none(),
                _ => false,
            };
            if missing {
                return Err(FerroError::config(format!(
                    "feature {} requested without its k-mer table",
                    feature
                )));
            }
        }
        self.features = features;
        Ok(self)
    }

    pub fn params(&self) -> &SplicingParameters {
        &self.params
    }

    pub fn locator(&self) -> &SplicingLocator {
        &self.locator
    }

    pub fn renderer(&self) -> &AlleleGenerator {
        &self.renderer
    }

    pub fn matrix(&self, kind: SpliceSiteKind) -> &PositionalWeightMatrix {
        match kind {
            SpliceSiteKind::Donor => &self.donor_pwm,
            SpliceSiteKind::Acceptor => &self.acceptor_pwm,
        }
    }

    pub fn hexamer(&self) -> Option<&KmerScores> {
        self.hexamer.as_ref()
    }

    pub fn septamer(&self) -> Option<&KmerScores> {
        self.septamer.as_ref()
    }

    pub fn agez(&self) -> &AgezRegion {
        &self.agez
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Locate `variant` on `transcript`
    pub fn locate(&self, variant: &GenomicVariant, transcript: &TranscriptModel) -> SplicingLocationData {
        self.locator.locate(variant, transcript)
    }

    /// Compute every requested feature. A variant outside the transcript
    /// yields an empty map.
    pub fn annotate(
        &self,
        variant: &GenomicVariant,
        transcript: &TranscriptModel,
        sequence: &StrandedSequence,
    ) -> FeatureMap {
        let location = self.locator.locate(variant, transcript);
        if location.is_outside() {
            debug!("{} is outside {}", variant, transcript.accession());
            return FeatureMap::default();
        }
        self.annotate_at(variant, transcript, &location, sequence)
    }

    /// Compute every requested feature for an already located variant
    pub fn annotate_at(
        &self,
        variant: &GenomicVariant,
        transcript: &TranscriptModel,
        location: &SplicingLocationData,
        sequence: &StrandedSequence,
    ) -> FeatureMap {
        if location.is_outside() {
            return FeatureMap::default();
        }
        let variant = variant
            .with_strand(transcript.strand())
            .with_coordinate_system(CoordinateSystem::ZeroBased);
        let ctx = FeatureContext {
            variant: &variant,
            transcript,
            location,
            sequence,
            annotator: self,
        };
        self.features
            .iter()
            .map(|f| (f.name().to_string(), f.calculate(&ctx)))
            .collect()
    }
}
