//! Classifier seam: turns a feature map into a prediction
//!
//! Trained models live outside this crate. Anything implementing
//! [`Classifier`] can be plugged into an [`crate::Evaluator`], including
//! plain closures.

use serde::{Deserialize, Serialize};

use crate::features::FeatureMap;

/// Classifier output for one variant/transcript pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Probability that the variant disrupts splicing
    pub probability: f64,
    /// Decision threshold the probability is compared against
    pub threshold: f64,
}

impl Prediction {
    /// No prediction was made
    pub const EMPTY: Prediction = Prediction {
        probability: f64::NAN,
        threshold: f64::NAN,
    };

    pub fn new(probability: f64, threshold: f64) -> Self {
        Self {
            probability,
            threshold,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.probability.is_nan()
    }

    /// Whether the probability reaches the threshold. Empty predictions are
    /// never splice-altering.
    pub fn is_splice_altering(&self) -> bool {
        !self.is_empty() && self.probability >= self.threshold
    }
}

impl Default for Prediction {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Opaque `predict(features) -> Prediction`
pub trait Classifier {
    fn predict(&self, features: &FeatureMap) -> Prediction;
}

impl<F> Classifier for F
where
    F: Fn(&FeatureMap) -> Prediction,
{
    fn predict(&self, features: &FeatureMap) -> Prediction {
        self(features)
    }
}

/// Classifier that never predicts; used when only features are wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClassifier;

impl Classifier for NoClassifier {
    fn predict(&self, _features: &FeatureMap) -> Prediction {
        Prediction::EMPTY
    }
}
