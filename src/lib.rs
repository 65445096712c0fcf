// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-splice: splice-site location, allele rendering and feature scoring
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! For a small variant and a multi-exon transcript, ferro-splice decides where
//! the variant sits relative to the splice sites, renders the reference and
//! alternate sequence of each affected site window, scores them with
//! positional weight matrices and k-mer tables, and hands the resulting
//! feature map to a pluggable classifier.
//!
//! # Example
//!
//! ```
//! use ferro_splice::classifier::NoClassifier;
//! use ferro_splice::splicing::SplicingPositionType;
//! use ferro_splice::{
//!     EngineConfig, Evaluator, GenomicVariant, MockProvider, PositionalWeightMatrix,
//!     ReferenceProvider,
//! };
//!
//! let config = EngineConfig::new(
//!     PositionalWeightMatrix::new(vec![[0.25; 4]; 9]).unwrap(),
//!     PositionalWeightMatrix::new(vec![[0.25; 4]; 27]).unwrap(),
//! );
//!
//! // Evaluate a variant against test data
//! let provider = MockProvider::with_test_data();
//! let chr = provider.contig("chrT").unwrap();
//! let evaluator = Evaluator::new(provider, config.build_annotator().unwrap(), NoClassifier);
//!
//! // Second base of the first intron of NM_SPLICE.1
//! let variant = GenomicVariant::from_vcf(chr, 202, "T", "C").unwrap();
//! let result = evaluator.evaluate_variant(&variant);
//! let tx = result.get("NM_SPLICE.1").unwrap();
//! assert_eq!(tx.location.position_type(), SplicingPositionType::Donor);
//! println!("features: {:?}", tx.features);
//! ```

pub mod classifier;
pub mod config;
pub mod coords;
pub mod error;
pub mod evaluate;
pub mod features;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod reference;
pub mod scoring;
pub mod splicing;

// Re-export commonly used types
pub use classifier::{Classifier, Prediction};
pub use config::EngineConfig;
pub use error::FerroError;
pub use evaluate::{Evaluator, TranscriptEvaluation, VariantEvaluation};
pub use features::{Feature, FeatureMap, SplicingAnnotator};
pub use reference::{MockProvider, ReferenceProvider, StrandedSequence, TranscriptModel};
pub use scoring::{KmerScores, PositionalWeightMatrix};
pub use splicing::{SplicingLocationData, SplicingLocator, SplicingParameters};

// Re-export coordinate types for type-safe position handling
pub use coords::{
    Contig, CoordinateSystem, GenomicRegion, GenomicVariant, OneBasedInterval, OneBasedPos,
    Strand, ZeroBasedInterval, ZeroBasedPos,
};

/// Result type alias for ferro-splice operations
pub type Result<T> = std::result::Result<T, FerroError>;
