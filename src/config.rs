//! Engine configuration files for ferro-splice.
//!
//! A JSON document describes the splice-site geometry, the scoring
//! resources and the features to compute. Everything is checked once when
//! the file is loaded, so that evaluation itself never fails on
//! configuration.
//!
//! # Example Configuration
//!
//! ```json
//! {
//!   "splicing": { "donor_exonic": 3, "donor_intronic": 6,
//!                 "acceptor_exonic": 2, "acceptor_intronic": 25 },
//!   "donor_matrix": [[0.3, 0.4, 0.2, 0.1], ...],
//!   "acceptor_matrix": [[0.1, 0.3, 0.1, 0.5], ...],
//!   "hexamer": "hexamer_scores.tsv",
//!   "septamer": { "AAAAAAA": 0.12, ... },
//!   "agez": { "begin": -51, "end": -3 },
//!   "max_variant_length": 50,
//!   "features": ["canonical_donor", "cryptic_donor", "hexamer"]
//! }
//! ```
//!
//! K-mer tables are given inline or as a path to a two-column TSV file;
//! relative paths are resolved against the directory holding the
//! configuration file.

use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::classifier::Classifier;
use crate::error::FerroError;
use crate::evaluate::{Evaluator, DEFAULT_MAX_VARIANT_LENGTH};
use crate::features::{AgezRegion, Feature, SplicingAnnotator};
use crate::reference::ReferenceProvider;
use crate::scoring::{KmerScores, PositionalWeightMatrix};
use crate::splicing::SplicingParameters;

/// Where a k-mer score table comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KmerSource {
    /// Path to a `kmer<TAB>score` file
    File(PathBuf),
    /// Scores listed in the configuration itself
    Inline(BTreeMap<String, f64>),
}

impl KmerSource {
    fn load(&self, k: usize, base_dir: Option<&Path>) -> Result<KmerScores, FerroError> {
        match self {
            KmerSource::Inline(scores) => {
                KmerScores::new(k, scores.iter().map(|(kmer, score)| (kmer, *score)))
            }
            KmerSource::File(path) => {
                let path = match base_dir {
                    Some(dir) if path.is_relative() => dir.join(path),
                    _ => path.clone(),
                };
                KmerScores::from_tsv(k, &path)
            }
        }
    }
}

fn default_max_variant_length() -> usize {
    DEFAULT_MAX_VARIANT_LENGTH
}

/// Parsed engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Window flanks around donor and acceptor boundaries
    #[serde(default)]
    pub splicing: SplicingParameters,
    pub donor_matrix: PositionalWeightMatrix,
    pub acceptor_matrix: PositionalWeightMatrix,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hexamer: Option<KmerSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub septamer: Option<KmerSource>,
    #[serde(default)]
    pub agez: AgezRegion,
    /// Variants with a longer allele are skipped
    #[serde(default = "default_max_variant_length")]
    pub max_variant_length: usize,
    /// Feature names to compute. When absent, every feature whose
    /// resources are configured is computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    /// Directory relative k-mer paths are resolved against
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl EngineConfig {
    /// Minimal configuration from two matrices, with default geometry.
    pub fn new(donor_matrix: PositionalWeightMatrix, acceptor_matrix: PositionalWeightMatrix) -> Self {
        Self {
            splicing: SplicingParameters::default(),
            donor_matrix,
            acceptor_matrix,
            hexamer: None,
            septamer: None,
            agez: AgezRegion::default(),
            max_variant_length: DEFAULT_MAX_VARIANT_LENGTH,
            features: None,
            base_dir: None,
        }
    }

    /// Load and validate a configuration file.
    pub fn load_from_path(path: &Path) -> Result<Self, FerroError> {
        let content = fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        info!(
            "loaded engine configuration from {} ({} features)",
            path.display(),
            config.feature_list()?.len()
        );
        Ok(config)
    }

    /// Parse and validate configuration from JSON content.
    pub fn parse(content: &str) -> Result<Self, FerroError> {
        let config: EngineConfig = serde_json::from_str(content)
            .map_err(|e| FerroError::config(format!("cannot parse engine configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every setting that can be checked without touching the
    /// filesystem.
    pub fn validate(&self) -> Result<(), FerroError> {
        self.splicing.validate()?;
        check_matrix("donor", &self.donor_matrix, self.splicing.donor_len())?;
        check_matrix("acceptor", &self.acceptor_matrix, self.splicing.acceptor_len())?;
        self.agez.validate()?;
        if self.max_variant_length == 0 {
            return Err(FerroError::config("max_variant_length must be positive"));
        }
        self.feature_list()?;
        Ok(())
    }

    /// The features this configuration computes.
    pub fn feature_list(&self) -> Result<Vec<Feature>, FerroError> {
        let Some(names) = &self.features else {
            return Ok(Feature::ALL
                .iter()
                .copied()
                .filter(|f| match f {
                    Feature::Hexamer => self.hexamer.is_some(),
                    Feature::Septamer => self.septamer.is_some(),
                    _ => true,
                })
                .collect());
        };

        let mut features = Vec::with_capacity(names.len());
        for name in names {
            let feature: Feature = name.parse()?;
            let source = match feature {
                Feature::Hexamer => Some(&self.hexamer),
                Feature::Septamer => Some(&self.septamer),
                _ => None,
            };
            if let Some(None) = source {
                return Err(FerroError::config(format!(
                    "feature {} requires a {} table",
                    feature, feature
                )));
            }
            if !features.contains(&feature) {
                features.push(feature);
            }
        }
        Ok(features)
    }

    /// Load the k-mer tables and assemble the annotator.
    pub fn build_annotator(&self) -> Result<SplicingAnnotator, FerroError> {
        self.validate()?;
        let base_dir = self.base_dir.as_deref();
        let mut annotator = SplicingAnnotator::new(
            self.splicing,
            self.donor_matrix.clone(),
            self.acceptor_matrix.clone(),
        )?
        .with_agez(self.agez)?;
        if let Some(source) = &self.hexamer {
            annotator = annotator.with_hexamer(source.load(6, base_dir)?)?;
        }
        if let Some(source) = &self.septamer {
            annotator = annotator.with_septamer(source.load(7, base_dir)?)?;
        }
        annotator.with_features(self.feature_list()?)
    }

    /// Assemble an evaluator over `provider` with this configuration.
    pub fn build_evaluator<P, C>(&self, provider: P, classifier: C) -> Result<Evaluator<P, C>, FerroError>
    where
        P: ReferenceProvider,
        C: Classifier,
    {
        Ok(Evaluator::new(provider, self.build_annotator()?, classifier)
            .with_max_variant_length(self.max_variant_length))
    }
}

fn check_matrix(
    kind: &str,
    matrix: &PositionalWeightMatrix,
    expected: usize,
) -> Result<(), FerroError> {
    if matrix.len() != expected {
        return Err(FerroError::config(format!(
            "{} matrix has {} positions but the {} window spans {}",
            kind,
            matrix.len(),
            kind,
            expected
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn uniform_rows(n: usize) -> String {
        let rows: Vec<&str> = (0..n).map(|_| "[0.25, 0.25, 0.25, 0.25]").collect();
        format!("[{}]", rows.join(", "))
    }

    fn minimal_json() -> String {
        format!(
            r#"{{"donor_matrix": {}, "acceptor_matrix": {}}}"#,
            uniform_rows(9),
            uniform_rows(27)
        )
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = EngineConfig::parse(&minimal_json()).unwrap();
        assert_eq!(config.splicing, SplicingParameters::default());
        assert_eq!(config.agez, AgezRegion::default());
        assert_eq!(config.max_variant_length, 50);
        assert!(config.hexamer.is_none());

        let features = config.feature_list().unwrap();
        assert_eq!(features, Feature::MATRIX_ONLY.to_vec());
        assert!(config.build_annotator().is_ok());
    }

    #[test]
    fn test_matrix_length_mismatch() {
        let json = format!(
            r#"{{"donor_matrix": {}, "acceptor_matrix": {}}}"#,
            uniform_rows(8),
            uniform_rows(27)
        );
        let err = EngineConfig::parse(&json).unwrap_err();
        assert!(matches!(err, FerroError::InvalidConfig { .. }));
        assert!(err.to_string().contains("donor matrix"));
    }

    #[test]
    fn test_custom_geometry() {
        let json = format!(
            r#"{{"splicing": {{"donor_exonic": 2, "donor_intronic": 4,
                              "acceptor_exonic": 1, "acceptor_intronic": 10}},
                "donor_matrix": {}, "acceptor_matrix": {}}}"#,
            uniform_rows(6),
            uniform_rows(11)
        );
        let config = EngineConfig::parse(&json).unwrap();
        assert_eq!(config.splicing.donor_len(), 6);
        assert_eq!(config.build_annotator().unwrap().params().acceptor_len(), 11);
    }

    #[test]
    fn test_invalid_settings() {
        let base = minimal_json();
        let with = |extra: &str| format!("{}, {}}}", &base[..base.len() - 1], extra);

        assert!(EngineConfig::parse(&with(r#""max_variant_length": 0"#)).is_err());
        assert!(EngineConfig::parse(&with(r#""agez": {"begin": -3, "end": -51}"#)).is_err());
        assert!(EngineConfig::parse(&with(r#""features": ["no_such_feature"]"#)).is_err());
        // hexamer requested without a table
        assert!(EngineConfig::parse(&with(r#""features": ["hexamer"]"#)).is_err());
        assert!(EngineConfig::parse(&with(r#""unknown_key": 1"#)).is_err());
        assert!(EngineConfig::parse("not json").is_err());
    }

    #[test]
    fn test_explicit_features_deduplicated() {
        let base = minimal_json();
        let json = format!(
            "{}, {}}}",
            &base[..base.len() - 1],
            r#""features": ["canonical_donor", "closest_acceptor", "canonical_donor"]"#
        );
        let config = EngineConfig::parse(&json).unwrap();
        assert_eq!(
            config.feature_list().unwrap(),
            vec![Feature::CanonicalDonor, Feature::ClosestAcceptor]
        );
    }

    #[test]
    fn test_inline_septamer_enables_feature() {
        let base = minimal_json();
        let json = format!(
            "{}, {}}}",
            &base[..base.len() - 1],
            r#""septamer": {"AAAAAAA": 0.5, "CCCCCCC": -0.5}"#
        );
        let config = EngineConfig::parse(&json).unwrap();
        assert!(matches!(config.septamer, Some(KmerSource::Inline(_))));
        let features = config.feature_list().unwrap();
        assert!(features.contains(&Feature::Septamer));
        assert!(!features.contains(&Feature::Hexamer));

        let annotator = config.build_annotator().unwrap();
        assert_eq!(annotator.septamer().unwrap().len(), 2);
    }

    #[test]
    fn test_load_from_path_resolves_kmer_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut tsv = fs::File::create(dir.path().join("hexamers.tsv")).unwrap();
        writeln!(tsv, "# kmer\tscore").unwrap();
        writeln!(tsv, "AAAAAA\t0.25").unwrap();
        writeln!(tsv, "ACGTAC\t-1.5").unwrap();

        let base = minimal_json();
        let json = format!(
            "{}, {}}}",
            &base[..base.len() - 1],
            r#""hexamer": "hexamers.tsv""#
        );
        let path = dir.path().join("engine.json");
        fs::write(&path, json).unwrap();

        let config = EngineConfig::load_from_path(&path).unwrap();
        assert_eq!(config.base_dir.as_deref(), Some(dir.path()));
        assert!(matches!(config.hexamer, Some(KmerSource::File(_))));

        let annotator = config.build_annotator().unwrap();
        assert_eq!(annotator.hexamer().unwrap().get("acgtac"), Some(-1.5));
        assert!(annotator.features().contains(&Feature::Hexamer));
    }

    #[test]
    fn test_missing_kmer_file_fails_at_build() {
        let dir = tempfile::tempdir().unwrap();
        let base = minimal_json();
        let json = format!(
            "{}, {}}}",
            &base[..base.len() - 1],
            r#""hexamer": "missing.tsv""#
        );
        let path = dir.path().join("engine.json");
        fs::write(&path, json).unwrap();

        let config = EngineConfig::load_from_path(&path).unwrap();
        let err = config.build_annotator().unwrap_err();
        assert!(matches!(err, FerroError::Io { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = EngineConfig::load_from_path(Path::new("/nonexistent/engine.json")).unwrap_err();
        assert!(matches!(err, FerroError::Io { .. }));
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = EngineConfig::new(
            PositionalWeightMatrix::new(vec![[0.25; 4]; 9]).unwrap(),
            PositionalWeightMatrix::new(vec![[0.25; 4]; 27]).unwrap(),
        );
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(EngineConfig::parse(&json).unwrap(), config);
    }
}
