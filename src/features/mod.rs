//! Named scalar features describing a variant's effect on splicing
//!
//! Every calculator is a pure function of a [`FeatureContext`] returning an
//! `f64`. Calculators never fail: `NaN` means "not computable for this
//! variant/transcript pair" and is kept in the [`FeatureMap`] as is.
//!
//! | Feature | Meaning |
//! |---------|---------|
//! | `canonical_donor` / `canonical_acceptor` | `Ri(ref) - Ri(alt)` of the governing site window, 0 when it is untouched |
//! | `cryptic_donor` / `cryptic_acceptor` | best alt neighbourhood window minus the governing site |
//! | `closest_donor` / `closest_acceptor` | signed distance to the nearest boundary |
//! | `hexamer` / `septamer` | k-mer table sum of ref minus alt |
//! | `creates_ag_in_agez` / `creates_yag_in_agez` | new `AG` / `YAG` in the AG exclusion zone of any acceptor |
//! | `exon_length` / `intron_length` | length of the containing exon/intron, `-1` if none |
//! | `s_strength_diff_donor` / `s_strength_diff_acceptor` | alt site minus next exon's alt site |
//! | `wt_ri_donor` / `wt_ri_acceptor` | precomputed reference site score |
//! | `alt_ri_best_window_donor` / `alt_ri_best_window_acceptor` | best alt neighbourhood window |
//! | `yag_at_acceptor_minus_three` | `YAG` created right before the canonical `AG` |

mod annotator;
mod distance;
mod motif;
mod site;
mod structure;

pub use annotator::SplicingAnnotator;
pub use distance::signed_distance;
pub use motif::AgezRegion;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::coords::GenomicVariant;
use crate::error::FerroError;
use crate::reference::{StrandedSequence, TranscriptModel};
use crate::splicing::{SpliceSiteKind, SplicingLocationData};

/// The feature catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    CanonicalDonor,
    CanonicalAcceptor,
    CrypticDonor,
    CrypticAcceptor,
    ClosestDonor,
    ClosestAcceptor,
    Hexamer,
    Septamer,
    CreatesAgInAgez,
    ExonLength,
    IntronLength,
    SStrengthDiffDonor,
    SStrengthDiffAcceptor,
    WtRiDonor,
    WtRiAcceptor,
    AltRiBestWindowDonor,
    AltRiBestWindowAcceptor,
    CreatesYagInAgez,
    YagAtAcceptorMinusThree,
}

impl Feature {
    /// Every feature, in catalogue order
    pub const ALL: [Feature; 19] = [
        Feature::CanonicalDonor,
        Feature::CanonicalAcceptor,
        Feature::CrypticDonor,
        Feature::CrypticAcceptor,
        Feature::ClosestDonor,
        Feature::ClosestAcceptor,
        Feature::Hexamer,
        Feature::Septamer,
        Feature::CreatesAgInAgez,
        Feature::ExonLength,
        Feature::IntronLength,
        Feature::SStrengthDiffDonor,
        Feature::SStrengthDiffAcceptor,
        Feature::WtRiDonor,
        Feature::WtRiAcceptor,
        Feature::AltRiBestWindowDonor,
        Feature::AltRiBestWindowAcceptor,
        Feature::CreatesYagInAgez,
        Feature::YagAtAcceptorMinusThree,
    ];

    /// Features that need nothing beyond the two weight matrices
    pub const MATRIX_ONLY: [Feature; 17] = [
        Feature::CanonicalDonor,
        Feature::CanonicalAcceptor,
        Feature::CrypticDonor,
        Feature::CrypticAcceptor,
        Feature::ClosestDonor,
        Feature::ClosestAcceptor,
        Feature::CreatesAgInAgez,
        Feature::ExonLength,
        Feature::IntronLength,
        Feature::SStrengthDiffDonor,
        Feature::SStrengthDiffAcceptor,
        Feature::WtRiDonor,
        Feature::WtRiAcceptor,
        Feature::AltRiBestWindowDonor,
        Feature::AltRiBestWindowAcceptor,
        Feature::CreatesYagInAgez,
        Feature::YagAtAcceptorMinusThree,
    ];

    /// Name used as the [`FeatureMap`] key
    pub fn name(&self) -> &'static str {
        match self {
            Feature::CanonicalDonor => "canonical_donor",
            Feature::CanonicalAcceptor => "canonical_acceptor",
            Feature::CrypticDonor => "cryptic_donor",
            Feature::CrypticAcceptor => "cryptic_acceptor",
            Feature::ClosestDonor => "closest_donor",
            Feature::ClosestAcceptor => "closest_acceptor",
            Feature::Hexamer => "hexamer",
            Feature::Septamer => "septamer",
            Feature::CreatesAgInAgez => "creates_ag_in_agez",
            Feature::ExonLength => "exon_length",
            Feature::IntronLength => "intron_length",
            Feature::SStrengthDiffDonor => "s_strength_diff_donor",
            Feature::SStrengthDiffAcceptor => "s_strength_diff_acceptor",
            Feature::WtRiDonor => "wt_ri_donor",
            Feature::WtRiAcceptor => "wt_ri_acceptor",
            Feature::AltRiBestWindowDonor => "alt_ri_best_window_donor",
            Feature::AltRiBestWindowAcceptor => "alt_ri_best_window_acceptor",
            Feature::CreatesYagInAgez => "creates_yag_in_agez",
            Feature::YagAtAcceptorMinusThree => "yag_at_acceptor_minus_three",
        }
    }

    /// Compute this feature.
    pub fn calculate(&self, ctx: &FeatureContext<'_>) -> f64 {
        use SpliceSiteKind::{Acceptor, Donor};
        match self {
            Feature::CanonicalDonor => site::canonical(ctx, Donor),
            Feature::CanonicalAcceptor => site::canonical(ctx, Acceptor),
            Feature::CrypticDonor => site::cryptic(ctx, Donor),
            Feature::CrypticAcceptor => site::cryptic(ctx, Acceptor),
            Feature::ClosestDonor => distance::closest(ctx, Donor),
            Feature::ClosestAcceptor => distance::closest(ctx, Acceptor),
            Feature::Hexamer => motif::kmer_difference(ctx, ctx.annotator.hexamer()),
            Feature::Septamer => motif::kmer_difference(ctx, ctx.annotator.septamer()),
            Feature::CreatesAgInAgez => motif::creates_ag_in_agez(ctx),
            Feature::ExonLength => structure::exon_length(ctx),
            Feature::IntronLength => structure::intron_length(ctx),
            Feature::SStrengthDiffDonor => site::strength_difference(ctx, Donor),
            Feature::SStrengthDiffAcceptor => site::strength_difference(ctx, Acceptor),
            Feature::WtRiDonor => site::wild_type_score(ctx, Donor),
            Feature::WtRiAcceptor => site::wild_type_score(ctx, Acceptor),
            Feature::AltRiBestWindowDonor => site::best_alt_window(ctx, Donor),
            Feature::AltRiBestWindowAcceptor => site::best_alt_window(ctx, Acceptor),
            Feature::CreatesYagInAgez => motif::creates_yag_in_agez(ctx),
            Feature::YagAtAcceptorMinusThree => motif::yag_at_acceptor_minus_three(ctx),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Feature {
    type Err = FerroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .iter()
            .find(|f| f.name() == s)
            .copied()
            .ok_or_else(|| FerroError::config(format!("unknown feature '{}'", s)))
    }
}

/// Everything a calculator may look at for one variant/transcript pair.
///
/// `variant` is already expressed on the transcript's strand in 0-based
/// coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FeatureContext<'a> {
    pub variant: &'a GenomicVariant,
    pub transcript: &'a TranscriptModel,
    pub location: &'a SplicingLocationData,
    pub sequence: &'a StrandedSequence,
    pub annotator: &'a SplicingAnnotator,
}

/// Feature name to value, ordered by name. `NaN` values are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureMap(BTreeMap<String, f64>);

impl FeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Value of a catalogue feature
    pub fn feature(&self, feature: Feature) -> Option<f64> {
        self.get(feature.name())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Values in the order of `features`; absent features become `NaN`.
    pub fn to_vector(&self, features: &[Feature]) -> Vec<f64> {
        features
            .iter()
            .map(|f| self.feature(*f).unwrap_or(f64::NAN))
            .collect()
    }
}

impl FromIterator<(String, f64)> for FeatureMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_names_roundtrip() {
        for feature in Feature::ALL {
            assert_eq!(feature.name().parse::<Feature>().unwrap(), feature);
            let json = serde_json::to_string(&feature).unwrap();
            assert_eq!(json, format!("\"{}\"", feature.name()));
        }
        assert!("splice_ai".parse::<Feature>().is_err());
    }

    #[test]
    fn test_matrix_only_excludes_kmer_features() {
        assert!(!Feature::MATRIX_ONLY.contains(&Feature::Hexamer));
        assert!(!Feature::MATRIX_ONLY.contains(&Feature::Septamer));
        assert_eq!(Feature::MATRIX_ONLY.len() + 2, Feature::ALL.len());
    }

    #[test]
    fn test_feature_map_keeps_nan() {
        let mut map = FeatureMap::new();
        map.insert("canonical_donor", f64::NAN);
        map.insert("exon_length", 120.0);
        assert_eq!(map.len(), 2);
        assert!(map.feature(Feature::CanonicalDonor).unwrap().is_nan());

        let v = map.to_vector(&[Feature::ExonLength, Feature::Hexamer]);
        assert_eq!(v[0], 120.0);
        assert!(v[1].is_nan());
    }
}
