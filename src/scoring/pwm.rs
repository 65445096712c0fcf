//! Positional weight matrices and individual information scoring

use serde::{Deserialize, Serialize};

use crate::error::FerroError;

/// Uniform background frequency of each nucleotide
pub const BACKGROUND: f64 = 0.25;

/// Allowed deviation of a matrix row sum from 1.0
const ROW_SUM_TOLERANCE: f64 = 1e-3;

const BASES: [char; 4] = ['A', 'C', 'G', 'T'];

fn base_index(base: u8) -> Option<usize> {
    match base.to_ascii_uppercase() {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

/// Per-position base probabilities describing a splice motif.
///
/// Each row holds the probabilities of `A`, `C`, `G` and `T` at one
/// position. Rows must be strictly positive and sum to one, so every
/// window over `ACGT` has a finite score.
///
/// ```
/// use ferro_splice::scoring::PositionalWeightMatrix;
///
/// let pwm = PositionalWeightMatrix::new(vec![
///     [0.7, 0.1, 0.1, 0.1],
///     [0.1, 0.1, 0.7, 0.1],
/// ])
/// .unwrap();
///
/// assert_eq!(pwm.consensus(), "AG");
/// let ri = pwm.score("AG");
/// assert!((ri - 2.0 * (0.7f64 / 0.25).log2()).abs() < 1e-12);
/// assert!(pwm.score("AN").is_nan());
/// assert!(pwm.score("AGT").is_nan());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f64; 4]>", into = "Vec<[f64; 4]>")]
pub struct PositionalWeightMatrix {
    rows: Vec<[f64; 4]>,
}

impl PositionalWeightMatrix {
    pub fn new(rows: Vec<[f64; 4]>) -> Result<Self, FerroError> {
        if rows.is_empty() {
            return Err(FerroError::config("weight matrix has no positions"));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.iter().any(|p| !p.is_finite() || *p <= 0.0) {
                return Err(FerroError::config(format!(
                    "weight matrix position {} has a non-positive probability: {:?}",
                    i, row
                )));
            }
            let sum: f64 = row.iter().sum();
            if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
                return Err(FerroError::config(format!(
                    "weight matrix position {} sums to {:.4}, expected 1",
                    i, sum
                )));
            }
        }
        Ok(Self { rows })
    }

    /// Number of positions (columns of the motif)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[[f64; 4]] {
        &self.rows
    }

    /// Individual information of `window` in bits:
    /// `Σ log2(p(base_i) / 0.25)`.
    ///
    /// `NaN` when the window length differs from the matrix or a base is not
    /// one of `ACGT` (case-insensitive).
    pub fn score(&self, window: &str) -> f64 {
        if window.len() != self.rows.len() {
            return f64::NAN;
        }
        let mut total = 0.0;
        for (row, base) in self.rows.iter().zip(window.bytes()) {
            match base_index(base) {
                Some(idx) => total += (row[idx] / BACKGROUND).log2(),
                None => return f64::NAN,
            }
        }
        total
    }

    /// Highest score over every matrix-length window of `seq`.
    ///
    /// Windows containing non-`ACGT` bases are skipped; `NaN` when no window
    /// could be scored.
    pub fn max_sliding_score(&self, seq: &str) -> f64 {
        let width = self.rows.len();
        if seq.len() < width {
            return f64::NAN;
        }
        (0..=seq.len() - width)
            .map(|offset| self.score(&seq[offset..offset + width]))
            .fold(f64::NAN, f64::max)
    }

    /// Most likely base at every position
    pub fn consensus(&self) -> String {
        self.rows
            .iter()
            .map(|row| BASES[argmax(row, |a, b| a > b)])
            .collect()
    }

    /// Least likely base at every position
    pub fn anti_consensus(&self) -> String {
        self.rows
            .iter()
            .map(|row| BASES[argmax(row, |a, b| a < b)])
            .collect()
    }

    /// Score of the consensus sequence, the maximum attainable
    pub fn max_score(&self) -> f64 {
        self.score(&self.consensus())
    }

    /// Score of the anti-consensus sequence, the minimum attainable
    pub fn min_score(&self) -> f64 {
        self.score(&self.anti_consensus())
    }
}

fn argmax(row: &[f64; 4], better: impl Fn(f64, f64) -> bool) -> usize {
    let mut best = 0;
    for i in 1..4 {
        if better(row[i], row[best]) {
            best = i;
        }
    }
    best
}

impl TryFrom<Vec<[f64; 4]>> for PositionalWeightMatrix {
    type Error = FerroError;

    fn try_from(rows: Vec<[f64; 4]>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<PositionalWeightMatrix> for Vec<[f64; 4]> {
    fn from(pwm: PositionalWeightMatrix) -> Self {
        pwm.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn donor_like() -> PositionalWeightMatrix {
        PositionalWeightMatrix::new(vec![
            [0.33, 0.36, 0.18, 0.13],
            [0.60, 0.03, 0.12, 0.25],
            [0.09, 0.03, 0.81, 0.07],
            [0.01, 0.01, 0.97, 0.01],
            [0.01, 0.01, 0.01, 0.97],
            [0.54, 0.02, 0.38, 0.06],
            [0.71, 0.08, 0.12, 0.09],
            [0.06, 0.04, 0.82, 0.08],
            [0.15, 0.15, 0.21, 0.49],
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_invalid_rows() {
        assert!(PositionalWeightMatrix::new(vec![]).is_err());
        assert!(PositionalWeightMatrix::new(vec![[0.0, 0.0, 1.0, 0.0]]).is_err());
        assert!(PositionalWeightMatrix::new(vec![[0.5, 0.2, 0.2, 0.2]]).is_err());
        assert!(PositionalWeightMatrix::new(vec![[0.2501, 0.25, 0.25, 0.25]]).is_ok());
    }

    #[test]
    fn test_consensus_and_extremes() {
        let pwm = donor_like();
        assert_eq!(pwm.consensus(), "CAGGTAAGT");
        assert_eq!(pwm.anti_consensus(), "TCCAACCCA");
        assert!(pwm.max_score() > pwm.score("CAGGTGAGT"));
        assert!(pwm.min_score() < pwm.score("CAGGTGAGT"));
    }

    #[test]
    fn test_case_insensitive() {
        let pwm = donor_like();
        assert_eq!(pwm.score("caggtaagt"), pwm.score("CAGGTAAGT"));
    }

    #[test]
    fn test_uniform_row_contributes_nothing() {
        let pwm = PositionalWeightMatrix::new(vec![[0.25; 4]; 3]).unwrap();
        assert_eq!(pwm.score("ACG"), 0.0);
    }

    #[test]
    fn test_max_sliding_score() {
        let pwm = donor_like();
        let snippet = "TTTTCAGGTAAGTTTTT";
        assert_eq!(pwm.max_sliding_score(snippet), pwm.max_score());
        assert!(pwm.max_sliding_score("CAGGT").is_nan());
        // a window with N is skipped, not fatal
        let with_n = "NNNNCAGGTAAGT";
        assert_eq!(pwm.max_sliding_score(with_n), pwm.max_score());
    }

    #[test]
    fn test_serde_validates() {
        let json = "[[0.7,0.1,0.1,0.1],[0.1,0.1,0.7,0.1]]";
        let pwm: PositionalWeightMatrix = serde_json::from_str(json).unwrap();
        assert_eq!(pwm.len(), 2);
        assert!(serde_json::from_str::<PositionalWeightMatrix>("[[1.0,0.0,0.0,0.0]]").is_err());
    }
}
