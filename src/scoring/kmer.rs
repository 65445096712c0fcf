//! Fixed-length k-mer score tables (hexamer/septamer regulatory motifs)

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use crate::error::FerroError;

/// Immutable lookup from a k-length nucleotide string to a score
///
/// ```
/// use ferro_splice::scoring::KmerScores;
///
/// let table = KmerScores::new(2, [("AC", 1.0), ("CG", 0.5), ("GT", -1.0)]).unwrap();
/// assert_eq!(table.sum_over("ACGT"), 0.5);
/// assert!(table.sum_over("ACGA").is_nan());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KmerScores {
    k: usize,
    scores: HashMap<String, f64>,
}

impl KmerScores {
    /// Build a table, checking every key is a `k`-length `ACGT` string.
    pub fn new<K, I>(k: usize, entries: I) -> Result<Self, FerroError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, f64)>,
    {
        if k == 0 {
            return Err(FerroError::config("k-mer length must be positive"));
        }
        let mut scores = HashMap::new();
        for (kmer, score) in entries {
            let kmer = kmer.as_ref().to_ascii_uppercase();
            if kmer.len() != k || !kmer.bytes().all(|b| matches!(b, b'A' | b'C' | b'G' | b'T')) {
                return Err(FerroError::config(format!(
                    "'{}' is not a {}-mer over ACGT",
                    kmer, k
                )));
            }
            scores.insert(kmer, score);
        }
        Ok(Self { k, scores })
    }

    /// Load a two-column `kmer<TAB>score` file; blank lines and lines
    /// starting with `#` are ignored.
    pub fn from_tsv(k: usize, path: &Path) -> Result<Self, FerroError> {
        let file = std::fs::File::open(path)?;
        let mut entries = Vec::new();
        for (lineno, line) in std::io::BufReader::new(file).lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (kmer, score) = match (fields.next(), fields.next()) {
                (Some(kmer), Some(score)) => (kmer, score),
                _ => {
                    return Err(FerroError::config(format!(
                        "{}:{}: expected 'kmer score'",
                        path.display(),
                        lineno + 1
                    )))
                }
            };
            let score: f64 = score.parse().map_err(|_| {
                FerroError::config(format!(
                    "{}:{}: '{}' is not a number",
                    path.display(),
                    lineno + 1,
                    score
                ))
            })?;
            entries.push((kmer.to_string(), score));
        }
        Self::new(k, entries)
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Score of one k-mer (case-insensitive)
    pub fn get(&self, kmer: &str) -> Option<f64> {
        self.scores.get(&kmer.to_ascii_uppercase()).copied()
    }

    /// Sum of the scores of every k-length window of `seq`.
    ///
    /// Any window missing from the table makes the whole sum `NaN`.
    pub fn sum_over(&self, seq: &str) -> f64 {
        if seq.len() < self.k {
            return 0.0;
        }
        let mut total = 0.0;
        for offset in 0..=seq.len() - self.k {
            match self.get(&seq[offset..offset + self.k]) {
                Some(score) => total += score,
                None => return f64::NAN,
            }
        }
        total
    }

    /// Table entries, for serialization
    pub fn entries(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_rejects_wrong_length_and_letters() {
        assert!(KmerScores::new(3, [("ACG", 1.0)]).is_ok());
        assert!(KmerScores::new(3, [("AC", 1.0)]).is_err());
        assert!(KmerScores::new(3, [("ACN", 1.0)]).is_err());
        assert!(KmerScores::new(0, Vec::<(String, f64)>::new()).is_err());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = KmerScores::new(3, [("acg", 2.5)]).unwrap();
        assert_eq!(table.get("ACG"), Some(2.5));
        assert_eq!(table.get("acg"), Some(2.5));
        assert_eq!(table.get("TTT"), None);
    }

    #[test]
    fn test_sum_over_short_sequence() {
        let table = KmerScores::new(3, [("ACG", 2.5)]).unwrap();
        assert_eq!(table.sum_over("AC"), 0.0);
    }

    #[test]
    fn test_from_tsv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# hexamer scores").unwrap();
        writeln!(file, "AAAAAA\t-0.5").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "GAAGAA\t1.25").unwrap();

        let table = KmerScores::from_tsv(6, file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("GAAGAA"), Some(1.25));
    }

    #[test]
    fn test_from_tsv_reports_bad_numbers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "AAAAAA\tlots").unwrap();
        let err = KmerScores::from_tsv(6, file.path()).unwrap_err();
        assert!(err.to_string().contains("not a number"));
    }
}
