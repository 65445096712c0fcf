//! Parallel evaluation support for ferro-splice
//!
//! Evaluations are independent of each other, so a batch of variants can be
//! spread over a rayon thread pool. Enable with the `parallel` feature.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "parallel")]
//! # fn main() {
//! use ferro_splice::classifier::NoClassifier;
//! use ferro_splice::parallel::{evaluate_parallel, BatchStats};
//! use ferro_splice::{EngineConfig, Evaluator, GenomicVariant, MockProvider, ReferenceProvider};
//!
//! let config = EngineConfig::load_from_path("engine.json".as_ref()).unwrap();
//! let provider = MockProvider::with_test_data();
//! let chr = provider.contig("chrT").unwrap();
//! let evaluator = Evaluator::new(provider, config.build_annotator().unwrap(), NoClassifier);
//!
//! let variants: Vec<GenomicVariant> = (195..205)
//!     .map(|pos| GenomicVariant::from_vcf(chr.clone(), pos, "N", "A").unwrap())
//!     .collect();
//!
//! let results = evaluate_parallel(&evaluator, &variants);
//! let stats = BatchStats::from_results(&results);
//! println!("{} of {} variants evaluated", stats.evaluated, stats.total);
//! # }
//! # #[cfg(not(feature = "parallel"))]
//! # fn main() {}
//! ```

use log::debug;
use rayon::prelude::*;

use crate::classifier::Classifier;
use crate::coords::GenomicVariant;
use crate::error::FerroError;
use crate::evaluate::{Evaluator, VariantEvaluation};
use crate::reference::ReferenceProvider;

/// Evaluate a batch of variants in parallel
///
/// Returns one evaluation per input variant. Order is preserved.
pub fn evaluate_parallel<P, C>(
    evaluator: &Evaluator<P, C>,
    variants: &[GenomicVariant],
) -> Vec<VariantEvaluation>
where
    P: ReferenceProvider + Sync,
    C: Classifier + Sync,
{
    variants
        .par_iter()
        .map(|v| evaluator.evaluate_variant(v))
        .collect()
}

/// Evaluate a batch of variants in parallel, dropping variants that touch
/// no transcript
pub fn evaluate_parallel_nonempty<P, C>(
    evaluator: &Evaluator<P, C>,
    variants: &[GenomicVariant],
) -> Vec<VariantEvaluation>
where
    P: ReferenceProvider + Sync,
    C: Classifier + Sync,
{
    variants
        .par_iter()
        .map(|v| evaluator.evaluate_variant(v))
        .filter(|e| !e.is_empty())
        .collect()
}

/// Configuration for parallel batch evaluation
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Minimum number of variants handed to one worker at a time
    pub chunk_size: usize,
    /// Number of threads (0 = use rayon default)
    pub num_threads: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            chunk_size: 64,
            num_threads: 0,
        }
    }
}

impl ParallelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    pub fn with_num_threads(mut self, threads: usize) -> Self {
        self.num_threads = threads;
        self
    }

    /// Evaluate `variants` on a dedicated thread pool sized by this config.
    ///
    /// # Errors
    ///
    /// [`FerroError::InvalidConfig`] when the thread pool cannot be built.
    pub fn evaluate<P, C>(
        &self,
        evaluator: &Evaluator<P, C>,
        variants: &[GenomicVariant],
    ) -> Result<Vec<VariantEvaluation>, FerroError>
    where
        P: ReferenceProvider + Sync,
        C: Classifier + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.num_threads)
            .build()
            .map_err(|e| FerroError::config(format!("cannot build thread pool: {}", e)))?;
        debug!(
            "evaluating {} variants on {} threads",
            variants.len(),
            pool.current_num_threads()
        );
        let min_len = self.chunk_size.max(1);
        Ok(pool.install(|| {
            variants
                .par_iter()
                .with_min_len(min_len)
                .map(|v| evaluator.evaluate_variant(v))
                .collect()
        }))
    }
}

/// Statistics from a batch evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Variants submitted
    pub total: usize,
    /// Variants with at least one transcript evaluation
    pub evaluated: usize,
    /// Variants that touched no transcript or were skipped
    pub skipped: usize,
    /// Transcript evaluations with a splice-altering prediction
    pub splice_altering: usize,
}

impl BatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_results(results: &[VariantEvaluation]) -> Self {
        let evaluated = results.iter().filter(|r| !r.is_empty()).count();
        let splice_altering = results
            .iter()
            .flat_map(|r| &r.transcripts)
            .filter(|t| t.prediction.is_splice_altering())
            .count();
        Self {
            total: results.len(),
            evaluated,
            skipped: results.len() - evaluated,
            splice_altering,
        }
    }

    /// Share of submitted variants that were evaluated, as a percentage
    pub fn evaluated_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.evaluated as f64 / self.total as f64) * 100.0
        }
    }
}
