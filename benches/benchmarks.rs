//! Performance benchmarks for ferro-splice
//!
//! Run with: cargo bench
//! Run specific benchmark: cargo bench -- render

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ferro_splice::classifier::NoClassifier;
use ferro_splice::coords::{Contig, GenomicRegion, GenomicVariant, Strand};
use ferro_splice::features::{Feature, SplicingAnnotator};
use ferro_splice::reference::{MockProvider, ReferenceProvider};
use ferro_splice::scoring::{KmerScores, PositionalWeightMatrix};
use ferro_splice::splicing::{AlleleGenerator, SpliceSiteKind, SplicingLocator, SplicingParameters};
use ferro_splice::Evaluator;

fn uniform(n: usize) -> PositionalWeightMatrix {
    PositionalWeightMatrix::new(vec![[0.25; 4]; n]).unwrap()
}

fn annotator() -> SplicingAnnotator {
    let params = SplicingParameters::default();
    let hexamers = ["AAAAAA", "CCCCCC", "GGGGGG", "TTTTTT"].map(|k| (k, 0.5));
    SplicingAnnotator::new(params, uniform(params.donor_len()), uniform(params.acceptor_len()))
        .unwrap()
        .with_hexamer(KmerScores::new(6, hexamers).unwrap())
        .unwrap()
        .with_features(Feature::MATRIX_ONLY.iter().copied().chain([Feature::Hexamer]).collect())
        .unwrap()
}

fn chr_t() -> Contig {
    MockProvider::with_test_data().contig("chrT").unwrap()
}

/// SNVs at every position of `[start, end)` on chrT
fn snvs(start: u64, end: u64) -> Vec<GenomicVariant> {
    (start..end)
        .map(|pos| GenomicVariant::from_vcf(chr_t(), pos + 1, "N", "A").unwrap())
        .collect()
}

// =============================================================================
// Location benchmarks
// =============================================================================

fn bench_locate(c: &mut Criterion) {
    let provider = MockProvider::with_test_data();
    let tx = provider.transcript_by_accession("NM_SPLICE.1").unwrap();
    let locator = SplicingLocator::new(SplicingParameters::default());

    let cases = [
        ("exon", 150u64),
        ("donor", 201),
        ("intron", 250),
        ("acceptor", 299),
        ("last_exon", 580),
        ("outside", 900),
    ];

    let mut group = c.benchmark_group("locate");
    for (name, pos) in cases {
        let variant = GenomicVariant::from_vcf(chr_t(), pos + 1, "N", "A").unwrap();
        group.bench_with_input(BenchmarkId::new("position", name), &variant, |b, v| {
            b.iter(|| locator.locate(black_box(v), &tx))
        });
    }
    group.finish();
}

// =============================================================================
// Rendering benchmarks
// =============================================================================

fn bench_render(c: &mut Criterion) {
    let provider = MockProvider::with_test_data();
    let chr = chr_t();
    let region = GenomicRegion::zero_based(chr.clone(), Strand::Plus, 0, chr.length).unwrap();
    let sequence = provider.sequence_for_region(&region).unwrap();
    let anchor = GenomicRegion::boundary(chr.clone(), Strand::Plus, 400).unwrap();
    let renderer = AlleleGenerator::new(SplicingParameters::default());

    let cases = [
        ("snv", GenomicVariant::from_vcf(chr.clone(), 402, "T", "G").unwrap()),
        ("deletion", GenomicVariant::from_vcf(chr.clone(), 398, "NNNNN", "N").unwrap()),
        ("insertion", GenomicVariant::from_vcf(chr.clone(), 401, "G", "GAAAAAA").unwrap()),
        ("upstream", GenomicVariant::from_vcf(chr, 380, "N", "A").unwrap()),
    ];

    let mut group = c.benchmark_group("render");
    for (name, variant) in &cases {
        for kind in [SpliceSiteKind::Donor, SpliceSiteKind::Acceptor] {
            let id = format!("{}_{:?}", name, kind);
            group.bench_with_input(BenchmarkId::new("variant", id), variant, |b, v| {
                b.iter(|| renderer.render(&anchor, black_box(v), &sequence, kind))
            });
        }
    }
    group.finish();
}

// =============================================================================
// Scoring benchmarks
// =============================================================================

fn bench_scoring(c: &mut Criterion) {
    let params = SplicingParameters::default();
    let donor = uniform(params.donor_len());
    let acceptor = uniform(params.acceptor_len());
    let donor_window = "CAGGTAAGT";
    let acceptor_window = "TTTTTTTTTTTTTTTTTTTTTCAGGTA";
    let long: String = "ACGT".repeat(50);

    let mut group = c.benchmark_group("scoring");
    group.bench_function("donor_window", |b| b.iter(|| donor.score(black_box(donor_window))));
    group.bench_function("acceptor_window", |b| {
        b.iter(|| acceptor.score(black_box(acceptor_window)))
    });
    group.throughput(Throughput::Bytes(long.len() as u64));
    group.bench_function("sliding_200bp", |b| {
        b.iter(|| donor.max_sliding_score(black_box(&long)))
    });
    group.finish();
}

// =============================================================================
// End-to-end benchmarks
// =============================================================================

fn bench_evaluate(c: &mut Criterion) {
    let evaluator = Evaluator::new(MockProvider::with_test_data(), annotator(), NoClassifier);

    let mut group = c.benchmark_group("evaluate");
    for (name, variant) in [
        ("donor", GenomicVariant::from_vcf(chr_t(), 402, "T", "G").unwrap()),
        ("intron", GenomicVariant::from_vcf(chr_t(), 251, "N", "A").unwrap()),
        ("outside", GenomicVariant::from_vcf(chr_t(), 901, "N", "A").unwrap()),
    ] {
        group.bench_with_input(BenchmarkId::new("variant", name), &variant, |b, v| {
            b.iter(|| evaluator.evaluate_variant(black_box(v)))
        });
    }
    group.finish();
}

fn bench_evaluate_throughput(c: &mut Criterion) {
    let evaluator = Evaluator::new(MockProvider::with_test_data(), annotator(), NoClassifier);
    let variants = snvs(100, 600);

    let mut group = c.benchmark_group("evaluate_throughput");
    group.throughput(Throughput::Elements(variants.len() as u64));
    group.bench_function("sequential", |b| {
        b.iter(|| {
            variants
                .iter()
                .map(|v| evaluator.evaluate_variant(v).len())
                .sum::<usize>()
        })
    });
    #[cfg(feature = "parallel")]
    group.bench_function("parallel", |b| {
        b.iter(|| ferro_splice::parallel::evaluate_parallel(&evaluator, black_box(&variants)).len())
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_locate,
    bench_render,
    bench_scoring,
    bench_evaluate,
    bench_evaluate_throughput,
);

criterion_main!(benches);
