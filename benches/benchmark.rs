// Throughput benchmarks for the scoring pipeline
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kinship_core::{Artwork, ExistingPairs, FeatureVector};
use kinship_similarity::{cosine, FileQuery, FileSimilarityRanker, KinshipBuilder, KinshipConfig, RankerConfig};
use rand::prelude::*;

const MEDIUMS: [&str; 5] = ["oil on canvas", "acrylic", "ink on paper", "generative html", "bronze"];
const FILE_TYPES: [&str; 4] = ["png", "jpg", "html", "js"];

fn generate_random_vector(rng: &mut impl Rng, dim: usize) -> Vec<f32> {
    (0..dim).map(|_| rng.random_range(-1.0f32..1.0f32)).collect()
}

fn generate_pool(size: usize, dim: usize) -> Vec<Artwork> {
    let mut rng = rand::rng();
    (0..size)
        .map(|i| {
            let mut artwork = Artwork::new(i as u64)
                .with_title(format!("work {}", i))
                .with_medium(MEDIUMS[i % MEDIUMS.len()])
                .with_year(1950 + (i % 70) as i32)
                .with_file_type(FILE_TYPES[i % FILE_TYPES.len()]);
            // a quarter of the pool predates the feature extractor
            if i % 4 != 0 {
                artwork = artwork.with_features(generate_random_vector(&mut rng, dim));
            }
            artwork
        })
        .collect()
}

fn benchmark_cosine(c: &mut Criterion) {
    let mut group = c.benchmark_group("cosine");
    let mut rng = rand::rng();

    for dim in [64, 256, 1024].iter() {
        let a = FeatureVector::new(generate_random_vector(&mut rng, *dim));
        let b = FeatureVector::new(generate_random_vector(&mut rng, *dim));
        group.bench_with_input(BenchmarkId::new("clamped", dim), dim, |bench, _| {
            bench.iter(|| cosine(black_box(Some(&a)), black_box(Some(&b))));
        });
    }

    group.finish();
}

fn benchmark_kinship(c: &mut Criterion) {
    let mut group = c.benchmark_group("kinship");
    let builder = KinshipBuilder::new(KinshipConfig::default()).unwrap();
    let mut rng = rand::rng();
    let source = Artwork::new("source")
        .with_features(generate_random_vector(&mut rng, 256))
        .with_medium("oil on canvas")
        .with_year(1990);

    for size in [100, 1000, 10000].iter() {
        let pool = generate_pool(*size, 256);
        let existing = ExistingPairs::new();
        group.bench_with_input(BenchmarkId::new("compute", size), size, |b, _| {
            b.iter(|| builder.compute(black_box(&source), black_box(&pool), &existing));
        });
    }

    group.finish();
}

fn benchmark_ranker(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_similarity");
    let ranker = FileSimilarityRanker::new(RankerConfig::default()).unwrap();
    let mut rng = rand::rng();
    let pool = generate_pool(200, 256);

    let vector_query = FileQuery::from_file_name("upload.png", Some(FeatureVector::new(generate_random_vector(&mut rng, 256))));
    group.bench_function("vector", |b| {
        b.iter(|| ranker.rank(black_box(&vector_query), black_box(&pool)));
    });

    let type_query = FileQuery::from_file_name("sketch.html", None);
    group.bench_function("type_match", |b| {
        b.iter(|| ranker.rank(black_box(&type_query), black_box(&pool)));
    });

    group.finish();
}

criterion_group!(benches, benchmark_cosine, benchmark_kinship, benchmark_ranker);
criterion_main!(benches);
