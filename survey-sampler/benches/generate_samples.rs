use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use survey_sampler::{Sampler, SamplingMode, insert_element};

fn bench_generate_samples(c: &mut Criterion) {
    let mut sampler = Sampler::new(StdRng::seed_from_u64(0), SamplingMode::Lenient);
    let mut pool: Vec<String> = (0..336).map(|i| format!("folder_{}/lamp_{i}.png", i % 9)).collect();

    c.bench_function("generate_samples_336x84x4", |b| {
        b.iter(|| {
            let trials = sampler
                .generate_samples(black_box(&mut pool), black_box(84), black_box(4))
                .unwrap();
            black_box(trials);
        })
    });
}

fn bench_insert_element(c: &mut Criterion) {
    let base: Vec<usize> = (0..85).collect();
    c.bench_function("insert_element_4_markers", |b| {
        b.iter(|| {
            let mut seq = base.clone();
            insert_element(&mut seq, usize::MAX, black_box(4));
            black_box(seq);
        })
    });
}

criterion_group!(benches, bench_generate_samples, bench_insert_element);
criterion_main!(benches);
