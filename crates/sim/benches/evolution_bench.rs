use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use popsimu_sim::analysis::{calc_ks, calc_ks_sampled, PairSampling};
use popsimu_sim::base::Alphabet;
use popsimu_sim::evolution::{MoranSelector, PointMutator};
use popsimu_sim::simulation::{emit, Config, Event, MoranProcess, Population, Target};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

    let sizes = [100, 1_000];
    let lengths = [1_000, 10_000];

    for &size in &sizes {
        for &length in &lengths {
            let config = Config::builder()
                .size(size)
                .length(length)
                .mutation_rate(1e-3)
                .transfer_in(1e-3, 100)
                .build()
                .unwrap();
            let mut process = MoranProcess::from_random_ancestor(&[config], &mut rng).unwrap();

            group.throughput(Throughput::Elements(100));
            let parameter_string = format!("n={size}/len={length}");
            group.bench_with_input(
                BenchmarkId::new("run_for_100", &parameter_string),
                &(size, length),
                |b, _| b.iter(|| process.run_for(black_box(100), &mut rng)),
            );
        }
    }

    group.finish();
}

fn bench_emit(c: &mut Criterion) {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
    let moran = MoranSelector::new();
    let mutator = PointMutator::new(Alphabet::dna());
    let candidates = [
        Event::new(0.01, &mutator, Target::Population(0)),
        Event::new(0.001, &moran, Target::Population(0)),
        Event::new(0.0, &moran, Target::Population(0)),
    ];

    c.bench_function("emit_three_candidates", |b| {
        b.iter(|| black_box(emit(black_box(&candidates), &mut rng).map(|e| e.rate)))
    });
}

fn bench_diversity(c: &mut Criterion) {
    let mut group = c.benchmark_group("diversity");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);

    for &size in &[50, 100, 500] {
        let pop = Population::random(size, 1_000, &Alphabet::dna(), &mut rng);

        group.bench_with_input(BenchmarkId::new("calc_ks", size), &size, |b, _| {
            b.iter(|| black_box(calc_ks(black_box(&pop))))
        });
        group.bench_with_input(BenchmarkId::new("calc_ks_sampled", size), &size, |b, _| {
            b.iter(|| black_box(calc_ks_sampled(&pop, PairSampling::default(), &mut rng)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generation, bench_emit, bench_diversity);
criterion_main!(benches);
