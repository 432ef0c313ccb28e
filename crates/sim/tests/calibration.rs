//! Statistical calibration of the single-population Moran model.
//!
//! At equilibrium the expected pairwise diversity is
//! `ν / (1 + γ + 4ν/3)` with `ν = n·u'` and `γ = f·t`, where `u'` is the rate
//! of symbol-changing mutations. Point mutations redraw the site uniformly
//! from the alphabet, so `u' = u · (1 - 1/|A|)`.
//!
//! These runs simulate `10·n²` generations per replicate and take a while;
//! run them with `cargo test --release -- --ignored`.

use popsimu_sim::analysis::{calc_ks, mean, std_dev};
use popsimu_sim::base::Alphabet;
use popsimu_sim::simulation::{Config, MoranProcess, Population};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

const SIZE: usize = 100;
const LENGTH: usize = 100;
const MUTATION: f64 = 0.01;
const FRAGMENT: usize = 10;
const REPLICATES: usize = 10;

fn run_replicate(config: &Config, rng: &mut Xoshiro256PlusPlus) -> f64 {
    let population = Population::random(SIZE, LENGTH, config.alphabet(), rng);
    let mut process = MoranProcess::new(std::slice::from_ref(config), vec![population]).unwrap();
    process.run_for(10 * SIZE * SIZE, rng);
    calc_ks(&process.populations()[0]).ks
}

fn check_calibration(transfer: f64, seed: u64) {
    let config = Config::builder()
        .size(SIZE)
        .length(LENGTH)
        .mutation_rate(MUTATION)
        .transfer_in(transfer, FRAGMENT)
        .build()
        .unwrap();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

    let ks: Vec<f64> = (0..REPLICATES)
        .map(|_| {
            let value = run_replicate(&config, &mut rng);
            rng.jump();
            value
        })
        .collect();

    let observed = mean(&ks);
    let standard_error = std_dev(&ks) / (REPLICATES as f64).sqrt();

    let symbols = Alphabet::dna().len() as f64;
    let nu = SIZE as f64 * MUTATION * (1.0 - 1.0 / symbols);
    let gamma = FRAGMENT as f64 * transfer;
    let expected = nu / (1.0 + gamma + 4.0 / 3.0 * nu);

    assert!(observed.is_finite());
    assert!(
        (observed - expected).abs() <= 3.0 * standard_error,
        "t = {transfer}: expected {expected:.4}, got {observed:.4} (standard error {standard_error:.4})"
    );
}

#[test]
#[ignore]
fn test_calibration_without_transfer() {
    check_calibration(0.0, 101);
}

#[test]
#[ignore]
fn test_calibration_low_transfer() {
    check_calibration(0.001, 102);
}

#[test]
#[ignore]
fn test_calibration_high_transfer() {
    check_calibration(0.01, 103);
}
