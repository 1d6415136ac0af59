
use rand::distributions::Uniform;
use rand::{Rng, SeedableRng};

use crate::bayesian_config::BayesianConfig;
use crate::coverage::{AlignedBase, Coverage};
use crate::reads::Strand;

/// Creates a model configuration that strongly favors observing the true run length.
/// Every base uses the same matrix and the priors are uniform.
/// # Arguments
/// * `max_runlength` - the number of modeled run lengths
/// * `accuracy` - the probability that a read reports the true run length
pub fn generate_peaked_config(max_runlength: usize, accuracy: f64) -> BayesianConfig {
    assert!(max_runlength > 0);
    assert!(accuracy > 0.0 && accuracy < 1.0);

    let (on_diagonal, off_diagonal) = if max_runlength == 1 {
        (0.0, f64::NEG_INFINITY)
    } else {
        (accuracy.log10(), ((1.0 - accuracy) / (max_runlength - 1) as f64).log10())
    };
    let matrix: Vec<Vec<f64>> = (0..max_runlength)
        .map(|true_length| {
            (0..max_runlength)
                .map(|observed| if observed == true_length { on_diagonal } else { off_diagonal })
                .collect()
        })
        .collect();
    let prior = vec![(1.0 / max_runlength as f64).log10(); max_runlength];

    BayesianConfig {
        name: format!("peaked-{max_runlength}-{accuracy}"),
        max_runlength,
        probability_matrices: [matrix.clone(), matrix.clone(), matrix.clone(), matrix],
        priors: [prior.clone(), prior],
        ..Default::default()
    }
}

/// Creates a noisy coverage column for a single true run
/// # Arguments
/// * `true_base` - the base of the run, must not be a gap
/// * `true_runlength` - the length of the run, must be at least 1
/// * `num_reads` - the number of observations to generate
/// * `error_rate` - overall error rate, assumes substitution and run-length errors are equally likely sub-components of this error rate
pub fn generate_coverage(true_base: AlignedBase, true_runlength: u16, num_reads: usize, error_rate: f64) -> Coverage {
    assert!(!true_base.is_gap());
    assert!(true_runlength > 0);
    assert!((0.0..=1.0).contains(&error_rate));

    let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    let base_distribution = Uniform::new(0, 4);
    let error_distribution = Uniform::new(0.0, 1.0);
    let error_type_distribution = Uniform::new(0, 2);

    let mut coverage = Coverage::default();
    for _i in 0..num_reads {
        let strand = if rng.gen_bool(0.5) { Strand::Forward } else { Strand::Reverse };
        let mut base = true_base;
        let mut repeat_count = true_runlength;

        let is_error = rng.sample(error_distribution) < error_rate;
        if is_error {
            match rng.sample(error_type_distribution) {
                0 => {
                    // substitution
                    while base == true_base {
                        base = AlignedBase::ALL[rng.sample(base_distribution)];
                    }
                },
                1 => {
                    // run too long or too short
                    if repeat_count == 1 || rng.gen_bool(0.5) {
                        repeat_count += 1;
                    } else {
                        repeat_count -= 1;
                    }
                },
                _ => panic!("no impl")
            }
        }
        coverage.add_read(base, strand, repeat_count);
    }
    coverage
}
