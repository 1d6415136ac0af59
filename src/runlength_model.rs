/*!
This module provides access to the `RunLengthConsensusModel`, which calls the consensus base and run length for one column of run-length encoded observations.
The base is called by vote, then every candidate run length is scored as a log10 posterior using the prior for that length and the probability of each observed length given it.

Example usage:
```rust
use marker_con::coverage::{AlignedBase, Coverage};
use marker_con::example_gen::generate_peaked_config;
use marker_con::reads::Strand;
use marker_con::runlength_model::RunLengthConsensusModel;

let config = generate_peaked_config(10, 0.9);
let model = RunLengthConsensusModel::with_config(config).unwrap();

let mut coverage = Coverage::default();
coverage.add_read(AlignedBase::G, Strand::Forward, 3);
coverage.add_read(AlignedBase::G, Strand::Reverse, 3);
coverage.add_read(AlignedBase::G, Strand::Forward, 4);

let consensus = model.call(&coverage);
assert_eq!(consensus.base, AlignedBase::G);
assert_eq!(consensus.repeat_count, 3);
```
*/

use log::{debug, trace};
use std::collections::BTreeMap;

use crate::bayesian_config::{BaseVoteWeight, BayesianConfig};
use crate::coverage::{AlignedBase, Coverage};
use crate::reads::Strand;

/// Tallies of (matrix index, observed run length) -> multiplicity
type FactoredRepeats = BTreeMap<(usize, usize), u64>;

/// A scored run length for one column
#[derive(Clone, Debug, PartialEq)]
pub struct RunLengthPrediction {
    /// The most likely run length
    pub run_length: usize,
    /// log10 likelihood of each run length, shifted so the maximum is 0 when it is finite
    pub log_likelihoods: Vec<f64>
}

/// The full call for one column
#[derive(Clone, Debug, PartialEq)]
pub struct RunLengthConsensus {
    pub base: AlignedBase,
    /// The called run length, 0 for an unscored gap
    pub repeat_count: usize,
    /// Normalized log10 likelihoods, empty for an unscored gap
    pub log_likelihoods: Vec<f64>
}

/// Immutable run-length caller; the tables are only read during prediction
#[derive(Clone, Debug)]
pub struct RunLengthConsensusModel {
    /// Tables and behavior flags
    config: BayesianConfig
}

impl RunLengthConsensusModel {
    /// Creates a new model from a configuration.
    /// # Arguments
    /// * `config` - the tables and flags to use
    /// # Errors
    /// * if the table shapes do not match `max_runlength` or contain NaN
    pub fn with_config(config: BayesianConfig) -> Result<RunLengthConsensusModel, Box<dyn std::error::Error>> {
        config.validate()?;
        debug!("Run-length model {:?} ready with max_runlength {}", config.name, config.max_runlength);
        Ok(RunLengthConsensusModel {
            config
        })
    }

    /// Votes for the consensus base of a column.
    /// Ties go to the first base in A, C, G, T, gap order, and a column with no votes is a gap.
    /// # Arguments
    /// * `coverage` - the observations at this column
    pub fn predict_consensus_base(&self, coverage: &Coverage) -> AlignedBase {
        let mut votes = [0_u64; 5];
        for observation in coverage.observations() {
            let slot = observation.base.index().unwrap_or(4);
            votes[slot] += match self.config.base_vote_weight {
                BaseVoteWeight::ReadCount => 1,
                BaseVoteWeight::RepeatCount => observation.repeat_count as u64
            };
        }

        let mut best_base = AlignedBase::Gap;
        let mut best_votes = 0;
        for (&base, &base_votes) in AlignedBase::ALL.iter().zip(votes.iter()) {
            if base_votes > best_votes {
                best_base = base;
                best_votes = base_votes;
            }
        }
        trace!("Base votes {votes:?} -> {best_base}");
        best_base
    }

    /// Scores every run length for the column given its consensus base.
    /// Returns None when the consensus is a gap and gap run lengths are not predicted.
    /// # Arguments
    /// * `coverage` - the observations at this column
    /// * `consensus_base` - the base to score, usually from `predict_consensus_base(...)`
    pub fn predict_runlength(&self, coverage: &Coverage, consensus_base: AlignedBase) -> Option<RunLengthPrediction> {
        if consensus_base.is_gap() && !self.config.predict_gap_runlengths {
            return None;
        }

        let factored = self.factor_repeats(coverage, consensus_base);
        let mut log_likelihoods: Vec<f64> = (0..self.config.max_runlength)
            .map(|true_length| {
                let mut score = self.config.priors[Strand::Forward.index()][true_length];
                for strand_repeats in factored.iter() {
                    for (&(matrix_index, observed), &multiplicity) in strand_repeats.iter() {
                        score += multiplicity as f64 * self.config.probability_matrices[matrix_index][true_length][observed];
                    }
                }
                trace!("Run length {true_length} scored {score}");
                score
            })
            .collect();

        normalize_likelihoods(&mut log_likelihoods);

        let mut run_length = 0;
        for (true_length, &score) in log_likelihoods.iter().enumerate() {
            if score > log_likelihoods[run_length] {
                run_length = true_length;
            }
        }

        Some(RunLengthPrediction {
            run_length,
            log_likelihoods
        })
    }

    /// Calls the base and then the run length for a column.
    /// An unscored gap column is reported as a gap with run length 0 and no likelihoods.
    /// # Arguments
    /// * `coverage` - the observations at this column
    pub fn call(&self, coverage: &Coverage) -> RunLengthConsensus {
        let base = self.predict_consensus_base(coverage);
        match self.predict_runlength(coverage, base) {
            Some(prediction) => RunLengthConsensus {
                base,
                repeat_count: prediction.run_length,
                log_likelihoods: prediction.log_likelihoods
            },
            None => RunLengthConsensus {
                base,
                repeat_count: 0,
                log_likelihoods: vec![]
            }
        }
    }

    /// Collapses the column into per-strand tallies of (matrix, observed length).
    /// Reverse strand observations use the matrix of the complement base.
    fn factor_repeats(&self, coverage: &Coverage, consensus_base: AlignedBase) -> [FactoredRepeats; 2] {
        let max_observed = self.config.max_runlength - 1;
        let mut factored: [FactoredRepeats; 2] = Default::default();
        for observation in coverage.observations() {
            let matrix_base = if observation.base.is_gap() {
                // a gap consensus has no matrix for gap observations
                if consensus_base.is_gap() || !self.config.count_gaps_as_zeros {
                    continue;
                }
                consensus_base
            } else if consensus_base.is_gap() {
                observation.base
            } else if observation.base != consensus_base && self.config.ignore_non_consensus_base_repeats {
                continue;
            } else {
                consensus_base
            };

            let matrix_base = match observation.strand {
                Strand::Forward => matrix_base,
                Strand::Reverse => matrix_base.complement()
            };
            let Some(matrix_index) = matrix_base.index() else {
                continue;
            };

            let observed = (observation.repeat_count as usize).min(max_observed);
            *factored[observation.strand.index()].entry((matrix_index, observed)).or_insert(0) += 1;
        }
        factored
    }

    // Getters
    pub fn config(&self) -> &BayesianConfig {
        &self.config
    }
}

/// Shifts the scores so the maximum is 0; left alone if the maximum is not finite
fn normalize_likelihoods(log_likelihoods: &mut [f64]) {
    let max_score = log_likelihoods.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max_score.is_finite() {
        for score in log_likelihoods.iter_mut() {
            *score -= max_score;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use crate::bayesian_config::BayesianConfigBuilder;
    use crate::example_gen::{generate_coverage, generate_peaked_config};

    fn peaked_model() -> RunLengthConsensusModel {
        RunLengthConsensusModel::with_config(generate_peaked_config(10, 0.9)).unwrap()
    }

    fn column(observations: &[(AlignedBase, Strand, u16)]) -> Coverage {
        let mut coverage = Coverage::default();
        for &(base, strand, repeat_count) in observations.iter() {
            coverage.add_read(base, strand, repeat_count);
        }
        coverage
    }

    #[test]
    fn test_peaked_round_trip() {
        let model = peaked_model();
        for (base, run_length) in [(AlignedBase::A, 1), (AlignedBase::C, 4), (AlignedBase::T, 7)] {
            let coverage = generate_coverage(base, run_length, 20, 0.1);
            let consensus = model.call(&coverage);
            assert_eq!(consensus.base, base);
            assert_eq!(consensus.repeat_count, run_length as usize);
            assert_eq!(consensus.log_likelihoods.len(), 10);
            assert_eq!(consensus.log_likelihoods[run_length as usize], 0.0);
        }
    }

    #[test]
    fn test_empty_coverage() {
        let model = peaked_model();
        let coverage = Coverage::default();
        assert_eq!(model.predict_consensus_base(&coverage), AlignedBase::Gap);
        assert_eq!(model.call(&coverage), RunLengthConsensus {
            base: AlignedBase::Gap,
            repeat_count: 0,
            log_likelihoods: vec![]
        });

        // scoring a base with no evidence falls back to the uniform prior
        let prediction = model.predict_runlength(&coverage, AlignedBase::A).unwrap();
        assert_eq!(prediction.run_length, 0);
        assert_eq!(prediction.log_likelihoods, vec![0.0; 10]);
    }

    #[test]
    fn test_base_votes() {
        let coverage = column(&[
            (AlignedBase::A, Strand::Forward, 1),
            (AlignedBase::A, Strand::Forward, 1),
            (AlignedBase::C, Strand::Reverse, 5)
        ]);
        let model = peaked_model();
        assert_eq!(model.predict_consensus_base(&coverage), AlignedBase::A);

        let mut config = generate_peaked_config(10, 0.9);
        config.base_vote_weight = BaseVoteWeight::RepeatCount;
        let model = RunLengthConsensusModel::with_config(config).unwrap();
        assert_eq!(model.predict_consensus_base(&coverage), AlignedBase::C);

        // ties go to the earlier base
        let tied = column(&[
            (AlignedBase::G, Strand::Forward, 2),
            (AlignedBase::C, Strand::Forward, 2)
        ]);
        assert_eq!(model.predict_consensus_base(&tied), AlignedBase::C);
    }

    #[test]
    fn test_gap_handling() {
        let coverage = column(&[
            (AlignedBase::Gap, Strand::Forward, 0),
            (AlignedBase::Gap, Strand::Reverse, 0),
            (AlignedBase::Gap, Strand::Forward, 0),
            (AlignedBase::A, Strand::Forward, 2)
        ]);

        // gap consensus is not scored by default
        let model = peaked_model();
        assert_eq!(model.predict_consensus_base(&coverage), AlignedBase::Gap);
        assert_eq!(model.predict_runlength(&coverage, AlignedBase::Gap), None);
        assert_eq!(model.call(&coverage).repeat_count, 0);

        // scoring a gap uses the bases that were seen
        let mut config = generate_peaked_config(10, 0.9);
        config.predict_gap_runlengths = true;
        let model = RunLengthConsensusModel::with_config(config).unwrap();
        let consensus = model.call(&coverage);
        assert_eq!(consensus.base, AlignedBase::Gap);
        assert_eq!(consensus.repeat_count, 2);

        // gaps are ignored for a base consensus unless counted as zeros
        assert_eq!(model.predict_runlength(&coverage, AlignedBase::A).unwrap().run_length, 2);
        let mut config = generate_peaked_config(10, 0.9);
        config.count_gaps_as_zeros = true;
        let model = RunLengthConsensusModel::with_config(config).unwrap();
        assert_eq!(model.predict_runlength(&coverage, AlignedBase::A).unwrap().run_length, 0);
    }

    #[test]
    fn test_non_consensus_repeats() {
        let coverage = column(&[
            (AlignedBase::T, Strand::Forward, 3),
            (AlignedBase::C, Strand::Forward, 6),
            (AlignedBase::C, Strand::Forward, 6),
            (AlignedBase::C, Strand::Forward, 6)
        ]);
        let model = peaked_model();
        assert_eq!(model.predict_runlength(&coverage, AlignedBase::T).unwrap().run_length, 3);

        let mut config = generate_peaked_config(10, 0.9);
        config.ignore_non_consensus_base_repeats = false;
        let model = RunLengthConsensusModel::with_config(config).unwrap();
        assert_eq!(model.predict_runlength(&coverage, AlignedBase::T).unwrap().run_length, 6);
    }

    #[test]
    fn test_reverse_strand_complement() {
        // A is peaked, T always favors a run of 2
        let peaked = vec![
            vec![-0.01, -2.0, -2.0],
            vec![-2.0, -0.01, -2.0],
            vec![-2.0, -2.0, -0.01]
        ];
        let favors_two = vec![
            vec![-3.0, -3.0, -3.0],
            vec![-3.0, -3.0, -3.0],
            vec![-0.01, -0.01, -0.01]
        ];
        let config = BayesianConfigBuilder::default()
            .max_runlength(3)
            .probability_matrices([peaked.clone(), peaked.clone(), peaked, favors_two])
            .priors([vec![-0.5; 3], vec![-0.5; 3]])
            .build()
            .unwrap();
        let model = RunLengthConsensusModel::with_config(config).unwrap();

        let forward = column(&[(AlignedBase::A, Strand::Forward, 1)]);
        assert_eq!(model.call(&forward).repeat_count, 1);
        let reverse = column(&[(AlignedBase::A, Strand::Reverse, 1)]);
        assert_eq!(model.call(&reverse).repeat_count, 2);
    }

    #[test_log::test]
    fn test_long_runs_clamp() {
        let model = peaked_model();
        let coverage = column(&[
            (AlignedBase::G, Strand::Forward, 50),
            (AlignedBase::G, Strand::Reverse, 12)
        ]);
        let consensus = model.call(&coverage);
        assert_eq!(consensus.base, AlignedBase::G);
        assert_eq!(consensus.repeat_count, 9);
    }

    #[test]
    fn test_bad_config() {
        let mut config = generate_peaked_config(4, 0.9);
        config.priors[1].pop();
        assert!(RunLengthConsensusModel::with_config(config).is_err());
    }

    #[test]
    fn test_normalize_likelihoods() {
        let mut scores = vec![-3.0, -1.0, -2.0];
        normalize_likelihoods(&mut scores);
        assert_eq!(scores, vec![-2.0, 0.0, -1.0]);

        let mut scores = vec![f64::NEG_INFINITY; 3];
        normalize_likelihoods(&mut scores);
        assert_eq!(scores, vec![f64::NEG_INFINITY; 3]);
    }

    #[derive(Debug, serde::Deserialize)]
    struct CoverageRecord {
        base: String,
        strand: usize,
        repeat_count: u16
    }

    /// Loads a coverage column from a csv file.
    /// Expected columns are "base" (ACGT or -), "strand" (0 or 1), and "repeat_count".
    /// # Arguments
    /// * `filename` - the file path to load
    fn load_coverage_csv(filename: &std::path::Path) -> Coverage {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(filename)
            .unwrap();
        let mut coverage = Coverage::default();
        for row in csv_reader.deserialize() {
            let record: CoverageRecord = row.unwrap();
            let base = AlignedBase::from_ascii(record.base.as_bytes()[0]).unwrap();
            let strand = match record.strand {
                0 => Strand::Forward,
                1 => Strand::Reverse,
                _ => panic!("unexpected strand {}", record.strand)
            };
            coverage.add_read(base, strand, record.repeat_count);
        }
        coverage
    }

    #[test]
    fn test_csv_coverage_001() {
        let coverage = load_coverage_csv(&PathBuf::from("./tests/coverage_001.csv"));
        assert_eq!(coverage.len(), 12);

        let model = peaked_model();
        let consensus = model.call(&coverage);
        assert_eq!(consensus.base, AlignedBase::T);
        assert_eq!(consensus.repeat_count, 5);
    }
}
