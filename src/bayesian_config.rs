/*!
Contains configuration information for the run-length consensus model.
The probability tables are normally loaded from a text resource, and the behavior flags can then be adjusted, e.g.
```
use marker_con::bayesian_config::{BaseVoteWeight, BayesianConfig};

let resource = "\
>Name
toy
>PriorStrand0
-0.3,-0.3
>PriorStrand1
-0.3,-0.3
>A
-0.05,-1.0
-1.0,-0.05
>C
-0.05,-1.0
-1.0,-0.05
>G
-0.05,-1.0
-1.0,-0.05
>T
-0.05,-1.0
-1.0,-0.05
";
let mut config = BayesianConfig::from_reader(resource.as_bytes()).unwrap();
config.base_vote_weight = BaseVoteWeight::RepeatCount;
assert_eq!(config.name, "toy");
assert_eq!(config.max_runlength, 2);
```
Configurations can also be assembled directly with the builder, see `BayesianConfigBuilder`.
*/

use log::debug;
use rustc_hash::FxHashSet as HashSet;
use simple_error::{bail, SimpleError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Enumeration of how each observation votes for the consensus base.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BaseVoteWeight {
    /// Each observation is one vote
    #[default]
    ReadCount,
    /// Each observation votes with its observed repeat count, so gaps never win
    RepeatCount
}

/**
Contains configuration information for the run-length consensus model.
All table values are log10 probabilities.
The tables have no usable default, so they must come from `from_reader(...)`, `from_file(...)`, or the builder, e.g.
```
use marker_con::bayesian_config::{BayesianConfig, BayesianConfigBuilder};
let matrix = vec![vec![-0.01, -2.0], vec![-2.0, -0.01]];
let config: BayesianConfig = BayesianConfigBuilder::default()
    .max_runlength(2)
    .probability_matrices([matrix.clone(), matrix.clone(), matrix.clone(), matrix])
    .priors([vec![-0.3, -0.3], vec![-0.3, -0.3]])
    .build()
    .unwrap();
assert!(config.validate().is_ok());
```
*/
#[derive(derive_builder::Builder, Clone, Debug)]
#[builder(default)]
pub struct BayesianConfig {
    /// The name of the configuration, from the `>Name` section
    pub name: String,
    /// The number of run lengths modeled, true run lengths are in [0, max_runlength)
    pub max_runlength: usize,
    /// log10 P(observed | true) for A, C, G, T; indexed as [base][true][observed]
    pub probability_matrices: [Vec<Vec<f64>>; 4],
    /// log10 P(true) for each strand
    pub priors: [Vec<f64>; 2],
    /// If true, only observations of the consensus base are used to predict the run length
    pub ignore_non_consensus_base_repeats: bool,
    /// If true, a run length is predicted even when the consensus base is a gap
    pub predict_gap_runlengths: bool,
    /// If true, gap observations count as observed run length 0
    pub count_gaps_as_zeros: bool,
    /// How observations vote for the consensus base
    pub base_vote_weight: BaseVoteWeight
}

impl Default for BayesianConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            // tables must be provided before use
            max_runlength: 0,
            probability_matrices: Default::default(),
            priors: Default::default(),
            // other bases at this column are usually errors, not evidence for this run
            ignore_non_consensus_base_repeats: true,
            // a gap column has no run length
            predict_gap_runlengths: false,
            // gaps are treated as missing data rather than a length-0 run
            count_gaps_as_zeros: false,
            // simple majority
            base_vote_weight: BaseVoteWeight::ReadCount
        }
    }
}

/// Sections of the configuration resource
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
enum Section {
    Name,
    Prior(usize),
    Matrix(usize)
}

impl BayesianConfig {
    /// Loads the tables from a configuration file; behavior flags are left at their defaults.
    /// # Arguments
    /// * `path` - the configuration file
    /// # Errors
    /// * if the file cannot be opened or read
    /// * see `from_reader(...)`
    pub fn from_file(path: &Path) -> Result<BayesianConfig, Box<dyn std::error::Error>> {
        let file = File::open(path)
            .map_err(|e| SimpleError::new(format!("Error opening {}: {e}", path.display())))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parses the tables from a configuration resource.
    /// The resource is line based; `>Name`, `>PriorStrand0`, `>PriorStrand1`, `>A`, `>C`, `>G`, and `>T` open sections.
    /// Priors are one comma-separated row, matrices have one row per true run length.
    /// Blank lines and lines starting with `#` are ignored.
    /// # Errors
    /// * if the resource cannot be read
    /// * if a value cannot be parsed, a section is unknown, repeated, or missing
    /// * if the table shapes are inconsistent
    pub fn from_reader(reader: impl BufRead) -> Result<BayesianConfig, Box<dyn std::error::Error>> {
        let mut name: Option<String> = None;
        let mut priors: [Option<Vec<f64>>; 2] = [None, None];
        let mut probability_matrices: [Vec<Vec<f64>>; 4] = Default::default();
        let mut seen_sections: HashSet<Section> = Default::default();
        let mut section: Option<Section> = None;

        for (line_index, line) in reader.lines().enumerate() {
            let line_number = line_index + 1;
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(header) = line.strip_prefix('>') {
                let new_section = match header.trim() {
                    "Name" => Section::Name,
                    "PriorStrand0" => Section::Prior(0),
                    "PriorStrand1" => Section::Prior(1),
                    "A" => Section::Matrix(0),
                    "C" => Section::Matrix(1),
                    "G" => Section::Matrix(2),
                    "T" => Section::Matrix(3),
                    other => bail!("Line {}: unknown section {:?}", line_number, other)
                };
                if !seen_sections.insert(new_section) {
                    bail!("Line {}: section {:?} appears more than once", line_number, header.trim());
                }
                section = Some(new_section);
                continue;
            }

            match section {
                None => bail!("Line {}: data found before the first section header", line_number),
                Some(Section::Name) => {
                    if name.is_some() {
                        bail!("Line {}: the name section has more than one line", line_number);
                    }
                    name = Some(line.to_string());
                },
                Some(Section::Prior(strand)) => {
                    if priors[strand].is_some() {
                        bail!("Line {}: the prior for strand {} has more than one row", line_number, strand);
                    }
                    priors[strand] = Some(parse_row(line, line_number)?);
                },
                Some(Section::Matrix(base)) => {
                    probability_matrices[base].push(parse_row(line, line_number)?);
                }
            }
        }

        let name = match name {
            Some(n) => n,
            None => bail!("Configuration is missing the >Name section")
        };
        let [prior0, prior1] = priors;
        let priors = match (prior0, prior1) {
            (Some(p0), Some(p1)) => [p0, p1],
            _ => bail!("Configuration {} is missing a >PriorStrand0 or >PriorStrand1 section", name)
        };
        if let Some(base) = probability_matrices.iter().position(|m| m.is_empty()) {
            bail!("Configuration {} is missing the matrix for {}", name, ['A', 'C', 'G', 'T'][base]);
        }

        let config = BayesianConfig {
            name,
            max_runlength: priors[0].len(),
            probability_matrices,
            priors,
            ..Default::default()
        };
        config.validate()?;
        debug!("Loaded run-length configuration {:?} with max_runlength {}", config.name, config.max_runlength);
        Ok(config)
    }

    /// Checks that the tables match `max_runlength` and hold valid log10 probabilities.
    /// # Errors
    /// * if `max_runlength` is 0
    /// * if any prior or matrix has the wrong shape
    /// * if any value is NaN or greater than 0, including +inf
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        let n = self.max_runlength;
        if n == 0 {
            bail!("max_runlength must be at least 1");
        }

        for (strand, prior) in self.priors.iter().enumerate() {
            if prior.len() != n {
                bail!("Prior for strand {} has length {}, expected {}", strand, prior.len(), n);
            }
            if prior.iter().any(|v| v.is_nan()) {
                bail!("Prior for strand {} contains NaN", strand);
            }
            if let Some(v) = prior.iter().find(|&&v| v > 0.0) {
                bail!("Prior for strand {} contains {}, log10 probabilities must be at most 0", strand, v);
            }
        }

        for (base, matrix) in ['A', 'C', 'G', 'T'].iter().zip(self.probability_matrices.iter()) {
            if matrix.len() != n {
                bail!("Matrix for {} has {} rows, expected {}", base, matrix.len(), n);
            }
            for (true_length, row) in matrix.iter().enumerate() {
                if row.len() != n {
                    bail!("Matrix for {} row {} has {} columns, expected {}", base, true_length, row.len(), n);
                }
                if row.iter().any(|v| v.is_nan()) {
                    bail!("Matrix for {} row {} contains NaN", base, true_length);
                }
                if let Some(v) = row.iter().find(|&&v| v > 0.0) {
                    bail!("Matrix for {} row {} contains {}, log10 probabilities must be at most 0", base, true_length, v);
                }
            }
        }
        Ok(())
    }
}

/// Parses one comma-separated row of floats
fn parse_row(line: &str, line_number: usize) -> Result<Vec<f64>, SimpleError> {
    line.split(',')
        .map(|token| {
            let token = token.trim();
            token.parse::<f64>()
                .map_err(|e| SimpleError::new(format!("Line {line_number}: failed to parse {token:?} as a number: {e}")))
        })
        .collect()
}
