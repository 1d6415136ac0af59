/*!
A `Coverage` is the column of observations at one alignment position, one per supporting read.
Each observation is a run-length encoded base: the base, the strand of the read, and how many times the base was repeated.
*/

use simple_error::bail;
use std::fmt;

use crate::reads::Strand;

/// A base in an alignment column, including the gap symbol
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum AlignedBase {
    A,
    C,
    G,
    T,
    /// No base was aligned here
    #[default]
    Gap
}

impl AlignedBase {
    /// All values in priority order, which is also the tie-breaking order for base votes
    pub const ALL: [AlignedBase; 5] = [AlignedBase::A, AlignedBase::C, AlignedBase::G, AlignedBase::T, AlignedBase::Gap];

    /// Parses an ASCII base, `-` is a gap
    /// # Errors
    /// * if the character is not one of ACGT-
    pub fn from_ascii(symbol: u8) -> Result<AlignedBase, Box<dyn std::error::Error>> {
        let base = match symbol {
            b'A' => AlignedBase::A,
            b'C' => AlignedBase::C,
            b'G' => AlignedBase::G,
            b'T' => AlignedBase::T,
            b'-' => AlignedBase::Gap,
            _ => bail!("Unknown aligned base {:?}", symbol as char)
        };
        Ok(base)
    }

    /// Returns the ASCII symbol for this base
    pub fn to_ascii(&self) -> u8 {
        match self {
            AlignedBase::A => b'A',
            AlignedBase::C => b'C',
            AlignedBase::G => b'G',
            AlignedBase::T => b'T',
            AlignedBase::Gap => b'-'
        }
    }

    /// Returns the Watson-Crick complement, a gap stays a gap
    pub fn complement(&self) -> AlignedBase {
        match self {
            AlignedBase::A => AlignedBase::T,
            AlignedBase::C => AlignedBase::G,
            AlignedBase::G => AlignedBase::C,
            AlignedBase::T => AlignedBase::A,
            AlignedBase::Gap => AlignedBase::Gap
        }
    }

    /// Returns the 0-3 table index for ACGT, None for a gap
    pub fn index(&self) -> Option<usize> {
        match self {
            AlignedBase::A => Some(0),
            AlignedBase::C => Some(1),
            AlignedBase::G => Some(2),
            AlignedBase::T => Some(3),
            AlignedBase::Gap => None
        }
    }

    pub fn is_gap(&self) -> bool {
        *self == AlignedBase::Gap
    }
}

impl fmt::Display for AlignedBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii() as char)
    }
}

/// One read's contribution to a column
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Observation {
    /// The observed base, expressed on the forward strand of the alignment
    pub base: AlignedBase,
    /// The strand of the read that produced this observation
    pub strand: Strand,
    /// The observed run length, 0 for gaps
    pub repeat_count: u16
}

/// All observations at one alignment position
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Coverage {
    observations: Vec<Observation>
}

impl Coverage {
    /// Adds an observation from one read.
    /// Gaps always carry a repeat count of 0, regardless of the value given.
    /// # Arguments
    /// * `base` - the aligned base
    /// * `strand` - the strand of the read
    /// * `repeat_count` - the observed run length of the base
    pub fn add_read(&mut self, base: AlignedBase, strand: Strand, repeat_count: u16) {
        let repeat_count = if base.is_gap() { 0 } else { repeat_count };
        self.observations.push(Observation {
            base,
            strand,
            repeat_count
        });
    }

    /// Returns the number of observations of a base
    pub fn base_count(&self, base: AlignedBase) -> usize {
        self.observations.iter().filter(|o| o.base == base).count()
    }

    // Getters
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

impl FromIterator<Observation> for Coverage {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Coverage {
            observations: iter.into_iter().collect()
        }
    }
}
