/*!
Read identities and read base storage.
Reads are stored in their forward orientation, the reverse strand is produced on access by reverse-complementing.

# Example usage
```rust
use marker_con::reads::{OrientedReadId, ReadStore, Strand};

let mut reads = ReadStore::default();
let read_id = reads.add_read(b"AACGT").unwrap();

let forward = OrientedReadId::new(read_id, Strand::Forward);
let reverse = OrientedReadId::new(read_id, Strand::Reverse);
assert_eq!(reads.bases(forward, 1..4).unwrap(), b"ACG".to_vec());
assert_eq!(reads.bases(reverse, 0..3).unwrap(), b"ACG".to_vec());
```
*/

use simple_error::bail;
use std::fmt;
use std::ops::Range;

/// Index of a read in the read store
pub type ReadId = u32;
/// The largest read id that can be packed into an `OrientedReadId`
pub const MAX_READ_ID: ReadId = u32::MAX >> 1;

/// The strand of a read, the reverse strand is the reverse complement of the stored bases
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Strand {
    #[default]
    Forward,
    Reverse
}

impl Strand {
    /// Returns 0 for forward, 1 for reverse
    pub fn index(&self) -> usize {
        match self {
            Strand::Forward => 0,
            Strand::Reverse => 1
        }
    }

    /// Returns the opposite strand
    pub fn flip(&self) -> Strand {
        match self {
            Strand::Forward => Strand::Reverse,
            Strand::Reverse => Strand::Forward
        }
    }
}

/// A read paired with a strand.
/// Packed as `read_id * 2 + strand` so that sorting groups both strands of a read together.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct OrientedReadId(u32);

impl OrientedReadId {
    /// Constructor
    /// # Panics
    /// * if `read_id` is larger than `MAX_READ_ID`; ids from `ReadStore` never are
    pub fn new(read_id: ReadId, strand: Strand) -> OrientedReadId {
        assert!(read_id <= MAX_READ_ID, "read id {read_id} is larger than {MAX_READ_ID}");
        OrientedReadId((read_id << 1) | strand.index() as u32)
    }

    /// Builds from the packed value
    pub fn from_value(value: u32) -> OrientedReadId {
        OrientedReadId(value)
    }

    // Getters
    pub fn read_id(&self) -> ReadId {
        self.0 >> 1
    }

    pub fn strand(&self) -> Strand {
        if self.0 & 1 == 0 {
            Strand::Forward
        } else {
            Strand::Reverse
        }
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for OrientedReadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.read_id(), self.strand().index())
    }
}

/// Returns the Watson-Crick complement of an upper-case DNA base, anything else is returned unchanged
pub fn complement_base(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'C' => b'G',
        b'G' => b'C',
        b'T' => b'A',
        _ => base
    }
}

/// Reverse complements a DNA sequence
pub fn reverse_complement(sequence: &[u8]) -> Vec<u8> {
    sequence.iter().rev().map(|&b| complement_base(b)).collect()
}

/// Converts a read count into the id of the next read
fn next_read_id(read_count: usize) -> Result<ReadId, Box<dyn std::error::Error>> {
    match ReadId::try_from(read_count) {
        Ok(read_id) if read_id <= MAX_READ_ID => Ok(read_id),
        _ => bail!("Read store is full, read ids are limited to {}", MAX_READ_ID)
    }
}

/// Random-access base storage for all reads, indexed by ReadId
#[derive(Clone, Debug, Default)]
pub struct ReadStore {
    /// Forward-strand bases for each read, upper-case ACGT only
    reads: Vec<Vec<u8>>
}

impl ReadStore {
    /// Adds a new read and returns the assigned ReadId.
    /// # Arguments
    /// * `bases` - the forward-strand bases, must be upper-case ACGT
    /// # Errors
    /// * if any base is outside of ACGT
    /// * if the store already holds `MAX_READ_ID + 1` reads
    pub fn add_read(&mut self, bases: &[u8]) -> Result<ReadId, Box<dyn std::error::Error>> {
        if let Some(&bad) = bases.iter().find(|&&b| !matches!(b, b'A' | b'C' | b'G' | b'T')) {
            bail!("Read {} contains invalid base {:?}", self.reads.len(), bad as char);
        }
        let read_id = next_read_id(self.reads.len())?;
        self.reads.push(bases.to_vec());
        Ok(read_id)
    }

    /// Returns the number of bases in a read
    /// # Errors
    /// * if the read does not exist
    pub fn read_len(&self, read_id: ReadId) -> Result<usize, Box<dyn std::error::Error>> {
        match self.reads.get(read_id as usize) {
            Some(r) => Ok(r.len()),
            None => bail!("Read {} is not in the read store", read_id)
        }
    }

    /// Returns the bases of an oriented read in the given range of oriented positions.
    /// For the reverse strand, position `p` is the complement of forward position `len - 1 - p`.
    /// # Arguments
    /// * `oriented_read_id` - the read and strand to extract from
    /// * `positions` - the half-open range of positions on the oriented read
    /// # Errors
    /// * if the read does not exist or the range extends past the read end
    pub fn bases(&self, oriented_read_id: OrientedReadId, positions: Range<usize>) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        let read_id = oriented_read_id.read_id();
        let read = match self.reads.get(read_id as usize) {
            Some(r) => r,
            None => bail!("Read {} is not in the read store", read_id)
        };
        if positions.start > positions.end || positions.end > read.len() {
            bail!("Range {:?} is out of bounds for read {} of length {}", positions, read_id, read.len());
        }

        let bases = match oriented_read_id.strand() {
            Strand::Forward => read[positions].to_vec(),
            Strand::Reverse => {
                let read_len = read.len();
                reverse_complement(&read[(read_len - positions.end)..(read_len - positions.start)])
            }
        };
        Ok(bases)
    }

    pub fn len(&self) -> usize {
        self.reads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reads.is_empty()
    }
}
