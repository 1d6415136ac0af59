/*!
Marker storage and the global marker-to-vertex index.
Markers are stored per oriented read in ordinal order and flattened so that a single global `MarkerId` addresses each occurrence.
Consecutive markers of one oriented read therefore have consecutive marker ids.

# Example usage
```rust
use marker_con::markers::{CompressedMarker, MarkerTable};
use marker_con::reads::{OrientedReadId, Strand};

let mut markers = MarkerTable::default();
// oriented reads must be added in order: 0-0, 0-1, 1-0, ...
markers.add_oriented_read(vec![CompressedMarker::new(5, 0), CompressedMarker::new(9, 4)]);
markers.add_oriented_read(vec![CompressedMarker::new(2, 1)]);

let reverse = OrientedReadId::new(0, Strand::Reverse);
assert_eq!(markers.marker_id(reverse, 0), Some(2));
assert_eq!(markers.find_marker_id(1), Some((OrientedReadId::new(0, Strand::Forward), 1)));
```
*/

use simple_error::bail;

use crate::reads::OrientedReadId;

/// Global index of a marker occurrence
pub type MarkerId = u64;
/// 2-bit packed k-mer, first base in the most significant bits
pub type KmerId = u32;
/// Global marker graph vertex identifier
pub type VertexId = u64;
/// The longest k-mer that fits in a `KmerId`, two bits per base
pub const MAX_KMER_LENGTH: usize = 16;

/// Sentinel used in the global vertex table for markers without a vertex
pub const INVALID_VERTEX_ID: VertexId = VertexId::MAX;

/// A marker occurrence as stored in the marker table
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct CompressedMarker {
    /// The k-mer at this marker
    pub kmer_id: KmerId,
    /// Start of the marker on the oriented read
    pub position: u32
}

impl CompressedMarker {
    /// Constructor
    pub fn new(kmer_id: KmerId, position: u32) -> CompressedMarker {
        CompressedMarker {
            kmer_id,
            position
        }
    }
}

/// Decodes a k-mer id into its bases.
/// # Arguments
/// * `kmer_id` - the packed k-mer
/// * `k` - the k-mer length
/// # Examples
/// ```rust
/// use marker_con::markers::kmer_string;
/// // 0b00_01_10_11
/// assert_eq!(kmer_string(27, 4).unwrap(), "ACGT");
/// assert!(kmer_string(27, 17).is_err());
/// ```
/// # Errors
/// * if `k` is larger than a `KmerId` can hold
pub fn kmer_string(kmer_id: KmerId, k: usize) -> Result<String, Box<dyn std::error::Error>> {
    if k > MAX_KMER_LENGTH {
        bail!("k-mer length {} is larger than the maximum of {}", k, MAX_KMER_LENGTH);
    }
    let kmer: String = (0..k)
        .map(|i| {
            let shift = 2 * (k - 1 - i);
            match (kmer_id >> shift) & 3 {
                0 => 'A',
                1 => 'C',
                2 => 'G',
                _ => 'T'
            }
        })
        .collect();
    Ok(kmer)
}

/// Random-access marker storage.
/// Oriented read `i` owns marker ids `offsets[i]..offsets[i+1]`.
#[derive(Clone, Debug)]
pub struct MarkerTable {
    /// All markers, grouped by oriented read
    markers: Vec<CompressedMarker>,
    /// Start of each oriented read's markers, with a trailing end offset
    offsets: Vec<MarkerId>
}

impl Default for MarkerTable {
    fn default() -> Self {
        Self {
            markers: vec![],
            offsets: vec![0]
        }
    }
}

impl MarkerTable {
    /// Appends the markers for the next oriented read, in ordinal order.
    /// Oriented reads are implicitly numbered by insertion order.
    /// # Arguments
    /// * `markers` - the markers of this oriented read, sorted by position
    pub fn add_oriented_read(&mut self, markers: Vec<CompressedMarker>) -> OrientedReadId {
        let oriented_read_id = OrientedReadId::from_value((self.offsets.len() - 1) as u32);
        self.markers.extend(markers);
        self.offsets.push(self.markers.len() as MarkerId);
        oriented_read_id
    }

    /// Returns the marker for a global marker id
    pub fn get(&self, marker_id: MarkerId) -> Option<&CompressedMarker> {
        self.markers.get(marker_id as usize)
    }

    /// Same as `get(...)`, but a missing marker is an error
    /// # Errors
    /// * if the marker id is out of range
    pub fn marker(&self, marker_id: MarkerId) -> Result<&CompressedMarker, Box<dyn std::error::Error>> {
        match self.get(marker_id) {
            Some(m) => Ok(m),
            None => bail!("Marker {} is not in the marker table", marker_id)
        }
    }

    /// Returns all markers of an oriented read, or an empty slice if it is unknown
    pub fn oriented_read_markers(&self, oriented_read_id: OrientedReadId) -> &[CompressedMarker] {
        let i = oriented_read_id.value() as usize;
        if i + 1 >= self.offsets.len() {
            &[]
        } else {
            &self.markers[(self.offsets[i] as usize)..(self.offsets[i + 1] as usize)]
        }
    }

    /// Returns the global marker id of an (oriented read, ordinal) pair
    pub fn marker_id(&self, oriented_read_id: OrientedReadId, ordinal: u32) -> Option<MarkerId> {
        let i = oriented_read_id.value() as usize;
        if i + 1 >= self.offsets.len() {
            return None;
        }
        let marker_id = self.offsets[i] + ordinal as MarkerId;
        if marker_id < self.offsets[i + 1] {
            Some(marker_id)
        } else {
            None
        }
    }

    /// Inverse of `marker_id(...)`, finds the oriented read and ordinal that own a marker
    pub fn find_marker_id(&self, marker_id: MarkerId) -> Option<(OrientedReadId, u32)> {
        if marker_id as usize >= self.markers.len() {
            return None;
        }
        // first offset strictly greater than the marker id, the owner is the one before it
        let upper = self.offsets.partition_point(|&o| o <= marker_id);
        let i = upper - 1;
        let ordinal = (marker_id - self.offsets[i]) as u32;
        Some((OrientedReadId::from_value(i as u32), ordinal))
    }

    /// Number of markers across all oriented reads
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Number of oriented reads that were added
    pub fn oriented_read_count(&self) -> usize {
        self.offsets.len() - 1
    }
}

/// Global index from marker id to the marker graph vertex that owns it, if any
#[derive(Clone, Debug, Default)]
pub struct GlobalVertexTable {
    /// Vertex id for each marker id, `INVALID_VERTEX_ID` if none
    vertices: Vec<VertexId>
}

impl GlobalVertexTable {
    /// Creates a table where no marker belongs to a vertex
    /// # Arguments
    /// * `marker_count` - the total number of markers
    pub fn with_marker_count(marker_count: usize) -> GlobalVertexTable {
        GlobalVertexTable {
            vertices: vec![INVALID_VERTEX_ID; marker_count]
        }
    }

    /// Assigns a marker to a vertex
    /// # Errors
    /// * if the marker id is out of range
    pub fn set_vertex(&mut self, marker_id: MarkerId, vertex_id: VertexId) -> Result<(), Box<dyn std::error::Error>> {
        match self.vertices.get_mut(marker_id as usize) {
            Some(v) => {
                *v = vertex_id;
                Ok(())
            },
            None => bail!("Marker {} is out of range for the global vertex table", marker_id)
        }
    }

    /// Returns the vertex owning a marker, None for unassigned or out-of-range markers
    pub fn vertex(&self, marker_id: MarkerId) -> Option<VertexId> {
        match self.vertices.get(marker_id as usize) {
            Some(&v) if v != INVALID_VERTEX_ID => Some(v),
            _ => None
        }
    }

    pub fn has_vertex(&self, marker_id: MarkerId) -> bool {
        self.vertex(marker_id).is_some()
    }
}

impl From<Vec<VertexId>> for GlobalVertexTable {
    fn from(vertices: Vec<VertexId>) -> Self {
        GlobalVertexTable {
            vertices
        }
    }
}
