/*!
Edge-local sequence types for the local marker graph.
Each supporting read of an edge implies an `EdgeSequence` between the two markers, and reads that agree are grouped together.
*/

use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt;

use crate::reads::OrientedReadId;

/// The sequence a single read places between the two markers of an edge.
/// The two variants never compare equal, so `Overlap(0)` (abutting markers) is distinct from any insertion.
/// Ordering puts every `Overlap` before every `Insertion`.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum EdgeSequence {
    /// The markers abut or overlap by this many bases; saturates at 255
    Overlap(u8),
    /// The bases strictly between the two markers, never empty
    Insertion(Vec<u8>)
}

impl EdgeSequence {
    /// Returns the number of overlapping bases, 0 for insertions
    pub fn overlapping_base_count(&self) -> u8 {
        match self {
            EdgeSequence::Overlap(count) => *count,
            EdgeSequence::Insertion(_) => 0
        }
    }

    /// Returns the inserted bases, empty for overlaps
    pub fn bases(&self) -> &[u8] {
        match self {
            EdgeSequence::Overlap(_) => &[],
            EdgeSequence::Insertion(bases) => bases
        }
    }
}

impl fmt::Display for EdgeSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeSequence::Overlap(count) => write!(f, "{count}"),
            EdgeSequence::Insertion(bases) => write!(f, "{}", String::from_utf8_lossy(bases))
        }
    }
}

/// One observation supporting an edge: the read and the ordinals of its markers on the two vertices
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EdgeInfo {
    pub oriented_read_id: OrientedReadId,
    pub ordinals: [u32; 2]
}

impl EdgeInfo {
    /// Constructor
    pub fn new(oriented_read_id: OrientedReadId, ordinal0: u32, ordinal1: u32) -> EdgeInfo {
        EdgeInfo {
            oriented_read_id,
            ordinals: [ordinal0, ordinal1]
        }
    }
}

/// All reads that agree on one candidate sequence for an edge
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EdgeSequenceGroup {
    /// The shared sequence
    sequence: EdgeSequence,
    /// The reads supporting it, in the order they were observed
    infos: Vec<EdgeInfo>
}

impl EdgeSequenceGroup {
    /// Constructor
    pub fn new(sequence: EdgeSequence, infos: Vec<EdgeInfo>) -> EdgeSequenceGroup {
        EdgeSequenceGroup {
            sequence,
            infos
        }
    }

    // Getters
    pub fn sequence(&self) -> &EdgeSequence {
        &self.sequence
    }

    pub fn infos(&self) -> &[EdgeInfo] {
        &self.infos
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }
}

/// Groups observations by identical sequence and orders the groups by decreasing support.
/// Groups of equal size are ordered by ascending sequence, so the output only depends on the observation contents.
/// # Arguments
/// * `observations` - the (sequence, info) pair for each accepted read
pub fn group_by_sequence(observations: impl IntoIterator<Item = (EdgeSequence, EdgeInfo)>) -> Vec<EdgeSequenceGroup> {
    let mut sequence_table: BTreeMap<EdgeSequence, Vec<EdgeInfo>> = BTreeMap::new();
    for (sequence, info) in observations {
        sequence_table.entry(sequence).or_default().push(info);
    }

    // stable sort keeps the BTreeMap key order within equal sizes
    sequence_table.into_iter()
        .map(|(sequence, infos)| EdgeSequenceGroup::new(sequence, infos))
        .sorted_by(|g1, g2| g2.len().cmp(&g1.len()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::reads::Strand;

    fn info(read_id: u32, ordinal0: u32) -> EdgeInfo {
        EdgeInfo::new(OrientedReadId::new(read_id, Strand::Forward), ordinal0, ordinal0 + 1)
    }

    #[test]
    fn test_overlap_not_insertion() {
        let abut = EdgeSequence::Overlap(0);
        let insertion = EdgeSequence::Insertion(b"A".to_vec());
        assert_ne!(abut, EdgeSequence::Insertion(vec![]));
        assert!(abut < insertion);
        assert!(EdgeSequence::Overlap(200) < insertion);
        assert_eq!(abut.overlapping_base_count(), 0);
        assert!(abut.bases().is_empty());
        assert_eq!(abut.to_string(), "0");
        assert_eq!(insertion.to_string(), "A");
    }

    #[test]
    fn test_group_order() {
        let groups = group_by_sequence(vec![
            (EdgeSequence::Insertion(b"GT".to_vec()), info(0, 1)),
            (EdgeSequence::Insertion(b"AC".to_vec()), info(1, 1)),
            (EdgeSequence::Overlap(2), info(2, 1)),
            (EdgeSequence::Insertion(b"GT".to_vec()), info(3, 1)),
        ]);

        // the largest group comes first, then ties in sequence order
        assert_eq!(groups, vec![
            EdgeSequenceGroup::new(EdgeSequence::Insertion(b"GT".to_vec()), vec![info(0, 1), info(3, 1)]),
            EdgeSequenceGroup::new(EdgeSequence::Overlap(2), vec![info(2, 1)]),
            EdgeSequenceGroup::new(EdgeSequence::Insertion(b"AC".to_vec()), vec![info(1, 1)]),
        ]);
    }

    #[test]
    fn test_group_empty() {
        let groups = group_by_sequence(vec![]);
        assert!(groups.is_empty());
    }
}
