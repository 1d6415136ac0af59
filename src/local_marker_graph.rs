/*!
This module provides the LocalMarkerGraph, a bounded-radius view of the global marker graph around one center vertex.
Vertices are groups of marker occurrences sharing a k-mer, and each edge stores the candidate sequences that reads place between its two vertices.

# Example usage
```rust
use marker_con::local_marker_graph::LocalMarkerGraph;
use marker_con::markers::{CompressedMarker, GlobalVertexTable, MarkerTable};
use marker_con::reads::ReadStore;

// one read with two 3-mers separated by "AC"
let mut reads = ReadStore::default();
reads.add_read(b"GGGACTTT").unwrap();
let mut markers = MarkerTable::default();
markers.add_oriented_read(vec![CompressedMarker::new(42, 0), CompressedMarker::new(63, 5)]);
markers.add_oriented_read(vec![]);
let mut global_vertices = GlobalVertexTable::with_marker_count(markers.len());
global_vertices.set_vertex(0, 10).unwrap();
global_vertices.set_vertex(1, 11).unwrap();

// build the graph and aggregate the edge sequence
let mut graph = LocalMarkerGraph::new(3, &reads, &markers, &global_vertices);
let v0 = graph.add_vertex(10, 0, &[0]).unwrap();
let v1 = graph.add_vertex(11, 1, &[1]).unwrap();
let e = graph.add_edge(v0, v1);
graph.store_edge_info(e).unwrap();

let edge = graph.edge(e).unwrap();
assert_eq!(edge.coverage(), 1);
assert_eq!(edge.infos()[0].sequence().to_string(), "AC");
```
*/

use log::{debug, trace};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use rustc_hash::FxHashMap as HashMap;
use simple_error::{bail, SimpleError};

use crate::edge_sequence::{group_by_sequence, EdgeInfo, EdgeSequence, EdgeSequenceGroup};
use crate::markers::{GlobalVertexTable, KmerId, MarkerId, MarkerTable, VertexId};
use crate::reads::{OrientedReadId, ReadStore};

/// Index of a vertex inside one local graph
pub type VertexIndex = NodeIndex;

/// A marker occurrence attached to a vertex
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MarkerInfo {
    pub marker_id: MarkerId,
    pub oriented_read_id: OrientedReadId,
    pub ordinal: u32
}

/// A vertex of the local marker graph
#[derive(Clone, Debug)]
pub struct MarkerGraphVertex {
    /// The global marker graph vertex id
    vertex_id: VertexId,
    /// Hop distance from the center vertex
    distance: u32,
    /// Marker occurrences, sorted by (oriented read, ordinal) by the caller
    marker_infos: Vec<MarkerInfo>
}

impl MarkerGraphVertex {
    // Getters
    pub fn vertex_id(&self) -> VertexId {
        self.vertex_id
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }

    pub fn marker_infos(&self) -> &[MarkerInfo] {
        &self.marker_infos
    }

    /// Number of marker occurrences on this vertex
    pub fn coverage(&self) -> usize {
        self.marker_infos.len()
    }
}

/// An edge of the local marker graph
#[derive(Clone, Debug, Default)]
pub struct MarkerGraphEdge {
    /// Candidate sequences with their supporting reads, largest group first
    pub(crate) infos: Vec<EdgeSequenceGroup>,
    /// Set by the optimal spanning tree computation
    pub(crate) is_spanning_tree_edge: bool,
    /// Set by the best path computation
    pub(crate) is_spanning_tree_best_path_edge: bool
}

impl MarkerGraphEdge {
    /// Total number of supporting reads across all candidate sequences
    pub fn coverage(&self) -> usize {
        self.infos.iter().map(|g| g.len()).sum()
    }

    /// Number of reads supporting the most frequent candidate sequence, 0 if there is none
    pub fn consensus(&self) -> usize {
        self.infos.first().map(|g| g.len()).unwrap_or(0)
    }

    // Getters
    pub fn infos(&self) -> &[EdgeSequenceGroup] {
        &self.infos
    }

    pub fn is_spanning_tree_edge(&self) -> bool {
        self.is_spanning_tree_edge
    }

    pub fn is_spanning_tree_best_path_edge(&self) -> bool {
        self.is_spanning_tree_best_path_edge
    }
}

/// Local marker graph built on top of read-only marker, read, and global vertex storage
#[derive(Debug)]
pub struct LocalMarkerGraph<'a> {
    /// The marker length
    k: u32,
    /// Read bases, used to extract inserted sequences
    reads: &'a ReadStore,
    /// All markers, indexed by MarkerId
    markers: &'a MarkerTable,
    /// Marker to global vertex lookup, used to find intervening vertices
    global_vertices: &'a GlobalVertexTable,
    /// The arena holding vertices and edges
    pub(crate) graph: DiGraph<MarkerGraphVertex, MarkerGraphEdge>,
    /// Global vertex id to local vertex index
    vertex_map: HashMap<VertexId, VertexIndex>
}

impl<'a> LocalMarkerGraph<'a> {
    /// Creates an empty local graph.
    /// # Arguments
    /// * `k` - the marker length
    /// * `reads` - base storage for all reads
    /// * `markers` - the marker table
    /// * `global_vertices` - the global marker to vertex lookup
    pub fn new(k: u32, reads: &'a ReadStore, markers: &'a MarkerTable, global_vertices: &'a GlobalVertexTable) -> LocalMarkerGraph<'a> {
        LocalMarkerGraph {
            k,
            reads,
            markers,
            global_vertices,
            graph: DiGraph::new(),
            vertex_map: Default::default()
        }
    }

    /// Returns the local index of a global vertex id, if it is in this graph
    pub fn find_vertex(&self, vertex_id: VertexId) -> Option<VertexIndex> {
        self.vertex_map.get(&vertex_id).copied()
    }

    /// Adds a vertex for a global vertex id.
    /// The markers are stored in the given order, which must already be sorted by (oriented read, ordinal).
    /// # Arguments
    /// * `vertex_id` - the global vertex id, must not already be present
    /// * `distance` - hop distance from the center vertex
    /// * `marker_ids` - the marker occurrences of this vertex
    /// # Errors
    /// * if the vertex id is already in the graph
    /// * if a marker id is not in the marker table
    pub fn add_vertex(&mut self, vertex_id: VertexId, distance: u32, marker_ids: &[MarkerId]) -> Result<VertexIndex, Box<dyn std::error::Error>> {
        if self.vertex_map.contains_key(&vertex_id) {
            bail!("Vertex {} is already in the local marker graph", vertex_id);
        }

        let marker_infos: Vec<MarkerInfo> = marker_ids.iter()
            .map(|&marker_id| match self.markers.find_marker_id(marker_id) {
                Some((oriented_read_id, ordinal)) => Ok(MarkerInfo {
                    marker_id,
                    oriented_read_id,
                    ordinal
                }),
                None => Err(SimpleError::new(format!("Marker {marker_id} of vertex {vertex_id} is not in the marker table")))
            })
            .collect::<Result<_, SimpleError>>()?;

        let v = self.graph.add_node(MarkerGraphVertex {
            vertex_id,
            distance,
            marker_infos
        });
        self.vertex_map.insert(vertex_id, v);
        Ok(v)
    }

    /// Adds an edge with no sequence information, see `store_edge_info(...)`
    pub fn add_edge(&mut self, v0: VertexIndex, v1: VertexIndex) -> EdgeIndex {
        self.graph.add_edge(v0, v1, MarkerGraphEdge::default())
    }

    /// Returns the k-mer shared by all markers of a vertex.
    /// # Errors
    /// * if the vertex does not exist or has no markers
    /// * if the markers of the vertex do not all have the same k-mer
    pub fn kmer_id(&self, v: VertexIndex) -> Result<KmerId, Box<dyn std::error::Error>> {
        let vertex = match self.vertex(v) {
            Some(vertex) => vertex,
            None => bail!("Vertex index {} is not in the local marker graph", v.index())
        };
        let first = match vertex.marker_infos.first() {
            Some(m) => m,
            None => bail!("Vertex {} has no markers", vertex.vertex_id)
        };

        let kmer_id = self.markers.marker(first.marker_id)?.kmer_id;
        for marker_info in vertex.marker_infos.iter() {
            let marker = self.markers.marker(marker_info.marker_id)?;
            if marker.kmer_id != kmer_id {
                bail!(
                    "Vertex {} has inconsistent k-mers: marker {} has {} but marker {} has {}",
                    vertex.vertex_id, first.marker_id, kmer_id, marker_info.marker_id, marker.kmer_id
                );
            }
        }
        Ok(kmer_id)
    }

    /// Stores sequence information in an edge, derived from the markers of its two vertices.
    /// A read only counts if it has exactly one marker on each vertex, the source ordinal is smaller,
    /// and no marker between the two belongs to a vertex of the global marker graph.
    /// # Errors
    /// * if the edge does not exist
    /// * if a marker or read lookup fails while extracting sequence
    pub fn store_edge_info(&mut self, e: EdgeIndex) -> Result<(), Box<dyn std::error::Error>> {
        let (v0, v1) = match self.graph.edge_endpoints(e) {
            Some(endpoints) => endpoints,
            None => bail!("Edge index {} is not in the local marker graph", e.index())
        };
        let infos = self.matched_edge_infos(v0, v1)?;
        self.store_edge_info_from(e, infos)
    }

    /// Stores sequence information in an edge from precomputed observations.
    /// No filtering is applied, every observation is assumed to support the edge.
    /// # Arguments
    /// * `e` - the edge to fill in
    /// * `infos` - the reads and marker ordinals that produced this edge
    /// # Errors
    /// * if the edge does not exist
    /// * if a marker or read lookup fails while extracting sequence
    pub fn store_edge_info_from(&mut self, e: EdgeIndex, infos: impl IntoIterator<Item = EdgeInfo>) -> Result<(), Box<dyn std::error::Error>> {
        let mut observations: Vec<(EdgeSequence, EdgeInfo)> = vec![];
        for info in infos {
            observations.push((self.edge_sequence(&info)?, info));
        }
        let groups = group_by_sequence(observations);

        let edge = match self.graph.edge_weight_mut(e) {
            Some(edge) => edge,
            None => bail!("Edge index {} is not in the local marker graph", e.index())
        };
        edge.infos = groups;
        debug!("Edge {}: coverage {}, consensus {}, {} candidate sequences", e.index(), edge.coverage(), edge.consensus(), edge.infos.len());
        Ok(())
    }

    /// Merge-scans the marker lists of two vertices and returns the reads that support an edge between them.
    /// Both marker lists must be sorted by oriented read.
    fn matched_edge_infos(&self, v0: VertexIndex, v1: VertexIndex) -> Result<Vec<EdgeInfo>, Box<dyn std::error::Error>> {
        let markers0 = &self.graph[v0].marker_infos;
        let markers1 = &self.graph[v1].marker_infos;

        let mut infos = vec![];
        let mut i0 = 0;
        let mut i1 = 0;
        while i0 < markers0.len() && i1 < markers1.len() {
            let oriented_read_id = markers0[i0].oriented_read_id;
            if oriented_read_id < markers1[i1].oriented_read_id {
                i0 += 1;
                continue;
            }
            if markers1[i1].oriented_read_id < oriented_read_id {
                i1 += 1;
                continue;
            }

            // same oriented read on both sides, find the end of each streak
            let streak_end0 = i0 + markers0[i0..].iter().take_while(|m| m.oriented_read_id == oriented_read_id).count();
            let streak_end1 = i1 + markers1[i1..].iter().take_while(|m| m.oriented_read_id == oriented_read_id).count();

            let marker0 = &markers0[i0];
            let marker1 = &markers1[i1];
            if streak_end0 - i0 != 1 || streak_end1 - i1 != 1 {
                trace!("Read {}: skipped, multiple markers on one vertex", oriented_read_id);
            } else if marker0.ordinal >= marker1.ordinal {
                trace!("Read {}: skipped, ordinals {} >= {}", oriented_read_id, marker0.ordinal, marker1.ordinal);
            } else if self.has_intervening_vertex(marker0.marker_id, marker1.marker_id) {
                trace!("Read {}: skipped, intervening vertex between ordinals {} and {}", oriented_read_id, marker0.ordinal, marker1.ordinal);
            } else {
                infos.push(EdgeInfo::new(oriented_read_id, marker0.ordinal, marker1.ordinal));
            }

            i0 = streak_end0;
            i1 = streak_end1;
        }
        Ok(infos)
    }

    /// Returns true if any marker strictly between the two belongs to a global vertex
    fn has_intervening_vertex(&self, marker_id0: MarkerId, marker_id1: MarkerId) -> bool {
        ((marker_id0 + 1)..marker_id1).any(|marker_id| self.global_vertices.has_vertex(marker_id))
    }

    /// Computes the sequence a single read places between the two markers of an observation.
    fn edge_sequence(&self, info: &EdgeInfo) -> Result<EdgeSequence, Box<dyn std::error::Error>> {
        let oriented_read_id = info.oriented_read_id;
        let mut positions = [0_u64; 2];
        for (position, &ordinal) in positions.iter_mut().zip(info.ordinals.iter()) {
            let marker_id = match self.markers.marker_id(oriented_read_id, ordinal) {
                Some(m) => m,
                None => bail!("Read {} has no marker with ordinal {}", oriented_read_id, ordinal)
            };
            *position = self.markers.marker(marker_id)?.position as u64;
        }

        let [position0, position1] = positions;
        let marker0_end = position0 + self.k as u64;
        let sequence = if position1 <= marker0_end {
            EdgeSequence::Overlap(u8::try_from(marker0_end - position1).unwrap_or(u8::MAX))
        } else {
            EdgeSequence::Insertion(self.reads.bases(oriented_read_id, (marker0_end as usize)..(position1 as usize))?)
        };
        Ok(sequence)
    }

    // Getters
    pub fn k(&self) -> u32 {
        self.k
    }

    pub fn markers(&self) -> &MarkerTable {
        self.markers
    }

    pub fn vertex(&self, v: VertexIndex) -> Option<&MarkerGraphVertex> {
        self.graph.node_weight(v)
    }

    pub fn edge(&self, e: EdgeIndex) -> Option<&MarkerGraphEdge> {
        self.graph.edge_weight(e)
    }

    pub fn edge_endpoints(&self, e: EdgeIndex) -> Option<(VertexIndex, VertexIndex)> {
        self.graph.edge_endpoints(e)
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn vertex_indices(&self) -> impl Iterator<Item = VertexIndex> {
        self.graph.node_indices()
    }

    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIndex> {
        self.graph.edge_indices()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use crate::markers::CompressedMarker;
    use crate::reads::Strand;

    pub(crate) const K: u32 = 3;

    /// Read 0 is TTTTTT GGG AC TTTTT; the forward strand has markers at ordinals 3 (GGG, pos 6) and 5 (pos 11) with "AC" between them.
    /// On the reverse strand, ordinals 1 (pos 2) and 2 (pos 7) flank the same two bases, which read as "GT".
    /// Read 1 has two abutting markers (pos 6 and 9).
    pub(crate) struct Fixture {
        pub(crate) reads: ReadStore,
        pub(crate) markers: MarkerTable,
        pub(crate) global_vertices: GlobalVertexTable
    }

    impl Fixture {
        pub(crate) fn new() -> Fixture {
            let mut reads = ReadStore::default();
            reads.add_read(b"TTTTTTGGGACTTTTT").unwrap();
            reads.add_read(b"TTTTTTGGGCCCTTTT").unwrap();

            let mut markers = MarkerTable::default();
            // read 0, forward: marker ids 0-5
            markers.add_oriented_read(
                [(10, 0), (11, 2), (12, 4), (20, 6), (13, 8), (21, 11)].iter()
                    .map(|&(kmer, pos)| CompressedMarker::new(kmer, pos))
                    .collect()
            );
            // read 0, reverse: marker ids 6-8
            markers.add_oriented_read(
                [(14, 0), (20, 2), (21, 7)].iter()
                    .map(|&(kmer, pos)| CompressedMarker::new(kmer, pos))
                    .collect()
            );
            // read 1, forward: marker ids 9-10
            markers.add_oriented_read(vec![CompressedMarker::new(20, 6), CompressedMarker::new(21, 9)]);
            // read 1, reverse: nothing
            markers.add_oriented_read(vec![]);

            let mut global_vertices = GlobalVertexTable::with_marker_count(markers.len());
            for marker_id in [3, 7, 9] {
                global_vertices.set_vertex(marker_id, 100).unwrap();
            }
            for marker_id in [5, 8, 10] {
                global_vertices.set_vertex(marker_id, 101).unwrap();
            }

            Fixture {
                reads,
                markers,
                global_vertices
            }
        }

        pub(crate) fn graph(&self) -> LocalMarkerGraph<'_> {
            LocalMarkerGraph::new(K, &self.reads, &self.markers, &self.global_vertices)
        }
    }

    fn forward(read_id: u32) -> OrientedReadId {
        OrientedReadId::new(read_id, Strand::Forward)
    }

    #[test]
    fn test_add_and_find_vertex() {
        let fixture = Fixture::new();
        let mut graph = fixture.graph();
        assert_eq!(graph.find_vertex(100), None);

        let v = graph.add_vertex(100, 0, &[3, 7, 9]).unwrap();
        assert_eq!(graph.find_vertex(100), Some(v));
        assert_eq!(graph.vertex_count(), 1);

        let vertex = graph.vertex(v).unwrap();
        assert_eq!(vertex.vertex_id(), 100);
        assert_eq!(vertex.marker_infos(), &[
            MarkerInfo { marker_id: 3, oriented_read_id: forward(0), ordinal: 3 },
            MarkerInfo { marker_id: 7, oriented_read_id: OrientedReadId::new(0, Strand::Reverse), ordinal: 1 },
            MarkerInfo { marker_id: 9, oriented_read_id: forward(1), ordinal: 0 },
        ]);

        // duplicates always fail and do not change the graph
        assert!(graph.add_vertex(100, 1, &[5]).is_err());
        assert_eq!(graph.vertex_count(), 1);
        assert_eq!(graph.find_vertex(100), Some(v));

        // unknown markers are rejected
        assert!(graph.add_vertex(102, 1, &[1000]).is_err());
        assert_eq!(graph.find_vertex(102), None);
    }

    #[test]
    fn test_kmer_id() {
        let fixture = Fixture::new();
        let mut graph = fixture.graph();
        let v0 = graph.add_vertex(100, 0, &[3, 7, 9]).unwrap();
        let v1 = graph.add_vertex(101, 1, &[5, 8, 10]).unwrap();
        assert_eq!(graph.kmer_id(v0).unwrap(), 20);
        assert_eq!(graph.kmer_id(v1).unwrap(), 21);

        // markers 2 and 3 have different k-mers
        let inconsistent = graph.add_vertex(200, 1, &[2, 3]).unwrap();
        let error = graph.kmer_id(inconsistent).unwrap_err();
        assert_eq!(error.to_string(), "Vertex 200 has inconsistent k-mers: marker 2 has 12 but marker 3 has 20");

        let empty = graph.add_vertex(201, 1, &[]).unwrap();
        assert!(graph.kmer_id(empty).is_err());
    }

    #[test]
    fn test_forward_insertion() {
        let fixture = Fixture::new();
        let mut graph = fixture.graph();
        let v0 = graph.add_vertex(100, 0, &[3]).unwrap();
        let v1 = graph.add_vertex(101, 1, &[5]).unwrap();
        let e = graph.add_edge(v0, v1);
        graph.store_edge_info(e).unwrap();

        let edge = graph.edge(e).unwrap();
        assert_eq!(edge.infos(), &[
            EdgeSequenceGroup::new(EdgeSequence::Insertion(b"AC".to_vec()), vec![EdgeInfo::new(forward(0), 3, 5)])
        ]);
        assert_eq!(edge.coverage(), 1);
        assert_eq!(edge.consensus(), 1);
    }

    #[test]
    fn test_reverse_insertion() {
        let fixture = Fixture::new();
        let mut graph = fixture.graph();
        let v0 = graph.add_vertex(100, 0, &[7]).unwrap();
        let v1 = graph.add_vertex(101, 1, &[8]).unwrap();
        let e = graph.add_edge(v0, v1);
        graph.store_edge_info(e).unwrap();

        let reverse = OrientedReadId::new(0, Strand::Reverse);
        assert_eq!(graph.edge(e).unwrap().infos(), &[
            EdgeSequenceGroup::new(EdgeSequence::Insertion(b"GT".to_vec()), vec![EdgeInfo::new(reverse, 1, 2)])
        ]);
    }

    #[test]
    fn test_all_reads_grouped() {
        let fixture = Fixture::new();
        let mut graph = fixture.graph();
        let v0 = graph.add_vertex(100, 0, &[3, 7, 9]).unwrap();
        let v1 = graph.add_vertex(101, 1, &[5, 8, 10]).unwrap();
        let e = graph.add_edge(v0, v1);
        graph.store_edge_info(e).unwrap();

        // three singleton groups, tied on size so they come out in sequence order
        let edge = graph.edge(e).unwrap();
        let sequences: Vec<EdgeSequence> = edge.infos().iter().map(|g| g.sequence().clone()).collect();
        assert_eq!(sequences, vec![
            EdgeSequence::Overlap(0),
            EdgeSequence::Insertion(b"AC".to_vec()),
            EdgeSequence::Insertion(b"GT".to_vec()),
        ]);
        assert_eq!(edge.coverage(), 3);
        assert_eq!(edge.consensus(), 1);
    }

    #[test]
    fn test_intervening_vertex() {
        let mut fixture = Fixture::new();
        // marker 4 sits between ordinals 3 and 5 on read 0
        fixture.global_vertices.set_vertex(4, 102).unwrap();

        let mut graph = fixture.graph();
        let v0 = graph.add_vertex(100, 0, &[3, 9]).unwrap();
        let v1 = graph.add_vertex(101, 1, &[5, 10]).unwrap();
        let e = graph.add_edge(v0, v1);
        graph.store_edge_info(e).unwrap();

        assert_eq!(graph.edge(e).unwrap().infos(), &[
            EdgeSequenceGroup::new(EdgeSequence::Overlap(0), vec![EdgeInfo::new(forward(1), 0, 1)])
        ]);
    }

    #[test]
    fn test_rejected_reads() {
        let fixture = Fixture::new();
        let mut graph = fixture.graph();

        // read 0 has a streak of two markers on the source vertex
        let v0 = graph.add_vertex(100, 0, &[2, 3]).unwrap();
        let v1 = graph.add_vertex(101, 1, &[5]).unwrap();
        let e = graph.add_edge(v0, v1);
        graph.store_edge_info(e).unwrap();
        let edge = graph.edge(e).unwrap();
        assert!(edge.infos().is_empty());
        assert_eq!(edge.coverage(), 0);
        assert_eq!(edge.consensus(), 0);

        // backwards edge, the source ordinal is larger
        let v2 = graph.add_vertex(102, 1, &[3]).unwrap();
        let backwards = graph.add_edge(v1, v2);
        graph.store_edge_info(backwards).unwrap();
        assert_eq!(graph.edge(backwards).unwrap().coverage(), 0);
    }

    #[test]
    fn test_precomputed_infos() {
        let fixture = Fixture::new();
        let mut graph = fixture.graph();
        let v0 = graph.add_vertex(100, 0, &[3, 9]).unwrap();
        let v1 = graph.add_vertex(101, 1, &[5, 10]).unwrap();
        let e = graph.add_edge(v0, v1);
        graph.store_edge_info_from(e, vec![
            EdgeInfo::new(forward(1), 0, 1),
            EdgeInfo::new(forward(0), 3, 5),
            EdgeInfo::new(forward(1), 0, 1),
        ]).unwrap();

        assert_eq!(graph.edge(e).unwrap().infos(), &[
            EdgeSequenceGroup::new(EdgeSequence::Overlap(0), vec![EdgeInfo::new(forward(1), 0, 1), EdgeInfo::new(forward(1), 0, 1)]),
            EdgeSequenceGroup::new(EdgeSequence::Insertion(b"AC".to_vec()), vec![EdgeInfo::new(forward(0), 3, 5)]),
        ]);

        // an ordinal past the end of the read is an error
        assert!(graph.store_edge_info_from(e, vec![EdgeInfo::new(forward(1), 0, 7)]).is_err());
    }

    #[test]
    fn test_overlap_saturates() {
        let reads = ReadStore::default();
        let mut markers = MarkerTable::default();
        markers.add_oriented_read(vec![CompressedMarker::new(0, 0), CompressedMarker::new(0, 1), CompressedMarker::new(0, 290)]);
        let global_vertices = GlobalVertexTable::with_marker_count(markers.len());

        let mut graph = LocalMarkerGraph::new(300, &reads, &markers, &global_vertices);
        let v0 = graph.add_vertex(0, 0, &[0]).unwrap();
        let v1 = graph.add_vertex(1, 1, &[1]).unwrap();
        let v2 = graph.add_vertex(2, 1, &[2]).unwrap();
        let e01 = graph.add_edge(v0, v1);
        let e02 = graph.add_edge(v0, v2);
        graph.store_edge_info(e01).unwrap();
        graph.store_edge_info(e02).unwrap();

        // 299 overlapping bases do not fit, 10 do
        assert_eq!(graph.edge(e01).unwrap().infos()[0].sequence(), &EdgeSequence::Overlap(255));
        assert_eq!(graph.edge(e02).unwrap().infos()[0].sequence(), &EdgeSequence::Overlap(10));
    }
}
