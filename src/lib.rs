/*!
# marker_con
This library provides the local assembly components for marker-based long read assembly: a local marker graph around one vertex, and a Bayesian run-length consensus caller.

Key benefits:
* Edge sequences are aggregated directly from the reads, so agreeing reads are grouped and the consensus sequence is the largest group
* A maximum coverage spanning tree and its longest path give a simple backbone through a noisy neighborhood
* Run lengths are called with configurable probability tables, so homopolymer errors can be modeled per base and strand

Performance notes:
* The graph borrows the marker, read, and vertex stores and only copies what it aggregates
* The run-length model is immutable after construction and can be shared between threads

# Example usage
```rust
use marker_con::local_marker_graph::LocalMarkerGraph;
use marker_con::markers::{CompressedMarker, GlobalVertexTable, MarkerTable};
use marker_con::reads::ReadStore;

// two reads that share three 3-mers, GGG - CCC - TTT
let mut reads = ReadStore::default();
reads.add_read(b"GGGACCCATTT").unwrap();
reads.add_read(b"GGGACCCATTT").unwrap();
let mut markers = MarkerTable::default();
for _read_id in 0..2 {
    markers.add_oriented_read(vec![CompressedMarker::new(42, 0), CompressedMarker::new(21, 4), CompressedMarker::new(63, 8)]);
    markers.add_oriented_read(vec![]);
}
let mut global_vertices = GlobalVertexTable::with_marker_count(markers.len());
for (vertex_id, marker_ids) in [(0, [0, 3]), (1, [1, 4]), (2, [2, 5])] {
    for marker_id in marker_ids {
        global_vertices.set_vertex(marker_id, vertex_id).unwrap();
    }
}

let mut graph = LocalMarkerGraph::new(3, &reads, &markers, &global_vertices);
let v0 = graph.add_vertex(0, 0, &[0, 3]).unwrap();
let v1 = graph.add_vertex(1, 1, &[1, 4]).unwrap();
let v2 = graph.add_vertex(2, 2, &[2, 5]).unwrap();
let e01 = graph.add_edge(v0, v1);
let e12 = graph.add_edge(v1, v2);
let e02 = graph.add_edge(v0, v2);
for e in [e01, e12, e02] {
    graph.store_edge_info(e).unwrap();
}

// the skip edge has no support because vertex 1 sits between its markers
assert_eq!(graph.edge(e02).unwrap().coverage(), 0);
assert_eq!(graph.compute_optimal_spanning_tree(), 2);
let best_path = graph.compute_optimal_spanning_tree_best_path().unwrap();
assert_eq!(best_path, vec![e01, e12]);
```
*/

/// Configuration and table loading for the run-length model
pub mod bayesian_config;
/// Run-length encoded observations at one alignment column
pub mod coverage;
/// Edge sequences and their grouping by support
pub mod edge_sequence;
/// Utility for generating examples
pub mod example_gen;
/// Graphviz output for the local marker graph
pub mod graphviz;
/// Main functionality for the local marker graph
pub mod local_marker_graph;
/// Marker storage and the global vertex table
pub mod markers;
/// Read storage and oriented read ids
pub mod reads;
/// Bayesian consensus base and run-length caller
pub mod runlength_model;
/// Maximum coverage spanning tree and its best path
pub mod spanning_tree;
