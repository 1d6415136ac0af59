/*!
Optimal spanning tree and best path computations for the LocalMarkerGraph.
The spanning tree maximizes total edge coverage, and the best path is the longest chain of spanning tree edges, which is used as the backbone of the local graph.
*/

use itertools::Itertools;
use log::{debug, trace};
use petgraph::algo::toposort;
use petgraph::graph::EdgeIndex;
use petgraph::unionfind::UnionFind;
use petgraph::visit::{EdgeFiltered, EdgeRef};
use petgraph::Direction;
use priority_queue::PriorityQueue;
use simple_error::bail;
use std::cmp::Reverse;

use crate::local_marker_graph::{LocalMarkerGraph, VertexIndex};

/// Highest coverage first, then lowest edge index
type EdgePriority = (usize, Reverse<usize>);

/// For each vertex: the incoming tree edge on its longest chain, and the chain length in edges
type ChainEntry = (Option<EdgeIndex>, u32);

impl<'a> LocalMarkerGraph<'a> {
    /// Flags the edges of a maximum-coverage spanning forest.
    /// Edges are visited by decreasing coverage (ties by ascending edge index), and an edge is kept only if it joins two different components.
    /// Returns the number of spanning tree edges, which is the vertex count minus the number of connected components.
    pub fn compute_optimal_spanning_tree(&mut self) -> usize {
        for edge in self.graph.edge_weights_mut() {
            edge.is_spanning_tree_edge = false;
        }

        let mut pqueue: PriorityQueue<(EdgeIndex, VertexIndex, VertexIndex), EdgePriority> = PriorityQueue::new();
        for e in self.graph.edge_references() {
            pqueue.push((e.id(), e.source(), e.target()), (e.weight().coverage(), Reverse(e.id().index())));
        }

        let mut disjoint_sets: UnionFind<usize> = UnionFind::new(self.graph.node_count());
        let mut accepted = 0;
        while let Some(((e, v0, v1), (coverage, _))) = pqueue.pop() {
            // union only succeeds when the two endpoints were in separate components
            if disjoint_sets.union(v0.index(), v1.index()) {
                self.graph[e].is_spanning_tree_edge = true;
                accepted += 1;
                trace!("Spanning tree edge {} with coverage {}", e.index(), coverage);
            }
        }

        debug!("Optimal spanning tree: {} of {} edges over {} vertices", accepted, self.graph.edge_count(), self.graph.node_count());
        accepted
    }

    /// Finds the longest chain of spanning tree edges and flags it as the best path.
    /// The optimal spanning tree must already be computed; without it the path is empty.
    /// Ties between predecessors keep the lowest edge index, and ties between end points keep the lowest vertex index.
    /// Returns the path edges in order from start to end.
    /// # Errors
    /// * if the spanning tree edges contain a directed cycle
    /// * if a vertex is missing from the longest chain table
    pub fn compute_optimal_spanning_tree_best_path(&mut self) -> Result<Vec<EdgeIndex>, Box<dyn std::error::Error>> {
        for edge in self.graph.edge_weights_mut() {
            edge.is_spanning_tree_best_path_edge = false;
        }

        // topological order over only the spanning tree edges
        let sorted_vertices = {
            let spanning_tree = EdgeFiltered::from_fn(&self.graph, |e| e.weight().is_spanning_tree_edge);
            match toposort(&spanning_tree, None) {
                Ok(sorted) => sorted,
                Err(cycle) => bail!("Spanning tree has a cycle through vertex {}", self.graph[cycle.node_id()].vertex_id())
            }
        };

        // longest chain ending at each vertex, filled in topological order
        let mut vertex_table: Vec<Option<ChainEntry>> = vec![None; self.graph.node_count()];
        for &v in sorted_vertices.iter() {
            let mut best: ChainEntry = (None, 0);
            let incoming = self.graph.edges_directed(v, Direction::Incoming)
                .filter(|e| e.weight().is_spanning_tree_edge)
                .sorted_by_key(|e| e.id());
            for e in incoming {
                let distance = match vertex_table[e.source().index()] {
                    Some((_, distance)) => distance,
                    None => bail!("Vertex {} was reached before its predecessor {}", self.graph[v].vertex_id(), self.graph[e.source()].vertex_id())
                };
                if distance + 1 > best.1 {
                    best = (Some(e.id()), distance + 1);
                }
            }
            vertex_table[v.index()] = Some(best);
        }

        // the path ends at the vertex with the longest chain
        let mut last_vertex: Option<VertexIndex> = None;
        let mut last_distance = 0;
        for v in self.graph.node_indices() {
            let distance = match vertex_table[v.index()] {
                Some((_, distance)) => distance,
                None => bail!("Vertex {} is missing from the longest chain table", self.graph[v].vertex_id())
            };
            if distance > last_distance {
                last_distance = distance;
                last_vertex = Some(v);
            }
        }

        // walk back along the best predecessors
        let mut path = vec![];
        let mut current = last_vertex;
        while let Some(v) = current {
            current = match vertex_table[v.index()] {
                Some((Some(e), _)) => {
                    path.push(e);
                    match self.graph.edge_endpoints(e) {
                        Some((v0, _)) => Some(v0),
                        None => bail!("Best path edge {} is not in the graph", e.index())
                    }
                },
                Some((None, _)) => None,
                None => bail!("Vertex {} is missing from the longest chain table", self.graph[v].vertex_id())
            };
        }
        path.reverse();

        for &e in path.iter() {
            self.graph[e].is_spanning_tree_best_path_edge = true;
        }
        debug!("Optimal spanning tree best path: {} edges", path.len());
        Ok(path)
    }
}
