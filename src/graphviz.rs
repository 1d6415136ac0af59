/*!
Graphviz output for a `LocalMarkerGraph`.
Compact output draws vertices as points sized by coverage and is meant for large neighborhoods.
Detailed output labels every vertex with its k-mer and markers, and every edge with its sequence groups.
*/

use simple_error::SimpleError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::edge_sequence::EdgeSequence;
use crate::local_marker_graph::{LocalMarkerGraph, MarkerGraphEdge, MarkerGraphVertex, VertexIndex};
use crate::markers::kmer_string;

/// Longer edge sequences are not written in detailed labels
const MAX_LABEL_SEQUENCE: usize = 100;

/// Rendering settings for `LocalMarkerGraph::write_graphviz(...)`
#[derive(derive_builder::Builder, Clone, Debug)]
#[builder(default)]
pub struct GraphvizOptions {
    /// Vertices and edges below this coverage are drawn in red
    pub min_coverage: usize,
    /// Vertices at this distance are on the boundary of the neighborhood
    pub max_distance: u32,
    /// If true, write full labels instead of points
    pub detailed: bool,
    /// If true, include the global vertex id in tooltips and labels
    pub show_vertex_id: bool
}

impl Default for GraphvizOptions {
    fn default() -> Self {
        Self {
            // everything with any support is drawn normally
            min_coverage: 1,
            // typical neighborhood radius
            max_distance: 6,
            // compact output scales to bigger graphs
            detailed: false,
            show_vertex_id: false
        }
    }
}

impl<'a> LocalMarkerGraph<'a> {
    /// Writes the graph to a Graphviz file.
    /// # Arguments
    /// * `path` - the output file path
    /// * `options` - rendering settings
    /// # Errors
    /// * if the file cannot be created or written
    /// * if a vertex has inconsistent k-mers in detailed mode
    pub fn write_graphviz_file(&self, path: &Path, options: &GraphvizOptions) -> Result<(), Box<dyn std::error::Error>> {
        let file = File::create(path)
            .map_err(|e| SimpleError::new(format!("Error opening {}: {e}", path.display())))?;
        let mut writer = BufWriter::new(file);
        self.write_graphviz(&mut writer, options)?;
        writer.flush()?;
        Ok(())
    }

    /// Writes the graph in Graphviz format, vertices are named by their global vertex id.
    /// # Arguments
    /// * `writer` - the output
    /// * `options` - rendering settings
    /// # Errors
    /// * if writing fails
    /// * if a vertex has inconsistent k-mers in detailed mode
    /// * if `k` is too long to decode k-mers in detailed mode
    pub fn write_graphviz(&self, writer: &mut impl Write, options: &GraphvizOptions) -> Result<(), Box<dyn std::error::Error>> {
        writeln!(writer, "digraph G {{")?;
        writeln!(writer, "tooltip = \" \";")?;
        if options.detailed {
            writeln!(writer, "layout=dot;")?;
            writeln!(writer, "ratio=expand;")?;
            writeln!(writer, "node [fontname = \"Courier New\" shape=rectangle];")?;
            writeln!(writer, "edge [fontname = \"Courier New\"];")?;
        } else {
            writeln!(writer, "layout=sfdp;")?;
            writeln!(writer, "smoothing=triangle;")?;
            writeln!(writer, "ratio=expand;")?;
            writeln!(writer, "node [shape=point];")?;
        }

        for v in self.graph.node_indices() {
            let vertex = &self.graph[v];
            let attributes = if options.detailed {
                self.detailed_vertex_attributes(v, vertex, options)?
            } else {
                compact_vertex_attributes(vertex, options)
            };
            writeln!(writer, "{}[{attributes}];", vertex.vertex_id())?;
        }

        for e in self.graph.edge_indices() {
            let Some((v0, v1)) = self.graph.edge_endpoints(e) else {
                continue;
            };
            let edge = &self.graph[e];
            let attributes = if options.detailed {
                detailed_edge_attributes(edge, options)
            } else {
                compact_edge_attributes(edge, options)
            };
            writeln!(writer, "{}->{} [{attributes}];", self.graph[v0].vertex_id(), self.graph[v1].vertex_id())?;
        }

        writeln!(writer, "}}")?;
        Ok(())
    }

    fn detailed_vertex_attributes(&self, v: VertexIndex, vertex: &MarkerGraphVertex, options: &GraphvizOptions) -> Result<String, Box<dyn std::error::Error>> {
        let kmer = kmer_string(self.kmer_id(v)?, self.k() as usize)?;
        let color = vertex_color(vertex, options, "green");
        let mut attributes = format!(
            "style=filled fillcolor=\"{color}\" id=vertex{} tooltip=\"{}\"",
            vertex.vertex_id(), vertex_tooltip(vertex, options)
        );

        attributes.push_str(" label=<<font><table border=\"0\">");
        if options.show_vertex_id {
            attributes.push_str(&format!("<tr><td colspan=\"3\"><b>Vertex {}</b></td></tr>", vertex.vertex_id()));
        }
        attributes.push_str(&format!("<tr><td colspan=\"3\"><b>{kmer}</b></td></tr>"));
        attributes.push_str(&format!("<tr><td colspan=\"3\"><b>Coverage {}</b></td></tr>", vertex.coverage()));
        attributes.push_str(&format!("<tr><td colspan=\"3\"><b>Distance {}</b></td></tr>", vertex.distance()));
        attributes.push_str("<tr><td><b>Read</b></td><td><b>Ord</b></td><td><b>Pos</b></td></tr>");
        for marker_info in vertex.marker_infos() {
            let marker = self.markers().marker(marker_info.marker_id)?;
            attributes.push_str(&format!(
                "<tr><td align=\"right\">{}</td><td align=\"right\">{}</td><td align=\"right\"><b>{}</b></td></tr>",
                marker_info.oriented_read_id, marker_info.ordinal, marker.position
            ));
        }
        attributes.push_str("</table></font>>");
        Ok(attributes)
    }
}

fn vertex_tooltip(vertex: &MarkerGraphVertex, options: &GraphvizOptions) -> String {
    if options.show_vertex_id {
        format!("Vertex {}, coverage {}, distance {}", vertex.vertex_id(), vertex.coverage(), vertex.distance())
    } else {
        format!("Coverage {}, distance {}", vertex.coverage(), vertex.distance())
    }
}

/// Boundary vertices first, then the start vertex, then coverage
fn vertex_color(vertex: &MarkerGraphVertex, options: &GraphvizOptions, covered_color: &'static str) -> &'static str {
    if vertex.distance() == options.max_distance {
        "cyan"
    } else if vertex.distance() == 0 {
        "lightGreen"
    } else if vertex.coverage() >= options.min_coverage {
        covered_color
    } else {
        "red"
    }
}

fn compact_vertex_attributes(vertex: &MarkerGraphVertex, options: &GraphvizOptions) -> String {
    let color = vertex_color(vertex, options, "black");
    let width = 0.05 * (vertex.coverage() as f64).sqrt();
    format!(
        "id=vertex{} tooltip=\"{}\" width=\"{}\" fillcolor=\"{color}\" color=\"{color}\"",
        vertex.vertex_id(), vertex_tooltip(vertex, options), short_float(width)
    )
}

fn edge_color(edge: &MarkerGraphEdge, options: &GraphvizOptions) -> &'static str {
    if edge.is_spanning_tree_edge() {
        "violet"
    } else if edge.coverage() >= options.min_coverage {
        "black"
    } else {
        "red"
    }
}

/// Pen width scales with coverage, an unsupported edge is drawn as if it had one read
fn pen_width(edge: &MarkerGraphEdge, scale: f64) -> String {
    short_float(scale * edge.coverage().max(1) as f64)
}

fn edge_style(edge: &MarkerGraphEdge) -> &'static str {
    if edge.is_spanning_tree_edge() && !edge.is_spanning_tree_best_path_edge() {
        " style=dashed"
    } else {
        ""
    }
}

fn compact_edge_attributes(edge: &MarkerGraphEdge, options: &GraphvizOptions) -> String {
    let color = edge_color(edge, options);
    format!(
        "tooltip=\"Coverage {}, consensus {}\" fillcolor=\"{color}\" color=\"{color}\" penwidth={}{} weight={}",
        edge.coverage(), edge.consensus(), pen_width(edge, 0.2), edge_style(edge), edge.coverage()
    )
}

fn detailed_edge_attributes(edge: &MarkerGraphEdge, options: &GraphvizOptions) -> String {
    let color = edge_color(edge, options);
    let label_color = if color == "black" { "green" } else { color };
    let tooltip = format!("Coverage {}, consensus {}", edge.coverage(), edge.consensus());

    let mut attributes = format!(
        "tooltip=\"{tooltip}\" labeltooltip=\"{tooltip}\" penwidth={}{} fillcolor=\"{color}\" color=\"{color}\" weight={}",
        pen_width(edge, 0.5), edge_style(edge), edge.coverage()
    );
    attributes.push_str(&format!(
        " label=<<font color=\"black\"><table color=\"black\" bgcolor=\"{label_color}\" border=\"0\" cellborder=\"1\" cellspacing=\"0\">"
    ));
    attributes.push_str(&format!("<tr><td colspan=\"4\"><b>Coverage {}</b></td></tr>", edge.coverage()));
    attributes.push_str(&format!("<tr><td colspan=\"4\"><b>Consensus {}</b></td></tr>", edge.consensus()));
    attributes.push_str("<tr><td align=\"center\"><b>Read</b></td><td align=\"center\"><b>Ord0</b></td><td align=\"center\"><b>Ord1</b></td><td align=\"center\"><b>Seq</b></td></tr>");

    for group in edge.infos() {
        let sequence_label = match group.sequence() {
            EdgeSequence::Insertion(bases) if bases.len() > MAX_LABEL_SEQUENCE => "Too long".to_string(),
            sequence => sequence.to_string()
        };
        for (i, info) in group.infos().iter().enumerate() {
            // repeated sequences are abbreviated
            let cell = if i == 0 { sequence_label.as_str() } else { "=" };
            attributes.push_str(&format!(
                "<tr><td align=\"right\">{}</td><td align=\"right\">{}</td><td align=\"right\">{}</td><td align=\"center\"><b>{cell}</b></td></tr>",
                info.oriented_read_id, info.ordinals[0], info.ordinals[1]
            ));
        }
    }
    attributes.push_str("</table></font>> decorate=true");
    attributes
}

/// Formats with at most 4 decimals and no trailing zeros
fn short_float(value: f64) -> String {
    let formatted = format!("{value:.4}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() }
}
