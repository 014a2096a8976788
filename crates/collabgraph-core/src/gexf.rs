//! GEXF 1.2 export for external visualization tools (Gephi and friends).
//!
//! Output is line-oriented and deterministic: nodes in index order, edges
//! ordered by source then target, weights printed with Rust's round-trip
//! float formatting. Two exports of the same graph are byte-identical, which
//! keeps them diffable under version control.
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <gexf xmlns="http://www.gexf.net/1.2draft" version="1.2">
//!   <graph mode="static" defaultedgetype="directed">
//!     <attributes class="node">
//!       <attribute id="weight" title="weight" type="double" />
//!     </attributes>
//!     <nodes>
//!       <node id="0" label="Vertex 0">
//!         <attvalues><attvalue for="weight" value="1.0" /></attvalues>
//!       </node>
//!     </nodes>
//!     <edges>
//!       <edge id="0" source="0" target="1" weight="2.0" />
//!     </edges>
//!   </graph>
//! </gexf>
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::GraphError;

/// Write a graph as GEXF to `out`.
///
/// `labels[i]`, when given, names vertex `i`; otherwise vertices are
/// labelled `Vertex {i}`.
///
/// # Errors
///
/// Propagates any write error from `out`.
pub fn write<W: Write>(
    out: &mut W,
    vertex_weights: &[f64],
    adjacency: &[BTreeMap<usize, f64>],
    labels: Option<&[String]>,
) -> io::Result<()> {
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(out, r#"<gexf xmlns="http://www.gexf.net/1.2draft" version="1.2">"#)?;
    writeln!(out, r#"  <graph mode="static" defaultedgetype="directed">"#)?;
    writeln!(out, r#"    <attributes class="node">"#)?;
    writeln!(
        out,
        r#"      <attribute id="weight" title="weight" type="double" />"#
    )?;
    writeln!(out, "    </attributes>")?;

    writeln!(out, "    <nodes>")?;
    for (i, weight) in vertex_weights.iter().enumerate() {
        let label = labels
            .and_then(|names| names.get(i))
            .map_or_else(|| format!("Vertex {i}"), |name| escape(name));
        writeln!(out, r#"      <node id="{i}" label="{label}">"#)?;
        writeln!(
            out,
            r#"        <attvalues><attvalue for="weight" value="{weight:?}" /></attvalues>"#
        )?;
        writeln!(out, "      </node>")?;
    }
    writeln!(out, "    </nodes>")?;

    writeln!(out, "    <edges>")?;
    let mut edge_id = 0usize;
    for (u, row) in adjacency.iter().enumerate() {
        for (v, weight) in row {
            writeln!(
                out,
                r#"      <edge id="{edge_id}" source="{u}" target="{v}" weight="{weight:?}" />"#
            )?;
            edge_id += 1;
        }
    }
    writeln!(out, "    </edges>")?;
    writeln!(out, "  </graph>")?;
    writeln!(out, "</gexf>")?;
    Ok(())
}

/// Write a graph as GEXF to the file at `path`, replacing it if present.
///
/// # Errors
///
/// [`GraphError::Io`] carrying `path` if the file cannot be created or written.
pub fn write_file(
    path: &Path,
    vertex_weights: &[f64],
    adjacency: &[BTreeMap<usize, f64>],
    labels: Option<&[String]>,
) -> Result<(), GraphError> {
    let io_err = |source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    write(&mut out, vertex_weights, adjacency, labels).map_err(io_err)?;
    out.flush().map_err(io_err)?;

    debug!(
        path = %path.display(),
        nodes = vertex_weights.len(),
        "wrote GEXF export"
    );
    Ok(())
}

/// Escape the five XML special characters for use inside an attribute.
fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
