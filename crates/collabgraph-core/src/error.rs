use std::fmt;
use std::io;
use std::path::PathBuf;

/// Broad class of a [`GraphError`].
///
/// Degenerate inputs to the analytics engines (empty graph, dangling
/// vertices, disconnected components) are not errors at all; they produce
/// well-defined default results. Everything that *is* an error falls into
/// one of these two classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller asked for something the graph invariants forbid.
    Validation,
    /// Writing an export artifact failed.
    Io,
}

/// Errors raised by [`GraphStore`](crate::GraphStore) operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Vertex index outside `[0, count)`.
    #[error("vertex {vertex} out of range (graph has {count} vertices)")]
    VertexOutOfRange { vertex: usize, count: usize },

    /// Edge from a vertex to itself.
    #[error("self-loop on vertex {vertex} is not allowed in a simple graph")]
    SelfLoop { vertex: usize },

    /// Edge weight that is zero, negative, or not finite.
    #[error("edge ({from}, {to}) weight must be positive and finite, got {weight}")]
    InvalidWeight { from: usize, to: usize, weight: f64 },

    /// Weight lookup on an edge that is not stored.
    #[error("no such edge ({from}, {to})")]
    EdgeNotFound { from: usize, to: usize },

    /// Storage could not grow to hold another vertex.
    #[error("cannot grow graph storage beyond {count} vertices")]
    CapacityExceeded { count: usize },

    /// GEXF export could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GraphError {
    /// Which error class this is.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::Io,
            _ => ErrorKind::Validation,
        }
    }

    /// Returns `true` for validation failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation)
    }

    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::VertexOutOfRange { .. } => "E1001",
            Self::SelfLoop { .. } => "E1002",
            Self::InvalidWeight { .. } => "E1003",
            Self::EdgeNotFound { .. } => "E1004",
            Self::CapacityExceeded { .. } => "E1005",
            Self::Io { .. } => "E5001",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => f.write_str("validation"),
            Self::Io => f.write_str("io"),
        }
    }
}
