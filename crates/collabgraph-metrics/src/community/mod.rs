//! Community detection and inter-community ties.
//!
//! [`girvan_newman`] splits the collaboration graph into groups by
//! repeatedly cutting the undirected edge that carries the most shortest
//! paths. [`find_bridging_ties`] then lists the original directed edges that
//! cross between groups: the collaborations that hold the project together.

pub mod bridging;
pub mod girvan_newman;

pub use bridging::{BridgingTie, find_bridging_ties};
pub use girvan_newman::{GirvanNewmanConfig, Partition, RemovedEdge, girvan_newman};
