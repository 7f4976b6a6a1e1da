mod graph;
mod load;
mod parse;

#[cfg(test)]
pub use graph::LinkRecord;
pub use graph::{GraphStore, NodeKind, NodeRecord, ResolvedLink, link_key};
pub use load::load_dataset;
