use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use super::graph::GraphStore;
use super::parse::parse_dataset;

const SAMPLE_DATASET: &str = include_str!("../../assets/sample.json");

pub fn load_dataset(path: Option<&Path>) -> Result<GraphStore> {
    let store = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read dataset {}", path.display()))?;
            parse_dataset(&raw)
                .with_context(|| format!("failed to parse dataset {}", path.display()))?
        }
        None => parse_dataset(SAMPLE_DATASET).context("failed to parse bundled sample dataset")?,
    };

    for link in store.unresolved_links() {
        warn!(
            "link {} references a node missing from the dataset; it will not be drawn",
            link.key()
        );
    }

    info!(
        "loaded dataset: {} nodes ({} clusters), {} links",
        store.node_count(),
        store.cluster_ids().len(),
        store.link_count()
    );

    Ok(store)
}
