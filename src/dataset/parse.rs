use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use super::graph::{GraphStore, LinkRecord, NodeKind, NodeRecord};

#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default)]
    links: Vec<RawLink>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: Value,
    #[serde(rename = "type")]
    kind: NodeKind,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    source: Value,
    target: Value,
}

fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

pub(super) fn strip_script_wrapper(raw: &str) -> &str {
    let trimmed = raw.trim();
    let is_script = ["const ", "let ", "var "]
        .iter()
        .any(|keyword| trimmed.starts_with(keyword));

    let body = if is_script {
        trimmed
            .split_once('=')
            .map(|(_, rest)| rest)
            .unwrap_or(trimmed)
    } else {
        trimmed
    };

    body.trim().trim_end_matches(';').trim_end()
}

pub fn parse_dataset(raw: &str) -> Result<GraphStore> {
    let body = strip_script_wrapper(raw);
    let parsed: RawDataset = serde_json::from_str(body).context("invalid graph dataset JSON")?;

    let mut nodes = Vec::with_capacity(parsed.nodes.len());
    for (position, raw_node) in parsed.nodes.into_iter().enumerate() {
        let id = id_from_value(&raw_node.id)
            .ok_or_else(|| anyhow!("node #{position} has a non-scalar id: {}", raw_node.id))?;
        nodes.push(NodeRecord::new(id, raw_node.kind, raw_node.text));
    }

    let mut links = Vec::with_capacity(parsed.links.len());
    for (position, raw_link) in parsed.links.into_iter().enumerate() {
        let (Some(source), Some(target)) = (
            id_from_value(&raw_link.source),
            id_from_value(&raw_link.target),
        ) else {
            return Err(anyhow!("link #{position} has a non-scalar endpoint"));
        };
        links.push(LinkRecord::new(source, target));
    }

    GraphStore::new(nodes, links)
}
