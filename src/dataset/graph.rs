use std::collections::{HashMap, HashSet};

use anyhow::{Result, bail};
use eframe::egui::Vec2;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Cluster,
    Word,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Cluster => "cluster",
            Self::Word => "word",
        }
    }
}

#[derive(Clone, Debug)]
pub struct NodeRecord {
    pub id: String,
    pub kind: NodeKind,
    pub text: String,
    full_text_visible: bool,
    last_position: Option<Vec2>,
}

impl NodeRecord {
    pub fn new(id: String, kind: NodeKind, text: Option<String>) -> Self {
        let text = text.filter(|text| !text.is_empty()).unwrap_or_else(|| id.clone());
        Self {
            id,
            kind,
            text,
            full_text_visible: false,
            last_position: None,
        }
    }

    /// Only word nodes carry the flag; clusters always show their full text.
    pub fn full_text_visible(&self) -> bool {
        self.kind == NodeKind::Word && self.full_text_visible
    }

    pub fn set_full_text_visible(&mut self, visible: bool) {
        self.full_text_visible = self.kind == NodeKind::Word && visible;
    }

    pub fn last_position(&self) -> Option<Vec2> {
        self.last_position
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LinkRecord {
    pub source: String,
    pub target: String,
}

impl LinkRecord {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn key(&self) -> String {
        link_key(&self.source, &self.target)
    }
}

pub fn link_key(source: &str, target: &str) -> String {
    format!("{source}-{target}")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResolvedLink {
    pub link: usize,
    pub source: usize,
    pub target: usize,
}

#[derive(Clone, Debug, Default)]
pub struct GraphStore {
    nodes: Vec<NodeRecord>,
    links: Vec<LinkRecord>,
    index_by_id: HashMap<String, usize>,
}

impl GraphStore {
    pub fn new(nodes: Vec<NodeRecord>, links: Vec<LinkRecord>) -> Result<Self> {
        let mut index_by_id = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            if index_by_id.insert(node.id.clone(), index).is_some() {
                bail!("duplicate node id `{}` in dataset", node.id);
            }
        }

        Ok(Self {
            nodes,
            links,
            index_by_id,
        })
    }

    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    #[cfg(test)]
    pub fn links(&self) -> &[LinkRecord] {
        &self.links
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&NodeRecord> {
        self.index_of(id).map(|index| &self.nodes[index])
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut NodeRecord> {
        let index = self.index_of(id)?;
        self.nodes.get_mut(index)
    }

    pub fn cluster_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.nodes
            .iter()
            .filter(|node| node.kind == NodeKind::Cluster)
            .filter(|node| seen.insert(node.id.as_str()))
            .map(|node| node.id.clone())
            .collect()
    }

    pub fn resolve_links<'a, I>(&self, links: I) -> Vec<ResolvedLink>
    where
        I: IntoIterator<Item = (usize, &'a LinkRecord)>,
    {
        links
            .into_iter()
            .filter_map(|(link_index, link)| {
                Some(ResolvedLink {
                    link: link_index,
                    source: self.index_of(&link.source)?,
                    target: self.index_of(&link.target)?,
                })
            })
            .collect()
    }

    pub fn resolve_all_links(&self) -> Vec<ResolvedLink> {
        self.resolve_links(self.links.iter().enumerate())
    }

    pub fn unresolved_links(&self) -> impl Iterator<Item = &LinkRecord> {
        self.links.iter().filter(|link| {
            !self.index_by_id.contains_key(&link.source)
                || !self.index_by_id.contains_key(&link.target)
        })
    }

    pub fn remember_position(&mut self, id: &str, position: Vec2) {
        if let Some(node) = self.node_mut(id) {
            node.last_position = Some(position);
        }
    }
}
