use std::collections::HashSet;

use crate::dataset::{GraphStore, NodeKind, ResolvedLink};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct ClusterSelection {
    entries: Vec<(String, bool)>,
}

impl ClusterSelection {
    pub(super) fn all_selected(store: &GraphStore) -> Self {
        Self {
            entries: store
                .cluster_ids()
                .into_iter()
                .map(|id| (id, true))
                .collect(),
        }
    }

    pub(super) fn entries(&self) -> &[(String, bool)] {
        &self.entries
    }

    pub(super) fn set(&mut self, id: &str, checked: bool) -> bool {
        let Some((_, entry)) = self.entries.iter_mut().find(|(cluster, _)| cluster == id) else {
            return false;
        };
        let changed = *entry != checked;
        *entry = checked;
        changed
    }

    pub(super) fn set_all(&mut self, checked: bool) -> bool {
        let mut changed = false;
        for (_, entry) in &mut self.entries {
            changed |= *entry != checked;
            *entry = checked;
        }
        changed
    }

    pub(super) fn active_ids(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, checked)| *checked)
            .map(|(id, _)| id.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(super) struct ActiveSubgraph {
    pub(super) nodes: Vec<usize>,
    pub(super) links: Vec<ResolvedLink>,
}

impl ActiveSubgraph {
    pub(super) fn identity(store: &GraphStore) -> Self {
        Self {
            nodes: (0..store.node_count()).collect(),
            links: store.resolve_all_links(),
        }
    }

    pub(super) fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    fn include_node(&mut self, seen: &mut HashSet<usize>, index: usize) {
        if seen.insert(index) {
            self.nodes.push(index);
        }
    }
}

pub(super) fn apply_filter(store: &GraphStore, selection: &ClusterSelection) -> ActiveSubgraph {
    let active = selection.active_ids().collect::<HashSet<_>>();
    let nodes = store.nodes();

    let mut subgraph = ActiveSubgraph::default();
    let mut seen = HashSet::new();

    for (index, node) in nodes.iter().enumerate() {
        if node.kind == NodeKind::Cluster && active.contains(node.id.as_str()) {
            subgraph.include_node(&mut seen, index);
        }
    }

    for link in store.resolve_all_links() {
        let source = &nodes[link.source];
        let target = &nodes[link.target];

        let source_is_active_cluster =
            source.kind == NodeKind::Cluster && active.contains(source.id.as_str());
        let target_is_active_cluster =
            target.kind == NodeKind::Cluster && active.contains(target.id.as_str());
        let source_is_word = source.kind == NodeKind::Word;
        let target_is_word = target.kind == NodeKind::Word;

        let include = if (source_is_active_cluster && target_is_word)
            || (target_is_active_cluster && source_is_word)
        {
            // Re-check that the cluster side of the pair is itself selected.
            (source_is_word && active.contains(target.id.as_str()))
                || (target_is_word && active.contains(source.id.as_str()))
        } else {
            source_is_active_cluster && target_is_active_cluster
        };

        if include {
            subgraph.links.push(link);
            subgraph.include_node(&mut seen, link.source);
            subgraph.include_node(&mut seen, link.target);
        }
    }

    subgraph
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::dataset::{LinkRecord, NodeRecord};

    fn store(nodes: &[(&str, NodeKind)], links: &[(&str, &str)]) -> GraphStore {
        GraphStore::new(
            nodes
                .iter()
                .map(|(id, kind)| NodeRecord::new((*id).to_owned(), *kind, None))
                .collect(),
            links
                .iter()
                .map(|(source, target)| LinkRecord::new(*source, *target))
                .collect(),
        )
        .unwrap()
    }

    fn two_cluster_store() -> GraphStore {
        store(
            &[
                ("C1", NodeKind::Cluster),
                ("C2", NodeKind::Cluster),
                ("w1", NodeKind::Word),
                ("w2", NodeKind::Word),
            ],
            &[("C1", "w1"), ("C2", "w2")],
        )
    }

    fn node_ids(store: &GraphStore, subgraph: &ActiveSubgraph) -> BTreeSet<String> {
        subgraph
            .nodes
            .iter()
            .map(|&index| store.nodes()[index].id.clone())
            .collect()
    }

    fn link_keys(store: &GraphStore, subgraph: &ActiveSubgraph) -> BTreeSet<String> {
        subgraph
            .links
            .iter()
            .map(|link| store.links()[link.link].key())
            .collect()
    }

    #[test]
    fn test_selection_starts_all_checked_with_fixed_keys() {
        let store = two_cluster_store();
        let mut selection = ClusterSelection::all_selected(&store);
        assert_eq!(selection.active_ids().collect::<Vec<_>>(), vec!["C1", "C2"]);

        assert!(!selection.set("C3", false));
        assert_eq!(selection.entries().len(), 2);
        assert!(selection.set("C2", false));
        assert!(!selection.set("C2", false));
    }

    #[test]
    fn test_deselecting_one_cluster_keeps_the_other() {
        let store = two_cluster_store();
        let mut selection = ClusterSelection::all_selected(&store);
        selection.set("C2", false);

        let subgraph = apply_filter(&store, &selection);
        assert_eq!(
            node_ids(&store, &subgraph),
            BTreeSet::from(["C1".to_owned(), "w1".to_owned()])
        );
        assert_eq!(
            link_keys(&store, &subgraph),
            BTreeSet::from(["C1-w1".to_owned()])
        );
    }

    #[test]
    fn test_deselecting_everything_yields_empty_subgraph() {
        let store = two_cluster_store();
        let mut selection = ClusterSelection::all_selected(&store);
        selection.set_all(false);

        let subgraph = apply_filter(&store, &selection);
        assert!(subgraph.is_empty());
    }

    #[test]
    fn test_reselecting_reproduces_identity() {
        let store = two_cluster_store();
        let identity = ActiveSubgraph::identity(&store);

        let mut selection = ClusterSelection::all_selected(&store);
        selection.set("C1", false);
        let _ = apply_filter(&store, &selection);
        selection.set("C1", true);
        let reselected = apply_filter(&store, &selection);

        assert_eq!(node_ids(&store, &reselected), node_ids(&store, &identity));
        assert_eq!(link_keys(&store, &reselected), link_keys(&store, &identity));
    }

    #[test]
    fn test_cluster_to_cluster_links_need_both_active() {
        let store = store(
            &[
                ("C1", NodeKind::Cluster),
                ("C2", NodeKind::Cluster),
                ("w1", NodeKind::Word),
            ],
            &[("C1", "C2"), ("w1", "C1")],
        );
        let mut selection = ClusterSelection::all_selected(&store);

        let all = apply_filter(&store, &selection);
        assert!(link_keys(&store, &all).contains("C1-C2"));
        assert!(link_keys(&store, &all).contains("w1-C1"));

        selection.set("C2", false);
        let partial = apply_filter(&store, &selection);
        assert_eq!(
            link_keys(&store, &partial),
            BTreeSet::from(["w1-C1".to_owned()])
        );
    }

    #[test]
    fn test_word_to_word_and_dangling_links_are_excluded() {
        let store = store(
            &[
                ("C1", NodeKind::Cluster),
                ("w1", NodeKind::Word),
                ("w2", NodeKind::Word),
            ],
            &[("w1", "w2"), ("C1", "w1"), ("C1", "ghost")],
        );
        let selection = ClusterSelection::all_selected(&store);
        let subgraph = apply_filter(&store, &selection);

        assert_eq!(
            link_keys(&store, &subgraph),
            BTreeSet::from(["C1-w1".to_owned()])
        );
        assert!(!node_ids(&store, &subgraph).contains("w2"));
    }

    #[test]
    fn test_every_filtered_link_has_both_endpoints() {
        let store = store(
            &[
                ("C1", NodeKind::Cluster),
                ("C2", NodeKind::Cluster),
                ("C3", NodeKind::Cluster),
                ("w1", NodeKind::Word),
                ("w2", NodeKind::Word),
                ("w3", NodeKind::Word),
            ],
            &[
                ("C1", "w1"),
                ("C2", "w1"),
                ("C2", "w2"),
                ("C3", "w3"),
                ("C1", "C3"),
                ("w2", "w3"),
            ],
        );
        let ids = ["C1", "C2", "C3"];
        for mask in 0..(1 << ids.len()) {
            let mut selection = ClusterSelection::all_selected(&store);
            for (bit, id) in ids.iter().enumerate() {
                selection.set(id, mask & (1 << bit) != 0);
            }

            let subgraph = apply_filter(&store, &selection);
            let present = subgraph.nodes.iter().copied().collect::<HashSet<_>>();
            assert_eq!(present.len(), subgraph.nodes.len());
            for link in &subgraph.links {
                assert!(present.contains(&link.source));
                assert!(present.contains(&link.target));
            }
        }
    }
}
