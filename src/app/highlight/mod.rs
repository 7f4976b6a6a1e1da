mod collect;

use self::collect::collect_neighborhood;
use super::render_utils::{
    HOVER_BORDER, HOVER_BORDER_WIDTH, LINK_ACCENT, LINK_DIMMED, LINK_DIMMED_OPACITY,
    NODE_DIMMED_OPACITY,
};
use super::scene::{LinkStyle, NodeStyle, Scene};

pub(super) fn apply_hover_emphasis(scene: &mut Scene, id: &str) -> bool {
    let Some(hovered) = scene.node_index(id) else {
        return false;
    };
    let related = collect_neighborhood(scene, hovered);

    for link in scene.links_mut() {
        link.style = if related.contains(&link.source) && related.contains(&link.target) {
            LinkStyle {
                opacity: 1.0,
                color: LINK_ACCENT,
            }
        } else {
            LinkStyle {
                opacity: LINK_DIMMED_OPACITY,
                color: LINK_DIMMED,
            }
        };
    }

    for (index, node) in scene.nodes_mut().iter_mut().enumerate() {
        node.style.opacity = if related.contains(&index) {
            1.0
        } else {
            NODE_DIMMED_OPACITY
        };
        if index == hovered {
            node.style.border = HOVER_BORDER;
            node.style.border_width = HOVER_BORDER_WIDTH;
        }
    }
    true
}

pub(super) fn clear_hover_emphasis(scene: &mut Scene) {
    for link in scene.links_mut() {
        link.style = LinkStyle::default();
    }
    for node in scene.nodes_mut() {
        node.style = NodeStyle::for_kind(node.kind);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::super::filter::ActiveSubgraph;
    use super::super::physics::{LayoutConfig, LayoutEngine};
    use super::super::render_utils::{LINK_DEFAULT, LINK_DEFAULT_OPACITY, default_border};
    use super::super::scene::test_support::MonospaceMeasure;
    use super::*;
    use crate::dataset::{GraphStore, LinkRecord, NodeKind, NodeRecord};

    fn scene() -> Scene {
        let mut store = GraphStore::new(
            vec![
                NodeRecord::new("C1".to_owned(), NodeKind::Cluster, None),
                NodeRecord::new("C2".to_owned(), NodeKind::Cluster, None),
                NodeRecord::new("w1".to_owned(), NodeKind::Word, None),
                NodeRecord::new("w2".to_owned(), NodeKind::Word, None),
                NodeRecord::new("w3".to_owned(), NodeKind::Word, None),
            ],
            vec![
                LinkRecord::new("C1", "w1"),
                LinkRecord::new("C1", "w2"),
                LinkRecord::new("C2", "w3"),
                LinkRecord::new("C1", "C2"),
            ],
        )
        .unwrap();
        let layout = LayoutEngine::new(LayoutConfig::default(), 800.0, 600.0);
        let mut scene = Scene::default();
        let identity = ActiveSubgraph::identity(&store);
        scene.reconcile(&mut store, &identity, &layout, &MonospaceMeasure);
        scene
    }

    fn neighborhood(scene: &Scene, id: &str) -> HashSet<usize> {
        scene
            .node_index(id)
            .map(|index| collect_neighborhood(scene, index))
            .unwrap_or_default()
    }

    fn ids(scene: &Scene, indices: &HashSet<usize>) -> Vec<String> {
        let mut ids = indices
            .iter()
            .map(|&index| scene.nodes()[index].id.clone())
            .collect::<Vec<_>>();
        ids.sort();
        ids
    }

    #[test]
    fn test_neighborhood_is_one_hop_in_both_directions() {
        let scene = scene();
        assert_eq!(ids(&scene, &neighborhood(&scene, "w1")), vec!["C1", "w1"]);
        assert_eq!(
            ids(&scene, &neighborhood(&scene, "C1")),
            vec!["C1", "C2", "w1", "w2"]
        );
        assert!(neighborhood(&scene, "missing").is_empty());
    }

    #[test]
    fn test_neighborhood_is_symmetric() {
        let scene = scene();
        for a in scene.nodes() {
            let index_a = scene.node_index(&a.id).unwrap();
            for index_b in neighborhood(&scene, &a.id) {
                let b = &scene.nodes()[index_b].id;
                assert!(neighborhood(&scene, b).contains(&index_a));
            }
        }
    }

    #[test]
    fn test_hover_emphasis_and_restore() {
        let mut scene = scene();
        assert!(apply_hover_emphasis(&mut scene, "w1"));

        for link in scene.links() {
            if link.key == "C1-w1" {
                assert_eq!(link.style.color, LINK_ACCENT);
                assert_eq!(link.style.opacity, 1.0);
            } else {
                assert_eq!(link.style.color, LINK_DIMMED);
                assert_eq!(link.style.opacity, LINK_DIMMED_OPACITY);
            }
        }
        assert_eq!(scene.node("C1").unwrap().style.opacity, 1.0);
        assert_eq!(scene.node("w2").unwrap().style.opacity, NODE_DIMMED_OPACITY);
        assert_eq!(scene.node("w1").unwrap().style.border, HOVER_BORDER);

        clear_hover_emphasis(&mut scene);
        for link in scene.links() {
            assert_eq!(link.style.color, LINK_DEFAULT);
            assert_eq!(link.style.opacity, LINK_DEFAULT_OPACITY);
        }
        for node in scene.nodes() {
            assert_eq!(node.style.opacity, 1.0);
        }
        let w1 = scene.node("w1").unwrap();
        assert_eq!(w1.style.border, default_border(NodeKind::Word));
    }
}
