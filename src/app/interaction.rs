use eframe::egui::Vec2;
use log::debug;

use crate::dataset::{GraphStore, NodeKind};

use super::highlight::{apply_hover_emphasis, clear_hover_emphasis};
use super::physics::LayoutEngine;
use super::scene::{Scene, TextMeasure};

struct DragGesture {
    node_id: String,
    warmed: bool,
}

#[derive(Default)]
pub(super) struct InteractionController {
    expanded: Option<String>,
    drag: Option<DragGesture>,
    hovered: Option<String>,
}

impl InteractionController {
    pub(super) fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub(super) fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub(super) fn dragged(&self) -> Option<&str> {
        self.drag.as_ref().map(|drag| drag.node_id.as_str())
    }

    pub(super) fn drag_start(&mut self, scene: &mut Scene, layout: &mut LayoutEngine, id: &str) {
        let Some(position) = scene.body(id).map(|body| body.position) else {
            return;
        };

        let target = layout.config().drag_alpha_target;
        let warmed = layout.alpha_target() < target;
        if warmed {
            layout.set_alpha_target(target);
        }
        layout.resume();

        scene.pin(id, position);
        self.drag = Some(DragGesture {
            node_id: id.to_owned(),
            warmed,
        });
    }

    pub(super) fn drag_move(&mut self, scene: &mut Scene, pointer_world: Vec2) {
        if let Some(drag) = &self.drag {
            scene.pin(&drag.node_id, pointer_world);
        }
    }

    pub(super) fn drag_end(&mut self, scene: &mut Scene, layout: &mut LayoutEngine) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        if drag.warmed {
            layout.set_alpha_target(0.0);
        }
        scene.unpin(&drag.node_id);
    }

    pub(super) fn click(
        &mut self,
        store: &mut GraphStore,
        scene: &mut Scene,
        id: &str,
        measure: &dyn TextMeasure,
    ) -> Vec<String> {
        if store.node(id).map(|node| node.kind) != Some(NodeKind::Word) {
            return Vec::new();
        }

        let mut affected = Vec::new();
        if self.expanded.as_deref() == Some(id) {
            if let Some(node) = store.node_mut(id) {
                node.set_full_text_visible(false);
            }
            self.expanded = None;
            affected.push(id.to_owned());
        } else {
            if let Some(previous) = self.expanded.take() {
                if let Some(node) = store.node_mut(&previous) {
                    node.set_full_text_visible(false);
                }
                affected.push(previous);
            }
            if let Some(node) = store.node_mut(id) {
                node.set_full_text_visible(true);
            }
            self.expanded = Some(id.to_owned());
            affected.push(id.to_owned());
        }

        for affected_id in &affected {
            scene.refresh_appearance(store, affected_id, measure);
        }
        debug!("label expansion now on {:?}", self.expanded);
        affected
    }

    pub(super) fn drop_hidden_expansion(&mut self, store: &mut GraphStore, scene: &Scene) {
        let Some(id) = self.expanded.as_deref() else {
            return;
        };
        if scene.node_index(id).is_some() {
            return;
        }
        if let Some(node) = store.node_mut(id) {
            node.set_full_text_visible(false);
        }
        self.expanded = None;
    }

    pub(super) fn hover_enter(&mut self, scene: &mut Scene, id: &str) {
        if self.hovered.as_deref() == Some(id) {
            return;
        }
        clear_hover_emphasis(scene);
        if apply_hover_emphasis(scene, id) {
            self.hovered = Some(id.to_owned());
        } else {
            self.hovered = None;
        }
    }

    pub(super) fn hover_exit(&mut self, scene: &mut Scene) {
        if self.hovered.take().is_some() {
            clear_hover_emphasis(scene);
        }
    }

    pub(super) fn refresh_hover(&mut self, scene: &mut Scene) {
        clear_hover_emphasis(scene);
        if let Some(id) = self.hovered.take() {
            self.hover_enter(scene, &id);
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::super::filter::ActiveSubgraph;
    use super::super::physics::LayoutConfig;
    use super::super::render_utils::HOVER_BORDER;
    use super::super::scene::test_support::MonospaceMeasure;
    use super::*;
    use crate::dataset::{LinkRecord, NodeRecord};

    struct Fixture {
        store: GraphStore,
        scene: Scene,
        layout: LayoutEngine,
        controller: InteractionController,
    }

    fn fixture() -> Fixture {
        let mut store = GraphStore::new(
            vec![
                NodeRecord::new("C1".to_owned(), NodeKind::Cluster, None),
                NodeRecord::new(
                    "w1".to_owned(),
                    NodeKind::Word,
                    Some("abcdefghijklmnopqrst".to_owned()),
                ),
                NodeRecord::new(
                    "w2".to_owned(),
                    NodeKind::Word,
                    Some("bewilderment and more".to_owned()),
                ),
            ],
            vec![LinkRecord::new("C1", "w1"), LinkRecord::new("C1", "w2")],
        )
        .unwrap();
        let mut layout = LayoutEngine::new(LayoutConfig::default(), 800.0, 600.0);
        let mut scene = Scene::default();
        let identity = ActiveSubgraph::identity(&store);
        scene.reconcile(&mut store, &identity, &layout, &MonospaceMeasure);
        let (bodies, links) = scene.simulation_parts();
        layout.bind(bodies, links);

        Fixture {
            store,
            scene,
            layout,
            controller: InteractionController::default(),
        }
    }

    fn label(fixture: &Fixture, id: &str) -> String {
        fixture.scene.node(id).unwrap().shape.label.clone()
    }

    fn expanded_count(store: &GraphStore) -> usize {
        store
            .nodes()
            .iter()
            .filter(|node| node.full_text_visible())
            .count()
    }

    #[test]
    fn test_click_toggles_label() {
        let mut f = fixture();
        assert_eq!(label(&f, "w1"), "abcdefghijkl...");
        let collapsed_width = f.scene.node("w1").unwrap().shape.size.x;

        f.controller
            .click(&mut f.store, &mut f.scene, "w1", &MonospaceMeasure);
        assert_eq!(label(&f, "w1"), "abcdefghijklmnopqrst");
        assert_eq!(f.controller.expanded(), Some("w1"));
        assert!(f.scene.node("w1").unwrap().shape.size.x > collapsed_width);

        f.controller
            .click(&mut f.store, &mut f.scene, "w1", &MonospaceMeasure);
        assert_eq!(label(&f, "w1"), "abcdefghijkl...");
        assert_eq!(f.controller.expanded(), None);
        assert_eq!(expanded_count(&f.store), 0);
    }

    #[test]
    fn test_second_expansion_collapses_first() {
        let mut f = fixture();
        f.controller
            .click(&mut f.store, &mut f.scene, "w1", &MonospaceMeasure);
        let affected = f
            .controller
            .click(&mut f.store, &mut f.scene, "w2", &MonospaceMeasure);

        assert_eq!(affected, vec!["w1".to_owned(), "w2".to_owned()]);
        assert_eq!(f.controller.expanded(), Some("w2"));
        assert_eq!(expanded_count(&f.store), 1);
        assert_eq!(label(&f, "w1"), "abcdefghijkl...");
        assert_eq!(label(&f, "w2"), "bewilderment and more");
    }

    #[test]
    fn test_click_on_cluster_does_nothing() {
        let mut f = fixture();
        let affected = f
            .controller
            .click(&mut f.store, &mut f.scene, "C1", &MonospaceMeasure);
        assert!(affected.is_empty());
        assert_eq!(f.controller.expanded(), None);
    }

    #[test]
    fn test_click_does_not_rewarm_simulation() {
        let mut f = fixture();
        {
            let (bodies, links) = f.scene.simulation_parts();
            while f.layout.tick(bodies, links) {}
        }
        let alpha = f.layout.alpha();

        f.controller
            .click(&mut f.store, &mut f.scene, "w1", &MonospaceMeasure);
        assert!(!f.layout.is_running());
        assert_eq!(f.layout.alpha(), alpha);
        assert_eq!(f.layout.alpha_target(), 0.0);
    }

    #[test]
    fn test_drag_pins_then_releases() {
        let mut f = fixture();
        f.controller.drag_start(&mut f.scene, &mut f.layout, "w1");
        assert_eq!(f.layout.alpha_target(), 0.3);
        assert!(f.scene.body("w1").unwrap().pin.is_some());

        f.controller.drag_move(&mut f.scene, vec2(50.0, 50.0));
        {
            let (bodies, links) = f.scene.simulation_parts();
            f.layout.tick(bodies, links);
        }
        assert_eq!(f.scene.body("w1").unwrap().position, vec2(50.0, 50.0));

        f.controller.drag_end(&mut f.scene, &mut f.layout);
        assert_eq!(f.layout.alpha_target(), 0.0);
        assert!(f.scene.body("w1").unwrap().pin.is_none());

        {
            let (bodies, links) = f.scene.simulation_parts();
            for _ in 0..5 {
                f.layout.tick(bodies, links);
            }
        }
        assert_ne!(f.scene.body("w1").unwrap().position, vec2(50.0, 50.0));
    }

    #[test]
    fn test_drag_wakes_a_settled_simulation() {
        let mut f = fixture();
        {
            let (bodies, links) = f.scene.simulation_parts();
            while f.layout.tick(bodies, links) {}
        }
        f.controller.drag_start(&mut f.scene, &mut f.layout, "C1");
        assert!(f.layout.is_running());
        assert_eq!(f.controller.dragged(), Some("C1"));
    }

    #[test]
    fn test_hidden_expansion_is_collapsed() {
        let mut f = fixture();
        f.controller
            .click(&mut f.store, &mut f.scene, "w1", &MonospaceMeasure);
        f.scene
            .reconcile(&mut f.store, &ActiveSubgraph::default(), &f.layout, &MonospaceMeasure);

        f.controller.drop_hidden_expansion(&mut f.store, &f.scene);
        assert_eq!(f.controller.expanded(), None);
        assert_eq!(expanded_count(&f.store), 0);
    }

    #[test]
    fn test_hover_tracks_one_node() {
        let mut f = fixture();
        f.controller.hover_enter(&mut f.scene, "w1");
        assert_eq!(f.controller.hovered(), Some("w1"));
        assert_eq!(f.scene.node("w1").unwrap().style.border, HOVER_BORDER);

        f.controller.hover_enter(&mut f.scene, "w2");
        assert_ne!(f.scene.node("w1").unwrap().style.border, HOVER_BORDER);
        assert_eq!(f.scene.node("w1").unwrap().style.opacity, 0.2);

        f.controller.hover_exit(&mut f.scene);
        assert_eq!(f.controller.hovered(), None);
        assert!(f.scene.nodes().iter().all(|node| node.style.opacity == 1.0));
    }
}
