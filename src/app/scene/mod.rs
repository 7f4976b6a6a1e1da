mod appearance;
mod reconcile;

use std::collections::HashMap;

use eframe::egui::{Color32, Vec2};

use crate::dataset::{GraphStore, NodeKind};

use super::physics::Body;
use super::render_utils::{DEFAULT_BORDER_WIDTH, LINK_DEFAULT, LINK_DEFAULT_OPACITY, default_border};

#[cfg(test)]
pub(super) use appearance::test_support;
pub(super) use appearance::{NodeShape, PainterMeasure, TextMeasure, node_shape};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(super) struct ElementHandle(u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct NodeStyle {
    pub(super) opacity: f32,
    pub(super) border: Color32,
    pub(super) border_width: f32,
}

impl NodeStyle {
    pub(super) fn for_kind(kind: NodeKind) -> Self {
        Self {
            opacity: 1.0,
            border: default_border(kind),
            border_width: DEFAULT_BORDER_WIDTH,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct LinkStyle {
    pub(super) opacity: f32,
    pub(super) color: Color32,
}

impl Default for LinkStyle {
    fn default() -> Self {
        Self {
            opacity: LINK_DEFAULT_OPACITY,
            color: LINK_DEFAULT,
        }
    }
}

#[derive(Clone, Debug)]
pub(super) struct NodeElement {
    pub(super) handle: ElementHandle,
    pub(super) id: String,
    pub(super) kind: NodeKind,
    pub(super) shape: NodeShape,
    pub(super) style: NodeStyle,
}

#[derive(Clone, Debug)]
pub(super) struct LinkElement {
    pub(super) handle: ElementHandle,
    pub(super) key: String,
    pub(super) source: usize,
    pub(super) target: usize,
    pub(super) style: LinkStyle,
}

#[derive(Default)]
pub(super) struct Scene {
    nodes: Vec<NodeElement>,
    bodies: Vec<Body>,
    links: Vec<LinkElement>,
    link_pairs: Vec<(usize, usize)>,
    node_index_by_id: HashMap<String, usize>,
    next_handle: u64,
}

impl Scene {
    fn allocate_handle(&mut self) -> ElementHandle {
        let handle = ElementHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    pub(super) fn nodes(&self) -> &[NodeElement] {
        &self.nodes
    }

    pub(super) fn nodes_mut(&mut self) -> &mut [NodeElement] {
        &mut self.nodes
    }

    pub(super) fn links(&self) -> &[LinkElement] {
        &self.links
    }

    pub(super) fn links_mut(&mut self) -> &mut [LinkElement] {
        &mut self.links
    }

    pub(super) fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(super) fn link_pairs(&self) -> &[(usize, usize)] {
        &self.link_pairs
    }

    pub(super) fn simulation_parts(&mut self) -> (&mut [Body], &[(usize, usize)]) {
        (&mut self.bodies, &self.link_pairs)
    }

    pub(super) fn node_index(&self, id: &str) -> Option<usize> {
        self.node_index_by_id.get(id).copied()
    }

    #[cfg(test)]
    pub(super) fn node(&self, id: &str) -> Option<&NodeElement> {
        self.node_index(id).map(|index| &self.nodes[index])
    }

    pub(super) fn body(&self, id: &str) -> Option<&Body> {
        self.node_index(id).map(|index| &self.bodies[index])
    }

    pub(super) fn position(&self, index: usize) -> Option<Vec2> {
        self.bodies.get(index).map(|body| body.position)
    }

    pub(super) fn pin(&mut self, id: &str, position: Vec2) -> bool {
        let Some(index) = self.node_index(id) else {
            return false;
        };
        self.bodies[index].pin(position);
        true
    }

    pub(super) fn unpin(&mut self, id: &str) -> bool {
        let Some(index) = self.node_index(id) else {
            return false;
        };
        self.bodies[index].unpin();
        true
    }

    pub(super) fn refresh_appearance(
        &mut self,
        store: &GraphStore,
        id: &str,
        measure: &dyn TextMeasure,
    ) -> bool {
        let (Some(index), Some(record)) = (self.node_index(id), store.node(id)) else {
            return false;
        };
        self.nodes[index].shape = node_shape(record, measure);
        true
    }

    pub(super) fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }
}
