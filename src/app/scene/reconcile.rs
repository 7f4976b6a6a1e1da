use std::collections::{HashMap, HashSet};
use std::mem;

use crate::dataset::{GraphStore, link_key};

use super::super::filter::ActiveSubgraph;
use super::super::physics::{Body, LayoutEngine};
use super::{LinkElement, LinkStyle, NodeElement, NodeStyle, Scene, TextMeasure, node_shape};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(in crate::app) struct ReconcileReport {
    pub(in crate::app) entered: usize,
    pub(in crate::app) updated: usize,
    pub(in crate::app) exited: usize,
    pub(in crate::app) links_entered: usize,
    pub(in crate::app) links_updated: usize,
    pub(in crate::app) links_exited: usize,
    pub(in crate::app) dropped_links: usize,
}

impl Scene {
    /// Survivors keep their handle, body and style. Exiting nodes leave their
    /// last position on the store record.
    pub(in crate::app) fn reconcile(
        &mut self,
        store: &mut GraphStore,
        subgraph: &ActiveSubgraph,
        layout: &LayoutEngine,
        measure: &dyn TextMeasure,
    ) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        let prior_nodes = mem::take(&mut self.nodes);
        let prior_bodies = mem::take(&mut self.bodies);
        let mut prior = prior_nodes
            .into_iter()
            .zip(prior_bodies)
            .map(|(element, body)| (element.id.clone(), (element, body)))
            .collect::<HashMap<_, _>>();
        self.node_index_by_id.clear();

        for (position, &store_index) in subgraph.nodes.iter().enumerate() {
            let Some(record) = store.nodes().get(store_index) else {
                continue;
            };
            if self.node_index_by_id.contains_key(&record.id) {
                continue;
            }

            let shape = node_shape(record, measure);
            let (element, body) = match prior.remove(&record.id) {
                Some((mut element, body)) => {
                    element.kind = record.kind;
                    element.shape = shape;
                    report.updated += 1;
                    (element, body)
                }
                None => {
                    report.entered += 1;
                    let seed = record
                        .last_position()
                        .unwrap_or_else(|| layout.initial_position(position));
                    let element = NodeElement {
                        handle: self.allocate_handle(),
                        id: record.id.clone(),
                        kind: record.kind,
                        shape,
                        style: NodeStyle::for_kind(record.kind),
                    };
                    (element, Body::at(seed))
                }
            };

            self.node_index_by_id
                .insert(element.id.clone(), self.nodes.len());
            self.nodes.push(element);
            self.bodies.push(body);
        }

        for (id, (_, body)) in prior {
            store.remember_position(&id, body.position);
            report.exited += 1;
        }

        let mut prior_links = mem::take(&mut self.links)
            .into_iter()
            .map(|element| (element.key.clone(), element))
            .collect::<HashMap<_, _>>();
        let mut seen_keys = HashSet::new();

        for link in &subgraph.links {
            let nodes = store.nodes();
            let (Some(source_record), Some(target_record)) =
                (nodes.get(link.source), nodes.get(link.target))
            else {
                report.dropped_links += 1;
                continue;
            };
            let (Some(source), Some(target)) = (
                self.node_index(&source_record.id),
                self.node_index(&target_record.id),
            ) else {
                report.dropped_links += 1;
                continue;
            };

            let key = link_key(&source_record.id, &target_record.id);
            if !seen_keys.insert(key.clone()) {
                continue;
            }

            let element = match prior_links.remove(&key) {
                Some(mut element) => {
                    element.source = source;
                    element.target = target;
                    report.links_updated += 1;
                    element
                }
                None => {
                    report.links_entered += 1;
                    LinkElement {
                        handle: self.allocate_handle(),
                        key,
                        source,
                        target,
                        style: LinkStyle::default(),
                    }
                }
            };
            self.links.push(element);
        }
        report.links_exited = prior_links.len();

        self.link_pairs = self
            .links
            .iter()
            .map(|element| (element.source, element.target))
            .collect();

        report
    }
}
