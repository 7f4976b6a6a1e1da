use std::collections::HashSet;

use super::super::scene::Scene;

pub(super) fn collect_neighborhood(scene: &Scene, index: usize) -> HashSet<usize> {
    let mut related = HashSet::from([index]);
    for &(source, target) in scene.link_pairs() {
        if source == index {
            related.insert(target);
        }
        if target == index {
            related.insert(source);
        }
    }
    related
}
