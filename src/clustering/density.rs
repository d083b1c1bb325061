use eframe::egui::pos2;

use crate::network::NetworkNode;

use super::Grouping;

/// Greedy radius grouping: each unvisited seed, in input order, claims every
/// unvisited node within `radius`. Claimed nodes are never revisited, even
/// when their group ends up too small to keep.
pub(super) fn group_by_density(nodes: &[NetworkNode], radius: f32, min_size: usize) -> Grouping {
    let mut grouping = Grouping::default();
    let mut visited = vec![false; nodes.len()];
    let radius = if radius.is_finite() { radius.max(0.0) } else { 0.0 };

    for seed in 0..nodes.len() {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;

        let origin = pos2(nodes[seed].x, nodes[seed].y);
        let mut group = vec![seed];
        for (candidate, node) in nodes.iter().enumerate() {
            if visited[candidate] {
                continue;
            }
            if origin.distance(pos2(node.x, node.y)) <= radius {
                visited[candidate] = true;
                group.push(candidate);
            }
        }

        grouping.push(group, min_size);
    }

    grouping
}
