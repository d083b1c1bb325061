use std::collections::HashSet;

use eframe::egui::{Pos2, Vec2};

use crate::network::NetworkNode;

use super::{Cluster, IndexedEdge};

const PALETTE: [[u8; 3]; 10] = [
    [0x1f, 0x77, 0xb4],
    [0xff, 0x7f, 0x0e],
    [0x2c, 0xa0, 0x2c],
    [0xd6, 0x27, 0x28],
    [0x94, 0x67, 0xbd],
    [0x8c, 0x56, 0x4b],
    [0xe3, 0x77, 0xc2],
    [0x7f, 0x7f, 0x7f],
    [0xbc, 0xbd, 0x22],
    [0x17, 0xbe, 0xcf],
];

pub(super) fn palette_color(index: usize) -> [u8; 3] {
    PALETTE[index % PALETTE.len()]
}

pub(super) fn center(nodes: &[&NetworkNode]) -> Pos2 {
    if nodes.is_empty() {
        return Pos2::ZERO;
    }

    let sum = nodes
        .iter()
        .fold(Vec2::ZERO, |acc, node| acc + Vec2::new(node.x, node.y));
    (sum / nodes.len() as f32).to_pos2()
}

/// Returns `(density, cohesion)` for the member set.
pub(super) fn density_and_cohesion(members: &[usize], edges: &[IndexedEdge<'_>]) -> (f32, f32) {
    let member_set = members.iter().copied().collect::<HashSet<_>>();
    let mut pairs = HashSet::new();
    let mut strength_sum = 0.0f32;
    let mut internal_edges = 0usize;

    for indexed in edges {
        if indexed.source == indexed.target
            || !member_set.contains(&indexed.source)
            || !member_set.contains(&indexed.target)
        {
            continue;
        }

        pairs.insert((
            indexed.source.min(indexed.target),
            indexed.source.max(indexed.target),
        ));
        strength_sum += indexed.edge.strength.max(0.0);
        internal_edges += 1;
    }

    let n = member_set.len();
    let density = if n <= 1 {
        0.0
    } else {
        let possible = (n * (n - 1)) as f32 / 2.0;
        (pairs.len() as f32 / possible).clamp(0.0, 1.0)
    };
    let cohesion = if internal_edges == 0 {
        0.0
    } else {
        strength_sum / internal_edges as f32
    };

    (density, cohesion)
}

pub(super) fn build_cluster(
    index: usize,
    id_prefix: &str,
    name_prefix: &str,
    group: &[usize],
    nodes: &[NetworkNode],
    edges: &[IndexedEdge<'_>],
) -> Cluster {
    let members = group.iter().map(|&i| &nodes[i]).collect::<Vec<_>>();
    let (density, cohesion) = density_and_cohesion(group, edges);

    Cluster {
        id: format!("{id_prefix}-{index}"),
        name: format!("{name_prefix} {}", index + 1),
        center: center(&members),
        color: palette_color(index),
        size: members.len(),
        nodes: members.into_iter().cloned().collect(),
        density,
        cohesion,
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{edge, node_at};
    use super::*;

    #[test]
    fn center_is_mean_position() {
        let a = node_at("a", 0.0, 0.0);
        let b = node_at("b", 10.0, 20.0);
        assert_eq!(center(&[&a, &b]), Pos2::new(5.0, 10.0));
        assert_eq!(center(&[]), Pos2::ZERO);
    }

    #[test]
    fn trivial_clusters_have_zero_metrics() {
        assert_eq!(density_and_cohesion(&[0], &[]), (0.0, 0.0));
        assert_eq!(density_and_cohesion(&[0, 1], &[]), (0.0, 0.0));
    }

    #[test]
    fn reciprocal_edges_count_once_for_density() {
        let edges = vec![edge("a", "b", 0.4), edge("b", "a", 0.8), edge("b", "c", 1.0)];
        let indexed = edges
            .iter()
            .zip([(0, 1), (1, 0), (1, 2)])
            .map(|(edge, (source, target))| IndexedEdge {
                source,
                target,
                edge,
            })
            .collect::<Vec<_>>();

        let (density, cohesion) = density_and_cohesion(&[0, 1], &indexed);
        assert_eq!(density, 1.0);
        assert!((cohesion - 0.6).abs() < 1e-6);

        let (density, _) = density_and_cohesion(&[0, 1, 2], &indexed);
        assert!((density - 2.0 / 3.0).abs() < 1e-6);
    }
}
