use eframe::egui::{Pos2, Vec2, pos2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;

use crate::network::NetworkNode;

use super::Grouping;

const ITERATIONS: usize = 10;

pub(super) fn cluster_count(node_count: usize) -> usize {
    (node_count / 10).max(2).min(node_count)
}

fn nearest_centroid(point: Pos2, centroids: &[Pos2]) -> usize {
    centroids
        .iter()
        .enumerate()
        .map(|(index, centroid)| (index, centroid.distance_sq(point)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
        .unwrap_or(0)
}

/// Fixed-iteration k-means over node positions; edges play no part.
pub(super) fn group_by_centroids(nodes: &[NetworkNode], seed: u64) -> Grouping {
    let k = cluster_count(nodes.len());
    if k == 0 {
        return Grouping::default();
    }

    let points = nodes
        .iter()
        .map(|node| pos2(node.x, node.y))
        .collect::<Vec<_>>();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut centroids = index::sample(&mut rng, points.len(), k)
        .into_iter()
        .map(|sampled| points[sampled])
        .collect::<Vec<_>>();
    let mut assignment = vec![0usize; points.len()];

    for _ in 0..ITERATIONS {
        for (slot, point) in assignment.iter_mut().zip(&points) {
            *slot = nearest_centroid(*point, &centroids);
        }

        let mut sums = vec![Vec2::ZERO; k];
        let mut counts = vec![0usize; k];
        for (cluster, point) in assignment.iter().zip(&points) {
            sums[*cluster] += point.to_vec2();
            counts[*cluster] += 1;
        }

        for ((centroid, sum), count) in centroids.iter_mut().zip(&sums).zip(&counts) {
            if *count > 0 {
                *centroid = (*sum / *count as f32).to_pos2();
            }
        }
    }

    let mut groups = vec![Vec::new(); k];
    for (node_index, cluster) in assignment.iter().enumerate() {
        groups[*cluster].push(node_index);
    }

    Grouping {
        kept: groups.into_iter().filter(|group| !group.is_empty()).collect(),
        filtered: Vec::new(),
    }
}
