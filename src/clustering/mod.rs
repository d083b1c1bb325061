//! Partitioning of network nodes into clusters.
//!
//! Three interchangeable algorithms share one contract: given nodes, edges
//! and a [`ClusteringConfig`] they return groups of node indices, which are
//! then turned into [`Cluster`] values with the same metric code.
//!
//! - [`ClusteringAlgorithm::Density`] is a greedy spatial approximation of
//!   density clustering, not HDBSCAN. Seeds are visited in input order and
//!   the first seed to reach a node keeps it, so reordering the input can
//!   change the result.
//! - [`ClusteringAlgorithm::KMeans`] clusters purely by position with a
//!   fixed number of iterations and seeded centroid sampling.
//! - [`ClusteringAlgorithm::Community`] merges endpoint communities of
//!   strong edges, strongest first.

mod community;
mod density;
mod kmeans;
mod labels;
mod metrics;

use std::collections::HashMap;
use std::time::Instant;

use eframe::egui::Pos2;

use crate::network::{NetworkData, NetworkEdge, NetworkNode};

pub use labels::{ClusterLabel, LabelPosition, cluster_labels};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClusteringAlgorithm {
    Density,
    KMeans,
    #[default]
    Community,
}

impl ClusteringAlgorithm {
    pub const ALL: [ClusteringAlgorithm; 3] = [Self::Density, Self::KMeans, Self::Community];

    pub fn label(self) -> &'static str {
        match self {
            Self::Density => "Density (hdbscan)",
            Self::KMeans => "Centroid (k-means)",
            Self::Community => "Community detection",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClusteringConfig {
    pub algorithm: ClusteringAlgorithm,
    /// Edges weaker than this are ignored when `use_weight_filtering` is set.
    pub strength_threshold: f32,
    pub use_weight_filtering: bool,
    /// Whether undersized groups are shown next to the real clusters.
    pub show_filtered_clusters: bool,
    /// Spatial radius in hundreds of world units (density) or the strength
    /// an edge must exceed to merge communities (community).
    pub cluster_threshold: f32,
    pub min_cluster_size: usize,
    pub seed: u64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            algorithm: ClusteringAlgorithm::default(),
            strength_threshold: 0.3,
            use_weight_filtering: false,
            show_filtered_clusters: false,
            cluster_threshold: 0.5,
            min_cluster_size: 2,
            seed: 42,
        }
    }
}

impl ClusteringConfig {
    fn effective_min_size(&self) -> usize {
        self.min_cluster_size.max(1)
    }

    fn edge_participates(&self, edge: &NetworkEdge) -> bool {
        !self.use_weight_filtering || edge.strength >= self.strength_threshold
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
    pub id: String,
    pub name: String,
    pub nodes: Vec<NetworkNode>,
    pub center: Pos2,
    pub color: [u8; 3],
    pub size: usize,
    pub density: f32,
    pub cohesion: f32,
}

impl Cluster {
    pub fn contains(&self, node_id: &str) -> bool {
        self.nodes.iter().any(|node| node.id == node_id)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.id.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClusteringOutcome {
    pub clusters: Vec<Cluster>,
    /// Groups discarded for being smaller than `min_cluster_size`.
    pub filtered: Vec<Cluster>,
}

impl ClusteringOutcome {
    pub fn cluster_of(&self, node_id: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|cluster| cluster.contains(node_id))
    }
}

/// Node index groups produced by one algorithm run.
#[derive(Debug, Default)]
pub(crate) struct Grouping {
    pub(crate) kept: Vec<Vec<usize>>,
    pub(crate) filtered: Vec<Vec<usize>>,
}

impl Grouping {
    fn push(&mut self, group: Vec<usize>, min_size: usize) {
        if group.len() >= min_size {
            self.kept.push(group);
        } else if group.len() >= 2 {
            self.filtered.push(group);
        }
    }
}

/// Edges that participate in this run, resolved to node indices.
pub(crate) struct IndexedEdge<'a> {
    pub(crate) source: usize,
    pub(crate) target: usize,
    pub(crate) edge: &'a NetworkEdge,
}

fn index_edges<'a>(
    nodes: &[NetworkNode],
    edges: &'a [NetworkEdge],
    config: &ClusteringConfig,
) -> Vec<IndexedEdge<'a>> {
    let index_by_id = nodes
        .iter()
        .enumerate()
        .map(|(index, node)| (node.id.as_str(), index))
        .collect::<HashMap<_, _>>();

    edges
        .iter()
        .filter(|edge| config.edge_participates(edge))
        .filter_map(|edge| {
            Some(IndexedEdge {
                source: *index_by_id.get(edge.source.as_str())?,
                target: *index_by_id.get(edge.target.as_str())?,
                edge,
            })
        })
        .collect()
}

pub fn run_clustering(
    nodes: &[NetworkNode],
    edges: &[NetworkEdge],
    config: &ClusteringConfig,
) -> ClusteringOutcome {
    if nodes.is_empty() {
        return ClusteringOutcome::default();
    }

    let started = Instant::now();
    let indexed = index_edges(nodes, edges, config);
    let min_size = config.effective_min_size();

    let grouping = match config.algorithm {
        ClusteringAlgorithm::Density => {
            density::group_by_density(nodes, config.cluster_threshold * 100.0, min_size)
        }
        ClusteringAlgorithm::KMeans => kmeans::group_by_centroids(nodes, config.seed),
        ClusteringAlgorithm::Community => community::group_by_community(
            nodes.len(),
            &indexed,
            config.cluster_threshold,
            min_size,
        ),
    };

    let clusters = grouping
        .kept
        .iter()
        .enumerate()
        .map(|(index, group)| {
            metrics::build_cluster(index, "cluster", "Cluster", group, nodes, &indexed)
        })
        .collect::<Vec<_>>();
    let filtered = grouping
        .filtered
        .iter()
        .enumerate()
        .map(|(index, group)| {
            metrics::build_cluster(index, "filtered", "Filtered group", group, nodes, &indexed)
        })
        .collect::<Vec<_>>();

    log::debug!(
        "{} clustering over {} nodes produced {} clusters ({} filtered) in {:?}",
        config.algorithm.label(),
        nodes.len(),
        clusters.len(),
        filtered.len(),
        started.elapsed()
    );

    ClusteringOutcome { clusters, filtered }
}

pub fn cluster(
    nodes: &[NetworkNode],
    edges: &[NetworkEdge],
    config: &ClusteringConfig,
) -> Vec<Cluster> {
    run_clustering(nodes, edges, config).clusters
}

pub fn cluster_network(data: &NetworkData, config: &ClusteringConfig) -> ClusteringOutcome {
    run_clustering(data.nodes(), data.edges(), config)
}

#[cfg(test)]
pub(crate) mod test_support {
    use serde_json::Map;

    use crate::network::{EdgeType, NetworkEdge, NetworkNode, NodeType};

    pub(crate) fn node_at(id: &str, x: f32, y: f32) -> NetworkNode {
        NetworkNode {
            id: id.to_owned(),
            x,
            y,
            size: 10.0,
            node_type: NodeType::Insights,
            title: id.to_owned(),
            tags: Vec::new(),
            metadata: Map::new(),
        }
    }

    pub(crate) fn edge(source: &str, target: &str, strength: f32) -> NetworkEdge {
        NetworkEdge {
            id: NetworkEdge::edge_id(source, target),
            source: source.to_owned(),
            target: target.to_owned(),
            strength,
            edge_type: EdgeType::Semantic,
            metadata: Map::new(),
        }
    }
}
