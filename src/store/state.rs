use std::collections::HashSet;
use std::sync::Arc;

use crate::clustering::{Cluster, ClusterLabel, ClusteringConfig, ClusteringOutcome};
use crate::network::{FilterConfig, NetworkData};
use crate::panel::SidePanel;
use crate::viewport::Viewport;

/// Identifies the inputs a clustering result was computed from.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusteringKey {
    pub network_revision: u64,
    pub filter: FilterConfig,
    pub config: ClusteringConfig,
}

#[derive(Clone, Debug)]
pub struct ClusteringSnapshot {
    pub key: ClusteringKey,
    pub outcome: ClusteringOutcome,
    pub labels: Vec<ClusterLabel>,
}

#[derive(Clone, Debug, Default)]
pub struct AnalysisSpaceState {
    pub network: Arc<NetworkData>,
    pub network_revision: u64,
    pub transform: Viewport,
    pub selected_node: Option<String>,
    pub highlighted_nodes: HashSet<String>,
    pub active_side_panel: Option<SidePanel>,
    pub filter: FilterConfig,
    pub clustering_config: ClusteringConfig,
    pub clustering: Option<Arc<ClusteringSnapshot>>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AnalysisSpaceState {
    pub fn clustering_key(&self) -> ClusteringKey {
        ClusteringKey {
            network_revision: self.network_revision,
            filter: self.filter.clone(),
            config: self.clustering_config.clone(),
        }
    }

    /// The clustering result, only when it matches the current inputs.
    pub fn current_clustering(&self) -> Option<&ClusteringSnapshot> {
        self.clustering
            .as_deref()
            .filter(|snapshot| snapshot.key == self.clustering_key())
    }

    pub fn clusters(&self) -> &[Cluster] {
        self.clustering
            .as_deref()
            .map(|snapshot| snapshot.outcome.clusters.as_slice())
            .unwrap_or_default()
    }

    pub fn filtered_clusters(&self) -> &[Cluster] {
        self.clustering
            .as_deref()
            .map(|snapshot| snapshot.outcome.filtered.as_slice())
            .unwrap_or_default()
    }

    pub fn cluster_labels(&self) -> &[ClusterLabel] {
        self.clustering
            .as_deref()
            .map(|snapshot| snapshot.labels.as_slice())
            .unwrap_or_default()
    }

    pub fn is_highlighted(&self, node_id: &str) -> bool {
        self.highlighted_nodes.contains(node_id)
    }
}
