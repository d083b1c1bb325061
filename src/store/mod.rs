//! Single source of truth for the analysis space.
//!
//! All observable state lives in [`AnalysisSpaceState`] and changes only via
//! [`Action`]s passed through [`reduce`]. [`AnalysisStore`] owns the current
//! state, hands out revisions for new network snapshots, and memoizes the
//! derived filtered network and clustering runs.
//!
//! ```text
//! Action --> reduce(state, action) --> state'
//!                                        |
//!                       canvas, side panels, exports (read only)
//! ```

mod action;
mod reducer;
mod state;

use std::sync::Arc;

use crate::clustering::{cluster_labels, cluster_network};
use crate::network::{FilterConfig, NetworkData};

pub use action::Action;
pub use reducer::reduce;
pub use state::{AnalysisSpaceState, ClusteringKey, ClusteringSnapshot};

struct FilteredNetwork {
    revision: u64,
    filter: FilterConfig,
    data: Arc<NetworkData>,
}

#[derive(Default)]
pub struct AnalysisStore {
    state: AnalysisSpaceState,
    next_revision: u64,
    filtered: Option<FilteredNetwork>,
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AnalysisSpaceState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        log::trace!("dispatch {}", action.name());
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    /// Publishes a new network snapshot under a fresh revision.
    pub fn load_network(&mut self, network: Arc<NetworkData>) -> u64 {
        self.next_revision += 1;
        let revision = self.next_revision;
        self.dispatch(Action::SetNetworkData { network, revision });
        revision
    }

    /// The network after applying the current filter, rebuilt only when the
    /// network revision or the filter changes.
    pub fn filtered_network(&mut self) -> Arc<NetworkData> {
        if let Some(cached) = &self.filtered
            && cached.revision == self.state.network_revision
            && cached.filter == self.state.filter
        {
            return Arc::clone(&cached.data);
        }

        let data = if self.state.filter.is_passthrough() {
            Arc::clone(&self.state.network)
        } else {
            Arc::new(self.state.filter.apply(&self.state.network))
        };
        self.filtered = Some(FilteredNetwork {
            revision: self.state.network_revision,
            filter: self.state.filter.clone(),
            data: Arc::clone(&data),
        });
        data
    }

    /// Runs clustering when the network, filter or config changed since the
    /// last accepted result. Returns true when a new result was published.
    pub fn refresh_clusters(&mut self) -> bool {
        let key = self.state.clustering_key();
        if self
            .state
            .clustering
            .as_ref()
            .is_some_and(|snapshot| snapshot.key == key)
        {
            return false;
        }

        let network = self.filtered_network();
        let outcome = cluster_network(&network, &key.config);
        let labels = cluster_labels(&outcome.clusters);
        self.dispatch(Action::ClustersComputed(Arc::new(ClusteringSnapshot {
            key,
            outcome,
            labels,
        })));
        true
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Map;

    use super::*;
    use crate::clustering::ClusteringAlgorithm;
    use crate::network::{EdgeType, NetworkEdge, NetworkNode, NodeType};

    fn network(ids: &[&str], links: &[(&str, &str, f32)]) -> Arc<NetworkData> {
        let nodes = ids
            .iter()
            .map(|id| NetworkNode {
                id: (*id).to_owned(),
                x: 0.0,
                y: 0.0,
                size: 10.0,
                node_type: NodeType::Inbox,
                title: (*id).to_owned(),
                tags: vec!["shared".to_owned()],
                metadata: Map::new(),
            })
            .collect();
        let edges = links
            .iter()
            .map(|(source, target, strength)| NetworkEdge {
                id: NetworkEdge::edge_id(source, target),
                source: (*source).to_owned(),
                target: (*target).to_owned(),
                strength: *strength,
                edge_type: EdgeType::Semantic,
                metadata: Map::new(),
            })
            .collect();
        Arc::new(NetworkData::new(nodes, edges))
    }

    #[test]
    fn refresh_runs_once_per_key() {
        let mut store = AnalysisStore::new();
        store.load_network(network(&["a", "b", "c"], &[("a", "b", 0.9), ("b", "c", 0.9)]));

        assert!(store.refresh_clusters());
        assert!(!store.refresh_clusters());
        assert_eq!(store.state().clusters().len(), 1);
        assert_eq!(store.state().cluster_labels()[0].text, "shared");

        let mut config = store.state().clustering_config.clone();
        config.min_cluster_size = 4;
        store.dispatch(Action::SetClusteringConfig(config));
        assert!(store.refresh_clusters());
        assert!(store.state().clusters().is_empty());
    }

    #[test]
    fn stale_results_are_discarded() {
        let mut store = AnalysisStore::new();
        store.load_network(network(&["a", "b"], &[("a", "b", 0.9)]));
        let stale_key = store.state().clustering_key();

        store.load_network(network(&["a", "b", "c"], &[("a", "b", 0.9)]));
        store.dispatch(Action::ClustersComputed(Arc::new(ClusteringSnapshot {
            key: stale_key,
            outcome: Default::default(),
            labels: Vec::new(),
        })));
        assert!(store.state().clustering.is_none());

        assert!(store.refresh_clusters());
        assert!(store.state().current_clustering().is_some());
    }

    #[test]
    fn filtered_network_is_memoized_per_filter() {
        let mut store = AnalysisStore::new();
        store.load_network(network(&["a", "b"], &[("a", "b", 0.2)]));

        let first = store.filtered_network();
        let second = store.filtered_network();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.edge_count(), 1);

        store.dispatch(Action::SetFilter(FilterConfig {
            strength_threshold: 0.5,
            ..FilterConfig::default()
        }));
        let filtered = store.filtered_network();
        assert_eq!(filtered.edge_count(), 0);
        assert_eq!(filtered.node_count(), 2);
    }

    #[test]
    fn revisions_keep_growing_across_reset() {
        let mut store = AnalysisStore::new();
        let first = store.load_network(network(&["a"], &[]));
        store.dispatch(Action::Reset);
        let second = store.load_network(network(&["a"], &[]));
        assert!(second > first);
    }

    #[test]
    fn algorithm_switch_replaces_results() {
        let mut store = AnalysisStore::new();
        store.load_network(network(&["a", "b", "c", "d", "e"], &[]));
        store.refresh_clusters();
        assert!(store.state().clusters().is_empty());

        let config = crate::clustering::ClusteringConfig {
            algorithm: ClusteringAlgorithm::KMeans,
            ..store.state().clustering_config.clone()
        };
        store.dispatch(Action::SetClusteringConfig(config));
        store.refresh_clusters();
        assert!(!store.state().clusters().is_empty());
    }
}
