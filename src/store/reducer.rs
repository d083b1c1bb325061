use crate::viewport::Viewport;

use super::action::Action;
use super::state::AnalysisSpaceState;

/// Pure state transition. Never mutates anything but the state it consumes.
pub fn reduce(mut state: AnalysisSpaceState, action: Action) -> AnalysisSpaceState {
    match action {
        Action::SetNetworkData { network, revision } => {
            if state
                .selected_node
                .as_deref()
                .is_some_and(|id| !network.contains(id))
            {
                state.selected_node = None;
            }
            state.highlighted_nodes.retain(|id| network.contains(id));
            state.network = network;
            state.network_revision = revision;
            state.is_loading = false;
            state.error = None;
        }
        Action::SetTransform(viewport) => {
            state.transform = Viewport::new(viewport.x, viewport.y, viewport.scale);
        }
        Action::PanBy(delta) => {
            state.transform = state.transform.panned(delta);
        }
        Action::ZoomAt { cursor, factor } => {
            state.transform = state.transform.zoomed_at(cursor, factor);
        }
        Action::SelectNode(id) => {
            state.selected_node = state.network.contains(&id).then_some(id);
        }
        Action::ClearSelection => {
            state.selected_node = None;
        }
        Action::SetHighlightedNodes(ids) => {
            state.highlighted_nodes = ids;
        }
        Action::ToggleSidePanel(panel) => {
            state.active_side_panel = if state.active_side_panel == Some(panel) {
                None
            } else {
                Some(panel)
            };
        }
        Action::SetActiveSidePanel(panel) => {
            state.active_side_panel = panel;
        }
        Action::SetFilter(filter) => {
            state.filter = filter;
        }
        Action::SetClusteringConfig(config) => {
            state.clustering_config = config;
        }
        Action::ClustersComputed(snapshot) => {
            if snapshot.key == state.clustering_key() {
                state.clustering = Some(snapshot);
            } else {
                log::debug!(
                    "discarding stale clustering result for revision {}",
                    snapshot.key.network_revision
                );
            }
        }
        Action::SetLoading(is_loading) => {
            state.is_loading = is_loading;
        }
        Action::SetError(error) => {
            state.error = error;
            state.is_loading = false;
        }
        Action::Reset => {
            state = AnalysisSpaceState::default();
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use eframe::egui::{pos2, vec2};
    use serde_json::Map;

    use super::*;
    use crate::network::{NetworkData, NetworkNode, NodeType};
    use crate::panel::SidePanel;

    fn network(ids: &[&str]) -> Arc<NetworkData> {
        Arc::new(NetworkData::new(
            ids.iter()
                .map(|id| NetworkNode {
                    id: (*id).to_owned(),
                    x: 0.0,
                    y: 0.0,
                    size: 10.0,
                    node_type: NodeType::Inbox,
                    title: String::new(),
                    tags: Vec::new(),
                    metadata: Map::new(),
                })
                .collect(),
            Vec::new(),
        ))
    }

    fn loaded(ids: &[&str]) -> AnalysisSpaceState {
        reduce(
            AnalysisSpaceState::default(),
            Action::SetNetworkData {
                network: network(ids),
                revision: 1,
            },
        )
    }

    #[test]
    fn selection_only_accepts_known_nodes() {
        let state = reduce(loaded(&["a"]), Action::SelectNode("a".to_owned()));
        assert_eq!(state.selected_node.as_deref(), Some("a"));

        let state = reduce(state, Action::SelectNode("ghost".to_owned()));
        assert_eq!(state.selected_node, None);
    }

    #[test]
    fn new_network_prunes_selection_and_highlights() {
        let state = reduce(loaded(&["a", "b"]), Action::SelectNode("a".to_owned()));
        let state = reduce(
            state,
            Action::SetHighlightedNodes(HashSet::from(["a".to_owned(), "b".to_owned()])),
        );
        let state = reduce(
            state,
            Action::SetNetworkData {
                network: network(&["b"]),
                revision: 2,
            },
        );

        assert_eq!(state.selected_node, None);
        assert_eq!(state.highlighted_nodes, HashSet::from(["b".to_owned()]));
        assert_eq!(state.network_revision, 2);
    }

    #[test]
    fn toggle_opens_switches_and_closes() {
        let state = reduce(loaded(&[]), Action::ToggleSidePanel(SidePanel::Relations));
        assert_eq!(state.active_side_panel, Some(SidePanel::Relations));
        let state = reduce(state, Action::ToggleSidePanel(SidePanel::Clustering));
        assert_eq!(state.active_side_panel, Some(SidePanel::Clustering));
        let state = reduce(state, Action::ToggleSidePanel(SidePanel::Clustering));
        assert_eq!(state.active_side_panel, None);
    }

    #[test]
    fn transform_actions_keep_scale_in_range() {
        let state = reduce(
            loaded(&[]),
            Action::SetTransform(Viewport {
                x: 1.0,
                y: 2.0,
                scale: 50.0,
            }),
        );
        assert_eq!(state.transform.scale, 3.0);

        let state = reduce(state, Action::PanBy(vec2(3.0, 3.0)));
        assert_eq!((state.transform.x, state.transform.y), (2.0, 3.0));

        let state = reduce(
            state,
            Action::ZoomAt {
                cursor: pos2(0.0, 0.0),
                factor: 0.01,
            },
        );
        assert_eq!(state.transform.scale, 0.1);
    }

    #[test]
    fn reset_restores_initial_state() {
        let state = reduce(loaded(&["a"]), Action::SelectNode("a".to_owned()));
        let state = reduce(state, Action::PanBy(vec2(50.0, 50.0)));
        let state = reduce(state, Action::SetActiveSidePanel(Some(SidePanel::View)));
        let state = reduce(state, Action::Reset);

        assert_eq!(state.transform, Viewport::default());
        assert_eq!(state.selected_node, None);
        assert_eq!(state.active_side_panel, None);
        assert!(state.network.is_empty());
        assert_eq!(state.network_revision, 0);
    }

    #[test]
    fn error_clears_loading() {
        let state = reduce(loaded(&[]), Action::SetLoading(true));
        assert!(state.is_loading);
        let state = reduce(state, Action::SetError(Some("boom".to_owned())));
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("boom"));
    }
}
