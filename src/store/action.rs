use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{Pos2, Vec2};

use crate::clustering::ClusteringConfig;
use crate::network::{FilterConfig, NetworkData};
use crate::panel::SidePanel;
use crate::viewport::Viewport;

use super::state::ClusteringSnapshot;

#[derive(Clone, Debug)]
pub enum Action {
    SetNetworkData {
        network: Arc<NetworkData>,
        revision: u64,
    },
    SetTransform(Viewport),
    PanBy(Vec2),
    ZoomAt {
        cursor: Pos2,
        factor: f32,
    },
    SelectNode(String),
    ClearSelection,
    SetHighlightedNodes(HashSet<String>),
    ToggleSidePanel(SidePanel),
    SetActiveSidePanel(Option<SidePanel>),
    SetFilter(FilterConfig),
    SetClusteringConfig(ClusteringConfig),
    ClustersComputed(Arc<ClusteringSnapshot>),
    SetLoading(bool),
    SetError(Option<String>),
    Reset,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetNetworkData { .. } => "SET_NETWORK_DATA",
            Self::SetTransform(_) => "SET_TRANSFORM",
            Self::PanBy(_) => "PAN_BY",
            Self::ZoomAt { .. } => "ZOOM_AT",
            Self::SelectNode(_) => "SELECT_NODE",
            Self::ClearSelection => "CLEAR_SELECTION",
            Self::SetHighlightedNodes(_) => "SET_HIGHLIGHTED_NODES",
            Self::ToggleSidePanel(_) => "TOGGLE_SIDE_PANEL",
            Self::SetActiveSidePanel(_) => "SET_ACTIVE_SIDE_PANEL",
            Self::SetFilter(_) => "SET_FILTER",
            Self::SetClusteringConfig(_) => "SET_CLUSTERING_CONFIG",
            Self::ClustersComputed(_) => "CLUSTERS_COMPUTED",
            Self::SetLoading(_) => "SET_LOADING",
            Self::SetError(_) => "SET_ERROR",
            Self::Reset => "RESET",
        }
    }
}
