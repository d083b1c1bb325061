use std::collections::HashMap;

use serde::Serialize;

use crate::network::NodeType;

use super::Cluster;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LabelPosition {
    pub x: f32,
    pub y: f32,
}

/// Export shape consumed by theory building. Kept independent of [`Cluster`]
/// so internal cluster changes do not break downstream readers.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterLabel {
    pub id: String,
    pub text: String,
    pub position: LabelPosition,
    pub theme: String,
    pub confidence: f32,
    pub card_ids: Vec<String>,
}

fn dominant_tag(cluster: &Cluster) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tag in cluster.nodes.iter().flat_map(|node| node.tags.iter()) {
        let tag = tag.trim();
        if !tag.is_empty() {
            *counts.entry(tag).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(tag, _)| tag.to_owned())
}

fn dominant_type(cluster: &Cluster) -> Option<NodeType> {
    NodeType::ALL
        .into_iter()
        .map(|node_type| {
            let count = cluster
                .nodes
                .iter()
                .filter(|node| node.node_type == node_type)
                .count();
            (node_type, count)
        })
        .filter(|(_, count)| *count > 0)
        .max_by_key(|(_, count)| *count)
        .map(|(node_type, _)| node_type)
}

pub fn cluster_labels(clusters: &[Cluster]) -> Vec<ClusterLabel> {
    clusters
        .iter()
        .map(|cluster| ClusterLabel {
            id: cluster.id.clone(),
            text: dominant_tag(cluster).unwrap_or_else(|| cluster.name.clone()),
            position: LabelPosition {
                x: cluster.center.x,
                y: cluster.center.y,
            },
            theme: dominant_type(cluster)
                .map(NodeType::label)
                .unwrap_or("mixed")
                .to_owned(),
            confidence: ((cluster.density + cluster.cohesion.min(1.0)) / 2.0).clamp(0.0, 1.0),
            card_ids: cluster.node_ids().map(str::to_owned).collect(),
        })
        .collect()
}
