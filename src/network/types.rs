use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Inbox,
    Questions,
    Insights,
    Themes,
    Actions,
}

impl NodeType {
    pub const ALL: [NodeType; 5] = [
        Self::Inbox,
        Self::Questions,
        Self::Insights,
        Self::Themes,
        Self::Actions,
    ];

    /// Unknown or empty column names land in the inbox.
    pub fn from_column(column: &str) -> Self {
        match column.trim().to_ascii_lowercase().as_str() {
            "questions" | "question" => Self::Questions,
            "insights" | "insight" => Self::Insights,
            "themes" | "theme" => Self::Themes,
            "actions" | "action" => Self::Actions,
            _ => Self::Inbox,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Questions => "questions",
            Self::Insights => "insights",
            Self::Themes => "themes",
            Self::Actions => "actions",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    Semantic,
    Manual,
    Derived,
}

impl EdgeType {
    pub const ALL: [EdgeType; 3] = [Self::Semantic, Self::Manual, Self::Derived];

    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
            Some("semantic") => Self::Semantic,
            Some("derived") => Self::Derived,
            _ => Self::Manual,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Semantic => "semantic",
            Self::Manual => "manual",
            Self::Derived => "derived",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NetworkNode {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub node_type: NodeType,
    pub title: String,
    pub tags: Vec<String>,
    pub metadata: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NetworkEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub strength: f32,
    pub edge_type: EdgeType,
    pub metadata: Map<String, Value>,
}

impl NetworkEdge {
    pub fn edge_id(source: &str, target: &str) -> String {
        format!("{source}->{target}")
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }

    /// The endpoint opposite `node_id`, if the edge touches it.
    pub fn other_end(&self, node_id: &str) -> Option<&str> {
        if self.source == node_id {
            Some(self.target.as_str())
        } else if self.target == node_id {
            Some(self.source.as_str())
        } else {
            None
        }
    }
}

/// Immutable node/edge snapshot.
///
/// Node ids are unique and every edge resolves to two nodes in the snapshot;
/// [`NetworkData::new`] enforces both, so filtered copies keep them too.
#[derive(Clone, Debug, Default)]
pub struct NetworkData {
    nodes: Vec<NetworkNode>,
    edges: Vec<NetworkEdge>,
    index_by_id: HashMap<String, usize>,
}

impl NetworkData {
    pub fn new(nodes: Vec<NetworkNode>, edges: Vec<NetworkEdge>) -> Self {
        let mut index_by_id = HashMap::with_capacity(nodes.len());
        let mut unique_nodes = Vec::with_capacity(nodes.len());
        for node in nodes {
            if index_by_id.contains_key(&node.id) {
                continue;
            }
            index_by_id.insert(node.id.clone(), unique_nodes.len());
            unique_nodes.push(node);
        }

        let edges = edges
            .into_iter()
            .filter(|edge| {
                index_by_id.contains_key(&edge.source) && index_by_id.contains_key(&edge.target)
            })
            .collect();

        Self {
            nodes: unique_nodes,
            edges,
            index_by_id,
        }
    }

    pub fn nodes(&self) -> &[NetworkNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[NetworkEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&NetworkNode> {
        self.index_of(id).map(|index| &self.nodes[index])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_by_id.contains_key(id)
    }

    pub fn edges_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a NetworkEdge> + 'a {
        self.edges.iter().filter(move |edge| edge.touches(id))
    }

    /// Edges as `(source_index, target_index)` pairs in edge order.
    pub fn edge_indices(&self) -> Vec<(usize, usize)> {
        self.edges
            .iter()
            .filter_map(|edge| Some((self.index_of(&edge.source)?, self.index_of(&edge.target)?)))
            .collect()
    }
}
