use super::types::{EdgeType, NetworkData, NodeType};

/// Narrows the nodes and edges that take part in rendering and clustering.
///
/// Empty lists mean "no restriction".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterConfig {
    pub tags: Vec<String>,
    pub types: Vec<NodeType>,
    pub relationships: Vec<EdgeType>,
    pub strength_threshold: f32,
}

impl FilterConfig {
    pub fn is_passthrough(&self) -> bool {
        self.tags.is_empty()
            && self.types.is_empty()
            && self.relationships.is_empty()
            && self.strength_threshold <= 0.0
    }

    pub fn apply(&self, data: &NetworkData) -> NetworkData {
        let nodes = data
            .nodes()
            .iter()
            .filter(|node| {
                let tag_ok = self.tags.is_empty()
                    || node
                        .tags
                        .iter()
                        .any(|tag| self.tags.iter().any(|wanted| wanted.eq_ignore_ascii_case(tag)));
                let type_ok = self.types.is_empty() || self.types.contains(&node.node_type);
                tag_ok && type_ok
            })
            .cloned()
            .collect::<Vec<_>>();

        let edges = data
            .edges()
            .iter()
            .filter(|edge| {
                (self.relationships.is_empty() || self.relationships.contains(&edge.edge_type))
                    && edge.strength >= self.strength_threshold
            })
            .cloned()
            .collect::<Vec<_>>();

        // Edges whose endpoints were filtered out are dropped by the constructor.
        NetworkData::new(nodes, edges)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Map;

    use super::super::types::{NetworkEdge, NetworkNode};
    use super::*;

    fn sample() -> NetworkData {
        let node = |id: &str, node_type: NodeType, tags: &[&str]| NetworkNode {
            id: id.to_owned(),
            x: 0.0,
            y: 0.0,
            size: 10.0,
            node_type,
            title: id.to_owned(),
            tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
            metadata: Map::new(),
        };
        let edge = |source: &str, target: &str, strength: f32, edge_type: EdgeType| NetworkEdge {
            id: NetworkEdge::edge_id(source, target),
            source: source.to_owned(),
            target: target.to_owned(),
            strength,
            edge_type,
            metadata: Map::new(),
        };

        NetworkData::new(
            vec![
                node("a", NodeType::Insights, &["ux"]),
                node("b", NodeType::Questions, &["ux", "pricing"]),
                node("c", NodeType::Insights, &["pricing"]),
            ],
            vec![
                edge("a", "b", 0.9, EdgeType::Semantic),
                edge("b", "c", 0.2, EdgeType::Manual),
                edge("a", "c", 0.6, EdgeType::Derived),
            ],
        )
    }

    #[test]
    fn default_filter_keeps_everything() {
        let data = sample();
        let filtered = FilterConfig::default().apply(&data);
        assert!(FilterConfig::default().is_passthrough());
        assert_eq!(filtered.node_count(), 3);
        assert_eq!(filtered.edge_count(), 3);
    }

    #[test]
    fn tag_filter_removes_nodes_and_their_edges() {
        let filter = FilterConfig {
            tags: vec!["UX".to_owned()],
            ..FilterConfig::default()
        };
        let filtered = filter.apply(&sample());
        assert_eq!(filtered.node_count(), 2);
        assert_eq!(filtered.edge_count(), 1);
        assert_eq!(filtered.edges()[0].id, "a->b");
    }

    #[test]
    fn type_relationship_and_strength_filters_combine() {
        let filter = FilterConfig {
            types: vec![NodeType::Insights],
            relationships: vec![EdgeType::Derived, EdgeType::Manual],
            strength_threshold: 0.5,
            ..FilterConfig::default()
        };
        let filtered = filter.apply(&sample());
        assert_eq!(filtered.node_count(), 2);
        assert_eq!(filtered.edge_count(), 1);
        assert_eq!(filtered.edges()[0].id, "a->c");
    }
}
