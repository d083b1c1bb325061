use std::collections::{HashMap, HashSet};

use rand::Rng;
use serde_json::Map;

use crate::board::{Card, Relationship};

use super::types::{EdgeType, NetworkData, NetworkEdge, NetworkNode, NodeType};

const LAYOUT_WIDTH: f32 = 800.0;
const LAYOUT_HEIGHT: f32 = 600.0;
const DEFAULT_STRENGTH: f32 = 0.5;
const NODE_BASE_SIZE: f32 = 10.0;
const NODE_DEGREE_CAP: usize = 10;

/// Counts of input records the transform had to repair or discard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub dropped_relationships: usize,
    pub duplicate_relationships: usize,
    pub self_references: usize,
    pub duplicate_cards: usize,
    pub positioned_nodes: usize,
}

#[derive(Clone, Debug)]
pub struct TransformOutput {
    pub data: NetworkData,
    pub report: TransformReport,
}

fn finite_coordinate(value: Option<f64>) -> Option<f32> {
    value.map(|v| v as f32).filter(|v| v.is_finite())
}

fn normalized_strength(strength: Option<f64>) -> f32 {
    match strength {
        Some(value) if value.is_finite() => (value as f32).clamp(0.0, 1.0),
        _ => DEFAULT_STRENGTH,
    }
}

pub fn to_network_data<R: Rng>(
    cards: &[Card],
    relationships: &[Relationship],
    rng: &mut R,
) -> TransformOutput {
    let mut report = TransformReport::default();
    let mut seen_cards = HashSet::with_capacity(cards.len());
    let mut nodes = Vec::with_capacity(cards.len());

    for card in cards {
        if !seen_cards.insert(card.id.as_str()) {
            report.duplicate_cards += 1;
            continue;
        }

        let (x, y) = match (finite_coordinate(card.x), finite_coordinate(card.y)) {
            (Some(x), Some(y)) => (x, y),
            _ => {
                report.positioned_nodes += 1;
                (
                    rng.gen_range(0.0..LAYOUT_WIDTH),
                    rng.gen_range(0.0..LAYOUT_HEIGHT),
                )
            }
        };

        nodes.push(NetworkNode {
            id: card.id.clone(),
            x,
            y,
            size: NODE_BASE_SIZE,
            node_type: NodeType::from_column(&card.column),
            title: card.title.clone(),
            tags: card.tags.clone(),
            metadata: card.metadata.clone(),
        });
    }

    let mut edge_ids = HashSet::with_capacity(relationships.len());
    let mut degree: HashMap<&str, usize> = HashMap::new();
    let mut edges = Vec::with_capacity(relationships.len());

    for relationship in relationships {
        let source = relationship.card_id.as_str();
        let target = relationship.related_card_id.as_str();

        if !seen_cards.contains(source) || !seen_cards.contains(target) {
            report.dropped_relationships += 1;
            continue;
        }
        if source == target {
            report.self_references += 1;
            continue;
        }

        let id = NetworkEdge::edge_id(source, target);
        if !edge_ids.insert(id.clone()) {
            report.duplicate_relationships += 1;
            continue;
        }

        *degree.entry(source).or_default() += 1;
        *degree.entry(target).or_default() += 1;

        let mut metadata = Map::new();
        if let Some(kind) = &relationship.relationship_type {
            metadata.insert("relationship_type".to_owned(), kind.clone().into());
        }

        edges.push(NetworkEdge {
            id,
            source: source.to_owned(),
            target: target.to_owned(),
            strength: normalized_strength(relationship.strength),
            edge_type: EdgeType::from_name(relationship.relationship_type.as_deref()),
            metadata,
        });
    }

    for node in &mut nodes {
        let node_degree = degree.get(node.id.as_str()).copied().unwrap_or(0);
        node.size = NODE_BASE_SIZE + 2.0 * node_degree.min(NODE_DEGREE_CAP) as f32;
    }

    if report.dropped_relationships > 0 || report.duplicate_cards > 0 {
        log::warn!(
            "network transform dropped {} dangling relationships and {} duplicate cards",
            report.dropped_relationships,
            report.duplicate_cards
        );
    }
    log::debug!("network transform report: {report:?}");

    TransformOutput {
        data: NetworkData::new(nodes, edges),
        report,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn card(id: &str, position: Option<(f64, f64)>) -> Card {
        Card {
            id: id.to_owned(),
            title: format!("Card {id}"),
            column: "questions".to_owned(),
            tags: vec!["research".to_owned()],
            x: position.map(|p| p.0),
            y: position.map(|p| p.1),
            content: None,
            metadata: Map::new(),
        }
    }

    fn link(source: &str, target: &str, strength: Option<f64>) -> Relationship {
        Relationship {
            card_id: source.to_owned(),
            related_card_id: target.to_owned(),
            strength,
            relationship_type: Some("semantic".to_owned()),
        }
    }

    #[test]
    fn keeps_given_positions_and_counts_dangling_links() {
        let cards = vec![card("a", Some((10.0, 20.0))), card("b", Some((30.0, 40.0)))];
        let relationships = vec![
            link("a", "b", Some(0.8)),
            link("a", "ghost", Some(0.8)),
            link("ghost", "b", None),
        ];

        let output = to_network_data(&cards, &relationships, &mut StdRng::seed_from_u64(7));

        assert_eq!(output.data.node_count(), 2);
        assert_eq!(output.data.edge_count(), 1);
        assert_eq!(output.report.dropped_relationships, 2);
        assert_eq!(output.report.positioned_nodes, 0);

        let a = output.data.node("a").unwrap();
        assert_eq!((a.x, a.y), (10.0, 20.0));
        assert_eq!(a.node_type, NodeType::Questions);
        assert_eq!(a.size, 12.0);

        let edge = &output.data.edges()[0];
        assert_eq!(edge.id, "a->b");
        assert_eq!(edge.edge_type, EdgeType::Semantic);
    }

    #[test]
    fn duplicate_relationships_collapse_and_self_links_are_skipped() {
        let cards = vec![card("a", Some((0.0, 0.0))), card("b", Some((1.0, 1.0)))];
        let relationships = vec![
            link("a", "b", Some(0.2)),
            link("a", "b", Some(0.9)),
            link("a", "a", Some(0.9)),
        ];

        let output = to_network_data(&cards, &relationships, &mut StdRng::seed_from_u64(7));

        assert_eq!(output.data.edge_count(), 1);
        assert_eq!(output.data.edges()[0].strength, 0.2);
        assert_eq!(output.report.duplicate_relationships, 1);
        assert_eq!(output.report.self_references, 1);
    }

    #[test]
    fn missing_positions_are_reproducible_with_the_same_seed() {
        let cards = vec![card("a", None), card("b", Some((f64::NAN, 3.0)))];

        let first = to_network_data(&cards, &[], &mut StdRng::seed_from_u64(99));
        let second = to_network_data(&cards, &[], &mut StdRng::seed_from_u64(99));

        assert_eq!(first.report.positioned_nodes, 2);
        for (left, right) in first.data.nodes().iter().zip(second.data.nodes()) {
            assert_eq!((left.x, left.y), (right.x, right.y));
            assert!((0.0..LAYOUT_WIDTH).contains(&left.x));
            assert!((0.0..LAYOUT_HEIGHT).contains(&left.y));
        }
    }

    #[test]
    fn strength_is_clamped_and_defaulted() {
        let cards = vec![
            card("a", Some((0.0, 0.0))),
            card("b", Some((0.0, 0.0))),
            card("c", Some((0.0, 0.0))),
        ];
        let relationships = vec![
            link("a", "b", Some(4.0)),
            link("b", "c", None),
            link("a", "c", Some(f64::INFINITY)),
        ];

        let output = to_network_data(&cards, &relationships, &mut StdRng::seed_from_u64(1));
        let strengths = output
            .data
            .edges()
            .iter()
            .map(|edge| edge.strength)
            .collect::<Vec<_>>();
        assert_eq!(strengths, vec![1.0, 0.5, 0.5]);
    }

    #[test]
    fn duplicate_cards_keep_first_occurrence() {
        let mut later = card("a", Some((5.0, 5.0)));
        later.title = "later".to_owned();
        let cards = vec![card("a", Some((1.0, 1.0))), later];

        let output = to_network_data(&cards, &[], &mut StdRng::seed_from_u64(1));
        assert_eq!(output.data.node_count(), 1);
        assert_eq!(output.report.duplicate_cards, 1);
        assert_eq!(output.data.node("a").unwrap().title, "Card a");
    }

    proptest! {
        #[test]
        fn every_relationship_is_an_edge_or_counted(
            card_count in 0usize..8,
            links in prop::collection::vec(
                (0usize..10, 0usize..10, prop::option::of(-1.0f64..2.0)),
                0..24,
            ),
            seed in any::<u64>(),
        ) {
            let cards = (0..card_count)
                .map(|i| card(&format!("c{i}"), None))
                .collect::<Vec<_>>();
            // Indices past `card_count` name cards that do not exist.
            let relationships = links
                .iter()
                .map(|(source, target, strength)| {
                    link(&format!("c{source}"), &format!("c{target}"), *strength)
                })
                .collect::<Vec<_>>();

            let output = to_network_data(&cards, &relationships, &mut StdRng::seed_from_u64(seed));
            let report = output.report;
            let data = &output.data;

            prop_assert_eq!(data.node_count(), card_count);
            prop_assert_eq!(report.positioned_nodes, card_count);
            prop_assert_eq!(
                data.edge_count()
                    + report.dropped_relationships
                    + report.self_references
                    + report.duplicate_relationships,
                relationships.len()
            );

            let dangling = links
                .iter()
                .filter(|(source, target, _)| *source >= card_count || *target >= card_count)
                .count();
            prop_assert_eq!(report.dropped_relationships, dangling);

            for edge in data.edges() {
                prop_assert!(data.contains(&edge.source));
                prop_assert!(data.contains(&edge.target));
                prop_assert!((0.0..=1.0).contains(&edge.strength));
            }
            for node in data.nodes() {
                prop_assert!((0.0..LAYOUT_WIDTH).contains(&node.x));
                prop_assert!((0.0..LAYOUT_HEIGHT).contains(&node.y));
            }
        }
    }
}
