use std::sync::Arc;

use eframe::egui::{self, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use nest_analysis::network::NetworkData;
use nest_analysis::store::Action;
use nest_analysis::viewport::Viewport;

use crate::util::short_title;

use super::super::{SearchHit, SearchMatchCache, ViewModel};

const MAX_RESULTS: usize = 50;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

fn search_network(network: &NetworkData, query: &str) -> Vec<SearchHit> {
    let matcher = SkimMatcherV2::default();
    let mut hits = network
        .nodes()
        .iter()
        .filter_map(|node| {
            let title_score = fuzzy_match_score(&matcher, &node.title, query);
            let tag_score = node
                .tags
                .iter()
                .filter_map(|tag| fuzzy_match_score(&matcher, tag, query))
                .max();
            let score = title_score.max(tag_score)?;
            Some(SearchHit {
                id: node.id.clone(),
                title: short_title(&node.title, &node.id, 40),
                score,
            })
        })
        .collect::<Vec<_>>();

    hits.sort_by(|left, right| right.score.cmp(&left.score).then_with(|| left.id.cmp(&right.id)));
    hits
}

impl ViewModel {
    /// Matches among the cards the canvas currently draws.
    fn cached_search_hits(&mut self) -> Arc<Vec<SearchHit>> {
        let network = self.store.filtered_network();
        let query = self.search.trim();

        if let Some(cached) = &self.search_match_cache
            && Arc::ptr_eq(&cached.network, &network)
            && cached.query == query
        {
            return Arc::clone(&cached.matches);
        }

        let matches = if query.is_empty() {
            Arc::new(Vec::new())
        } else {
            Arc::new(search_network(&network, query))
        };
        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            network,
            matches: Arc::clone(&matches),
        });
        matches
    }

    pub(super) fn draw_search(&mut self, ui: &mut Ui) {
        let response = ui.add(
            egui::TextEdit::singleline(&mut self.search)
                .hint_text("Search titles and tags")
                .desired_width(f32::INFINITY),
        );

        let hits = self.cached_search_hits();
        if response.changed() {
            self.highlight(hits.iter().map(|hit| hit.id.clone()).collect());
        }

        if self.search.trim().is_empty() {
            ui.label("Type to highlight matching cards.");
            return;
        }
        if hits.is_empty() {
            ui.label("No matching cards.");
            return;
        }

        ui.label(format!("{} matches", hits.len()));
        let mut focus = None;
        for hit in hits.iter().take(MAX_RESULTS) {
            if ui.link(hit.title.as_str()).clicked() {
                focus = Some(hit.id.clone());
            }
        }
        if hits.len() > MAX_RESULTS {
            ui.small(format!("{} more not shown", hits.len() - MAX_RESULTS));
        }

        if let Some(id) = focus {
            self.focus_node(&id);
        }
    }

    /// Selects a card and moves the viewport so it sits at the canvas center.
    fn focus_node(&mut self, id: &str) {
        let network = self.store.filtered_network();
        let transform = self.store.state().transform;
        let Some(node) = network.node(id) else {
            return;
        };

        let center = self.canvas_size * 0.5;
        let centered = Viewport::new(
            center.x / transform.scale - node.x,
            center.y / transform.scale - node.y,
            transform.scale,
        );
        self.store.dispatch(Action::SetTransform(centered));
        self.set_selected(Some(id.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use nest_analysis::clustering::ClusteringConfig;
    use nest_analysis::network::{FilterConfig, NodeType};

    use super::super::super::test_support::model;
    use super::*;

    fn hit_ids(hits: &[SearchHit]) -> Vec<&str> {
        let mut ids = hits.iter().map(|hit| hit.id.as_str()).collect::<Vec<_>>();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn matches_titles_and_tags() {
        let mut model = model(ClusteringConfig::default());
        model.search = "pricing".to_owned();

        let hits = model.cached_search_hits();
        assert_eq!(hit_ids(&hits), ["a", "b", "c"]);
        assert!(Arc::ptr_eq(&hits, &model.cached_search_hits()));
    }

    #[test]
    fn cards_hidden_by_the_filter_are_not_found() {
        let mut model = model(ClusteringConfig::default());
        model.search = "pricing".to_owned();
        model.cached_search_hits();

        model.store.dispatch(Action::SetFilter(FilterConfig {
            types: vec![NodeType::Insights],
            ..FilterConfig::default()
        }));
        let hits = model.cached_search_hits();
        assert_eq!(hit_ids(&hits), ["a"]);

        model.canvas_size = eframe::egui::vec2(800.0, 600.0);
        model.focus_node("b");
        assert_eq!(model.store.state().selected_node, None);
    }
}
