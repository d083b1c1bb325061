use std::collections::HashSet;

use eframe::egui::{self, RichText, Ui};

use nest_analysis::clustering::{Cluster, ClusteringAlgorithm};
use nest_analysis::store::Action;

use super::super::ViewModel;
use super::super::render_utils::cluster_color;

impl ViewModel {
    pub(super) fn draw_clustering(&mut self, ui: &mut Ui) {
        let mut config = self.store.state().clustering_config.clone();

        ui.label(RichText::new("Algorithm").strong());
        for algorithm in ClusteringAlgorithm::ALL {
            ui.radio_value(&mut config.algorithm, algorithm, algorithm.label());
        }
        ui.add_space(6.0);

        let threshold_hint = match config.algorithm {
            ClusteringAlgorithm::Density => "Neighbor radius (x100 world units)",
            ClusteringAlgorithm::Community => "Merge strength",
            ClusteringAlgorithm::KMeans => "Threshold (unused by k-means)",
        };
        ui.add(egui::Slider::new(&mut config.cluster_threshold, 0.05..=2.0).text(threshold_hint));
        ui.add(egui::Slider::new(&mut config.min_cluster_size, 1..=20).text("Min cluster size"));

        ui.checkbox(&mut config.use_weight_filtering, "Ignore weak relationships");
        ui.add_enabled(
            config.use_weight_filtering,
            egui::Slider::new(&mut config.strength_threshold, 0.0..=1.0).text("Min strength"),
        );
        ui.checkbox(&mut config.show_filtered_clusters, "Show undersized groups");

        if config.algorithm == ClusteringAlgorithm::KMeans {
            ui.horizontal(|ui| {
                ui.label("Seed");
                ui.add(egui::DragValue::new(&mut config.seed));
            });
        }

        if config != self.store.state().clustering_config {
            self.store.dispatch(Action::SetClusteringConfig(config.clone()));
        }

        ui.separator();

        let state = self.store.state();
        let Some(snapshot) = state.current_clustering() else {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Clustering...");
            });
            return;
        };

        let clusters = snapshot.outcome.clusters.clone();
        let filtered = if config.show_filtered_clusters {
            snapshot.outcome.filtered.clone()
        } else {
            Vec::new()
        };

        if clusters.is_empty() {
            ui.label("No clusters with the current settings.");
        } else {
            ui.label(format!("{} clusters", clusters.len()));
        }

        let mut highlight = None;
        for cluster in clusters.iter().chain(filtered.iter()) {
            if let Some(ids) = cluster_row(ui, cluster) {
                highlight = Some(ids);
            }
        }

        if !self.store.state().highlighted_nodes.is_empty() && ui.button("Clear highlight").clicked() {
            highlight = Some(HashSet::new());
        }

        if let Some(ids) = highlight {
            self.highlight(ids);
        }
    }
}

/// One cluster summary line. Returns the member ids when the user asked to
/// highlight them.
fn cluster_row(ui: &mut Ui, cluster: &Cluster) -> Option<HashSet<String>> {
    let mut clicked = false;
    ui.horizontal(|ui| {
        ui.colored_label(cluster_color(cluster.color), "●");
        ui.label(RichText::new(&cluster.name).strong());
        ui.small(format!(
            "{} cards  density {:.2}  cohesion {:.2}",
            cluster.size, cluster.density, cluster.cohesion
        ));
        clicked = ui.small_button("Highlight").clicked();
    });

    clicked.then(|| cluster.node_ids().map(str::to_owned).collect())
}
