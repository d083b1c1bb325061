use eframe::egui::{self, RichText, Ui};

use crate::util::short_title;

use super::super::ViewModel;

impl ViewModel {
    pub(super) fn draw_relations(&mut self, ui: &mut Ui) {
        let network = self.store.filtered_network();
        let Some(selected) = self.store.state().selected_node.clone() else {
            ui.label("Select a card on the canvas to list its relationships.");
            return;
        };
        let Some(node) = network.node(&selected) else {
            ui.label("The selected card is hidden by the current filter.");
            return;
        };

        ui.label(RichText::new(short_title(&node.title, &node.id, 48)).strong());
        ui.small(format!("{}  |  {}", node.node_type.label(), node.id));
        if !node.tags.is_empty() {
            ui.small(format!("tags: {}", node.tags.join(", ")));
        }
        if let Some(cluster) = self
            .store
            .state()
            .current_clustering()
            .and_then(|snapshot| snapshot.outcome.cluster_of(&selected))
        {
            ui.small(format!("in {}", cluster.name));
        }
        ui.separator();

        let mut links = network
            .edges_of(&selected)
            .filter_map(|edge| {
                let other = network.node(edge.other_end(&selected)?)?;
                Some((
                    other.id.clone(),
                    short_title(&other.title, &other.id, 36),
                    edge.strength,
                    edge.edge_type.label(),
                ))
            })
            .collect::<Vec<_>>();
        links.sort_by(|left, right| right.2.total_cmp(&left.2).then_with(|| left.0.cmp(&right.0)));

        if links.is_empty() {
            ui.label("No relationships for this card.");
            return;
        }

        ui.label(format!("{} relationships", links.len()));
        let mut next_selection = None;
        egui::Grid::new("relations_grid")
            .num_columns(3)
            .striped(true)
            .show(ui, |ui| {
                for (id, title, strength, kind) in &links {
                    if ui.link(title).clicked() {
                        next_selection = Some(id.clone());
                    }
                    ui.label(*kind);
                    ui.label(format!("{strength:.2}"));
                    ui.end_row();
                }
            });

        if let Some(id) = next_selection {
            self.set_selected(Some(id));
        }
    }
}
