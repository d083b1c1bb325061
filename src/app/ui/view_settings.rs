use eframe::egui::{self, RichText, Ui};

use nest_analysis::network::{EdgeType, NodeType};
use nest_analysis::store::Action;
use nest_analysis::viewport::Viewport;

use crate::util::parse_tag_list;

use super::super::ViewModel;

impl ViewModel {
    pub(super) fn draw_view_settings(&mut self, ui: &mut Ui) {
        let transform = self.store.state().transform;

        ui.label(RichText::new("Viewport").strong());
        ui.small(format!(
            "offset ({:.0}, {:.0})  zoom {:.0}%",
            transform.x,
            transform.y,
            transform.scale * 100.0
        ));
        ui.horizontal(|ui| {
            let center = (self.canvas_size * 0.5).to_pos2();
            if ui.button("Zoom in").clicked() {
                self.store.dispatch(Action::ZoomAt {
                    cursor: center,
                    factor: 1.15,
                });
            }
            if ui.button("Zoom out").clicked() {
                self.store.dispatch(Action::ZoomAt {
                    cursor: center,
                    factor: 0.85,
                });
            }
            if ui.button("Reset").clicked() {
                self.store.dispatch(Action::SetTransform(Viewport::default()));
            }
        });
        ui.checkbox(&mut self.tint_by_cluster, "Tint cards by cluster");

        ui.separator();
        ui.label(RichText::new("Filters").strong());

        let mut filter = self.store.state().filter.clone();

        ui.label("Card types");
        ui.horizontal_wrapped(|ui| {
            for node_type in NodeType::ALL {
                let mut on = filter.types.contains(&node_type);
                if ui.checkbox(&mut on, node_type.label()).changed() {
                    if on {
                        filter.types.push(node_type);
                    } else {
                        filter.types.retain(|kind| *kind != node_type);
                    }
                }
            }
        });

        ui.label("Relationship types");
        ui.horizontal_wrapped(|ui| {
            for edge_type in EdgeType::ALL {
                let mut on = filter.relationships.contains(&edge_type);
                if ui.checkbox(&mut on, edge_type.label()).changed() {
                    if on {
                        filter.relationships.push(edge_type);
                    } else {
                        filter.relationships.retain(|kind| *kind != edge_type);
                    }
                }
            }
        });

        ui.add(egui::Slider::new(&mut filter.strength_threshold, 0.0..=1.0).text("Min strength"));

        ui.horizontal(|ui| {
            ui.label("Tags");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.tag_filter_text)
                    .hint_text("comma separated"),
            );
            if response.changed() {
                filter.tags = parse_tag_list(&self.tag_filter_text);
            }
        });
        ui.small("Empty selections do not restrict anything.");

        if filter != self.store.state().filter {
            self.store.dispatch(Action::SetFilter(filter));
        }

        ui.separator();
        if ui.button("Reset analysis").clicked() {
            self.reset_analysis();
        }
    }
}
