use eframe::egui::{self, RichText, Ui};

use super::super::ViewModel;
use super::super::export::write_labels;

impl ViewModel {
    pub(super) fn draw_theory(&mut self, ui: &mut Ui) {
        let labels = self.store.state().cluster_labels().to_vec();

        ui.label("Cluster labels handed to theory building.");
        ui.add_space(4.0);

        if labels.is_empty() {
            ui.label("Nothing to export yet. Adjust clustering to form groups.");
        } else {
            egui::Grid::new("theory_labels")
                .num_columns(3)
                .striped(true)
                .show(ui, |ui| {
                    ui.label(RichText::new("Label").strong());
                    ui.label(RichText::new("Theme").strong());
                    ui.label(RichText::new("Confidence").strong());
                    ui.end_row();

                    for label in &labels {
                        ui.label(&label.text)
                            .on_hover_text(format!("{} cards", label.card_ids.len()));
                        ui.label(&label.theme);
                        ui.label(format!("{:.0}%", label.confidence * 100.0));
                        ui.end_row();
                    }
                });
        }

        ui.add_space(8.0);
        ui.small(format!("Target: {}", self.export_path.display()));
        if ui
            .add_enabled(!labels.is_empty(), egui::Button::new("Export labels"))
            .clicked()
        {
            self.export_status = Some(match write_labels(&self.export_path, &labels) {
                Ok(()) => format!("Wrote {} labels", labels.len()),
                Err(error) => {
                    log::warn!("label export failed: {error:#}");
                    format!("Export failed: {error:#}")
                }
            });
        }

        if let Some(status) = &self.export_status {
            ui.small(status.as_str());
        }
    }
}
