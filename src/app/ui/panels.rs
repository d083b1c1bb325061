use std::time::Instant;

use eframe::egui::{self, Align, Context, Layout, RichText, Ui};

use nest_analysis::panel::SidePanel;
use nest_analysis::store::Action;
use nest_analysis::viewport::Viewport;

use crate::util::short_title;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        reload_requested: &mut bool,
        is_reloading: bool,
    ) {
        self.store.refresh_clusters();

        let now = Instant::now();
        self.phases.show_canvas();
        self.phases.observe(self.store.state().active_side_panel, now);
        self.phases.tick(now);
        if let Some(delay) = self.phases.next_deadline(now) {
            ctx.request_repaint_after(delay);
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| self.draw_top_bar(ui, reload_requested, is_reloading));

        if let Some(panel) = self.phases.phase().panel() {
            egui::SidePanel::right("analysis_side_panel")
                .resizable(true)
                .default_width(360.0)
                .show(ctx, |ui| self.draw_side_panel(ui, panel));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_reloading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading board network...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_graph(ui);
            }
        });

        self.draw_card_detail(ctx);
    }

    fn draw_top_bar(&mut self, ui: &mut Ui, reload_requested: &mut bool, is_reloading: bool) {
        let state = self.store.state();
        let board_label = format!(
            "board: {}  nest: {}",
            self.board.board_id, self.board.nest_id
        );
        let counts = format!(
            "cards: {}  links: {}",
            state.network.node_count(),
            state.network.edge_count()
        );
        let dropped = self.report.dropped_relationships;
        let visible = format!(
            "visible {} / {} nodes, {} edges",
            self.visible.node_count(),
            state.network.node_count(),
            self.visible.edge_count()
        );
        let active = state.active_side_panel;
        let error = state.error.clone();

        ui.horizontal(|ui| {
            ui.heading("nest analysis");
            ui.separator();
            ui.label(board_label);
            ui.label(counts);
            if dropped > 0 {
                ui.label(RichText::new(format!("{dropped} dangling links dropped")).weak());
            }

            let reload_button = ui.add_enabled(!is_reloading, egui::Button::new("Reload board"));
            if reload_button.clicked() {
                *reload_requested = true;
            }
            if ui.button("Reset view").clicked() {
                self.store.dispatch(Action::SetTransform(Viewport::default()));
            }

            ui.separator();
            for panel in SidePanel::ALL {
                if ui.selectable_label(active == Some(panel), panel.label()).clicked() {
                    self.store.dispatch(Action::ToggleSidePanel(panel));
                }
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(visible);
                if let Some(error) = &error {
                    ui.colored_label(egui::Color32::from_rgb(240, 120, 100), error);
                }
            });
        });
    }

    fn draw_side_panel(&mut self, ui: &mut Ui, panel: SidePanel) {
        ui.horizontal(|ui| {
            ui.heading(panel.label());
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.small_button("Close").clicked() {
                    self.store.dispatch(Action::SetActiveSidePanel(None));
                }
            });
        });
        ui.separator();

        // Shell phase: the frame slides in before heavy content is built.
        if self.phases.mounted() != Some(panel) {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.spinner();
            });
            return;
        }

        if self.store.state().network.is_empty() {
            ui.label("No board data loaded yet.");
            return;
        }

        egui::ScrollArea::vertical()
            .id_salt(("side_panel_scroll", panel.label()))
            .auto_shrink([false, false])
            .show(ui, |ui| match panel {
                SidePanel::Relations => self.draw_relations(ui),
                SidePanel::Clustering => self.draw_clustering(ui),
                SidePanel::Theory => self.draw_theory(ui),
                SidePanel::View => self.draw_view_settings(ui),
                SidePanel::Search => self.draw_search(ui),
            });
    }

    fn draw_card_detail(&mut self, ctx: &Context) {
        let Some(card_id) = self.callbacks.open_card.clone() else {
            return;
        };
        let Some(card) = self.board.cards.iter().find(|card| card.id == card_id) else {
            self.callbacks.open_card = None;
            return;
        };

        let mut open = true;
        egui::Window::new(short_title(&card.title, &card.id, 48))
            .id(egui::Id::new("card_detail"))
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .show(ctx, |ui| {
                ui.small(card.id.as_str());
                ui.label(format!("Column: {}", card.column));
                if !card.tags.is_empty() {
                    ui.label(format!("Tags: {}", card.tags.join(", ")));
                }
                if let Some(content) = &card.content {
                    ui.separator();
                    ui.label(content.as_str());
                }
            });

        if !open {
            self.callbacks.open_card = None;
        }
    }
}
