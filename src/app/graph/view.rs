use std::collections::HashMap;

use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};

use crate::util::short_title;

use super::super::ViewModel;
use super::super::render_utils::{
    blend_color, cluster_color, dim_color, draw_background, edge_color, node_type_color,
};

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let network = self.store.filtered_network();

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        self.canvas_size = rect.size();

        draw_background(&painter, rect, self.store.state().transform);

        if network.is_empty() {
            self.visible = Default::default();
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No cards match the current board and filters.",
                FontId::proportional(14.0),
                Color32::from_gray(200),
            );
            return;
        }

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        let viewport = self.store.state().transform;
        viewport.cull_into(&network, rect.size(), &mut self.visible);
        self.handle_graph_gestures(ui, rect, &response, &network);

        if response.dragged() {
            ui.ctx().request_repaint();
        }

        let hovered = self.hovered_index(ui, rect, &network);
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let state = self.store.state();
        let origin = rect.min.to_vec2();
        let selected = state.selected_node.as_deref();
        let highlight_active = !state.highlighted_nodes.is_empty();
        let cluster_by_node = if self.tint_by_cluster {
            state
                .clusters()
                .iter()
                .flat_map(|cluster| cluster.node_ids().map(move |id| (id, cluster.color)))
                .collect::<HashMap<_, _>>()
        } else {
            HashMap::new()
        };

        let zoom_sqrt = viewport.scale.sqrt();
        for &edge_index in &self.visible.edges {
            let edge = &network.edges()[edge_index];
            let (Some(source), Some(target)) =
                (network.index_of(&edge.source), network.index_of(&edge.target))
            else {
                continue;
            };

            let start = self.visible.screen_positions[source] + origin;
            let end = self.visible.screen_positions[target] + origin;
            let touches_selection = selected.is_some_and(|id| edge.touches(id));

            let (width, color) = if touches_selection {
                ((2.4 * zoom_sqrt).clamp(1.2, 4.4), Color32::from_rgb(241, 146, 94))
            } else if highlight_active {
                (
                    (0.8 * zoom_sqrt).clamp(0.45, 2.0),
                    dim_color(edge_color(edge.strength), 0.5),
                )
            } else {
                (
                    (0.6 + edge.strength * 1.6) * zoom_sqrt.clamp(0.5, 1.6),
                    edge_color(edge.strength),
                )
            };
            painter.line_segment([start, end], Stroke::new(width, color));
        }

        for &index in &self.visible.nodes {
            let node = &network.nodes()[index];
            let position = self.visible.screen_positions[index] + origin;
            let radius = viewport.screen_radius(node.size).min(48.0);

            let is_selected = selected == Some(node.id.as_str());
            let is_hovered = hovered == Some(index);
            let is_highlighted = state.is_highlighted(&node.id);

            let base_color = cluster_by_node
                .get(node.id.as_str())
                .map(|rgb| blend_color(node_type_color(node.node_type), cluster_color(*rgb), 0.75))
                .unwrap_or_else(|| node_type_color(node.node_type));
            let color = if is_selected {
                Color32::from_rgb(255, 214, 102)
            } else if is_hovered {
                Color32::from_rgb(255, 164, 101)
            } else if is_highlighted {
                blend_color(base_color, Color32::WHITE, 0.25)
            } else if highlight_active {
                dim_color(base_color, 0.4)
            } else {
                base_color
            };

            painter.circle_filled(position, radius, color);
            let stroke_width = if is_selected || is_highlighted { 2.2 } else { 1.0 };
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(stroke_width, Color32::from_rgba_unmultiplied(15, 15, 15, 190)),
            );

            let should_draw_label =
                is_selected || is_hovered || is_highlighted || viewport.scale > 1.2 || radius > 20.0;
            if should_draw_label {
                painter.text(
                    position + vec2(radius + 5.0, 0.0),
                    Align2::LEFT_CENTER,
                    short_title(&node.title, &node.id, 32),
                    FontId::proportional(12.0),
                    Color32::from_gray(238),
                );
            }
        }

        if self.tint_by_cluster {
            for cluster in state.clusters() {
                let position = viewport.world_to_screen(cluster.center) + origin;
                if rect.contains(position) {
                    painter.text(
                        position,
                        Align2::CENTER_CENTER,
                        cluster.name.as_str(),
                        FontId::proportional(13.0),
                        cluster_color(cluster.color),
                    );
                }
            }
        }

        if let Some(index) = hovered {
            let node = &network.nodes()[index];
            let degree = network.edges_of(&node.id).count();
            let panel_text = format!(
                "{}  |  {}  |  links {}",
                short_title(&node.title, &node.id, 48),
                node.node_type.label(),
                degree
            );
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                panel_text,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }
    }
}
