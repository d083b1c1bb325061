use std::time::Instant;

use eframe::egui::{self, Pos2, Rect, Ui};

use nest_analysis::network::NetworkData;
use nest_analysis::store::Action;
use nest_analysis::viewport::{
    GestureOutcome, PointerGesture, resolve_gesture, zoom_factor_from_scroll,
};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let (scroll, pinch) = ui.input(|input| (input.raw_scroll_delta.y, input.zoom_delta()));
        let factor = if (pinch - 1.0).abs() > f32::EPSILON {
            Some(pinch)
        } else {
            zoom_factor_from_scroll(scroll)
        };
        let Some(factor) = factor else {
            return;
        };

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        self.store.dispatch(Action::ZoomAt {
            cursor: Pos2::ZERO + (pointer - rect.min),
            factor,
        });
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged() {
            let delta = response.drag_delta();
            if delta != egui::Vec2::ZERO {
                self.store.dispatch(Action::PanBy(delta));
            }
        }
    }

    /// Visible node under the pointer, as a node index.
    pub(in crate::app) fn hovered_index(
        &self,
        ui: &Ui,
        rect: Rect,
        network: &NetworkData,
    ) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        if !rect.contains(pointer) {
            return None;
        }

        let local = Pos2::ZERO + (pointer - rect.min);
        self.store
            .state()
            .transform
            .hit_test(network, &self.visible, local)
    }

    /// Maps this frame's clicks to selection changes and host callbacks.
    /// Raw clicks go through the click resolver so a double click never
    /// also selects.
    pub(in crate::app) fn handle_graph_gestures(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
        network: &NetworkData,
    ) {
        let now = Instant::now();
        let mut gestures = Vec::with_capacity(2);
        gestures.extend(self.clicks.poll(now));

        if response.clicked()
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let local = Pos2::ZERO + (pointer - rect.min);
            gestures.extend(self.clicks.press(local, now));
        }

        if let Some(delay) = self.clicks.next_deadline(now) {
            ui.ctx().request_repaint_after(delay);
        }

        for gesture in gestures {
            self.apply_gesture(gesture, network);
        }
    }

    fn apply_gesture(&mut self, gesture: PointerGesture, network: &NetworkData) {
        let hit = self
            .store
            .state()
            .transform
            .hit_test(network, &self.visible, gesture.position())
            .map(|index| &network.nodes()[index]);
        let outcome = resolve_gesture(gesture, hit);

        match &outcome {
            GestureOutcome::NodeSelected(id) => self.set_selected(Some(id.clone())),
            GestureOutcome::SelectionCleared => self.set_selected(None),
            GestureOutcome::NodeDoubleClicked(_) => outcome.notify(&mut self.callbacks),
            GestureOutcome::Ignored => {}
        }
    }
}
