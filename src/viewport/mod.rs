//! Pan/zoom transform, visibility culling and pointer hit testing.
//!
//! Screen coordinates are relative to the top-left corner of the canvas
//! container: `screen = (world + (x, y)) * scale`.

mod gesture;

use eframe::egui::{Pos2, Vec2, pos2, vec2};

use crate::network::NetworkData;

pub use gesture::{
    ClickResolver, DOUBLE_CLICK_WINDOW, GestureOutcome, GraphCallbacks, PointerGesture,
    resolve_gesture,
};

pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 3.0;
/// Extra screen-space border around the container where nodes still count as visible.
pub const CULL_MARGIN: f32 = 100.0;
const MIN_HIT_RADIUS: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 400.0,
            y: 300.0,
            scale: 0.5,
        }
    }
}

fn clamp_scale(scale: f32) -> f32 {
    if scale.is_finite() {
        scale.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        Viewport::default().scale
    }
}

/// Maps a raw wheel delta to a multiplicative zoom factor.
pub fn zoom_factor_from_scroll(scroll: f32) -> Option<f32> {
    if !scroll.is_finite() {
        log::warn!("ignoring non-finite scroll delta {scroll}");
        return None;
    }
    if scroll.abs() <= f32::EPSILON {
        return None;
    }

    Some((1.0 + (scroll * 0.0018)).clamp(0.85, 1.15))
}

impl Viewport {
    pub fn new(x: f32, y: f32, scale: f32) -> Self {
        Self {
            x: if x.is_finite() { x } else { 0.0 },
            y: if y.is_finite() { y } else { 0.0 },
            scale: clamp_scale(scale),
        }
    }

    pub fn offset(&self) -> Vec2 {
        vec2(self.x, self.y)
    }

    pub fn world_to_screen(&self, world: Pos2) -> Pos2 {
        pos2((world.x + self.x) * self.scale, (world.y + self.y) * self.scale)
    }

    pub fn screen_to_world(&self, screen: Pos2) -> Pos2 {
        pos2(screen.x / self.scale - self.x, screen.y / self.scale - self.y)
    }

    /// Drag by a screen-space delta; the world moves with the pointer.
    pub fn panned(self, screen_delta: Vec2) -> Self {
        if !screen_delta.is_finite() {
            log::warn!("ignoring non-finite pan delta {screen_delta:?}");
            return self;
        }

        Self {
            x: self.x + screen_delta.x / self.scale,
            y: self.y + screen_delta.y / self.scale,
            scale: self.scale,
        }
    }

    /// Zoom by `factor` keeping the world point under `cursor` fixed on screen.
    pub fn zoomed_at(self, cursor: Pos2, factor: f32) -> Self {
        if !factor.is_finite() || factor <= 0.0 || !cursor.is_finite() {
            log::warn!("ignoring zoom request factor={factor} cursor={cursor:?}");
            return self;
        }

        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        Self {
            x: self.x + (cursor.x / new_scale - cursor.x / self.scale),
            y: self.y + (cursor.y / new_scale - cursor.y / self.scale),
            scale: new_scale,
        }
    }

    pub fn is_visible(&self, screen: Pos2, container: Vec2) -> bool {
        screen.x >= -CULL_MARGIN
            && screen.x <= container.x + CULL_MARGIN
            && screen.y >= -CULL_MARGIN
            && screen.y <= container.y + CULL_MARGIN
    }

    pub fn cull(&self, data: &NetworkData, container: Vec2) -> VisibleSet {
        let mut visible = VisibleSet::default();
        self.cull_into(data, container, &mut visible);
        visible
    }

    /// Same as [`Viewport::cull`] but reuses the buffers of `visible`.
    pub fn cull_into(&self, data: &NetworkData, container: Vec2, visible: &mut VisibleSet) {
        visible.screen_positions.clear();
        visible.nodes.clear();
        visible.edges.clear();
        visible.mask.clear();
        visible.mask.resize(data.node_count(), false);

        for (index, node) in data.nodes().iter().enumerate() {
            let screen = self.world_to_screen(pos2(node.x, node.y));
            visible.screen_positions.push(screen);
            if self.is_visible(screen, container) {
                visible.mask[index] = true;
                visible.nodes.push(index);
            }
        }

        for (edge_index, (source, target)) in data.edge_indices().into_iter().enumerate() {
            if visible.mask[source] && visible.mask[target] {
                visible.edges.push(edge_index);
            }
        }
    }

    pub fn screen_radius(&self, size: f32) -> f32 {
        (size * self.scale).max(MIN_HIT_RADIUS)
    }

    /// Index of the visible node whose disc contains `point`, closest first.
    pub fn hit_test(&self, data: &NetworkData, visible: &VisibleSet, point: Pos2) -> Option<usize> {
        visible
            .nodes
            .iter()
            .filter_map(|&index| {
                let node = &data.nodes()[index];
                let distance = visible.screen_positions[index].distance(point);
                (distance <= self.screen_radius(node.size)).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}

/// Result of a culling pass. `screen_positions` and `mask` are indexed by node.
#[derive(Clone, Debug, Default)]
pub struct VisibleSet {
    pub screen_positions: Vec<Pos2>,
    pub mask: Vec<bool>,
    pub nodes: Vec<usize>,
    pub edges: Vec<usize>,
}

impl VisibleSet {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
