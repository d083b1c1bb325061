use std::time::{Duration, Instant};

use eframe::egui::Pos2;

use crate::network::NetworkNode;

/// Outbound notifications for the host application (card detail modals etc).
pub trait GraphCallbacks {
    fn on_node_select(&mut self, node_id: &str);
    fn on_node_double_click(&mut self, node_id: &str);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerGesture {
    Click(Pos2),
    DoubleClick(Pos2),
}

impl PointerGesture {
    pub fn position(self) -> Pos2 {
        match self {
            Self::Click(position) | Self::DoubleClick(position) => position,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GestureOutcome {
    NodeSelected(String),
    NodeDoubleClicked(String),
    SelectionCleared,
    Ignored,
}

impl GestureOutcome {
    pub fn notify(&self, callbacks: &mut dyn GraphCallbacks) {
        match self {
            Self::NodeSelected(id) => callbacks.on_node_select(id),
            Self::NodeDoubleClicked(id) => callbacks.on_node_double_click(id),
            Self::SelectionCleared | Self::Ignored => {}
        }
    }
}

/// A double click is its own signal and never also selects.
pub fn resolve_gesture(gesture: PointerGesture, hit: Option<&NetworkNode>) -> GestureOutcome {
    match (gesture, hit) {
        (PointerGesture::Click(_), Some(node)) => GestureOutcome::NodeSelected(node.id.clone()),
        (PointerGesture::Click(_), None) => GestureOutcome::SelectionCleared,
        (PointerGesture::DoubleClick(_), Some(node)) => {
            GestureOutcome::NodeDoubleClicked(node.id.clone())
        }
        (PointerGesture::DoubleClick(_), None) => GestureOutcome::Ignored,
    }
}

/// Matches the default double-click delay of egui.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(300);

/// Turns raw clicks into exclusive gestures.
///
/// A click is held until the double-click window closes. A second click
/// inside the window becomes a [`PointerGesture::DoubleClick`] and the held
/// click is never committed, so one gesture never yields both signals.
#[derive(Clone, Debug)]
pub struct ClickResolver {
    window: Duration,
    pending: Option<(Pos2, Instant)>,
}

impl Default for ClickResolver {
    fn default() -> Self {
        Self::new(DOUBLE_CLICK_WINDOW)
    }
}

impl ClickResolver {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Feeds one raw click. Returns a double click when this click completes
    /// one, or the previous click when its window already lapsed.
    pub fn press(&mut self, position: Pos2, now: Instant) -> Option<PointerGesture> {
        match self.pending.take() {
            Some((first, at)) if now.saturating_duration_since(at) <= self.window => {
                Some(PointerGesture::DoubleClick(first))
            }
            lapsed => {
                self.pending = Some((position, now));
                lapsed.map(|(first, _)| PointerGesture::Click(first))
            }
        }
    }

    /// Commits the held click once no second click arrived in time.
    pub fn poll(&mut self, now: Instant) -> Option<PointerGesture> {
        match self.pending {
            Some((position, at)) if now.saturating_duration_since(at) > self.window => {
                self.pending = None;
                Some(PointerGesture::Click(position))
            }
            _ => None,
        }
    }

    /// Time until the held click commits, for scheduling a repaint.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.pending.map(|(_, at)| {
            (at + self.window).saturating_duration_since(now) + Duration::from_millis(1)
        })
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;
    use serde_json::Map;

    use super::*;
    use crate::network::NodeType;

    #[derive(Default)]
    struct Recorder {
        selected: Vec<String>,
        opened: Vec<String>,
    }

    impl GraphCallbacks for Recorder {
        fn on_node_select(&mut self, node_id: &str) {
            self.selected.push(node_id.to_owned());
        }

        fn on_node_double_click(&mut self, node_id: &str) {
            self.opened.push(node_id.to_owned());
        }
    }

    fn node() -> NetworkNode {
        NetworkNode {
            id: "card-1".to_owned(),
            x: 0.0,
            y: 0.0,
            size: 10.0,
            node_type: NodeType::Actions,
            title: "Card".to_owned(),
            tags: Vec::new(),
            metadata: Map::new(),
        }
    }

    fn feed(hit: Option<&NetworkNode>, recorder: &mut Recorder, gesture: Option<PointerGesture>) {
        if let Some(gesture) = gesture {
            resolve_gesture(gesture, hit).notify(recorder);
        }
    }

    #[test]
    fn click_then_click_only_opens_the_card() {
        let n = node();
        let mut resolver = ClickResolver::default();
        let mut recorder = Recorder::default();
        let start = Instant::now();
        let at = pos2(2.0, 2.0);

        let first = resolver.press(at, start);
        feed(Some(&n), &mut recorder, first);
        let polled = resolver.poll(start + Duration::from_millis(100));
        feed(Some(&n), &mut recorder, polled);
        let second = resolver.press(at, start + Duration::from_millis(150));
        assert_eq!(second, Some(PointerGesture::DoubleClick(at)));
        feed(Some(&n), &mut recorder, second);

        let later = resolver.poll(start + Duration::from_secs(2));
        assert_eq!(later, None);
        assert!(recorder.selected.is_empty());
        assert_eq!(recorder.opened, vec!["card-1".to_owned()]);
    }

    #[test]
    fn lone_click_commits_after_the_window() {
        let mut resolver = ClickResolver::new(Duration::from_millis(300));
        let start = Instant::now();
        let at = pos2(5.0, 6.0);

        assert_eq!(resolver.press(at, start), None);
        assert!(resolver.is_pending());
        assert_eq!(resolver.poll(start + Duration::from_millis(300)), None);
        assert!(
            resolver
                .next_deadline(start + Duration::from_millis(100))
                .is_some_and(|delay| delay > Duration::from_millis(199))
        );
        assert_eq!(
            resolver.poll(start + Duration::from_millis(301)),
            Some(PointerGesture::Click(at))
        );
        assert!(!resolver.is_pending());
        assert_eq!(resolver.next_deadline(start), None);
    }

    #[test]
    fn slow_second_click_commits_the_first_and_waits_again() {
        let mut resolver = ClickResolver::new(Duration::from_millis(300));
        let start = Instant::now();
        let first = pos2(1.0, 1.0);
        let second = pos2(9.0, 9.0);

        resolver.press(first, start);
        assert_eq!(
            resolver.press(second, start + Duration::from_millis(500)),
            Some(PointerGesture::Click(first))
        );
        assert!(resolver.is_pending());
        assert_eq!(
            resolver.poll(start + Duration::from_millis(900)),
            Some(PointerGesture::Click(second))
        );
    }

    #[test]
    fn click_selects_or_clears() {
        let n = node();
        let at = pos2(1.0, 1.0);
        assert_eq!(
            resolve_gesture(PointerGesture::Click(at), Some(&n)),
            GestureOutcome::NodeSelected("card-1".to_owned())
        );
        assert_eq!(
            resolve_gesture(PointerGesture::Click(at), None),
            GestureOutcome::SelectionCleared
        );
    }

    #[test]
    fn double_click_only_fires_double_click_callback() {
        let n = node();
        let mut recorder = Recorder::default();
        let outcome = resolve_gesture(PointerGesture::DoubleClick(pos2(0.0, 0.0)), Some(&n));
        outcome.notify(&mut recorder);

        assert!(recorder.selected.is_empty());
        assert_eq!(recorder.opened, vec!["card-1".to_owned()]);
        assert_eq!(
            resolve_gesture(PointerGesture::DoubleClick(pos2(0.0, 0.0)), None),
            GestureOutcome::Ignored
        );
    }
}
