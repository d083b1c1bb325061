//! Staggered mounting of side-panel content.
//!
//! Opening a panel mounts only its shell first; the full content follows once
//! [`SETTLE_DELAY`] has passed so the slide-in runs before expensive children
//! are built. The controller never sleeps: the host calls
//! [`PhaseController::tick`] each frame and schedules a repaint for
//! [`PhaseController::next_deadline`].

use std::time::{Duration, Instant};

pub const SETTLE_DELAY: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SidePanel {
    Relations,
    Clustering,
    Theory,
    View,
    Search,
}

impl SidePanel {
    pub const ALL: [SidePanel; 5] = [
        Self::Relations,
        Self::Clustering,
        Self::Theory,
        Self::View,
        Self::Search,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Relations => "Relations",
            Self::Clustering => "Clustering",
            Self::Theory => "Theory",
            Self::View => "View",
            Self::Search => "Search",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelPhase {
    /// Nothing mounted yet.
    Hidden,
    /// Canvas only, no panel.
    Canvas,
    /// Panel frame is sliding in; content deferred until `settles_at`.
    Shell { panel: SidePanel, settles_at: Instant },
    /// Panel frame and full content mounted.
    Full { panel: SidePanel },
}

impl PanelPhase {
    pub fn index(self) -> u8 {
        match self {
            Self::Hidden => 0,
            Self::Canvas => 1,
            Self::Shell { .. } => 2,
            Self::Full { .. } => 3,
        }
    }

    pub fn panel(self) -> Option<SidePanel> {
        match self {
            Self::Shell { panel, .. } | Self::Full { panel } => Some(panel),
            Self::Hidden | Self::Canvas => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PhaseController {
    phase: PanelPhase,
    settle_delay: Duration,
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new(SETTLE_DELAY)
    }
}

impl PhaseController {
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            phase: PanelPhase::Hidden,
            settle_delay,
        }
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    pub fn show_canvas(&mut self) {
        if self.phase == PanelPhase::Hidden {
            self.phase = PanelPhase::Canvas;
        }
    }

    pub fn open(&mut self, panel: SidePanel, now: Instant) {
        self.phase = PanelPhase::Shell {
            panel,
            settles_at: now + self.settle_delay,
        };
    }

    pub fn close(&mut self) {
        self.phase = PanelPhase::Canvas;
    }

    /// Opens `panel`, or closes it when it is already the open panel.
    /// Returns the panel that is open afterwards.
    pub fn toggle(&mut self, panel: SidePanel, now: Instant) -> Option<SidePanel> {
        if self.phase.panel() == Some(panel) {
            self.close();
        } else {
            self.open(panel, now);
        }
        self.phase.panel()
    }

    /// Follows the store's active panel. A change restarts the phase sequence.
    pub fn observe(&mut self, active: Option<SidePanel>, now: Instant) {
        if self.phase.panel() == active && self.phase != PanelPhase::Hidden {
            return;
        }

        match active {
            Some(panel) => self.open(panel, now),
            None => self.close(),
        }
    }

    /// Promotes a settled shell to full content. Returns true on a transition.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let PanelPhase::Shell { panel, settles_at } = self.phase
            && now >= settles_at
        {
            self.phase = PanelPhase::Full { panel };
            return true;
        }
        false
    }

    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        match self.phase {
            PanelPhase::Shell { settles_at, .. } => Some(settles_at.saturating_duration_since(now)),
            _ => None,
        }
    }

    /// The panel whose full content may be built this frame.
    pub fn mounted(&self) -> Option<SidePanel> {
        match self.phase {
            PanelPhase::Full { panel } => Some(panel),
            _ => None,
        }
    }
}
