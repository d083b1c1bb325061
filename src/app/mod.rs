use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};

use nest_analysis::board::{BoardSnapshot, Card, Relationship, load_board};
use nest_analysis::clustering::ClusteringConfig;
use nest_analysis::network::{NetworkData, TransformCache, TransformReport};
use nest_analysis::panel::PhaseController;
use nest_analysis::store::{Action, AnalysisStore};
use nest_analysis::viewport::{ClickResolver, GraphCallbacks, VisibleSet};

pub mod export;
mod graph;
mod render_utils;
mod ui;

pub struct NestAnalysisApp {
    launch: LaunchOptions,
    state: AppState,
    reload_rx: Option<Receiver<Result<BoardSnapshot, String>>>,
}

/// Settings carried over from the command line.
#[derive(Clone)]
pub struct LaunchOptions {
    pub board_path: PathBuf,
    pub seed: u64,
    pub clustering: ClusteringConfig,
    pub export_path: PathBuf,
}

enum AppState {
    Loading {
        rx: Receiver<Result<BoardSnapshot, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

/// Board data as received from the board collaborator. The `Arc`s are the
/// identity the transform cache keys on.
struct BoardInput {
    board_id: String,
    nest_id: String,
    cards: Arc<[Card]>,
    relationships: Arc<[Relationship]>,
}

impl From<BoardSnapshot> for BoardInput {
    fn from(snapshot: BoardSnapshot) -> Self {
        Self {
            board_id: snapshot.board_id,
            nest_id: snapshot.nest_id,
            cards: snapshot.cards.into(),
            relationships: snapshot.relationships.into(),
        }
    }
}

/// Receives viewport selection signals on behalf of the wider app.
#[derive(Default)]
struct HostCallbacks {
    open_card: Option<String>,
}

impl GraphCallbacks for HostCallbacks {
    fn on_node_select(&mut self, node_id: &str) {
        log::info!("card selected: {node_id}");
    }

    fn on_node_double_click(&mut self, node_id: &str) {
        log::info!("card detail requested: {node_id}");
        self.open_card = Some(node_id.to_owned());
    }
}

/// Search results for one query over one filtered network snapshot.
struct SearchMatchCache {
    query: String,
    network: Arc<NetworkData>,
    matches: Arc<Vec<SearchHit>>,
}

#[derive(Clone)]
struct SearchHit {
    id: String,
    title: String,
    score: i64,
}

struct ViewModel {
    board: BoardInput,
    seed: u64,
    launch_clustering: ClusteringConfig,
    transform_cache: TransformCache,
    report: TransformReport,
    store: AnalysisStore,
    phases: PhaseController,
    callbacks: HostCallbacks,
    clicks: ClickResolver,
    visible: VisibleSet,
    canvas_size: Vec2,
    tint_by_cluster: bool,
    search: String,
    search_match_cache: Option<SearchMatchCache>,
    tag_filter_text: String,
    export_path: PathBuf,
    export_status: Option<String>,
}

impl NestAnalysisApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, launch: LaunchOptions) -> Self {
        let state = Self::start_load(launch.board_path.clone());
        Self {
            launch,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(board_path: PathBuf) -> Receiver<Result<BoardSnapshot, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_board(&board_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(board_path: PathBuf) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(board_path),
        }
    }
}

impl eframe::App for NestAnalysisApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(snapshot) => {
                            AppState::Ready(Box::new(ViewModel::new(snapshot, &self.launch)))
                        }
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading board network...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load board export");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.launch.board_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    model.store.dispatch(Action::SetLoading(true));
                    self.reload_rx = Some(Self::spawn_load(self.launch.board_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(Ok(snapshot)) => model.replace_board(snapshot),
                        Ok(Err(error)) => {
                            log::warn!("board reload failed: {error}");
                            model.store.dispatch(Action::SetError(Some(error)));
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(AppState::Error("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}

impl ViewModel {
    fn new(snapshot: BoardSnapshot, launch: &LaunchOptions) -> Self {
        let mut model = Self {
            board: BoardInput::from(snapshot),
            seed: launch.seed,
            launch_clustering: launch.clustering.clone(),
            transform_cache: TransformCache::new(),
            report: TransformReport::default(),
            store: AnalysisStore::new(),
            phases: PhaseController::default(),
            callbacks: HostCallbacks::default(),
            clicks: ClickResolver::default(),
            visible: VisibleSet::default(),
            canvas_size: Vec2::ZERO,
            tint_by_cluster: true,
            search: String::new(),
            search_match_cache: None,
            tag_filter_text: String::new(),
            export_path: launch.export_path.clone(),
            export_status: None,
        };

        model
            .store
            .dispatch(Action::SetClusteringConfig(launch.clustering.clone()));
        model.rebuild_network();
        model
    }

    fn rebuild_network(&mut self) {
        let (network, report) = self.transform_cache.get_or_build(
            &self.board.cards,
            &self.board.relationships,
            self.seed,
        );
        self.report = report;
        self.store.load_network(network);
    }

    /// Swaps in a freshly loaded board. A different board starts from a clean
    /// analysis state; the same board keeps viewport, panels and settings.
    fn replace_board(&mut self, snapshot: BoardSnapshot) {
        let switching_boards = snapshot.board_id != self.board.board_id;
        self.board = BoardInput::from(snapshot);

        if switching_boards {
            let clustering = self.store.state().clustering_config.clone();
            self.store.dispatch(Action::Reset);
            self.store.dispatch(Action::SetClusteringConfig(clustering));
            self.search.clear();
            self.tag_filter_text.clear();
        }

        self.search_match_cache = None;
        self.rebuild_network();
    }

    /// Back to the initial analysis state for this board. Launch clustering
    /// settings survive, as they do when switching boards.
    fn reset_analysis(&mut self) {
        self.store.dispatch(Action::Reset);
        self.store
            .dispatch(Action::SetClusteringConfig(self.launch_clustering.clone()));
        self.tag_filter_text.clear();
        self.search.clear();
        self.search_match_cache = None;
        self.rebuild_network();
    }

    fn set_selected(&mut self, selected: Option<String>) {
        if self.store.state().selected_node == selected {
            return;
        }

        match selected {
            Some(id) => {
                self.callbacks.on_node_select(&id);
                self.store.dispatch(Action::SelectNode(id));
            }
            None => self.store.dispatch(Action::ClearSelection),
        }
    }

    fn highlight(&mut self, ids: HashSet<String>) {
        self.store.dispatch(Action::SetHighlightedNodes(ids));
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use nest_analysis::board::parse_board;

    use super::*;

    pub(crate) fn model(clustering: ClusteringConfig) -> ViewModel {
        let snapshot = parse_board(
            r#"{
                "boardId": "board-1",
                "nestId": "nest-1",
                "cards": [
                    { "id": "a", "title": "Pricing survey", "column": "insights", "x": 0, "y": 0 },
                    { "id": "b", "title": "Pricing interviews", "column": "questions", "x": 30, "y": 0 },
                    { "id": "c", "title": "Onboarding", "column": "themes", "tags": ["pricing"] }
                ],
                "relationships": [
                    { "card_id": "a", "related_card_id": "b", "strength": 0.9 }
                ]
            }"#,
        )
        .expect("fixture board parses");
        let launch = LaunchOptions {
            board_path: PathBuf::from("board.json"),
            seed: 9,
            clustering,
            export_path: PathBuf::from("labels.json"),
        };
        ViewModel::new(snapshot, &launch)
    }
}
