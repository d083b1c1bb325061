mod app;
mod util;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};

use nest_analysis::board::{Card, Relationship, load_board};
use nest_analysis::clustering::{ClusteringAlgorithm, ClusteringConfig};
use nest_analysis::network::TransformCache;
use nest_analysis::store::{Action, AnalysisStore};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlgorithmArg {
    Density,
    Kmeans,
    Community,
}

impl From<AlgorithmArg> for ClusteringAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Density => Self::Density,
            AlgorithmArg::Kmeans => Self::KMeans,
            AlgorithmArg::Community => Self::Community,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board export (JSON) with cards and relationships.
    #[arg(long, default_value = "board.json")]
    board: PathBuf,

    /// Seed for missing card positions and k-means sampling.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, value_enum, default_value_t = AlgorithmArg::Community)]
    algorithm: AlgorithmArg,

    /// Write cluster labels to this file and exit without opening a window.
    #[arg(long)]
    export_labels: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let clustering = ClusteringConfig {
        algorithm: args.algorithm.into(),
        seed: args.seed,
        ..ClusteringConfig::default()
    };

    if let Some(export_path) = &args.export_labels {
        return export_headless(&args.board, args.seed, clustering, export_path);
    }

    let launch = app::LaunchOptions {
        board_path: args.board,
        seed: args.seed,
        clustering,
        export_path: PathBuf::from("cluster-labels.json"),
    };
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "nest-analysis",
        options,
        Box::new(move |cc| Ok(Box::new(app::NestAnalysisApp::new(cc, launch)))),
    )
    .map_err(|error| anyhow!("window failed: {error}"))
}

fn export_headless(
    board_path: &Path,
    seed: u64,
    clustering: ClusteringConfig,
    export_path: &Path,
) -> Result<()> {
    let snapshot = load_board(board_path)?;
    let cards: Arc<[Card]> = snapshot.cards.into();
    let relationships: Arc<[Relationship]> = snapshot.relationships.into();
    let (network, _) = TransformCache::new().get_or_build(&cards, &relationships, seed);

    let mut store = AnalysisStore::new();
    store.dispatch(Action::SetClusteringConfig(clustering));
    store.load_network(network);
    store.refresh_clusters();

    app::export::write_labels(export_path, store.state().cluster_labels())
}
