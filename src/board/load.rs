use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use super::records::BoardSnapshot;

pub fn load_board(path: &Path) -> Result<BoardSnapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read board export {}", path.display()))?;
    parse_board(&raw).with_context(|| format!("failed to parse board export {}", path.display()))
}

/// Accepts either a bare snapshot object or one wrapped in a `board` key.
pub fn parse_board(raw: &str) -> Result<BoardSnapshot> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in board export")?;
    let object = parsed
        .as_object()
        .ok_or_else(|| anyhow!("unexpected JSON type for board export; expected an object"))?;

    let snapshot_value = object.get("board").unwrap_or(&parsed);
    let snapshot =
        BoardSnapshot::deserialize(snapshot_value).context("invalid board snapshot layout")?;

    log::info!(
        "loaded board {:?} with {} cards and {} relationships",
        snapshot.board_id,
        snapshot.cards.len(),
        snapshot.relationships.len()
    );
    Ok(snapshot)
}
