use serde::Deserialize;
use serde_json::{Map, Value};

/// One user-authored card on a board.
#[derive(Clone, Debug, Deserialize)]
pub struct Card {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub column: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// A pairwise link between two cards as stored by the board backend.
#[derive(Clone, Debug, Deserialize)]
pub struct Relationship {
    pub card_id: String,
    pub related_card_id: String,
    #[serde(default)]
    pub strength: Option<f64>,
    #[serde(default)]
    pub relationship_type: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BoardSnapshot {
    #[serde(default, alias = "boardId")]
    pub board_id: String,
    #[serde(default, alias = "nestId")]
    pub nest_id: String,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}
