mod load;
mod records;

pub use load::{load_board, parse_board};
pub use records::{BoardSnapshot, Card, Relationship};
