//! Card graph model shared by the viewport, clustering and store.
//!
//! Board cards and relationships come in through [`to_network_data`], which
//! produces an immutable [`NetworkData`] snapshot. Everything downstream reads
//! that snapshot by reference or through an `Arc`.

mod cache;
mod filter;
mod transform;
mod types;

pub use cache::TransformCache;
pub use filter::FilterConfig;
pub use transform::{TransformOutput, TransformReport, to_network_data};
pub use types::{EdgeType, NetworkData, NetworkEdge, NetworkNode, NodeType};
