//! Network analysis space for nest boards.
//!
//! Turns board cards and their relationships into a pannable, zoomable graph,
//! clusters it with one of three algorithms, and drives a phased side panel.
//! All mutable analysis state goes through [`store::AnalysisStore`].

pub mod board;
pub mod clustering;
pub mod network;
pub mod panel;
pub mod store;
pub mod viewport;
