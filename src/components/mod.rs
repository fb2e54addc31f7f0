//! UI components.

pub mod traversal_graph;
