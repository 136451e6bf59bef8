//! UI components: the graph canvas and the sidebar panels around it.

pub mod graph_canvas;
pub mod panels;
