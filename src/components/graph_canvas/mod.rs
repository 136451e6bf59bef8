//! Canvas surface for the knowledge graph.
//!
//! Draws a [`RenderFrame`](crate::graph::RenderFrame) on an HTML canvas with:
//! - Per-type node shapes and colors, per-type edge dash styles
//! - Selection emphasis driven by each element's visual state
//! - Pan, wheel zoom and zoom/fit buttons
//! - Tap reporting back to the host as [`SurfaceEvent`](crate::graph::SurfaceEvent)s
//!
//! # Example
//!
//! ```ignore
//! use kusuri_graph::components::graph_canvas::GraphCanvas;
//!
//! view! {
//!     <GraphCanvas
//!         frame=frame
//!         layout_revision=layout_revision
//!         focus=focus
//!         on_event=Callback::new(move |event| session.update(|s| handle(s, event)))
//!         fullscreen=true
//!     />
//! }
//! ```

mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;

pub use component::GraphCanvas;
pub use theme::Theme;
