//! # vorosweep
//!
//! `vorosweep` is a Rust library for bounded 2D Voronoi diagrams, designed to be used in Rust
//! as well as compiled to WebAssembly (WASM). Diagrams are built with Fortune's sweep-line
//! algorithm, clipped to an axis-aligned rectangle and optionally closed with border edges.
//!
//! ## Features
//!
//! - **Sweep line**: a single deterministic pass over the sites, with degenerate inputs
//!   (collinear, co-circular, on the rectangle, in its corners) handled through one [`Tolerance`].
//! - **Bounded output**: every edge is clipped to the rectangle and every endpoint is tagged with
//!   its [`BorderLocation`].
//! - **Border edges**: the rectangle perimeter can be emitted as edges so every cell is closed.
//! - **Cells**: per-site polygons with area and centroid, and Lloyd relaxation.
//! - **WASM-first**: `wasm-bindgen` bindings, with `rayon` threads via `wasm-bindgen-rayon`.
//!
//! ## Example
//!
//! ```
//! use vorosweep::{tessellate, BorderMode, Site};
//!
//! let sites = [
//!     Site::new(500.0, 900.0),
//!     Site::new(300.0, 700.0),
//!     Site::new(300.0, 100.0),
//!     Site::new(700.0, 100.0),
//!     Site::new(700.0, 700.0),
//! ];
//! let edges = tessellate(&sites, 0.0, 0.0, 1000.0, 1000.0, BorderMode::MakeBorderEdges).unwrap();
//! assert_eq!(edges.len(), 15);
//! ```
//!
//! ## Main Interface
//!
//! The primary entry point is [`tessellate`]. The [`Tessellation`] struct keeps generators,
//! edges and cells together for repeated calculation and relaxation.

mod border;
mod bounds;
mod cell;
mod clipper;
mod diagram;
mod error;
mod geometry;
pub mod sweep;
mod tessellation;
mod wasm;

pub use border::make_border_edges;
pub use bounds::BorderLocation;
pub use bounds::BoundingBox;
pub use bounds::Side;
pub use bounds::BOX_ID_BOTTOM;
pub use bounds::BOX_ID_LEFT;
pub use bounds::BOX_ID_RIGHT;
pub use bounds::BOX_ID_TOP;
pub use cell::build_cells;
pub use cell::Cell2D;
pub use clipper::clip_edges;
pub use diagram::BorderMode;
pub use diagram::Edge;
pub use diagram::Point;
pub use diagram::Site;
pub use error::Result;
pub use error::VoronoiError;
pub use geometry::breakpoint_x;
pub use geometry::circumcircle_bottom;
pub use geometry::clip_line;
pub use geometry::Circle;
pub use geometry::Clip;
pub use geometry::Tolerance;
pub use tessellation::tessellate;
pub use tessellation::tessellate_batch;
pub use tessellation::tessellate_with;
pub use tessellation::validate_sites;
pub use tessellation::Tessellation;
pub use wasm::BoundingBox2D;
pub use wasm::Tessellation2D;
