//! Core library for laying out named rectangles on a canvas that grows to fit.
//!
//! - Algorithm: binary-tree growing packer (find free slot, split, grow right or down)
//! - Input: delimited cut lists (`name,width,height,quantity`) with unit scaling and orientation
//! - Pipeline: `pack_layout` sorts blocks and returns a `Layout` with frames and unplaced blocks
//! - Output: JSON export, SVG rendering with labels, optional PNG preview
//!
//! Quick example:
//! ```ignore
//! use growpack_core::{Block, PackerConfig, pack_layout};
//! # fn main() -> growpack_core::Result<()> {
//! let blocks = vec![
//!     Block::new("side panel".to_string(), 3.0, 5.0),
//!     Block::new("shelf".to_string(), 3.0, 5.0),
//! ];
//! let layout = pack_layout(blocks, PackerConfig::default())?;
//! layout.ensure_complete()?;
//! println!("canvas: {}x{}", layout.width, layout.height);
//! # Ok(()) }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod layout;
pub mod model;
pub mod packer;
pub mod render;

pub use config::*;
pub use error::*;
pub use export::*;
pub use input::*;
pub use layout::*;
pub use model::*;
pub use packer::*;
pub use render::*;

/// Convenience prelude for common types and functions.
/// Importing `growpack_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{InputConfig, PackerConfig, PackerConfigBuilder, RenderOptions, SortOrder};
    pub use crate::model::{Block, Frame, Layout, LayoutStats, Placement, Rect};
    pub use crate::packer::{GrowDirection, GrowingPacker, GrowthEvent, Packer};
    pub use crate::{pack_layout, parse_items, read_items, render_svg, to_json};
}
