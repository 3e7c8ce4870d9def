//! Grid layout for the board.
//!
//! Widgets are placed on a fixed-column grid in cell units. The drag/resize
//! behaviour belongs to whatever front end draws the grid; this module only
//! knows how cells map to pixels and how to keep a rect on the grid.

mod grid;

pub use board_api::GridRect;
pub use grid::{GridSpec, PixelRect};
