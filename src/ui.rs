//! Terminal UI of twinpane: the frame renderer and its drawing helpers.

pub mod render;
pub mod widgets;

pub use render::render;
