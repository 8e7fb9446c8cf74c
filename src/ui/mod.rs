//! Terminal UI module using ratatui.
//!
//! - `render`: main frame rendering and layout
//! - `input`: keyboard event handling
//! - `styles`: color scheme and text styling
//! - `views`: page-specific content rendering (form, list)

pub mod input;
pub mod render;
pub mod styles;
pub mod views;
