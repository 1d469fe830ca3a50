//! UI module - TUI rendering components.
//!
//! - `layout.rs`: Main layout orchestration
//! - `left_panel.rs`: Page list + server status
//! - `pages/`: One renderer per page
//! - `widgets/`: Reusable UI components

mod layout;
mod left_panel;

pub mod pages;
pub mod widgets;

pub use layout::render;
