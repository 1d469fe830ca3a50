//! Reusable UI components.

pub mod avatar;
pub mod badge;
mod help_overlay;
mod metric_card;
mod progress;

pub use help_overlay::{centered_rect, render_help_overlay};
pub use metric_card::{render_metric_card, MetricCard, SKELETON};
pub use progress::{progress_bar_color, render_progress_bar, status_item};
