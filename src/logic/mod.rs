//! Pure feed logic: relative-time labels and the display model.

pub mod display;
pub mod relative_time;

pub use display::{DisplayItem, RenderModel, build_render_model};
pub use relative_time::{Published, parse_published, relative_label};
