//! benchplot-report: turns normalized benchmark data into HTML pages.

pub mod html;
pub mod palette;

pub use html::{Renderer, RunInfo};
pub use palette::{Palette, Rgb};
