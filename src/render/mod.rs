pub mod colors;
pub mod report;
pub mod svg;

pub use colors::{AppColor, ColorRamp};
pub use svg::{render_svg, render_svg_with_labels, SvgConfig};
