//! Report rendering: SVG histograms, the HTML report, terminal text and JSON.

mod html;
mod json;
mod svg;
mod terminal;

pub use html::HtmlReport;
pub use json::{to_json, to_json_pretty};
pub use svg::{Chart, Histogram};
pub use terminal::{format_report, format_summary};
