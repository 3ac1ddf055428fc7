// Document layout: static font metrics and A4 pagination of the report.
// Pagination is CPU-bound; handlers run it inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod paginate;

pub use font_metrics::{FontFamily, PageConfig};
pub use paginate::{paginate, Page};
