mod export;
mod summary;
pub mod views;

pub use export::{rows_to_csv, ExportError};
pub use summary::{format_percentage, format_price, ReportBuilder};
pub use views::{PriceRangeView, PropertyReport, PropertyRow, ReportSummary, ScoreRangeView};
