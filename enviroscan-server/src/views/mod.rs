mod chart;
mod format;
mod page;

pub use chart::render_trend_chart;
pub use format::{escape_html, format_number, format_reading};
pub use page::render_page;
