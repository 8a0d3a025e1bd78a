//! Console renderer for viewerscan.
//!
//! Formats the visitor summary as a header line plus an ASCII table.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::types::viewer::VisitRecord;

/// Timestamp layout used in the TIME column.
pub const TIME_FORMAT: &str = "%m/%d/%YT%H:%M:%SZ";

#[derive(Tabled)]
struct ViewerRow {
    #[tabled(rename = "USERNAME")]
    username: String,
    #[tabled(rename = "TIME")]
    time: String,
}

/// Trait defining summary rendering.
pub trait RendererTrait {
    fn render(&self, total_unique: usize, recent: &[VisitRecord]) -> String;
}

/// Plain-text table renderer.
#[derive(Debug, Default, Clone, Copy)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Formats a last-seen time for display.
    pub fn format_time(record: &VisitRecord) -> String {
        record.last_seen.format(TIME_FORMAT).to_string()
    }
}

impl RendererTrait for Renderer {
    /// Renders `Total Number of Unique Viewers: N` followed by the table.
    /// Rows keep the given order, so the newest viewer is the bottom row.
    fn render(&self, total_unique: usize, recent: &[VisitRecord]) -> String {
        let rows = recent.iter().map(|record| ViewerRow {
            username: record.viewer.to_string(),
            time: Self::format_time(record),
        });

        let mut table = Table::new(rows);
        table.with(Style::ascii());

        format!("Total Number of Unique Viewers: {}\n{}", total_unique, table)
    }
}
