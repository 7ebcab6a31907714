//! Extraction of admin fields and item rows from uploaded packing lists

mod admin;
mod items;

pub use admin::{extract_admin, AdminRegions};
pub use items::{extract_items, MIN_TABLE_COLUMNS, NOMENCLATURE_MAX_LEN};

/// Maximum number of items read from one document
pub const DEFAULT_ITEM_CAP: usize = 100;

/// Options controlling how text is read back out of a PDF
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Extraction stops once this many items have been read
    pub item_cap: usize,
    /// Runs further apart than this many em start a new table cell
    pub cell_gap_em: f32,
    /// Slack in points when matching cells to column anchors
    pub column_tolerance: f32,
    /// Where each admin value sits on the first page
    pub admin_regions: AdminRegions,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            item_cap: DEFAULT_ITEM_CAP,
            cell_gap_em: 0.9,
            column_tolerance: 3.0,
            admin_regions: AdminRegions::default(),
        }
    }
}

/// Replace line breaks with spaces, collapse whitespace and trim
pub(crate) fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First `max_chars` characters of `text`, trailing whitespace removed
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    let truncated: String = text.chars().take(max_chars).collect();
    truncated.trim_end().to_string()
}
