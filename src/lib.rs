//! DD Form 1750 Packing List Merge Library
//!
//! Combines two copies of a packing list into one printable document: the
//! line items are read from one PDF, the shipment metadata (packed by,
//! number of boxes, requisition, order number, date) from another, and
//! both are drawn onto a clean multi-page form.
//!
//! This library provides functionality to:
//! - Extract admin fields from fixed regions of a page
//! - Extract item rows from tables or plain text lines
//! - Split items into fixed-size pages
//! - Render the merged form as a PDF
//!
//! # Example
//!
//! ```no_run
//! use dd1750_merge::merge_documents;
//!
//! let items = std::fs::read("items.pdf").unwrap();
//! let admin = std::fs::read("admin.pdf").unwrap();
//!
//! let merged = merge_documents(&items, &admin).expect("Failed to merge packing lists");
//! std::fs::write("merged.pdf", merged).unwrap();
//! ```

pub mod error;
pub mod extract;
pub mod layout;
pub mod pdf;
pub mod record;

// Re-export commonly used items
pub use error::{DocumentKind, Error, Result};
pub use extract::ExtractOptions;
pub use record::{AdminField, AdminRecord, ItemRecord};

use layout::ITEMS_PER_PAGE;

/// Options for merging an items copy with an admin copy
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Item rows printed per page
    pub page_capacity: usize,
    /// How the two documents are read
    pub extract: ExtractOptions,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            page_capacity: ITEMS_PER_PAGE,
            extract: ExtractOptions::default(),
        }
    }
}

/// Merge the items and admin documents with default options
pub fn merge_documents(items: &[u8], admin: &[u8]) -> Result<Vec<u8>> {
    merge_documents_with(items, admin, &MergeOptions::default())
}

/// Merge the items and admin documents into one rendered PDF
///
/// Admin extraction never fails; a missing or unreadable admin copy gives
/// a form with the labels only. The items copy must be readable and hold
/// at least one item.
pub fn merge_documents_with(items: &[u8], admin: &[u8], options: &MergeOptions) -> Result<Vec<u8>> {
    let rows_per_page = pdf::form::rows_per_page();
    if options.page_capacity > rows_per_page {
        return Err(Error::InvalidOptions(format!(
            "page capacity {} exceeds the {} rows the form can hold",
            options.page_capacity, rows_per_page
        )));
    }

    let admin_record = extract::extract_admin(admin, &options.extract);
    let item_records = extract::extract_items(items, &options.extract)?;
    if item_records.is_empty() {
        return Err(Error::NoItems);
    }

    let chunks = layout::paginate(&item_records, &admin_record, options.page_capacity);
    let bytes = pdf::render_document(&chunks)?;

    log::info!(
        "Merged {} items onto {} pages ({} bytes)",
        item_records.len(),
        chunks.len(),
        bytes.len()
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_beyond_form_is_rejected() {
        let options = MergeOptions {
            page_capacity: ITEMS_PER_PAGE + 1,
            ..MergeOptions::default()
        };
        let err = merge_documents_with(b"", b"", &options).unwrap_err();
        assert!(matches!(err, Error::InvalidOptions(_)));
    }

    #[test]
    fn test_unreadable_items_document() {
        let err = merge_documents(b"garbage", b"garbage").unwrap_err();
        assert!(matches!(
            err,
            Error::Unreadable {
                document: DocumentKind::Items,
                ..
            }
        ));
    }
}
