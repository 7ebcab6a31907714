//! Error types for the packing list merge library

use std::fmt;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Which of the two uploaded copies a failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// The copy filled in with line items
    Items,
    /// The copy filled in with shipment metadata
    Admin,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Items => f.write_str("items"),
            DocumentKind::Admin => f.write_str("admin"),
        }
    }
}

/// Main error type for the packing list merge library
#[derive(Error, Debug)]
pub enum Error {
    /// The items document was readable but contained no valid rows
    #[error("No items found in the items document")]
    NoItems,

    /// The byte buffer is not a parseable PDF
    #[error("The {document} document could not be read: {source}")]
    Unreadable {
        document: DocumentKind,
        #[source]
        source: lopdf::Error,
    },

    /// The output document could not be produced
    #[error("Failed to render the merged document")]
    Render(#[source] lopdf::Error),

    /// Rejected configuration
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

impl Error {
    /// Short message suitable for showing to the person who uploaded the files.
    ///
    /// Render failures are internal, so their diagnostic detail stays out.
    pub fn user_message(&self) -> String {
        match self {
            Error::NoItems => {
                "No items were found in the items PDF. Check that it contains typed, selectable text."
                    .to_string()
            }
            Error::Unreadable { document, .. } => {
                format!("The {} PDF could not be read. Please upload a valid PDF file.", document)
            }
            Error::Render(_) => "Something went wrong while building the merged PDF.".to_string(),
            Error::InvalidOptions(msg) => format!("Invalid options: {}", msg),
        }
    }

    /// Whether the person uploading can fix this by changing their input
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Error::NoItems | Error::Unreadable { .. })
    }
}
