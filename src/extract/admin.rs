//! Admin field extraction from fixed regions of the first page

use lopdf::Document;

use super::ExtractOptions;
use crate::error::DocumentKind;
use crate::pdf::form;
use crate::pdf::text::{PageText, Rect};
use crate::record::{AdminField, AdminRecord};

/// Page region inspected for each admin field
#[derive(Debug, Clone, PartialEq)]
pub struct AdminRegions {
    regions: Vec<(AdminField, Rect)>,
}

impl Default for AdminRegions {
    /// The value slots of the printed form
    fn default() -> Self {
        Self {
            regions: AdminField::ALL
                .iter()
                .map(|&field| (field, form::admin_value_region(field)))
                .collect(),
        }
    }
}

impl AdminRegions {
    /// Replace the region of one field
    pub fn set(&mut self, field: AdminField, rect: Rect) {
        match self.regions.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = rect,
            None => self.regions.push((field, rect)),
        }
    }

    pub fn get(&self, field: AdminField) -> Option<Rect> {
        self.regions
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, rect)| *rect)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AdminField, Rect)> + '_ {
        self.regions.iter().copied()
    }
}

/// Read the five admin fields from the first page of `bytes`.
///
/// Never fails: a field whose region holds no text is left empty, and a
/// document that cannot be read at all yields an empty record.
pub fn extract_admin(bytes: &[u8], options: &ExtractOptions) -> AdminRecord {
    let doc = match Document::load_mem(bytes) {
        Ok(doc) => doc,
        Err(e) => {
            log::warn!("The {} document could not be read: {}", DocumentKind::Admin, e);
            return AdminRecord::default();
        }
    };

    let Some(&page_id) = doc.get_pages().values().next() else {
        log::warn!("The {} document has no pages", DocumentKind::Admin);
        return AdminRecord::default();
    };

    let page = match PageText::read(&doc, page_id) {
        Ok(page) => page,
        Err(e) => {
            log::warn!(
                "The first page of the {} document could not be read: {}",
                DocumentKind::Admin,
                e
            );
            return AdminRecord::default();
        }
    };

    let record = AdminRecord::from_fields(options.admin_regions.iter().map(|(field, rect)| {
        let text = page
            .within(&rect)
            .iter()
            .map(|run| run.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        if text.trim().is_empty() {
            log::debug!("No text in the {} region", field.name());
        }
        (field, text)
    }));

    log::debug!("Admin record: {:?}", record);
    record
}
