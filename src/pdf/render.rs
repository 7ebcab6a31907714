//! Rendering of the merged packing list using lopdf
//!
//! Each page is one content stream drawn against a shared Resources
//! dictionary holding the two standard fonts. Pages are appended one at a
//! time; nothing already rendered is touched again.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::error::{Error, Result};
use crate::layout::{PageChunk, PageDimensions};
use crate::pdf::form::{self, Column};
use crate::pdf::metrics::{encode_win_ansi, fit_to_width, wrap_words};
use crate::record::{AdminField, ItemRecord};

/// Builds the output document page by page
pub struct FormRenderer {
    doc: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

impl Default for FormRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FormRenderer {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(Object::Dictionary(standard_font("Helvetica")));
        let bold_id = doc.add_object(Object::Dictionary(standard_font("Helvetica-Bold")));

        let mut fonts = Dictionary::new();
        fonts.set(form::FONT_REGULAR, Object::Reference(regular_id));
        fonts.set(form::FONT_BOLD, Object::Reference(bold_id));
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));
        let resources_id = doc.add_object(Object::Dictionary(resources));

        Self {
            doc,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
        }
    }

    /// Number of pages rendered so far
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Draw one chunk as a new page at the end of the document
    pub fn render_page(&mut self, chunk: &PageChunk) -> Result<()> {
        let content = Content {
            operations: Self::page_operations(chunk),
        };
        let encoded = content.encode().map_err(Error::Render)?;
        let content_id = self.doc.add_object(Stream::new(Dictionary::new(), encoded));

        let page = PageDimensions::letter();
        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page.width.pt()),
                Object::Real(page.height.pt()),
            ]),
        );
        page_dict.set("Resources", Object::Reference(self.resources_id));
        page_dict.set("Contents", Object::Reference(content_id));

        let page_id = self.doc.add_object(Object::Dictionary(page_dict));
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Content stream operations for one page.
    ///
    /// Depends only on the chunk, so the same chunk always yields the same
    /// operations.
    pub fn page_operations(chunk: &PageChunk) -> Vec<Operation> {
        let mut page = PageContent::default();

        draw_title(&mut page);
        draw_admin(&mut page, chunk);
        draw_page_stamp(&mut page, chunk.page_index, chunk.total_pages);
        draw_column_headers(&mut page);
        draw_rows(&mut page, chunk.items);
        if chunk.is_last() {
            draw_certification(&mut page);
        }

        page.ops
    }

    /// Write the page tree and catalog and serialize the document
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let kids: Vec<Object> = self
            .page_ids
            .iter()
            .map(|&id| Object::Reference(id))
            .collect();

        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Count", Object::Integer(self.page_ids.len() as i64));
        pages.set("Kids", Object::Array(kids));
        self.doc.objects.insert(self.pages_id, Object::Dictionary(pages));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(self.pages_id));
        let catalog_id = self.doc.add_object(Object::Dictionary(catalog));
        self.doc.trailer.set("Root", Object::Reference(catalog_id));

        self.doc.compress();

        let mut bytes = Vec::new();
        self.doc
            .save_to(&mut bytes)
            .map_err(|e| Error::Render(e.into()))?;
        Ok(bytes)
    }
}

/// Render every chunk, in order, into one document
pub fn render_document(chunks: &[PageChunk]) -> Result<Vec<u8>> {
    let mut renderer = FormRenderer::new();
    for chunk in chunks {
        renderer.render_page(chunk)?;
    }
    log::debug!("Rendered {} pages", renderer.page_count());
    renderer.finish()
}

/// Standard 14 font with WinAnsiEncoding; needs no embedded program
fn standard_font(base_font: &str) -> Dictionary {
    let mut font = Dictionary::new();
    font.set("Type", Object::Name(b"Font".to_vec()));
    font.set("Subtype", Object::Name(b"Type1".to_vec()));
    font.set("BaseFont", Object::Name(base_font.as_bytes().to_vec()));
    font.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
    font
}

#[derive(Default)]
struct PageContent {
    ops: Vec<Operation>,
}

impl PageContent {
    fn text(&mut self, font: &str, size: f32, x: f32, y: f32, text: &str) {
        if text.is_empty() {
            return;
        }
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "Tf",
            vec![Object::Name(font.as_bytes().to_vec()), Object::Real(size)],
        ));
        self.ops.push(Operation::new("Td", vec![Object::Real(x), Object::Real(y)]));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    /// Text clipped to `max_width` points
    fn clipped_text(&mut self, font: &str, size: f32, x: f32, y: f32, text: &str, max_width: f32) {
        let clipped = fit_to_width(text.trim(), size, max_width).trim_end();
        self.text(font, size, x, y, clipped);
    }

    fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, width: f32) {
        self.ops.push(Operation::new("w", vec![Object::Real(width)]));
        self.ops.push(Operation::new("m", vec![Object::Real(x0), Object::Real(y0)]));
        self.ops.push(Operation::new("l", vec![Object::Real(x1), Object::Real(y1)]));
        self.ops.push(Operation::new("S", vec![]));
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(Operation::new("w", vec![Object::Real(1.0)]));
        self.ops.push(Operation::new(
            "re",
            vec![
                Object::Real(x),
                Object::Real(y),
                Object::Real(width),
                Object::Real(height),
            ],
        ));
        self.ops.push(Operation::new("S", vec![]));
    }
}

fn draw_title(page: &mut PageContent) {
    page.text(form::FONT_BOLD, form::TITLE_SIZE, form::TITLE_X, form::TITLE_Y, form::TITLE);
    page.text(
        form::FONT_REGULAR,
        form::FORM_ID_SIZE,
        form::FORM_ID_X,
        form::TITLE_Y,
        form::FORM_ID,
    );
}

/// Labels always; values only where the record has one
fn draw_admin(page: &mut PageContent, chunk: &PageChunk) {
    let value_width = form::TABLE_RIGHT - form::ADMIN_VALUE_X;
    for field in AdminField::ALL {
        let y = form::admin_baseline(field);
        page.text(form::FONT_BOLD, form::ADMIN_LABEL_SIZE, form::left_margin(), y, field.label());
        if let Some(value) = chunk.admin.get(field) {
            page.clipped_text(
                form::FONT_REGULAR,
                form::ADMIN_VALUE_SIZE,
                form::ADMIN_VALUE_X,
                y,
                value,
                value_width,
            );
        }
    }
}

fn draw_page_stamp(page: &mut PageContent, page_index: usize, total_pages: usize) {
    let stamp = format!("PAGE {} OF {}", page_index, total_pages);
    page.text(
        form::FONT_REGULAR,
        form::PAGE_STAMP_SIZE,
        form::PAGE_STAMP_X,
        form::TITLE_Y,
        &stamp,
    );
}

fn draw_column_headers(page: &mut PageContent) {
    page.rect(
        form::TABLE_LEFT,
        form::TABLE_BOTTOM,
        form::TABLE_RIGHT - form::TABLE_LEFT,
        form::TABLE_TOP - form::TABLE_BOTTOM,
    );
    for column in Column::ALL {
        page.text(
            form::FONT_BOLD,
            form::HEADER_SIZE,
            column.x(),
            form::HEADER_BASELINE,
            column.header(),
        );
    }
    page.line(
        form::TABLE_LEFT,
        form::HEADER_RULE_Y,
        form::TABLE_RIGHT,
        form::HEADER_RULE_Y,
        1.0,
    );
}

fn draw_rows(page: &mut PageContent, items: &[ItemRecord]) {
    for (index, item) in items.iter().enumerate() {
        let y = form::row_baseline(index);
        if !form::row_fits(y) {
            log::warn!(
                "{} item rows do not fit the table and were not drawn on this page",
                items.len() - index
            );
            break;
        }

        let cells = [
            (Column::BoxNo, item.box_no.as_str()),
            (Column::StockNumber, item.stock_number.as_str()),
            (Column::Nomenclature, item.nomenclature.as_str()),
            (Column::UnitIssue, item.unit_issue.as_str()),
            (Column::QtyInit, item.qty_init.as_str()),
            (Column::QtyRun, item.qty_run.as_str()),
        ];
        for (column, value) in cells {
            page.clipped_text(form::FONT_REGULAR, form::ROW_SIZE, column.x(), y, value, column.text_width());
        }

        let total = item.total();
        let text = format_total(total);
        if total > 0.0 && text != "0" {
            page.clipped_text(
                form::FONT_REGULAR,
                form::ROW_SIZE,
                Column::Total.x(),
                y,
                &text,
                Column::Total.text_width(),
            );
        }

        let rule_y = y - form::ROW_RULE_OFFSET;
        page.line(form::TABLE_LEFT, rule_y, form::TABLE_RIGHT, rule_y, 0.5);
    }
}

fn draw_certification(page: &mut PageContent) {
    let x = form::left_margin();
    let mut y = form::CERTIFICATION_TOP;
    let lines = wrap_words(
        form::CERTIFICATION,
        form::CERTIFICATION_SIZE,
        form::certification_width(),
    );
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            y -= form::CERTIFICATION_LEADING;
        }
        page.text(form::FONT_REGULAR, form::CERTIFICATION_SIZE, x, y, line);
    }

    let rule_y = y - form::SIGNATURE_GAP;
    for (x0, x1, caption) in form::signature_lines() {
        page.line(x0, rule_y, x1, rule_y, 0.5);
        page.text(
            form::FONT_REGULAR,
            form::CERTIFICATION_SIZE,
            x0,
            rule_y - form::SIGNATURE_CAPTION_DROP,
            caption,
        );
    }
}

/// Whole totals print without a decimal point; others keep up to two places
fn format_total(total: f64) -> String {
    if total.fract() == 0.0 {
        format!("{:.0}", total)
    } else {
        let fixed = format!("{:.2}", total);
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
