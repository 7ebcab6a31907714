//! Item row extraction: table detection first, line heuristic as fallback

use lopdf::Document;

use super::{clean_text, truncate_chars, ExtractOptions};
use crate::error::{DocumentKind, Error, Result};
use crate::pdf::text::{Cell, PageText, TextLine};
use crate::record::{ItemRecord, DEFAULT_QTY_INIT, DEFAULT_QTY_RUN, DEFAULT_UNIT_ISSUE};

/// Tables narrower than this are not read as item tables
pub const MIN_TABLE_COLUMNS: usize = 4;

/// Nomenclature kept from a line-heuristic item
pub const NOMENCLATURE_MAX_LEN: usize = 80;

/// A first-column value equal to one of these is a repeated header row
const HEADER_WORDS: [&str; 3] = ["box", "no.", "number"];

/// Read item rows from every page of `bytes`, in page order.
///
/// Fails only when the document cannot be opened. A page whose content
/// cannot be decoded is skipped; finding no items is an empty result.
pub fn extract_items(bytes: &[u8], options: &ExtractOptions) -> Result<Vec<ItemRecord>> {
    let doc = Document::load_mem(bytes).map_err(|source| Error::Unreadable {
        document: DocumentKind::Items,
        source,
    })?;

    let mut items: Vec<ItemRecord> = Vec::new();
    for (page_number, page_id) in doc.get_pages() {
        if items.len() >= options.item_cap {
            log::info!("Stopped reading items at the cap of {}", options.item_cap);
            break;
        }

        let page = match PageText::read(&doc, page_id) {
            Ok(page) => page,
            Err(e) => {
                log::warn!(
                    "Skipping page {} of the {} document: {}",
                    page_number,
                    DocumentKind::Items,
                    e
                );
                continue;
            }
        };

        let lines = page.lines();
        let mut rows = table_rows(&lines, options);
        if rows.is_empty() {
            rows = line_items(&lines);
            log::debug!("Page {}: no item table, {} items from text lines", page_number, rows.len());
        } else {
            log::debug!("Page {}: {} rows from the item table", page_number, rows.len());
        }

        let room = options.item_cap - items.len();
        items.extend(rows.into_iter().filter(ItemRecord::is_valid).take(room));
    }

    log::debug!("Extracted {} items", items.len());
    Ok(items)
}

/// A line further below the previous table line than this many times its
/// font size ends the table
const MAX_ROW_GAP_EM: f32 = 6.0;

/// Column layout found on a page: header cell positions plus body rows
struct Table {
    anchors: Vec<f32>,
    rows: Vec<Vec<Cell>>,
}

/// What a line below the header means to the table
#[derive(Debug, Clone, Copy, PartialEq)]
enum LineFit {
    Row,
    /// One cell inside a single column, wrapped from the row above
    Continuation,
    Skip,
    End,
}

impl Table {
    fn new(header: Vec<Cell>) -> Table {
        Table {
            anchors: header.iter().map(|cell| cell.x).collect(),
            rows: Vec::new(),
        }
    }

    /// The rightmost anchor at or left of `x`
    fn column_of(&self, x: f32, tolerance: f32) -> usize {
        self.anchors
            .iter()
            .rposition(|&anchor| anchor <= x + tolerance)
            .unwrap_or(0)
    }

    fn classify(&self, cells: &[Cell], tolerance: f32) -> LineFit {
        let Some(first) = cells.first() else {
            return LineFit::Skip;
        };
        if first.x < self.anchors[0] - tolerance {
            return LineFit::End;
        }
        if cells.len() >= 2 {
            return LineFit::Row;
        }

        let column = self.column_of(first.x, tolerance);
        let spans_columns = self
            .anchors
            .get(column + 1)
            .is_some_and(|&next| first.x1 > next + tolerance);
        if spans_columns {
            // Prose running across the columns
            LineFit::End
        } else if column == 0 {
            LineFit::Skip
        } else {
            LineFit::Continuation
        }
    }

    /// Cell text per column. Each cell goes to the rightmost anchor at or
    /// left of it; cells sharing a column are joined with a space.
    fn columns(&self, row: &[Cell], tolerance: f32) -> Vec<String> {
        let mut values = vec![String::new(); self.anchors.len()];
        for cell in row {
            let text = clean_text(&cell.text);
            if text.is_empty() {
                continue;
            }
            let value = &mut values[self.column_of(cell.x, tolerance)];
            if !value.is_empty() {
                value.push(' ');
            }
            value.push_str(&text);
        }
        values
    }
}

/// Find the item table on a page.
///
/// The header is the first line with at least [`MIN_TABLE_COLUMNS`] cells.
/// Lines below it with two or more cells are rows; a single cell inside one
/// column continues the row above. The table ends at a line starting left
/// of the first column, at prose spanning several columns, or after a
/// large vertical gap. A header with no rows is not a table.
fn find_table(lines: &[TextLine], options: &ExtractOptions) -> Option<Table> {
    let tolerance = options.column_tolerance;
    let mut table: Option<Table> = None;
    let mut last_y = 0.0f32;
    let mut last_size = 0.0f32;

    for line in lines {
        let cells = line.cells(options.cell_gap_em);

        if let Some(current) = table.as_mut() {
            let fit = if last_y - line.y > MAX_ROW_GAP_EM * last_size {
                LineFit::End
            } else {
                current.classify(&cells, tolerance)
            };

            match fit {
                LineFit::Row => current.rows.push(cells),
                LineFit::Continuation => match current.rows.last_mut() {
                    Some(row) => row.extend(cells),
                    None => log::debug!("Ignoring a wrapped line with no row above it"),
                },
                LineFit::Skip => log::debug!("Skipping a narrow table line: {}", line.text()),
                LineFit::End if !current.rows.is_empty() => return table,
                LineFit::End => {
                    log::debug!("Ignoring a table header with no rows");
                    table = None;
                    if cells.len() >= MIN_TABLE_COLUMNS {
                        table = Some(Table::new(cells));
                    }
                }
            }
            last_y = line.y;
            last_size = line.font_size();
            continue;
        }

        if cells.len() >= MIN_TABLE_COLUMNS {
            table = Some(Table::new(cells));
            last_y = line.y;
            last_size = line.font_size();
        }
    }

    table.filter(|table| !table.rows.is_empty())
}

fn table_rows(lines: &[TextLine], options: &ExtractOptions) -> Vec<ItemRecord> {
    let Some(table) = find_table(lines, options) else {
        return Vec::new();
    };

    table
        .rows
        .iter()
        .map(|row| record_from_columns(table.columns(row, options.column_tolerance)))
        .filter(|item| !is_header_word(&item.box_no))
        .collect()
}

/// Map columns positionally, filling defaults for columns the table lacks
fn record_from_columns(values: Vec<String>) -> ItemRecord {
    let column = |index: usize, default: &str| {
        values
            .get(index)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    };
    ItemRecord {
        box_no: column(0, ""),
        stock_number: column(1, ""),
        nomenclature: column(2, ""),
        unit_issue: column(3, DEFAULT_UNIT_ISSUE),
        qty_init: column(4, DEFAULT_QTY_INIT),
        qty_run: column(5, DEFAULT_QTY_RUN),
    }
}

fn is_header_word(text: &str) -> bool {
    HEADER_WORDS.iter().any(|word| text.eq_ignore_ascii_case(word))
}

/// A digit somewhere in the first ten characters
fn looks_numeric(line: &str) -> bool {
    line.chars().take(10).any(|c| c.is_ascii_digit())
}

/// Items from plain text lines.
///
/// A line led by a purely numeric token and some text starts an item; a
/// number on its own is ignored. Any other line that looks numeric
/// continues the nomenclature of the last item.
fn line_items(lines: &[TextLine]) -> Vec<ItemRecord> {
    let mut items: Vec<ItemRecord> = Vec::new();

    for line in lines {
        let text = clean_text(&line.text());
        if !looks_numeric(&text) {
            continue;
        }

        let (first, rest) = text.split_once(' ').unwrap_or((text.as_str(), ""));
        if first.chars().all(|c| c.is_ascii_digit()) {
            if rest.is_empty() {
                log::debug!("Ignoring a bare number line: {}", text);
                continue;
            }
            items.push(ItemRecord::new(first, truncate_chars(rest, NOMENCLATURE_MAX_LEN)));
        } else if let Some(item) = items.last_mut() {
            let mut nomenclature = std::mem::take(&mut item.nomenclature);
            if !nomenclature.is_empty() {
                nomenclature.push(' ');
            }
            nomenclature.push_str(&text);
            item.nomenclature = truncate_chars(&nomenclature, NOMENCLATURE_MAX_LEN);
        } else {
            log::debug!("Ignoring continuation line with no item: {}", text);
        }
    }

    items
}
