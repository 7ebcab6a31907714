//! Positioned text extraction from PDF pages using lopdf
//!
//! Interprets a page's content stream far enough to know where each piece
//! of text lands on the page: graphics state (`q`, `Q`, `cm`), text state,
//! text positioning and text showing operators, and Form XObjects invoked
//! with `Do`. Nothing is rasterized; glyph advances come from the font's
//! `Widths` array when present and from Helvetica metrics otherwise.

use std::collections::BTreeMap;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId};

use super::metrics;

/// Form XObjects nested deeper than this are not entered
const MAX_XOBJECT_DEPTH: usize = 4;

/// A `TJ` displacement of at least this many em starts a new run
const RUN_BREAK_EM: f32 = 1.0;

/// A `TJ` displacement of at least this many em reads as a space
const SPACE_EM: f32 = 0.2;

/// Font resources by name, as returned by `Document::get_page_fonts`
type FontMap<'a> = BTreeMap<Vec<u8>, &'a Dictionary>;

/// A piece of text shown by one text operator, in page space
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Origin of the first glyph (PDF coordinates, origin at bottom-left)
    pub x: f32,
    pub y: f32,
    /// Horizontal advance of the whole run
    pub width: f32,
    /// Font size after the text and graphics matrices are applied
    pub font_size: f32,
}

impl TextRun {
    pub fn x1(&self) -> f32 {
        self.x + self.width
    }
}

/// Axis-aligned rectangle in PDF coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Whether the point lies inside, lower/left edges inclusive
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

/// Text runs sharing a baseline
#[derive(Debug, Clone)]
pub struct TextLine {
    pub y: f32,
    /// Runs in left-to-right order
    pub runs: Vec<TextRun>,
}

/// Horizontally contiguous text within a line
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub x: f32,
    pub x1: f32,
    pub text: String,
}

impl TextLine {
    /// The whole line as text, runs separated by single spaces
    pub fn text(&self) -> String {
        self.runs
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Largest font size among the runs
    pub fn font_size(&self) -> f32 {
        self.runs.iter().map(|r| r.font_size).fold(0.0, f32::max)
    }

    /// Split the line into cells wherever the gap between runs is wider
    /// than `gap_em` times the font size.
    pub fn cells(&self, gap_em: f32) -> Vec<Cell> {
        let mut cells: Vec<Cell> = Vec::new();
        let mut last_size = 0.0f32;

        for run in &self.runs {
            let threshold = gap_em * run.font_size.max(last_size);
            match cells.last_mut() {
                Some(cell) if run.x - cell.x1 <= threshold => {
                    // Fragments of one word come out of some producers as
                    // separate runs with no gap between them.
                    if run.x - cell.x1 > 0.15 * run.font_size {
                        cell.text.push(' ');
                    }
                    cell.text.push_str(&run.text);
                    cell.x1 = cell.x1.max(run.x1());
                }
                _ => cells.push(Cell {
                    x: run.x,
                    x1: run.x1(),
                    text: run.text.clone(),
                }),
            }
            last_size = run.font_size;
        }

        cells
    }
}

/// All text runs found on one page
#[derive(Debug, Clone, Default)]
pub struct PageText {
    pub runs: Vec<TextRun>,
}

impl PageText {
    /// Read the positioned text of one page.
    ///
    /// Fails only when the page content stream itself cannot be read or
    /// decoded; unreadable fonts or XObjects are skipped.
    pub fn read(doc: &Document, page_id: ObjectId) -> lopdf::Result<PageText> {
        let content_data = doc.get_page_content(page_id)?;
        let content = Content::decode(&content_data)?;

        let fonts = doc.get_page_fonts(page_id).unwrap_or_default();
        let xobjects = page_xobjects(doc, page_id);

        let mut interpreter = Interpreter {
            doc,
            runs: Vec::new(),
        };
        interpreter.execute(
            &content.operations,
            &fonts,
            xobjects,
            Matrix::IDENTITY,
            0,
        );

        Ok(PageText {
            runs: interpreter.runs,
        })
    }

    /// Runs whose origin lies inside `rect`, top-to-bottom then left-to-right
    pub fn within(&self, rect: &Rect) -> Vec<&TextRun> {
        let mut runs: Vec<&TextRun> = self
            .runs
            .iter()
            .filter(|r| rect.contains(r.x, r.y))
            .collect();
        runs.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));
        runs
    }

    /// Group runs into lines, top of the page first
    pub fn lines(&self) -> Vec<TextLine> {
        let mut sorted: Vec<&TextRun> = self.runs.iter().collect();
        sorted.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

        let mut lines: Vec<TextLine> = Vec::new();
        for run in sorted {
            let tolerance = (run.font_size * 0.3).max(2.0);
            match lines.last_mut() {
                Some(line) if (line.y - run.y).abs() <= tolerance => {
                    line.runs.push(run.clone());
                }
                _ => lines.push(TextLine {
                    y: run.y,
                    runs: vec![run.clone()],
                }),
            }
        }

        for line in &mut lines {
            line.runs.sort_by(|a, b| a.x.total_cmp(&b.x));
        }
        lines
    }
}

/// Affine matrix `[a b c d e f]` where x' = a*x + c*y + e, y' = b*x + d*y + f
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix([f32; 6]);

impl Matrix {
    const IDENTITY: Matrix = Matrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    fn translate(tx: f32, ty: f32) -> Self {
        Matrix([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    fn from_operands(operands: &[Object]) -> Option<Self> {
        if operands.len() < 6 {
            return None;
        }
        let mut m = [0.0f32; 6];
        for (slot, operand) in m.iter_mut().zip(operands) {
            *slot = number(operand)?;
        }
        Some(Matrix(m))
    }

    /// `self` applied first, then `other`
    fn then(&self, other: &Matrix) -> Matrix {
        let [a, b, c, d, e, f] = self.0;
        let [a2, b2, c2, d2, e2, f2] = other.0;
        Matrix([
            a * a2 + b * c2,
            a * b2 + b * d2,
            c * a2 + d * c2,
            c * b2 + d * d2,
            e * a2 + f * c2 + e2,
            e * b2 + f * d2 + f2,
        ])
    }

    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        let [a, b, c, d, e, f] = self.0;
        (a * x + c * y + e, b * x + d * y + f)
    }

    fn vertical_scale(&self) -> f32 {
        let [_, _, c, d, _, _] = self.0;
        (c * c + d * d).sqrt()
    }
}

/// Text state parameters; part of the graphics state, so saved by `q`
#[derive(Debug, Clone)]
struct TextState {
    font: Vec<u8>,
    size: f32,
    char_spacing: f32,
    word_spacing: f32,
    horizontal_scale: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font: Vec::new(),
            size: 12.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scale: 1.0,
            leading: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
struct GraphicsState {
    ctm: Matrix,
    text: TextState,
}

/// Text run being accumulated by one showing operator
struct PendingRun {
    text: String,
    start: (f32, f32),
    font_size: f32,
}

struct Interpreter<'a> {
    doc: &'a Document,
    runs: Vec<TextRun>,
}

impl<'a> Interpreter<'a> {
    fn execute(
        &mut self,
        operations: &[Operation],
        fonts: &FontMap<'a>,
        xobjects: Option<&'a Dictionary>,
        base_ctm: Matrix,
        depth: usize,
    ) {
        let mut state = GraphicsState {
            ctm: base_ctm,
            text: TextState::default(),
        };
        let mut stack: Vec<GraphicsState> = Vec::new();
        let mut text_matrix = Matrix::IDENTITY;
        let mut line_matrix = Matrix::IDENTITY;

        for op in operations {
            let operands = &op.operands;
            match op.operator.as_str() {
                "q" => stack.push(state.clone()),
                "Q" => {
                    if let Some(saved) = stack.pop() {
                        state = saved;
                    }
                }
                "cm" => {
                    if let Some(m) = Matrix::from_operands(operands) {
                        state.ctm = m.then(&state.ctm);
                    }
                }
                "BT" => {
                    text_matrix = Matrix::IDENTITY;
                    line_matrix = Matrix::IDENTITY;
                }
                "Tf" => {
                    if let Some(Ok(name)) = operands.first().map(Object::as_name) {
                        state.text.font = name.to_vec();
                    }
                    if let Some(size) = operands.get(1).and_then(number) {
                        state.text.size = size;
                    }
                }
                "Tc" => {
                    if let Some(v) = operands.first().and_then(number) {
                        state.text.char_spacing = v;
                    }
                }
                "Tw" => {
                    if let Some(v) = operands.first().and_then(number) {
                        state.text.word_spacing = v;
                    }
                }
                "Tz" => {
                    if let Some(v) = operands.first().and_then(number) {
                        state.text.horizontal_scale = v / 100.0;
                    }
                }
                "TL" => {
                    if let Some(v) = operands.first().and_then(number) {
                        state.text.leading = v;
                    }
                }
                "Td" | "TD" => {
                    let tx = operands.first().and_then(number).unwrap_or(0.0);
                    let ty = operands.get(1).and_then(number).unwrap_or(0.0);
                    if op.operator == "TD" {
                        state.text.leading = -ty;
                    }
                    line_matrix = Matrix::translate(tx, ty).then(&line_matrix);
                    text_matrix = line_matrix;
                }
                "Tm" => {
                    if let Some(m) = Matrix::from_operands(operands) {
                        line_matrix = m;
                        text_matrix = m;
                    }
                }
                "T*" => {
                    line_matrix = Matrix::translate(0.0, -state.text.leading).then(&line_matrix);
                    text_matrix = line_matrix;
                }
                "Tj" => {
                    if let Some(Object::String(bytes, _)) = operands.first() {
                        let mut pending = None;
                        self.show(bytes, fonts, &state, &mut text_matrix, &mut pending);
                        self.finish(pending, &state, &text_matrix);
                    }
                }
                "'" | "\"" => {
                    if op.operator == "\"" {
                        if let Some(v) = operands.first().and_then(number) {
                            state.text.word_spacing = v;
                        }
                        if let Some(v) = operands.get(1).and_then(number) {
                            state.text.char_spacing = v;
                        }
                    }
                    line_matrix = Matrix::translate(0.0, -state.text.leading).then(&line_matrix);
                    text_matrix = line_matrix;
                    if let Some(Object::String(bytes, _)) = operands.last() {
                        let mut pending = None;
                        self.show(bytes, fonts, &state, &mut text_matrix, &mut pending);
                        self.finish(pending, &state, &text_matrix);
                    }
                }
                "TJ" => {
                    if let Some(Ok(elements)) = operands.first().map(Object::as_array) {
                        self.show_array(elements, fonts, &state, &mut text_matrix);
                    }
                }
                "Do" => {
                    if depth < MAX_XOBJECT_DEPTH {
                        if let Some(Ok(name)) = operands.first().map(Object::as_name) {
                            self.invoke_xobject(name, fonts, xobjects, &state, depth);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn show_array(
        &mut self,
        elements: &[Object],
        fonts: &FontMap<'a>,
        state: &GraphicsState,
        text_matrix: &mut Matrix,
    ) {
        let mut pending = None;
        for element in elements {
            match element {
                Object::String(bytes, _) => {
                    self.show(bytes, fonts, state, text_matrix, &mut pending);
                }
                other => {
                    let Some(adjust) = number(other) else { continue };
                    let em = -adjust / 1000.0;
                    if em >= RUN_BREAK_EM {
                        self.finish(pending.take(), state, text_matrix);
                    } else if em >= SPACE_EM {
                        if let Some(run) = pending.as_mut() {
                            run.text.push(' ');
                        }
                    }
                    let tx = em * state.text.size * state.text.horizontal_scale;
                    *text_matrix = Matrix::translate(tx, 0.0).then(text_matrix);
                }
            }
        }
        self.finish(pending, state, text_matrix);
    }

    /// Decode one string operand, append it to the pending run and advance
    /// the text matrix past it.
    fn show(
        &self,
        bytes: &[u8],
        fonts: &FontMap<'a>,
        state: &GraphicsState,
        text_matrix: &mut Matrix,
        pending: &mut Option<PendingRun>,
    ) {
        let font = fonts.get(&state.text.font).copied();
        let text = decode_string(self.doc, font, bytes);
        let ts = &state.text;

        let mut advance = 0.0f32;
        if font.is_some_and(is_composite) {
            for c in text.chars() {
                advance += metrics::char_width(c) as f32 / 1000.0 * ts.size + ts.char_spacing;
            }
        } else {
            for &code in bytes {
                let glyph = simple_font_width(self.doc, font, code)
                    .unwrap_or_else(|| metrics::char_width(code as char) as f32);
                advance += glyph / 1000.0 * ts.size + ts.char_spacing;
                if code == b' ' {
                    advance += ts.word_spacing;
                }
            }
        }
        advance *= ts.horizontal_scale;

        let trm = text_matrix.then(&state.ctm);
        let run = pending.get_or_insert_with(|| PendingRun {
            text: String::new(),
            start: trm.apply(0.0, 0.0),
            font_size: ts.size * trm.vertical_scale(),
        });
        run.text.push_str(&text);

        *text_matrix = Matrix::translate(advance, 0.0).then(text_matrix);
    }

    fn finish(&mut self, pending: Option<PendingRun>, state: &GraphicsState, text_matrix: &Matrix) {
        let Some(run) = pending else { return };
        let text = run.text.trim();
        if text.is_empty() {
            return;
        }
        let (end_x, end_y) = text_matrix.then(&state.ctm).apply(0.0, 0.0);
        let (x, y) = run.start;
        self.runs.push(TextRun {
            text: text.to_string(),
            x,
            y,
            width: ((end_x - x).powi(2) + (end_y - y).powi(2)).sqrt(),
            font_size: run.font_size,
        });
    }

    fn invoke_xobject(
        &mut self,
        name: &[u8],
        fonts: &FontMap<'a>,
        xobjects: Option<&'a Dictionary>,
        state: &GraphicsState,
        depth: usize,
    ) {
        let doc = self.doc;
        let Some(xobjects) = xobjects else { return };
        let Ok(entry) = xobjects.get(name) else { return };
        let Ok(stream) = resolve(doc, entry).as_stream() else { return };

        let is_form = stream
            .dict
            .get(b"Subtype")
            .and_then(Object::as_name)
            .is_ok_and(|subtype| subtype == b"Form");
        if !is_form {
            return;
        }

        let data = if stream.dict.has(b"Filter") {
            match stream.decompressed_content() {
                Ok(data) => data,
                Err(e) => {
                    log::debug!("Skipping form XObject {}: {}", String::from_utf8_lossy(name), e);
                    return;
                }
            }
        } else {
            stream.content.clone()
        };
        let Ok(content) = Content::decode(&data) else {
            log::debug!("Skipping undecodable form XObject {}", String::from_utf8_lossy(name));
            return;
        };

        let matrix = stream
            .dict
            .get(b"Matrix")
            .and_then(Object::as_array)
            .ok()
            .and_then(|m| Matrix::from_operands(m))
            .unwrap_or(Matrix::IDENTITY);

        // A form without its own resources uses the invoking context's.
        let resources = stream
            .dict
            .get(b"Resources")
            .ok()
            .and_then(|r| resolve(doc, r).as_dict().ok());
        let (form_fonts, form_xobjects) = match resources {
            Some(res) => (fonts_of(doc, res), xobjects_of(doc, res)),
            None => (fonts.clone(), Some(xobjects)),
        };

        self.execute(
            &content.operations,
            &form_fonts,
            form_xobjects,
            matrix.then(&state.ctm),
            depth + 1,
        );
    }
}

/// Numeric operand as f32
fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Follow a reference, returning the object itself when it is not one
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

fn is_composite(font: &Dictionary) -> bool {
    font.get(b"Subtype")
        .and_then(Object::as_name)
        .is_ok_and(|subtype| subtype == b"Type0")
}

/// Glyph width from a simple font's `FirstChar`/`Widths`
fn simple_font_width(doc: &Document, font: Option<&Dictionary>, code: u8) -> Option<f32> {
    let font = font?;
    let first_char = match font.get(b"FirstChar").ok()? {
        Object::Integer(i) => *i,
        _ => return None,
    };
    let widths = resolve(doc, font.get(b"Widths").ok()?).as_array().ok()?;
    let index = usize::try_from(code as i64 - first_char).ok()?;
    widths.get(index).map(|w| resolve(doc, w)).and_then(number)
}

/// Decode a string operand to Unicode using the font's encoding
fn decode_string(doc: &Document, font: Option<&Dictionary>, bytes: &[u8]) -> String {
    if let Some(font) = font {
        if let Ok(encoding) = font.get_font_encoding(doc) {
            if let Ok(text) = Document::decode_text(&encoding, bytes) {
                return text;
            }
        }
    }

    if bytes.starts_with(&[0xFE, 0xFF]) {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

fn fonts_of<'a>(doc: &'a Document, resources: &'a Dictionary) -> FontMap<'a> {
    let mut fonts = FontMap::new();
    let Ok(font_obj) = resources.get(b"Font") else {
        return fonts;
    };
    if let Ok(dict) = resolve(doc, font_obj).as_dict() {
        for (name, value) in dict.iter() {
            if let Ok(font) = resolve(doc, value).as_dict() {
                fonts.insert(name.clone(), font);
            }
        }
    }
    fonts
}

fn xobjects_of<'a>(doc: &'a Document, resources: &'a Dictionary) -> Option<&'a Dictionary> {
    let obj = resources.get(b"XObject").ok()?;
    resolve(doc, obj).as_dict().ok()
}

/// XObject resources of a page, following `Parent` inheritance
fn page_xobjects(doc: &Document, page_id: ObjectId) -> Option<&Dictionary> {
    let mut node = doc.get_dictionary(page_id).ok()?;
    // Page trees are shallow; the bound only guards against cycles.
    for _ in 0..32 {
        if let Ok(resources) = node.get(b"Resources") {
            return resolve(doc, resources)
                .as_dict()
                .ok()
                .and_then(|res| xobjects_of(doc, res));
        }
        let parent = node.get(b"Parent").ok()?.as_reference().ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Stream, StringFormat};

    /// One-page document whose page content is `ops`, with F1 = Helvetica
    fn single_page(ops: Vec<Operation>, extra_resources: Option<Dictionary>) -> (Document, ObjectId) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut font = Dictionary::new();
        font.set("Type", Object::Name(b"Font".to_vec()));
        font.set("Subtype", Object::Name(b"Type1".to_vec()));
        font.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
        let font_id = doc.add_object(Object::Dictionary(font));

        let mut fonts = Dictionary::new();
        fonts.set("F1", Object::Reference(font_id));
        let mut resources = extra_resources.unwrap_or_default();
        resources.set("Font", Object::Dictionary(fonts));

        let content = Content { operations: ops };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        page.set("Contents", Object::Reference(content_id));
        page.set("Resources", Object::Dictionary(resources));
        let page_id = doc.add_object(Object::Dictionary(page));

        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Kids", Object::Array(vec![Object::Reference(page_id)]));
        pages.set("Count", Object::Integer(1));
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = doc.add_object(Object::Dictionary(catalog));
        doc.trailer.set("Root", Object::Reference(catalog_id));

        (doc, page_id)
    }

    fn text_at(x: f32, y: f32, size: f32, text: &str) -> Vec<Operation> {
        vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), size.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new("Tj", vec![Object::String(text.as_bytes().to_vec(), StringFormat::Literal)]),
            Operation::new("ET", vec![]),
        ]
    }

    #[test]
    fn test_run_position_and_width() {
        let (doc, page_id) = single_page(text_at(100.0, 700.0, 10.0, "AB"), None);
        let page = PageText::read(&doc, page_id).unwrap();
        assert_eq!(page.runs.len(), 1);
        let run = &page.runs[0];
        assert_eq!(run.text, "AB");
        assert!((run.x - 100.0).abs() < 0.01);
        assert!((run.y - 700.0).abs() < 0.01);
        assert!((run.width - 13.34).abs() < 0.01);
        assert!((run.font_size - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_cm_and_tm_are_applied() {
        let ops = vec![
            Operation::new("q", vec![]),
            Operation::new("cm", vec![2.into(), 0.into(), 0.into(), 2.into(), 10.into(), 20.into()]),
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), 5.into()]),
            Operation::new("Tm", vec![1.into(), 0.into(), 0.into(), 1.into(), 50.into(), 100.into()]),
            Operation::new("Tj", vec![Object::string_literal("X")]),
            Operation::new("ET", vec![]),
            Operation::new("Q", vec![]),
        ];
        let (doc, page_id) = single_page(ops, None);
        let page = PageText::read(&doc, page_id).unwrap();
        let run = &page.runs[0];
        assert!((run.x - 110.0).abs() < 0.01);
        assert!((run.y - 220.0).abs() < 0.01);
        assert!((run.font_size - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_tj_array_spacing_and_breaks() {
        let ops = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), 10.into()]),
            Operation::new("Td", vec![50.into(), 500.into()]),
            Operation::new(
                "TJ",
                vec![Object::Array(vec![
                    Object::string_literal("RI"),
                    Object::Integer(-40),
                    Object::string_literal("FLE"),
                    Object::Integer(-300),
                    Object::string_literal("M16"),
                    Object::Integer(-3000),
                    Object::string_literal("EA"),
                ])],
            ),
            Operation::new("ET", vec![]),
        ];
        let (doc, page_id) = single_page(ops, None);
        let page = PageText::read(&doc, page_id).unwrap();
        let texts: Vec<&str> = page.runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["RIFLE M16", "EA"]);
        assert!(page.runs[1].x > page.runs[0].x1() + 20.0);
    }

    #[test]
    fn test_leading_and_next_line() {
        let ops = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), 10.into()]),
            Operation::new("TL", vec![12.into()]),
            Operation::new("Td", vec![72.into(), 700.into()]),
            Operation::new("Tj", vec![Object::string_literal("first")]),
            Operation::new("'", vec![Object::string_literal("second")]),
            Operation::new("ET", vec![]),
        ];
        let (doc, page_id) = single_page(ops, None);
        let page = PageText::read(&doc, page_id).unwrap();
        let lines = page.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "first");
        assert!((lines[1].y - 688.0).abs() < 0.01);
    }

    #[test]
    fn test_form_xobject_text_is_found() {
        let form_content = Content {
            operations: text_at(0.0, 0.0, 8.0, "JONES"),
        };
        let mut form_dict = Dictionary::new();
        form_dict.set("Type", Object::Name(b"XObject".to_vec()));
        form_dict.set("Subtype", Object::Name(b"Form".to_vec()));
        form_dict.set(
            "Matrix",
            Object::Array(vec![1.into(), 0.into(), 0.into(), 1.into(), 120.into(), 712.into()]),
        );
        let form = Stream::new(form_dict, form_content.encode().unwrap());

        let ops = vec![Operation::new("Do", vec![Object::Name(b"Fm1".to_vec())])];
        let mut xobjects = Dictionary::new();
        xobjects.set("Fm1", Object::Stream(form));
        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let (doc, page_id) = single_page(ops, Some(resources));
        let page = PageText::read(&doc, page_id).unwrap();
        assert_eq!(page.runs.len(), 1);
        assert_eq!(page.runs[0].text, "JONES");
        assert!((page.runs[0].x - 120.0).abs() < 0.01);
        assert!((page.runs[0].y - 712.0).abs() < 0.01);
    }

    #[test]
    fn test_lines_and_cells() {
        let mut ops = text_at(40.0, 600.0, 7.0, "1");
        ops.extend(text_at(78.0, 600.5, 7.0, "1005-01"));
        ops.extend(text_at(162.0, 600.0, 7.0, "RIFLE,"));
        ops.extend(text_at(186.0, 600.0, 7.0, "5.56MM"));
        ops.extend(text_at(40.0, 576.0, 7.0, "2"));
        let (doc, page_id) = single_page(ops, None);
        let page = PageText::read(&doc, page_id).unwrap();

        let lines = page.lines();
        assert_eq!(lines.len(), 2);
        let cells = lines[0].cells(0.9);
        let texts: Vec<&str> = cells.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["1", "1005-01", "RIFLE, 5.56MM"]);
        assert_eq!(lines[1].cells(0.9).len(), 1);
    }

    #[test]
    fn test_within_rect() {
        let mut ops = text_at(120.0, 712.0, 8.0, "INSIDE");
        ops.extend(text_at(43.0, 712.0, 8.0, "LABEL"));
        let (doc, page_id) = single_page(ops, None);
        let page = PageText::read(&doc, page_id).unwrap();
        let rect = Rect::new(115.0, 708.0, 576.0, 720.0);
        let found: Vec<&str> = page.within(&rect).iter().map(|r| r.text.as_str()).collect();
        assert_eq!(found, vec!["INSIDE"]);
    }
}
