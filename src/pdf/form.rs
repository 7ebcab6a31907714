//! Fixed geometry of the printed packing list form
//!
//! All positions are PDF user-space points on a US Letter page, origin at
//! the bottom-left. The renderer draws from these values and the admin
//! region table is derived from them, so the two always agree.

use crate::layout::Length;
use crate::pdf::text::Rect;
use crate::record::AdminField;

/// Resource name of Helvetica
pub const FONT_REGULAR: &str = "F1";
/// Resource name of Helvetica-Bold
pub const FONT_BOLD: &str = "F2";

pub const TITLE: &str = "PACKING LIST";
pub const FORM_ID: &str = "DD FORM 1750, SEP 70 (EG)";
pub const TITLE_SIZE: f32 = 10.0;
pub const FORM_ID_SIZE: f32 = 8.0;
pub const TITLE_X: f32 = 72.0;
pub const TITLE_Y: f32 = 738.0;
pub const FORM_ID_X: f32 = 200.0;
pub const PAGE_STAMP_X: f32 = 470.0;
pub const PAGE_STAMP_SIZE: f32 = 8.0;

pub const ADMIN_LABEL_SIZE: f32 = 7.0;
pub const ADMIN_VALUE_SIZE: f32 = 8.0;
pub const ADMIN_VALUE_X: f32 = 130.0;
const ADMIN_FIRST_BASELINE: f32 = 712.0;
const ADMIN_LINE_SPACING: f32 = 14.0;

pub const TABLE_LEFT: f32 = 36.0;
pub const TABLE_RIGHT: f32 = 576.0;
pub const TABLE_TOP: f32 = 642.0;
pub const HEADER_BASELINE: f32 = 630.0;
pub const HEADER_SIZE: f32 = 7.0;
pub const HEADER_RULE_Y: f32 = 624.0;
pub const ROW_SIZE: f32 = 7.0;
pub const FIRST_ROW_BASELINE: f32 = 610.0;
pub const ROW_HEIGHT: f32 = 24.0;
/// Distance from a row's baseline down to its separator rule
pub const ROW_RULE_OFFSET: f32 = 8.0;
/// Lowest y a row separator may occupy; below it lies the footer
pub const TABLE_BOTTOM: f32 = 190.0;
/// Space kept between a cell's text and the next column
pub const CELL_PADDING: f32 = 8.0;

pub const CERTIFICATION: &str = "I CERTIFY THAT THE ABOVE ARTICLES ARE PROPERLY PACKED AND MARKED. \
I FURTHER CERTIFY THAT THE ARTICLES HAVE BEEN RECEIVED FROM THE \
INDIVIDUALS LISTED ABOVE AS HAVING DRAWN THEM.";
pub const CERTIFICATION_SIZE: f32 = 7.0;
pub const CERTIFICATION_LEADING: f32 = 10.0;
pub const CERTIFICATION_TOP: f32 = TABLE_BOTTOM - 18.0;
pub const SIGNATURE_GAP: f32 = 25.0;
pub const SIGNATURE_CAPTION_DROP: f32 = 10.0;
pub const NAME_CAPTION: &str = "TYPED NAME AND TITLE";
pub const SIGNATURE_CAPTION: &str = "SIGNATURE";

/// Left margin shared by admin labels and the certification block
pub fn left_margin() -> f32 {
    Length::from_inches(0.75).pt()
}

/// Width the certification paragraph is wrapped to
pub fn certification_width() -> f32 {
    Length::from_inches(6.5).pt()
}

/// Signature rules as (x0, x1, caption)
pub fn signature_lines() -> [(f32, f32, &'static str); 2] {
    [
        (left_margin(), Length::from_inches(3.0).pt(), NAME_CAPTION),
        (Length::from_inches(3.5).pt(), Length::from_inches(6.0).pt(), SIGNATURE_CAPTION),
    ]
}

/// Item table columns, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    BoxNo,
    StockNumber,
    Nomenclature,
    UnitIssue,
    QtyInit,
    QtyRun,
    Total,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::BoxNo,
        Column::StockNumber,
        Column::Nomenclature,
        Column::UnitIssue,
        Column::QtyInit,
        Column::QtyRun,
        Column::Total,
    ];

    /// Left edge of the column's text
    pub fn x(self) -> f32 {
        match self {
            Column::BoxNo => 40.0,
            Column::StockNumber => 84.0,
            Column::Nomenclature => 174.0,
            Column::UnitIssue => 436.0,
            Column::QtyInit => 470.0,
            Column::QtyRun => 508.0,
            Column::Total => 546.0,
        }
    }

    /// Room available to the column's text before the next column
    pub fn text_width(self) -> f32 {
        let next = Column::ALL
            .iter()
            .map(|c| c.x())
            .find(|x| *x > self.x())
            .unwrap_or(TABLE_RIGHT + CELL_PADDING / 2.0);
        next - self.x() - CELL_PADDING
    }

    pub fn header(self) -> &'static str {
        match self {
            Column::BoxNo => "BOX",
            Column::StockNumber => "STOCK NUMBER",
            Column::Nomenclature => "NOMENCLATURE",
            Column::UnitIssue => "UNIT",
            Column::QtyInit => "INIT",
            Column::QtyRun => "SPARES",
            Column::Total => "TOTAL",
        }
    }
}

/// Baseline of the admin field's label and value
pub fn admin_baseline(field: AdminField) -> f32 {
    let index = AdminField::ALL
        .iter()
        .position(|f| *f == field)
        .unwrap_or_default();
    ADMIN_FIRST_BASELINE - ADMIN_LINE_SPACING * index as f32
}

/// Region holding the admin field's value, right of its printed label
pub fn admin_value_region(field: AdminField) -> Rect {
    let baseline = admin_baseline(field);
    Rect::new(ADMIN_VALUE_X - 5.0, baseline - 4.0, TABLE_RIGHT, baseline + 6.0)
}

/// Baseline of the `index`-th row on a page (0-based)
pub fn row_baseline(index: usize) -> f32 {
    FIRST_ROW_BASELINE - ROW_HEIGHT * index as f32
}

/// Whether a row at `baseline` still has room above the footer
pub fn row_fits(baseline: f32) -> bool {
    baseline - ROW_RULE_OFFSET >= TABLE_BOTTOM
}

/// How many item rows the table region holds
pub fn rows_per_page() -> usize {
    (0..).take_while(|i| row_fits(row_baseline(*i))).count()
}
