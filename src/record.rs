//! Records extracted from the two copies of the packing list

/// The five administrative fields of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminField {
    PackedBy,
    NoBoxes,
    RequisitionNo,
    OrderNo,
    Date,
}

impl AdminField {
    /// All fields in the order they appear on the form
    pub const ALL: [AdminField; 5] = [
        AdminField::PackedBy,
        AdminField::NoBoxes,
        AdminField::RequisitionNo,
        AdminField::OrderNo,
        AdminField::Date,
    ];

    /// Maximum number of characters kept for this field
    pub fn max_len(self) -> usize {
        match self {
            AdminField::PackedBy => 50,
            AdminField::NoBoxes => 10,
            AdminField::RequisitionNo => 30,
            AdminField::OrderNo => 30,
            AdminField::Date => 15,
        }
    }

    /// Label printed on the form next to the value slot
    pub fn label(self) -> &'static str {
        match self {
            AdminField::PackedBy => "PACKED BY:",
            AdminField::NoBoxes => "NO. BOXES:",
            AdminField::RequisitionNo => "REQUISITION NO.:",
            AdminField::OrderNo => "ORDER NO.:",
            AdminField::Date => "DATE:",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AdminField::PackedBy => "packed_by",
            AdminField::NoBoxes => "no_boxes",
            AdminField::RequisitionNo => "requisition_no",
            AdminField::OrderNo => "order_no",
            AdminField::Date => "date",
        }
    }
}

/// Shipment metadata read from the administrative copy
///
/// Every field is independently optional. A missing value is `None`,
/// never an empty or placeholder string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminRecord {
    packed_by: Option<String>,
    no_boxes: Option<String>,
    requisition_no: Option<String>,
    order_no: Option<String>,
    date: Option<String>,
}

impl AdminRecord {
    /// Build a record from per-field values.
    ///
    /// Values are trimmed and truncated to the field's maximum length;
    /// blank values become `None`.
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (AdminField, S)>,
        S: AsRef<str>,
    {
        let mut record = AdminRecord::default();
        for (field, value) in fields {
            let value = normalize(value.as_ref(), field.max_len());
            let slot = match field {
                AdminField::PackedBy => &mut record.packed_by,
                AdminField::NoBoxes => &mut record.no_boxes,
                AdminField::RequisitionNo => &mut record.requisition_no,
                AdminField::OrderNo => &mut record.order_no,
                AdminField::Date => &mut record.date,
            };
            *slot = value;
        }
        record
    }

    pub fn get(&self, field: AdminField) -> Option<&str> {
        match field {
            AdminField::PackedBy => self.packed_by.as_deref(),
            AdminField::NoBoxes => self.no_boxes.as_deref(),
            AdminField::RequisitionNo => self.requisition_no.as_deref(),
            AdminField::OrderNo => self.order_no.as_deref(),
            AdminField::Date => self.date.as_deref(),
        }
    }

    pub fn packed_by(&self) -> Option<&str> {
        self.packed_by.as_deref()
    }

    pub fn no_boxes(&self) -> Option<&str> {
        self.no_boxes.as_deref()
    }

    pub fn requisition_no(&self) -> Option<&str> {
        self.requisition_no.as_deref()
    }

    pub fn order_no(&self) -> Option<&str> {
        self.order_no.as_deref()
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// True when no field carries a value
    pub fn is_empty(&self) -> bool {
        AdminField::ALL.iter().all(|f| self.get(*f).is_none())
    }
}

/// Trim, collapse internal whitespace and cap at `max_chars` characters
fn normalize(value: &str, max_chars: usize) -> Option<String> {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    let truncated: String = collapsed.chars().take(max_chars).collect();
    let truncated = truncated.trim_end();
    if truncated.is_empty() {
        None
    } else {
        Some(truncated.to_string())
    }
}

/// Default unit of issue when the source table has no such column
pub const DEFAULT_UNIT_ISSUE: &str = "EA";
/// Default initial quantity when the source table has no such column
pub const DEFAULT_QTY_INIT: &str = "1";
/// Default running-spares quantity when the source table has no such column
pub const DEFAULT_QTY_RUN: &str = "0";

/// One line item of the packing list
///
/// Quantities are kept as the text found in the source so their formatting
/// survives; [`ItemRecord::total`] coerces them when needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub box_no: String,
    pub stock_number: String,
    pub nomenclature: String,
    pub unit_issue: String,
    pub qty_init: String,
    pub qty_run: String,
}

impl ItemRecord {
    /// Item with only a box number and nomenclature, other columns defaulted
    pub fn new(box_no: impl Into<String>, nomenclature: impl Into<String>) -> Self {
        Self {
            box_no: box_no.into(),
            stock_number: String::new(),
            nomenclature: nomenclature.into(),
            unit_issue: DEFAULT_UNIT_ISSUE.to_string(),
            qty_init: DEFAULT_QTY_INIT.to_string(),
            qty_run: DEFAULT_QTY_RUN.to_string(),
        }
    }

    /// A record with no box number, stock number or nomenclature carries
    /// nothing printable and must be dropped.
    pub fn is_valid(&self) -> bool {
        !(self.box_no.trim().is_empty()
            && self.stock_number.trim().is_empty()
            && self.nomenclature.trim().is_empty())
    }

    /// Initial plus running quantity.
    ///
    /// If either side does not coerce to a number the total is 0.
    pub fn total(&self) -> f64 {
        match (coerce_quantity(&self.qty_init), coerce_quantity(&self.qty_run)) {
            (Some(init), Some(run)) => init + run,
            _ => 0.0,
        }
    }
}

/// Parse quantity text, rejecting NaN and infinities. Blank text counts as 0.
pub fn coerce_quantity(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
