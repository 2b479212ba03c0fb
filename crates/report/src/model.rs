use std::collections::BTreeMap;

use chrono::NaiveDate;
use fin_core::Money;
use serde::{Deserialize, Serialize};

/// One cell value. The export formatter uses the variant to decide how to
/// render it (right-aligned, `%.2f`-formatted currency vs. plain text)
/// without the reporting engine ever producing a pre-formatted string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Text(String),
    Date(NaiveDate),
    Currency(Money),
}

impl CellValue {
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Date(d) => d.format("%d/%m").to_string(),
            CellValue::Currency(m) => m.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Text,
    Date,
    Currency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Right,
}

/// One column of the schema: a display header, the key rows are indexed
/// by, a suggested fixed width for the text/PDF renderers, a data type,
/// and an alignment. This is the whole contract between the reporting
/// engine and the export formatter — neither side knows about the other's
/// output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub header: String,
    pub key: String,
    pub width: usize,
    pub data_type: DataType,
    pub alignment: Alignment,
}

impl Column {
    pub fn text(header: &str, key: &str, width: usize) -> Self {
        Column { header: header.to_string(), key: key.to_string(), width, data_type: DataType::Text, alignment: Alignment::Left }
    }

    pub fn date(header: &str, key: &str, width: usize) -> Self {
        Column { header: header.to_string(), key: key.to_string(), width, data_type: DataType::Date, alignment: Alignment::Left }
    }

    pub fn currency(header: &str, key: &str, width: usize) -> Self {
        Column { header: header.to_string(), key: key.to_string(), width, data_type: DataType::Currency, alignment: Alignment::Right }
    }
}

/// One row: a key → value mapping, keyed by `Column::key`. `BTreeMap` keeps
/// key order stable for anything that iterates a row directly (debugging,
/// JSON export) though rendering always drives off `Report::columns`.
pub type Row = BTreeMap<String, CellValue>;

pub fn row(pairs: impl IntoIterator<Item = (&'static str, CellValue)>) -> Row {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

/// The format-agnostic output of every report in the engine: a title, a
/// column schema, and an ordered list of rows. Export is a separate
/// concern (`fin-export`) that only ever reads this structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Report {
    pub fn new(title: impl Into<String>, columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Report { title: title.into(), columns, rows }
    }

    pub fn get(row: &Row, key: &str) -> Option<&CellValue> {
        row.get(key)
    }
}
