use fin_report::{CellValue, Report};

use crate::error::ExportResult;

/// RFC4180-style quoting via the `csv` crate's writer (it already doubles
/// embedded quotes and quotes fields containing the separator or a
/// newline); period decimal separator regardless of locale falls out of
/// `Money::to_string`/`Decimal`'s own `Display`, and short dates use
/// `dd/MM` via `CellValue::as_text` — spec.md 4.H's CSV contract.
pub fn render(report: &Report) -> ExportResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    let headers: Vec<&str> = report.columns.iter().map(|c| c.header.as_str()).collect();
    writer.write_record(&headers)?;

    for row in &report.rows {
        // `CellValue::as_text` already renders dates as `dd/MM` and money
        // through `Decimal`'s period-separated `Display` — exactly the
        // CSV contract's short-date and decimal-separator rules.
        let fields: Vec<String> = report
            .columns
            .iter()
            .map(|c| row.get(&c.key).map(CellValue::as_text).unwrap_or_default())
            .collect();
        writer.write_record(&fields)?;
    }

    writer.flush()?;
    writer.into_inner().map_err(|e| crate::error::ExportError::Io(e.into_error()))
}
