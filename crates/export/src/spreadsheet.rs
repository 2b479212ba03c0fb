use fin_report::{CellValue, DataType, Report};
use xlsxwriter::Workbook;

use crate::context::ExportContext;
use crate::error::{ExportError, ExportResult};

/// One sheet per report, header row first, numeric cells tagged as
/// numbers rather than strings — spec.md 4.H's spreadsheet contract. The
/// `xlsxwriter` crate (a `libxlsxwriter` FFI binding) only writes to a
/// path, not a byte buffer, so this renders to a scratch file under the
/// system temp directory and reads the bytes back; the same constraint
/// the pack's `massehanto-accounting-system` reporting service notes
/// against this crate.
pub fn render(report: &Report, ctx: &ExportContext) -> ExportResult<Vec<u8>> {
    let scratch = std::env::temp_dir().join(format!("fin-export-{}.xlsx", std::process::id()));
    let scratch_path = scratch.to_str().ok_or_else(|| ExportError::Spreadsheet("non-utf8 temp path".to_string()))?;

    {
        let workbook = Workbook::new(scratch_path);
        let sheet_name = sheet_safe_name(&report.title);
        let mut sheet = workbook
            .add_worksheet(Some(&sheet_name))
            .map_err(|e| ExportError::Spreadsheet(e.to_string()))?;

        sheet
            .write_string(0, 0, &ctx.company_name, None)
            .map_err(|e| ExportError::Spreadsheet(e.to_string()))?;
        sheet
            .write_string(1, 0, &ctx.period_name, None)
            .map_err(|e| ExportError::Spreadsheet(e.to_string()))?;

        let header_row = 3;
        for (col, column) in report.columns.iter().enumerate() {
            sheet
                .write_string(header_row, col as u16, &column.header, None)
                .map_err(|e| ExportError::Spreadsheet(e.to_string()))?;
        }

        for (row_index, row) in report.rows.iter().enumerate() {
            let sheet_row = header_row + 1 + row_index as u32;
            for (col, column) in report.columns.iter().enumerate() {
                let Some(value) = row.get(&column.key) else { continue };
                match (column.data_type, value) {
                    (DataType::Currency, CellValue::Currency(m)) => {
                        sheet
                            .write_number(sheet_row, col as u16, m.as_decimal().to_string().parse().unwrap_or(0.0), None)
                            .map_err(|e| ExportError::Spreadsheet(e.to_string()))?;
                    }
                    _ => {
                        sheet
                            .write_string(sheet_row, col as u16, &value.as_text(), None)
                            .map_err(|e| ExportError::Spreadsheet(e.to_string()))?;
                    }
                }
            }
        }

        workbook.close().map_err(|e| ExportError::Spreadsheet(e.to_string()))?;
    }

    let bytes = std::fs::read(&scratch)?;
    let _ = std::fs::remove_file(&scratch);
    Ok(bytes)
}

/// Excel sheet names cap at 31 chars and forbid `: \ / ? * [ ]`.
fn sheet_safe_name(title: &str) -> String {
    let cleaned: String = title.chars().filter(|c| !matches!(c, ':' | '\\' | '/' | '?' | '*' | '[' | ']')).collect();
    cleaned.chars().take(31).collect()
}
