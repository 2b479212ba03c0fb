pub mod context;
pub mod csv;
pub mod error;
pub mod format;
pub mod pdf;
pub mod spreadsheet;
pub mod text;

pub use context::ExportContext;
pub use error::{ExportError, ExportResult};
pub use format::ExportFormat;

use fin_report::Report;

/// Renders `report` to `format`'s bytes. Text and CSV never fail (pure
/// string building); spreadsheet and PDF can fail on the underlying
/// FFI/file-system boundary, so the return type is uniform across all
/// four formats for caller simplicity.
pub fn render(report: &Report, format: ExportFormat, ctx: &ExportContext) -> ExportResult<Vec<u8>> {
    match format {
        ExportFormat::Text => Ok(text::render(report, ctx)),
        ExportFormat::Csv => csv::render(report),
        ExportFormat::Pdf => pdf::render(report, ctx),
        ExportFormat::Xlsx => spreadsheet::render(report, ctx),
    }
}
