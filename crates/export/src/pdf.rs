use chrono::Local;
use fin_report::Report;
use printpdf::*;

use crate::context::{ExportContext, SYSTEM_NAME};
use crate::error::{ExportError, ExportResult};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const POINTS_PER_MM: f32 = 2.835;
const MARGIN_PT: f32 = 50.0;
const FONT_SIZE: f32 = 9.0;
const LINE_HEIGHT_MM: f32 = 4.5;

/// A4 portrait, 50pt margins, fixed-width font for the ledger body,
/// column widths from the report's schema, a repeated title/company/
/// period banner on every page, and a
/// `Page N | Generated: dd/MM/yyyy | FIN Financial Management System`
/// footer — spec.md 4.H and §6's PDF contract.
pub fn render(report: &Report, ctx: &ExportContext) -> ExportResult<Vec<u8>> {
    let margin_mm = MARGIN_PT / POINTS_PER_MM;
    let lines_per_page = ((PAGE_HEIGHT_MM - 2.0 * margin_mm) / LINE_HEIGHT_MM) as usize;

    let title = format!("{} - {}", report.title, ctx.company_name);
    let mut doc = PdfDocument::new(&title);
    let font = doc.add_builtin_font(BuiltinFont::Courier).map_err(|e| ExportError::Pdf(e.to_string()))?;

    let header: Vec<String> = report.columns.iter().map(|c| pad(&c.header, c.width)).collect();
    let header_line = header.join(" ");

    let body_lines: Vec<String> = report
        .rows
        .iter()
        .map(|row| {
            report
                .columns
                .iter()
                .map(|c| pad(&row.get(&c.key).map(|v| v.as_text()).unwrap_or_default(), c.width))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    let chunks: Vec<&[String]> = if body_lines.is_empty() { vec![&[][..]] } else { body_lines.chunks(lines_per_page.max(1)).collect() };
    let total_pages = chunks.len();
    let generated = Local::now().format("%d/%m/%Y").to_string();

    let mut pages = Vec::with_capacity(total_pages);
    for (index, chunk) in chunks.into_iter().enumerate() {
        let mut ops = vec![Op::SetFontSize { size: Pt(FONT_SIZE), font: font.clone() }];
        let mut cursor = PAGE_HEIGHT_MM - margin_mm;

        for banner_line in [report.title.clone(), ctx.company_name.clone(), ctx.period_name.clone(), header_line.clone()] {
            push_line(&mut ops, &font, &banner_line, margin_mm, cursor);
            cursor -= LINE_HEIGHT_MM;
        }

        for line in chunk {
            push_line(&mut ops, &font, line, margin_mm, cursor);
            cursor -= LINE_HEIGHT_MM;
        }

        let footer = format!("Page {} | Generated: {} | {}", index + 1, generated, SYSTEM_NAME);
        push_line(&mut ops, &font, &footer, margin_mm, margin_mm / 2.0);

        pages.push(PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), ops));
    }

    let bytes = doc.with_pages(pages).save(&PdfSaveOptions::default());
    Ok(bytes)
}

fn push_line(ops: &mut Vec<Op>, font: &FontId, text: &str, x_mm: f32, y_mm: f32) {
    ops.push(Op::SetTextCursor { pos: Point::new(Mm(x_mm), Mm(y_mm)) });
    ops.push(Op::WriteText { text: text.to_string(), font: font.clone() });
}

fn pad(text: &str, width: usize) -> String {
    if text.len() >= width {
        text[..width].to_string()
    } else {
        format!("{text:<width$}")
    }
}
