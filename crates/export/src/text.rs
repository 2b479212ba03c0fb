use fin_report::{Alignment, Report};

use crate::context::ExportContext;

const WIDTH: usize = 120;

fn pad(text: &str, width: usize, alignment: Alignment) -> String {
    if text.len() >= width {
        return text[..width].to_string();
    }
    match alignment {
        Alignment::Left => format!("{text:<width$}"),
        Alignment::Right => format!("{text:>width$}"),
    }
}

/// 120-column fixed-width layout: `=` separator rows bracket the title
/// banner, `-` underlines the column header row — spec.md 4.H's Text
/// format.
pub fn render(report: &Report, ctx: &ExportContext) -> Vec<u8> {
    let mut lines = Vec::new();
    let separator = "=".repeat(WIDTH);

    lines.push(separator.clone());
    lines.push(center(&report.title, WIDTH));
    lines.push(center(&ctx.company_name, WIDTH));
    lines.push(center(&ctx.period_name, WIDTH));
    lines.push(separator.clone());

    let header: String = report
        .columns
        .iter()
        .map(|c| pad(&c.header, c.width, c.alignment))
        .collect::<Vec<_>>()
        .join(" ");
    lines.push(header);
    lines.push("-".repeat(WIDTH.min(header.len().max(WIDTH))));

    for row in &report.rows {
        let rendered: String = report
            .columns
            .iter()
            .map(|c| {
                let value = row.get(&c.key).map(|v| v.as_text()).unwrap_or_default();
                pad(&value, c.width, c.alignment)
            })
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(rendered);
    }

    lines.push(separator);
    lines.join("\n").into_bytes()
}

fn center(text: &str, width: usize) -> String {
    if text.len() >= width {
        return text[..width].to_string();
    }
    let total_padding = width - text.len();
    let left = total_padding / 2;
    let right = total_padding - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fin_report::{row, CellValue, Column};

    #[test]
    fn renders_title_banner_and_rows() {
        let report = Report::new(
            "Trial Balance",
            vec![Column::text("Code", "code", 10), Column::currency("Debit", "debit", 10)],
            vec![row([("code", CellValue::Text("1100".into())), ("debit", CellValue::Currency(fin_core::Money::from_cents(100_000)))])],
        );
        let ctx = ExportContext::new("Acme Ltd", "Jan 2025");
        let text = String::from_utf8(render(&report, &ctx)).unwrap();
        assert!(text.contains("Trial Balance"));
        assert!(text.contains("Acme Ltd"));
        assert!(text.contains("1100"));
        assert!(text.contains("1000.00"));
    }
}
