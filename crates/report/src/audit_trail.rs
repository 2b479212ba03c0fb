use fin_core::{ChartOfAccounts, CompanyId, EntryFilter, FiscalPeriodId, JournalStore};

use crate::model::{row, CellValue, Column, Report};

/// Paginated listing of journal entries with all their lines — spec.md
/// 4.G's Audit Trail. Entries are already ordered (entry date asc, id
/// asc) by `JournalStore::entries_paged`; lines within an entry keep
/// their `line_number` order because they were never re-sorted after
/// `JournalStore::post` appended them.
pub fn audit_trail(
    store: &JournalStore,
    coa: &ChartOfAccounts,
    company: &CompanyId,
    period: &FiscalPeriodId,
    filter: &EntryFilter,
    page: usize,
    size: usize,
) -> (Report, usize) {
    let columns = vec![
        Column::date("Date", "date", 8),
        Column::text("Reference", "reference", 12),
        Column::text("Code", "code", 8),
        Column::text("Account", "account_name", 28),
        Column::text("Description", "description", 28),
        Column::currency("Debit", "debit", 14),
        Column::currency("Credit", "credit", 14),
    ];

    let (entries, total) = store.entries_paged(company, period, filter, page, size);

    let mut rows = Vec::new();
    for entry in entries {
        for line in &entry.lines {
            let account_name = coa.get(&line.account_code).map(|a| a.name.clone()).unwrap_or_default();
            rows.push(row([
                ("date", CellValue::Date(entry.date)),
                ("reference", CellValue::Text(entry.reference.clone())),
                ("code", CellValue::Text(line.account_code.clone())),
                ("account_name", CellValue::Text(account_name)),
                ("description", CellValue::Text(line.description.clone())),
                ("debit", CellValue::Currency(line.debit)),
                ("credit", CellValue::Currency(line.credit)),
            ]));
        }
    }

    (Report::new("Audit Trail", columns, rows), total)
}
