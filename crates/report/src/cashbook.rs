use fin_core::{ChartOfAccounts, CompanyId, FiscalPeriodId, JournalStore, Money};

use crate::model::{row, CellValue, Column, Report};

/// General Ledger restricted to the cash/bank family (accounts whose code
/// starts with `1`), relabelled as Receipts/Payments rather than
/// Debit/Credit — spec.md 4.G's Cashbook.
pub fn cashbook(
    store: &JournalStore,
    coa: &ChartOfAccounts,
    company: &CompanyId,
    period: &FiscalPeriodId,
) -> Report {
    let columns = vec![
        Column::text("Code", "code", 8),
        Column::text("Account", "name", 28),
        Column::date("Date", "date", 8),
        Column::text("Description", "description", 32),
        Column::currency("Receipts", "receipts", 14),
        Column::currency("Payments", "payments", 14),
        Column::currency("Balance", "balance", 14),
    ];

    let mut rows = Vec::new();
    for account in coa.list_by_prefix("1") {
        let lines = store.lines_for_account(company, period, &account.code);
        if lines.is_empty() {
            continue;
        }
        let mut running = Money::zero();
        for (entry, line) in lines {
            running = running + line.debit - line.credit;
            rows.push(row([
                ("code", CellValue::Text(account.code.clone())),
                ("name", CellValue::Text(account.name.clone())),
                ("date", CellValue::Date(entry.date)),
                ("description", CellValue::Text(line.description.clone())),
                ("receipts", CellValue::Currency(line.debit)),
                ("payments", CellValue::Currency(line.credit)),
                ("balance", CellValue::Currency(running)),
            ]));
        }
    }

    Report::new("Cashbook", columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fin_core::{Account, AccountCategory, AccountType, FiscalPeriod, JournalEntryLine, UnpostedEntry};

    #[test]
    fn only_code_prefix_one_accounts_appear() {
        let company = CompanyId::new("acme");
        let mut coa = ChartOfAccounts::new(company.clone());
        coa.add(Account::new(
            company.clone(),
            "1100",
            "Bank",
            AccountCategory { company_id: company.clone(), name: "Current Assets".into(), account_type: AccountType::Asset },
        ))
        .unwrap();
        coa.add(Account::new(
            company.clone(),
            "4000",
            "Sales",
            AccountCategory { company_id: company.clone(), name: "Revenue".into(), account_type: AccountType::Revenue },
        ))
        .unwrap();
        let period = FiscalPeriod::new(
            FiscalPeriodId::new("2025-01"),
            company.clone(),
            "Jan 2025",
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        )
        .unwrap();
        let store = JournalStore::new();
        store
            .post(
                &coa,
                &period,
                UnpostedEntry {
                    date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
                    reference: "JE-0001".into(),
                    description: "Sales".into(),
                    created_by: "system".into(),
                    lines: vec![
                        JournalEntryLine::debit(1, "1100", "Bank", Money::from_cents(100_000)),
                        JournalEntryLine::credit(2, "4000", "Sales", Money::from_cents(100_000)),
                    ],
                },
            )
            .unwrap();

        let report = cashbook(&store, &coa, &company, &period.id);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].get("code"), Some(&CellValue::Text("1100".into())));
        assert_eq!(report.rows[0].get("receipts"), Some(&CellValue::Currency(Money::from_cents(100_000))));
    }
}
