use fin_core::{ChartOfAccounts, CompanyId, FiscalPeriodId, JournalStore, Money};

use crate::model::{row, CellValue, Column, Report};

/// Every account's lines in chronological order with a running balance
/// (`running += debit - credit`), grouped account-by-account so a
/// debit-normal account's running balance reads as positive throughout —
/// spec.md 4.G's General Ledger. Accounts with no activity in the period
/// are omitted, same as the trial balance.
pub fn general_ledger(
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
        Column::currency("Debit", "debit", 14),
        Column::currency("Credit", "credit", 14),
        Column::currency("Balance", "balance", 14),
    ];

    let mut rows = Vec::new();
    for account in coa.list() {
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
                ("debit", CellValue::Currency(line.debit)),
                ("credit", CellValue::Currency(line.credit)),
                ("balance", CellValue::Currency(running)),
            ]));
        }
    }

    Report::new("General Ledger", columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fin_core::{Account, AccountCategory, AccountType, FiscalPeriod, JournalEntryLine, UnpostedEntry};

    #[test]
    fn scenario_2_running_balance_sequence() {
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
        coa.add(Account::new(
            company.clone(),
            "5200",
            "Bank charges",
            AccountCategory { company_id: company.clone(), name: "Expenses".into(), account_type: AccountType::Expense },
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
        store
            .post(
                &coa,
                &period,
                UnpostedEntry {
                    date: NaiveDate::from_ymd_opt(2025, 1, 11).unwrap(),
                    reference: "JE-0002".into(),
                    description: "Bank charges".into(),
                    created_by: "system".into(),
                    lines: vec![
                        JournalEntryLine::debit(1, "5200", "Bank charges", Money::from_cents(2_500)),
                        JournalEntryLine::credit(2, "1100", "Bank charges", Money::from_cents(2_500)),
                    ],
                },
            )
            .unwrap();

        let report = general_ledger(&store, &coa, &company, &period.id);
        let bank_rows: Vec<_> = report.rows.iter().filter(|r| r.get("code") == Some(&CellValue::Text("1100".into()))).collect();
        assert_eq!(bank_rows[0].get("balance"), Some(&CellValue::Currency(Money::from_cents(100_000))));
        assert_eq!(bank_rows[1].get("balance"), Some(&CellValue::Currency(Money::from_cents(97_500))));
    }
}
