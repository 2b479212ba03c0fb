use fin_core::{ChartOfAccounts, CompanyId, FiscalPeriodId, JournalStore, Money};

use crate::income_statement::net_profit;
use crate::model::{row, CellValue, Column, Report};

/// Assets (prefix `1`), Liabilities (prefix `2`), Equity (prefix `3`)
/// sections with each account's signed net balance — spec.md 4.G's
/// Balance Sheet. The law `totalAssets = totalLiabilities + totalEquity +
/// periodNetProfit` is checked to the cent; a violation is logged (it
/// indicates an upstream accounting error, not a corrupted store, so it
/// does not abort the report the way `TrialBalanceUnbalanced` does).
pub fn balance_sheet(
    store: &JournalStore,
    coa: &ChartOfAccounts,
    company: &CompanyId,
    period: &FiscalPeriodId,
) -> Report {
    let columns = vec![
        Column::text("Section", "section", 12),
        Column::text("Code", "code", 8),
        Column::text("Account", "name", 32),
        Column::currency("Balance", "balance", 16),
    ];

    let mut rows = Vec::new();
    let mut total_assets = Money::zero();
    let mut total_liabilities = Money::zero();
    let mut total_equity = Money::zero();

    for (section, prefix, total) in [
        ("Assets", "1", &mut total_assets),
        ("Liabilities", "2", &mut total_liabilities),
        ("Equity", "3", &mut total_equity),
    ] {
        for account in coa.list_by_prefix(prefix) {
            let lines = store.lines_for_account(company, period, &account.code);
            if lines.is_empty() {
                continue;
            }
            let debits: Money = lines.iter().map(|(_, l)| l.debit).sum();
            let credits: Money = lines.iter().map(|(_, l)| l.credit).sum();
            let net = if prefix == "1" { debits - credits } else { credits - debits };
            *total += net;
            rows.push(row([
                ("section", CellValue::Text(section.to_string())),
                ("code", CellValue::Text(account.code.clone())),
                ("name", CellValue::Text(account.name.clone())),
                ("balance", CellValue::Currency(net)),
            ]));
        }
    }

    let period_net_profit = net_profit(store, coa, company, period);
    let expected_assets = total_liabilities + total_equity + period_net_profit;
    if (total_assets - expected_assets).abs() > Money::from_cents(1) {
        tracing::warn!(
            total_assets = %total_assets,
            expected_assets = %expected_assets,
            "balance sheet law violated: assets != liabilities + equity + net profit"
        );
    }

    rows.push(row([
        ("section", CellValue::Text("Total".to_string())),
        ("code", CellValue::Text(String::new())),
        ("name", CellValue::Text("Assets".to_string())),
        ("balance", CellValue::Currency(total_assets)),
    ]));
    rows.push(row([
        ("section", CellValue::Text("Total".to_string())),
        ("code", CellValue::Text(String::new())),
        ("name", CellValue::Text("Liabilities + Equity + Net Profit".to_string())),
        ("balance", CellValue::Currency(expected_assets)),
    ]));

    Report::new("Balance Sheet", columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fin_core::{Account, AccountCategory, AccountType, FiscalPeriod, JournalEntryLine, UnpostedEntry};

    #[test]
    fn assets_equal_equity_plus_net_profit_for_a_single_sale() {
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

        let report = balance_sheet(&store, &coa, &company, &period.id);
        let total_assets = report.rows.iter().find(|r| r.get("name") == Some(&CellValue::Text("Assets".into()))).unwrap();
        let total_other = report
            .rows
            .iter()
            .find(|r| r.get("name") == Some(&CellValue::Text("Liabilities + Equity + Net Profit".into())))
            .unwrap();
        assert_eq!(total_assets.get("balance"), total_other.get("balance"));
    }
}
