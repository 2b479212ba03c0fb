use fin_core::{ChartOfAccounts, CompanyId, FiscalPeriodId, JournalStore, Money};

use crate::model::{row, CellValue, Column, Report};

/// Revenue (code prefix `4`) and Expenses (code prefix `5`) sections.
/// spec.md 4.G: `net = debits - credits` leaves revenue negative and
/// expense positive under normal-balance conventions, so revenue is
/// presented as its credit-side positive magnitude (`-net`) while expense
/// is presented as-is. Net profit = total revenue - total expenses.
pub fn income_statement(
    store: &JournalStore,
    coa: &ChartOfAccounts,
    company: &CompanyId,
    period: &FiscalPeriodId,
) -> Report {
    let columns = vec![
        Column::text("Section", "section", 10),
        Column::text("Code", "code", 8),
        Column::text("Account", "name", 32),
        Column::currency("Amount", "amount", 16),
    ];

    let mut rows = Vec::new();
    let mut total_revenue = Money::zero();
    let mut total_expenses = Money::zero();

    for account in coa.list_by_prefix("4") {
        let lines = store.lines_for_account(company, period, &account.code);
        if lines.is_empty() {
            continue;
        }
        let debits: Money = lines.iter().map(|(_, l)| l.debit).sum();
        let credits: Money = lines.iter().map(|(_, l)| l.credit).sum();
        let amount = credits - debits;
        total_revenue += amount;
        rows.push(row([
            ("section", CellValue::Text("Revenue".to_string())),
            ("code", CellValue::Text(account.code.clone())),
            ("name", CellValue::Text(account.name.clone())),
            ("amount", CellValue::Currency(amount)),
        ]));
    }

    for account in coa.list_by_prefix("5") {
        let lines = store.lines_for_account(company, period, &account.code);
        if lines.is_empty() {
            continue;
        }
        let debits: Money = lines.iter().map(|(_, l)| l.debit).sum();
        let credits: Money = lines.iter().map(|(_, l)| l.credit).sum();
        let amount = debits - credits;
        total_expenses += amount;
        rows.push(row([
            ("section", CellValue::Text("Expenses".to_string())),
            ("code", CellValue::Text(account.code.clone())),
            ("name", CellValue::Text(account.name.clone())),
            ("amount", CellValue::Currency(amount)),
        ]));
    }

    let net_profit = total_revenue - total_expenses;
    rows.push(row([
        ("section", CellValue::Text("Total".to_string())),
        ("code", CellValue::Text(String::new())),
        ("name", CellValue::Text("Net Profit".to_string())),
        ("amount", CellValue::Currency(net_profit)),
    ]));

    Report::new("Income Statement", columns, rows)
}

/// Net profit alone, used by the balance sheet to check its own law
/// without recomputing the income statement's row model.
pub fn net_profit(store: &JournalStore, coa: &ChartOfAccounts, company: &CompanyId, period: &FiscalPeriodId) -> Money {
    let mut total_revenue = Money::zero();
    let mut total_expenses = Money::zero();
    for account in coa.list_by_prefix("4") {
        let lines = store.lines_for_account(company, period, &account.code);
        let debits: Money = lines.iter().map(|(_, l)| l.debit).sum();
        let credits: Money = lines.iter().map(|(_, l)| l.credit).sum();
        total_revenue += credits - debits;
    }
    for account in coa.list_by_prefix("5") {
        let lines = store.lines_for_account(company, period, &account.code);
        let debits: Money = lines.iter().map(|(_, l)| l.debit).sum();
        let credits: Money = lines.iter().map(|(_, l)| l.credit).sum();
        total_expenses += debits - credits;
    }
    total_revenue - total_expenses
}
