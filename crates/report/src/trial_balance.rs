use fin_core::{Account, ChartOfAccounts, CompanyId, FinError, FinResult, FiscalPeriodId, JournalStore, Money, NormalBalance};

use crate::model::{row, CellValue, Column, Report};

/// For each account with any activity in the period, the net of its
/// period debits/credits presented in the column matching its normal
/// balance's sign — spec.md 4.G's trial balance algorithm. The two grand
/// totals must be equal; a non-zero discrepancy means the journal store's
/// balance invariant was violated somewhere upstream, which is a
/// corruption, not a reportable business state, so it surfaces as
/// `FinError::TrialBalanceUnbalanced` instead of a normal report.
pub fn trial_balance(
    store: &JournalStore,
    coa: &ChartOfAccounts,
    company: &CompanyId,
    period: &FiscalPeriodId,
) -> FinResult<Report> {
    let columns = vec![
        Column::text("Code", "code", 8),
        Column::text("Account", "name", 40),
        Column::currency("Debit", "debit", 16),
        Column::currency("Credit", "credit", 16),
    ];

    let mut rows = Vec::new();
    let mut total_debits = Money::zero();
    let mut total_credits = Money::zero();

    for account in coa.list() {
        let lines = store.lines_for_account(company, period, &account.code);
        if lines.is_empty() {
            continue;
        }
        let period_debits: Money = lines.iter().map(|(_, l)| l.debit).sum();
        let period_credits: Money = lines.iter().map(|(_, l)| l.credit).sum();

        let (debit_column, credit_column) = net_columns(account, period_debits, period_credits);
        total_debits += debit_column;
        total_credits += credit_column;

        rows.push(row([
            ("code", CellValue::Text(account.code.clone())),
            ("name", CellValue::Text(account.name.clone())),
            ("debit", CellValue::Currency(debit_column)),
            ("credit", CellValue::Currency(credit_column)),
        ]));
    }

    rows.push(row([
        ("code", CellValue::Text(String::new())),
        ("name", CellValue::Text("TOTAL".to_string())),
        ("debit", CellValue::Currency(total_debits)),
        ("credit", CellValue::Currency(total_credits)),
    ]));

    if total_debits != total_credits {
        return Err(FinError::TrialBalanceUnbalanced { debit_total: total_debits, credit_total: total_credits });
    }

    Ok(Report::new("Trial Balance", columns, rows))
}

/// Places the account's net period activity in the debit or credit
/// column per spec.md: normal-debit accounts net `debits - credits` into
/// the debit column when non-negative (credit column, absolute value,
/// otherwise); normal-credit accounts mirror that on `credits - debits`.
fn net_columns(account: &Account, debits: Money, credits: Money) -> (Money, Money) {
    match account.normal_balance() {
        NormalBalance::Debit => {
            let net = debits - credits;
            if net.is_negative() {
                (Money::zero(), net.abs())
            } else {
                (net, Money::zero())
            }
        }
        NormalBalance::Credit => {
            let net = credits - debits;
            if net.is_negative() {
                (net.abs(), Money::zero())
            } else {
                (Money::zero(), net)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fin_core::{AccountCategory, AccountType, FiscalPeriod, JournalEntryLine, UnpostedEntry};

    fn setup() -> (JournalStore, ChartOfAccounts, CompanyId, FiscalPeriod) {
        let company = CompanyId::new("acme");
        let mut coa = ChartOfAccounts::new(company.clone());
        coa.add(fin_core::Account::new(
            company.clone(),
            "1100",
            "Bank",
            AccountCategory { company_id: company.clone(), name: "Current Assets".into(), account_type: AccountType::Asset },
        ))
        .unwrap();
        coa.add(fin_core::Account::new(
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
        (JournalStore::new(), coa, company, period)
    }

    #[test]
    fn scenario_1_trial_balance_totals_match() {
        let (store, coa, company, period) = setup();
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

        let report = trial_balance(&store, &coa, &company, &period.id).unwrap();
        // Two account rows plus the total row.
        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.rows[0].get("debit"), Some(&CellValue::Currency(Money::from_cents(100_000))));
        assert_eq!(report.rows[1].get("credit"), Some(&CellValue::Currency(Money::from_cents(100_000))));
        let total = &report.rows[2];
        assert_eq!(total.get("debit"), total.get("credit"));
    }

    #[test]
    fn accounts_with_no_activity_are_omitted() {
        let (store, coa, company, period) = setup();
        let report = trial_balance(&store, &coa, &company, &period.id).unwrap();
        assert_eq!(report.rows.len(), 1); // just the zero total row
    }
}
