use fin_core::{Account, AccountCategory, AccountType, ChartOfAccounts, CompanyId};

/// A fixed seed chart of accounts, in the spirit of the teacher's
/// `DEFAULT_ACCOUNTS` table — the persistence backend and a real
/// accounts-setup flow are out of scope for this kernel (spec.md §1), so
/// the CLI demonstration harness seeds one catalogue per invocation
/// instead of loading one from storage.
const DEFAULT_ACCOUNTS: &[(&str, &str, &str, AccountType)] = &[
    ("1100", "Bank", "Current Assets", AccountType::Asset),
    ("2100", "Accounts Payable", "Current Liabilities", AccountType::Liability),
    ("3000", "Owner's Equity", "Equity", AccountType::Equity),
    ("4000", "Sales", "Revenue", AccountType::Revenue),
    ("5100", "Rent", "Operating Expenses", AccountType::Expense),
    ("5200", "Bank charges", "Operating Expenses", AccountType::Expense),
    ("5300", "Salaries and wages", "Operating Expenses", AccountType::Expense),
    ("9999", "Unclassified", "Operating Expenses", AccountType::Expense),
];

pub fn seed_chart_of_accounts(company: &CompanyId) -> ChartOfAccounts {
    let mut coa = ChartOfAccounts::new(company.clone());
    for (code, name, category_name, account_type) in DEFAULT_ACCOUNTS {
        let category = AccountCategory {
            company_id: company.clone(),
            name: category_name.to_string(),
            account_type: *account_type,
        };
        coa.add(Account::new(company.clone(), code, name, category))
            .expect("seed chart of accounts has no duplicate codes");
    }
    coa
}
