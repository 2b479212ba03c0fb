use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::ids::CompanyId;

fn code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{4}(-[0-9]{1,3})?$").unwrap())
}

/// Fixed enumeration of account types, each with a normal balance side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

/// The side on which an account's balance is expected to be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NormalBalance {
    Debit,
    Credit,
}

impl AccountType {
    /// Pure function: account type → normal balance. Replaces dynamic
    /// dispatch across account subclasses with a tagged match.
    pub fn normal_balance(self) -> NormalBalance {
        match self {
            AccountType::Asset | AccountType::Expense => NormalBalance::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Revenue => {
                NormalBalance::Credit
            }
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Asset => write!(f, "Asset"),
            AccountType::Liability => write!(f, "Liability"),
            AccountType::Equity => write!(f, "Equity"),
            AccountType::Revenue => write!(f, "Revenue"),
            AccountType::Expense => write!(f, "Expense"),
        }
    }
}

/// Groups accounts within a company (e.g. "Current Assets").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCategory {
    pub company_id: CompanyId,
    pub name: String,
    pub account_type: AccountType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub company_id: CompanyId,
    pub code: String,
    pub name: String,
    pub category: AccountCategory,
    pub active: bool,
    pub parent_code: Option<String>,
}

impl Account {
    pub fn new(company_id: CompanyId, code: &str, name: &str, category: AccountCategory) -> Self {
        Account {
            company_id,
            code: code.to_string(),
            name: name.to_string(),
            category,
            active: true,
            parent_code: None,
        }
    }

    pub fn account_type(&self) -> AccountType {
        self.category.account_type
    }

    pub fn normal_balance(&self) -> NormalBalance {
        self.account_type().normal_balance()
    }

    pub fn is_code_valid(code: &str) -> bool {
        code_pattern().is_match(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company() -> CompanyId {
        CompanyId::new("acme")
    }

    fn category(account_type: AccountType) -> AccountCategory {
        AccountCategory {
            company_id: company(),
            name: "Test".to_string(),
            account_type,
        }
    }

    #[test]
    fn normal_balance_by_type() {
        assert_eq!(AccountType::Asset.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountType::Expense.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountType::Liability.normal_balance(), NormalBalance::Credit);
        assert_eq!(AccountType::Equity.normal_balance(), NormalBalance::Credit);
        assert_eq!(AccountType::Revenue.normal_balance(), NormalBalance::Credit);
    }

    #[test]
    fn code_format_validation() {
        assert!(Account::is_code_valid("1100"));
        assert!(Account::is_code_valid("5100-01"));
        assert!(Account::is_code_valid("5100-123"));
        assert!(!Account::is_code_valid("110"));
        assert!(!Account::is_code_valid("11000"));
        assert!(!Account::is_code_valid("ABCD"));
        assert!(!Account::is_code_valid("5100-1234"));
    }

    #[test]
    fn account_exposes_normal_balance_via_category() {
        let account = Account::new(company(), "4000", "Sales", category(AccountType::Revenue));
        assert_eq!(account.normal_balance(), NormalBalance::Credit);
    }
}
