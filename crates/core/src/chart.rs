use std::collections::HashMap;

use crate::account::{Account, NormalBalance};
use crate::error::{FinError, FinResult};
use crate::ids::CompanyId;

/// The account catalogue for one company: lookup by code, listing, and
/// code-prefix scans for reports ("1%" for assets, etc).
#[derive(Debug, Default)]
pub struct ChartOfAccounts {
    company_id: Option<CompanyId>,
    accounts: HashMap<String, Account>,
    /// Preserves insertion order for deterministic listing.
    order: Vec<String>,
}

impl ChartOfAccounts {
    pub fn new(company_id: CompanyId) -> Self {
        ChartOfAccounts {
            company_id: Some(company_id),
            accounts: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn add(&mut self, account: Account) -> FinResult<()> {
        if !Account::is_code_valid(&account.code) {
            return Err(FinError::InvalidAccountCode(account.code.clone()));
        }
        if self.accounts.contains_key(&account.code) {
            return Err(FinError::CodeConflict(account.code.clone()));
        }
        self.order.push(account.code.clone());
        self.accounts.insert(account.code.clone(), account);
        Ok(())
    }

    pub fn get(&self, code: &str) -> Option<&Account> {
        self.accounts.get(code)
    }

    pub fn require(&self, code: &str) -> FinResult<&Account> {
        self.get(code).ok_or_else(|| FinError::UnknownAccount(code.to_string()))
    }

    /// Returns the account for posting, rejecting unknown and inactive
    /// accounts per the spec's posting contract.
    pub fn require_postable(&self, code: &str) -> FinResult<&Account> {
        let account = self.require(code)?;
        if !account.active {
            return Err(FinError::InactiveAccount(code.to_string()));
        }
        Ok(account)
    }

    pub fn list(&self) -> Vec<&Account> {
        self.order.iter().filter_map(|code| self.accounts.get(code)).collect()
    }

    pub fn list_by_prefix(&self, prefix: &str) -> Vec<&Account> {
        self.list().into_iter().filter(|a| a.code.starts_with(prefix)).collect()
    }

    /// Given an account code, returns its normal balance side. Fails with
    /// `UnknownAccount` rather than panicking if the code is absent.
    pub fn normal_balance_of(&self, code: &str) -> FinResult<NormalBalance> {
        Ok(self.require(code)?.normal_balance())
    }
}
