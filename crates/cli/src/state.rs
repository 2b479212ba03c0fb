use std::path::Path;

use fin_classify::TransactionMappingRule;
use fin_core::{Account, ChartOfAccounts, CompanyId, FiscalPeriod, FiscalPeriodId, JournalEntry, JournalStore};
use serde::{Deserialize, Serialize};

use crate::accounts::seed_chart_of_accounts;

/// The kernel has no persistence backend of its own (spec.md §1 places
/// that choice out of scope); this is the CLI's own minimal substitute so
/// that `fin import` and a later `fin report` in a separate process
/// invocation see the same books. A real deployment would swap this for
/// the teacher's SQLite (`aequi-storage`) or a Postgres backend the way
/// `massehanto-accounting-system` does — this snapshot exists only so the
/// CLI harness can demonstrate the kernel end-to-end across commands.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub periods: Vec<FiscalPeriod>,
    #[serde(default)]
    pub rules: Vec<TransactionMappingRule>,
    #[serde(default)]
    pub entries: Vec<JournalEntry>,
    #[serde(default)]
    pub next_bank_transaction_id: u64,
}

impl Snapshot {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Snapshot::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// The chart of accounts for `company`, seeded with the CLI's demo
    /// account catalogue the first time a company is referenced (there is
    /// no `accounts create` command in spec.md §6's CLI surface, so a
    /// fresh company needs a starting catalogue from somewhere).
    pub fn chart_of_accounts(&mut self, company: &CompanyId) -> ChartOfAccounts {
        if !self.accounts.iter().any(|a| &a.company_id == company) {
            let seeded = seed_chart_of_accounts(company);
            self.accounts.extend(seeded.list().into_iter().cloned());
        }
        let mut coa = ChartOfAccounts::new(company.clone());
        for account in self.accounts.iter().filter(|a| &a.company_id == company) {
            coa.add(account.clone()).expect("snapshot accounts have unique codes per company");
        }
        coa
    }

    /// The fiscal period for (company, period id), auto-creating a
    /// calendar-month period the first time a `YYYY-MM` id is referenced.
    /// There is no `period create` command in spec.md §6, so the CLI
    /// infers the period's date range from its id the same way the
    /// scenario tests in spec.md §8 name periods (`"2025-01"`).
    pub fn fiscal_period(&mut self, company: &CompanyId, period_id: &FiscalPeriodId) -> anyhow::Result<FiscalPeriod> {
        if let Some(existing) = self.periods.iter().find(|p| &p.company_id == company && &p.id == period_id) {
            return Ok(existing.clone());
        }
        let period = month_period(company.clone(), period_id)?;
        self.periods.push(period.clone());
        Ok(period)
    }

    /// Replaces the whole rule set for `company` — `rules import` per
    /// spec.md §6 is a wholesale replace, not a merge.
    pub fn replace_rules(&mut self, company: &CompanyId, rules: Vec<TransactionMappingRule>) {
        self.rules.retain(|r| &r.company_id != company);
        self.rules.extend(rules);
    }

    pub fn rules_for(&self, company: &CompanyId) -> Vec<TransactionMappingRule> {
        self.rules.iter().filter(|r| &r.company_id == company).cloned().collect()
    }

    pub fn journal_store(&self) -> JournalStore {
        JournalStore::restore(self.entries.clone())
    }

    pub fn persist_entries(&mut self, store: &JournalStore) {
        self.entries = store.all_entries();
    }

    pub fn next_bank_transaction_id(&mut self) -> u64 {
        self.next_bank_transaction_id += 1;
        self.next_bank_transaction_id
    }
}

fn month_period(company: CompanyId, period_id: &FiscalPeriodId) -> anyhow::Result<FiscalPeriod> {
    use chrono::NaiveDate;

    let id = period_id.as_str();
    let (year_str, month_str) = id
        .split_once('-')
        .ok_or_else(|| anyhow::anyhow!("fiscal period '{id}' is unknown and its id is not a 'YYYY-MM' month code"))?;
    let year: i32 = year_str.parse()?;
    let month: u32 = month_str.parse()?;
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| anyhow::anyhow!("fiscal period '{id}' does not name a valid calendar month"))?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .unwrap()
    .pred_opt()
    .unwrap();
    let name = start.format("%b %Y").to_string();
    Ok(FiscalPeriod::new(period_id.clone(), company, name, start, end).map_err(|e| anyhow::anyhow!(e))?)
}
