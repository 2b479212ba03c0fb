use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::chart::ChartOfAccounts;
use crate::error::{FinError, FinResult};
use crate::ids::{CompanyId, FiscalPeriodId, JournalEntryId};
use crate::money::Money;
use crate::period::FiscalPeriod;

/// Exactly one of `debit`/`credit` must be strictly positive on a line; the
/// other is zero. Enforced by [`validate_lines`], not by the type itself,
/// so a line can still be constructed while being built up (builder
/// boundary per the design notes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntryLine {
    pub line_number: u32,
    pub account_code: String,
    pub description: String,
    pub debit: Money,
    pub credit: Money,
}

impl JournalEntryLine {
    pub fn debit(line_number: u32, account_code: impl Into<String>, description: impl Into<String>, amount: Money) -> Self {
        JournalEntryLine {
            line_number,
            account_code: account_code.into(),
            description: description.into(),
            debit: amount,
            credit: Money::zero(),
        }
    }

    pub fn credit(line_number: u32, account_code: impl Into<String>, description: impl Into<String>, amount: Money) -> Self {
        JournalEntryLine {
            line_number,
            account_code: account_code.into(),
            description: description.into(),
            debit: Money::zero(),
            credit: amount,
        }
    }
}

/// An atomic balanced posting of >= 2 lines, not yet assigned an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnpostedEntry {
    pub date: NaiveDate,
    pub reference: String,
    pub description: String,
    pub created_by: String,
    pub lines: Vec<JournalEntryLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: JournalEntryId,
    pub company_id: CompanyId,
    pub fiscal_period_id: FiscalPeriodId,
    pub date: NaiveDate,
    pub reference: String,
    pub description: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<JournalEntryLine>,
}

impl JournalEntry {
    pub fn total_debits(&self) -> Money {
        self.lines.iter().map(|l| l.debit).sum()
    }

    pub fn total_credits(&self) -> Money {
        self.lines.iter().map(|l| l.credit).sum()
    }
}

/// Validates the balance invariant + per-line XOR invariant without
/// touching the chart of accounts or the store. Kept separate from
/// `JournalStore::post` so it is reusable (e.g. the posting service
/// validates before it ever reaches the store).
pub fn validate_lines(lines: &[JournalEntryLine]) -> FinResult<()> {
    if lines.len() < 2 {
        return Err(FinError::TooFewLines);
    }
    for line in lines {
        let debit_positive = !line.debit.is_zero() && !line.debit.is_negative();
        let credit_positive = !line.credit.is_zero() && !line.credit.is_negative();
        if debit_positive == credit_positive {
            return Err(FinError::Unbalanced {
                debits: line.debit,
                credits: line.credit,
            });
        }
    }
    let total_debits: Money = lines.iter().map(|l| l.debit).sum();
    let total_credits: Money = lines.iter().map(|l| l.credit).sum();
    if total_debits != total_credits || total_debits.is_zero() {
        return Err(FinError::Unbalanced {
            debits: total_debits,
            credits: total_credits,
        });
    }
    Ok(())
}

#[derive(Debug, Default)]
struct PeriodLedger {
    entries: Vec<JournalEntry>,
    next_id: u64,
}

impl PeriodLedger {
    fn next_entry_id(&mut self) -> JournalEntryId {
        self.next_id += 1;
        JournalEntryId(self.next_id)
    }
}

#[derive(Default)]
pub struct EntryFilter<'a> {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub text: Option<&'a str>,
}

impl<'a> EntryFilter<'a> {
    fn matches(&self, entry: &JournalEntry) -> bool {
        if let Some(from) = self.date_from {
            if entry.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if entry.date > to {
                return false;
            }
        }
        if let Some(text) = self.text {
            let needle = text.to_uppercase();
            let haystack = format!("{} {}", entry.description, entry.reference).to_uppercase();
            if !haystack.contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// Append-only store of journal entries, one writer-lock per (company,
/// fiscal period) so posts to distinct periods may interleave while two
/// concurrent posts to the same period are serialised.
#[derive(Default)]
pub struct JournalStore {
    ledgers: RwLock<HashMap<(CompanyId, FiscalPeriodId), RwLock<PeriodLedger>>>,
}

impl JournalStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ledger_key(company_id: &CompanyId, period_id: &FiscalPeriodId) -> (CompanyId, FiscalPeriodId) {
        (company_id.clone(), period_id.clone())
    }

    /// Posts a complete entry. The whole check-then-write (balance
    /// invariant, account existence/activation, period-open check) happens
    /// under the period's writer lock, so a partially written unbalanced
    /// entry is never observable.
    pub fn post(
        &self,
        coa: &ChartOfAccounts,
        period: &FiscalPeriod,
        entry: UnpostedEntry,
    ) -> FinResult<JournalEntry> {
        if period.closed {
            return Err(FinError::PeriodClosed(period.name.clone()));
        }

        validate_lines(&entry.lines)?;

        for line in &entry.lines {
            coa.require_postable(&line.account_code)?;
        }

        let key = Self::ledger_key(&period.company_id, &period.id);
        {
            let ledgers = self.ledgers.read().unwrap();
            if let Some(lock) = ledgers.get(&key) {
                return self.post_into(lock, period, entry);
            }
        }
        let mut ledgers = self.ledgers.write().unwrap();
        let lock = ledgers.entry(key).or_insert_with(|| RwLock::new(PeriodLedger::default()));
        self.post_into(lock, period, entry)
    }

    fn post_into(
        &self,
        lock: &RwLock<PeriodLedger>,
        period: &FiscalPeriod,
        entry: UnpostedEntry,
    ) -> FinResult<JournalEntry> {
        let mut ledger = lock.write().unwrap();
        let id = ledger.next_entry_id();
        let posted = JournalEntry {
            id,
            company_id: period.company_id.clone(),
            fiscal_period_id: period.id.clone(),
            date: entry.date,
            reference: entry.reference,
            description: entry.description,
            created_by: entry.created_by,
            created_at: Utc::now(),
            lines: entry.lines,
        };
        ledger.entries.push(posted.clone());
        Ok(posted)
    }

    pub fn entries_in_period(&self, company_id: &CompanyId, period_id: &FiscalPeriodId) -> Vec<JournalEntry> {
        let ledgers = self.ledgers.read().unwrap();
        let Some(lock) = ledgers.get(&Self::ledger_key(company_id, period_id)) else {
            return Vec::new();
        };
        let ledger = lock.read().unwrap();
        let mut entries: Vec<JournalEntry> = ledger.entries.clone();
        entries.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        entries
    }

    pub fn entries_paged(
        &self,
        company_id: &CompanyId,
        period_id: &FiscalPeriodId,
        filter: &EntryFilter,
        page: usize,
        size: usize,
    ) -> (Vec<JournalEntry>, usize) {
        let filtered: Vec<JournalEntry> = self
            .entries_in_period(company_id, period_id)
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect();
        let total = filtered.len();
        let start = page.saturating_mul(size).min(total);
        let end = (start + size).min(total);
        (filtered[start..end].to_vec(), total)
    }

    /// Every entry currently held by the store, across every (company,
    /// fiscal period) scope, in no particular order. Used by callers that
    /// need to snapshot the whole store to a persistence layer (the kernel
    /// itself has none — spec.md §1 places persistence backend choice out
    /// of scope — but a caller embedding this store across process
    /// invocations needs a way to serialize and later rehydrate it).
    pub fn all_entries(&self) -> Vec<JournalEntry> {
        let ledgers = self.ledgers.read().unwrap();
        ledgers
            .values()
            .flat_map(|lock| lock.read().unwrap().entries.clone())
            .collect()
    }

    /// Rebuilds a store from a flat list of previously posted entries,
    /// re-deriving each (company, period) scope's `next_id` counter from
    /// the highest entry id seen so a restored store continues assigning
    /// ids after the last one it held before being serialized.
    pub fn restore(entries: Vec<JournalEntry>) -> Self {
        let store = JournalStore::new();
        {
            let mut ledgers = store.ledgers.write().unwrap();
            for entry in entries {
                let key = Self::ledger_key(&entry.company_id, &entry.fiscal_period_id);
                let lock = ledgers.entry(key).or_insert_with(|| RwLock::new(PeriodLedger::default()));
                let mut ledger = lock.write().unwrap();
                if entry.id.0 > ledger.next_id {
                    ledger.next_id = entry.id.0;
                }
                ledger.entries.push(entry);
            }
        }
        store
    }

    pub fn lines_for_account(
        &self,
        company_id: &CompanyId,
        period_id: &FiscalPeriodId,
        account_code: &str,
    ) -> Vec<(JournalEntry, JournalEntryLine)> {
        let mut result = Vec::new();
        for entry in self.entries_in_period(company_id, period_id) {
            for line in &entry.lines {
                if line.account_code == account_code {
                    result.push((entry.clone(), line.clone()));
                }
            }
        }
        result.sort_by(|(ea, la), (eb, lb)| {
            ea.date.cmp(&eb.date).then(ea.id.cmp(&eb.id)).then(la.line_number.cmp(&lb.line_number))
        });
        result
    }
}
