pub mod audit_trail;
pub mod balance_sheet;
pub mod cashbook;
pub mod general_ledger;
pub mod income_statement;
pub mod model;
pub mod trial_balance;

pub use model::{row, Alignment, CellValue, Column, DataType, Report, Row};

use fin_core::{ChartOfAccounts, CompanyId, EntryFilter, FinResult, FiscalPeriodId, JournalStore};

/// The six standard reports named by the `kind` argument of the CLI's
/// `report` command (spec.md §6). Kept as a small dispatcher rather than
/// a trait object hierarchy since each report has a distinct signature
/// (audit trail alone takes a filter and pagination).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    TrialBalance,
    GeneralLedger,
    Cashbook,
    IncomeStatement,
    BalanceSheet,
    AuditTrail,
}

impl ReportKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "trial-balance" => Some(ReportKind::TrialBalance),
            "general-ledger" => Some(ReportKind::GeneralLedger),
            "cashbook" => Some(ReportKind::Cashbook),
            "income-statement" => Some(ReportKind::IncomeStatement),
            "balance-sheet" => Some(ReportKind::BalanceSheet),
            "audit-trail" => Some(ReportKind::AuditTrail),
            _ => None,
        }
    }
}

/// Generates any of the six reports except Audit Trail (which needs a
/// filter and page/size; call [`audit_trail::audit_trail`] directly for
/// that one).
pub fn generate(
    kind: ReportKind,
    store: &JournalStore,
    coa: &ChartOfAccounts,
    company: &CompanyId,
    period: &FiscalPeriodId,
) -> FinResult<Report> {
    Ok(match kind {
        ReportKind::TrialBalance => trial_balance::trial_balance(store, coa, company, period)?,
        ReportKind::GeneralLedger => general_ledger::general_ledger(store, coa, company, period),
        ReportKind::Cashbook => cashbook::cashbook(store, coa, company, period),
        ReportKind::IncomeStatement => income_statement::income_statement(store, coa, company, period),
        ReportKind::BalanceSheet => balance_sheet::balance_sheet(store, coa, company, period),
        ReportKind::AuditTrail => audit_trail::audit_trail(store, coa, company, period, &EntryFilter::default(), 0, usize::MAX).0,
    })
}
