use fin_core::{BankTransactionId, CompanyId, FiscalPeriodId};
use fin_parser::ParsedTransaction;

/// A single line lifted out of a parsed bank statement, still waiting for
/// classification into a chart-of-accounts code before it can be posted.
#[derive(Debug, Clone)]
pub struct BankTransaction {
    pub id: BankTransactionId,
    pub company_id: CompanyId,
    pub fiscal_period_id: FiscalPeriodId,
    pub parsed: ParsedTransaction,
}

impl BankTransaction {
    pub fn new(
        id: BankTransactionId,
        company_id: CompanyId,
        fiscal_period_id: FiscalPeriodId,
        parsed: ParsedTransaction,
    ) -> Self {
        BankTransaction {
            id,
            company_id,
            fiscal_period_id,
            parsed,
        }
    }

    /// A deterministic reference derived from the bank transaction's id,
    /// not a database sequence — re-importing the same statement twice
    /// produces the same reference for the same line.
    pub fn reference(&self) -> String {
        format!("BTX-{:010}", self.id.0)
    }
}
