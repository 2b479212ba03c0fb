use thiserror::Error;

use crate::money::Money;

/// Unified kernel error type. Variants match spec §7's error-kind table
/// exactly so that recovery policy (fatal-for-entry, fatal-for-job,
/// warn-and-skip) can be decided by matching on the variant at the call
/// site instead of on a string.
#[derive(Debug, Clone, Error)]
pub enum FinError {
    #[error("journal entry is unbalanced: debits={debits}, credits={credits}")]
    Unbalanced { debits: Money, credits: Money },

    #[error("account {0} is unknown")]
    UnknownAccount(String),

    #[error("account {0} is inactive")]
    InactiveAccount(String),

    #[error("fiscal period {0} is closed")]
    PeriodClosed(String),

    #[error("account code '{0}' already exists")]
    CodeConflict(String),

    #[error("account code '{0}' does not match the required ^[0-9]{{4}}(-[0-9]{{1,3}})?$ format")]
    InvalidAccountCode(String),

    #[error("no amount found on line: {0}")]
    ParseNoAmount(String),

    #[error("malformed date on line: {0}")]
    ParseMalformedDate(String),

    #[error("rule '{0}' has an invalid regex pattern: {1}")]
    RegexInvalid(String, String),

    #[error("trial balance is unbalanced: debit total={debit_total}, credit total={credit_total}")]
    TrialBalanceUnbalanced { debit_total: Money, credit_total: Money },

    #[error("journal entry must have at least two lines")]
    TooFewLines,
}

pub type FinResult<T> = Result<T, FinError>;
