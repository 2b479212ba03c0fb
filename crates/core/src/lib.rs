pub mod account;
pub mod chart;
pub mod error;
pub mod ids;
pub mod journal;
pub mod money;
pub mod period;

pub use account::{Account, AccountCategory, AccountType, NormalBalance};
pub use chart::ChartOfAccounts;
pub use error::{FinError, FinResult};
pub use ids::{BankTransactionId, CompanyId, FiscalPeriodId, JournalEntryId};
pub use journal::{validate_lines, EntryFilter, JournalEntry, JournalEntryLine, JournalStore, UnpostedEntry};
pub use money::Money;
pub use period::{DateRange, FiscalPeriod, FiscalPeriodSet};
