pub mod amount;
pub mod columns;
pub mod skip;
pub mod statement;
pub mod year;

pub use columns::ColumnSpec;
pub use statement::{ParsedTransaction, StatementParser, TransactionKind};
