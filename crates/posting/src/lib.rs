pub mod bank_transaction;
pub mod service;

pub use bank_transaction::BankTransaction;
pub use service::PostingService;
