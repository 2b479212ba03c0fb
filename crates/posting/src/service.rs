use fin_core::{validate_lines, FinResult, JournalEntryLine, UnpostedEntry};
use fin_parser::TransactionKind;

use crate::bank_transaction::BankTransaction;

/// The fixed accounts a posting service needs beyond whatever the
/// classification engine resolves: the cash/bank account every line
/// touches on one side, the expense account a service-fee marker posts
/// to regardless of classification, and the clearing account an
/// unclassified transaction falls back to so it still posts a complete,
/// balanced entry instead of blocking the import.
#[derive(Debug, Clone)]
pub struct PostingConfig {
    pub bank_account_code: String,
    pub bank_charges_account_code: String,
    pub unclassified_account_code: String,
}

/// Builds a balanced two-line [`UnpostedEntry`] from a classified bank
/// transaction. Pure construction only — the caller still runs the result
/// through `JournalStore::post` to get the period-open and account-active
/// checks spec.md 4.F requires before persistence.
pub struct PostingService<'a> {
    config: &'a PostingConfig,
}

impl<'a> PostingService<'a> {
    pub fn new(config: &'a PostingConfig) -> Self {
        PostingService { config }
    }

    /// `classified_account` is the code the classification engine resolved,
    /// or `None` for "unclassified" (which still posts, to the configured
    /// clearing account, per spec.md 4.F — a dropped line would silently
    /// lose money from the books). `account_name` is used as both the line
    /// description and the entry description, matching spec.md's
    /// "Description = classified account name".
    pub fn build_entry(
        &self,
        tx: &BankTransaction,
        classified_account: Option<&str>,
        account_name: &str,
        created_by: &str,
    ) -> FinResult<UnpostedEntry> {
        let parsed = &tx.parsed;
        let target_account = classified_account.unwrap_or(&self.config.unclassified_account_code);

        let lines = if parsed.service_fee {
            vec![
                JournalEntryLine::debit(1, &self.config.bank_charges_account_code, account_name, parsed.amount),
                JournalEntryLine::credit(2, &self.config.bank_account_code, account_name, parsed.amount),
            ]
        } else {
            match parsed.kind {
                // Money in: debit the bank account, credit the classified account.
                TransactionKind::Credit => vec![
                    JournalEntryLine::debit(1, &self.config.bank_account_code, account_name, parsed.amount),
                    JournalEntryLine::credit(2, target_account, account_name, parsed.amount),
                ],
                // Money out: debit the classified account, credit the bank account.
                TransactionKind::Debit => vec![
                    JournalEntryLine::debit(1, target_account, account_name, parsed.amount),
                    JournalEntryLine::credit(2, &self.config.bank_account_code, account_name, parsed.amount),
                ],
            }
        };

        let entry = UnpostedEntry {
            date: parsed.date,
            reference: tx.reference(),
            description: account_name.to_string(),
            created_by: created_by.to_string(),
            lines,
        };
        validate_lines(&entry.lines)?;
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fin_core::{BankTransactionId, CompanyId, FiscalPeriodId, Money};
    use fin_parser::ParsedTransaction;

    fn config() -> PostingConfig {
        PostingConfig {
            bank_account_code: "1100".to_string(),
            bank_charges_account_code: "5200".to_string(),
            unclassified_account_code: "9999".to_string(),
        }
    }

    fn bank_tx(id: u64, kind: TransactionKind, amount: Money, service_fee: bool) -> BankTransaction {
        BankTransaction::new(
            BankTransactionId(id),
            CompanyId::new("acme"),
            FiscalPeriodId::new("2025-01"),
            ParsedTransaction {
                kind,
                description: "PAYMENT TO SUPPLIER ALPHA LTD".to_string(),
                amount,
                date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
                reference: "PAYMENT TO SUPPLIER ALPHA LTD".to_string(),
                balance: None,
                service_fee,
            },
        )
    }

    #[test]
    fn money_in_debits_bank_and_credits_classified_account() {
        let cfg = config();
        let service = PostingService::new(&cfg);
        let tx = bank_tx(1, TransactionKind::Credit, Money::from_cents(100_000), false);
        let entry = service.build_entry(&tx, Some("4000"), "Sales", "system").unwrap();
        assert_eq!(entry.lines[0].account_code, "1100");
        assert_eq!(entry.lines[0].debit, Money::from_cents(100_000));
        assert_eq!(entry.lines[1].account_code, "4000");
        assert_eq!(entry.lines[1].credit, Money::from_cents(100_000));
    }

    #[test]
    fn money_out_debits_classified_account_and_credits_bank() {
        let cfg = config();
        let service = PostingService::new(&cfg);
        let tx = bank_tx(2, TransactionKind::Debit, Money::from_cents(50_000), false);
        let entry = service.build_entry(&tx, Some("5100"), "Rent", "system").unwrap();
        assert_eq!(entry.lines[0].account_code, "5100");
        assert_eq!(entry.lines[1].account_code, "1100");
    }

    #[test]
    fn service_fee_marker_ignores_classification() {
        let cfg = config();
        let service = PostingService::new(&cfg);
        let tx = bank_tx(3, TransactionKind::Debit, Money::from_cents(2_500), true);
        let entry = service.build_entry(&tx, Some("5100"), "Bank charges", "system").unwrap();
        assert_eq!(entry.lines[0].account_code, "5200");
        assert_eq!(entry.lines[1].account_code, "1100");
    }

    #[test]
    fn unclassified_falls_back_to_clearing_account() {
        let cfg = config();
        let service = PostingService::new(&cfg);
        let tx = bank_tx(4, TransactionKind::Debit, Money::from_cents(10_00), false);
        let entry = service.build_entry(&tx, None, "Unclassified", "system").unwrap();
        assert_eq!(entry.lines[0].account_code, "9999");
    }

    #[test]
    fn reference_is_a_deterministic_function_of_the_bank_transaction_id() {
        let cfg = config();
        let service = PostingService::new(&cfg);
        let tx = bank_tx(42, TransactionKind::Credit, Money::from_cents(1_00), false);
        let entry = service.build_entry(&tx, Some("4000"), "Sales", "system").unwrap();
        assert_eq!(entry.reference, "BTX-0000000042");
    }
}
