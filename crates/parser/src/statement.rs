use chrono::NaiveDate;
use fin_core::{FinError, FinResult, Money};

use crate::amount::extract_amount;
use crate::columns::ColumnSpec;
use crate::skip::should_skip;
use crate::year::{looks_like_date, resolve_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Debit,
    Credit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTransaction {
    pub kind: TransactionKind,
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub reference: String,
    pub balance: Option<Money>,
    pub service_fee: bool,
}

fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A line that carries both a resolvable date and an amount starts a new
/// transaction (the "head" line). Lines that carry neither are folded into
/// the running description of the most recently opened transaction — this
/// is how a supplier invoice number printed on its own line below the
/// payment line ends up joined onto that payment's description. The parser
/// holds exactly one transaction open at a time, which is why there are
/// only two states: nothing open yet (`Idle`) or one open (`HoldingHead`).
enum State {
    Idle,
    HoldingHead(ParsedTransaction),
}

/// Synchronous, strictly-ordered iterator over a fixed-column bank
/// statement. Consumes the whole file contents up front (no streaming) and
/// calibrates column geometry against the first header line it finds.
pub struct StatementParser<'a> {
    lines: std::str::Lines<'a>,
    columns: ColumnSpec,
    calibrated: bool,
    reference_date: NaiveDate,
    state: State,
    exhausted: bool,
}

impl<'a> StatementParser<'a> {
    pub fn new(text: &'a str, reference_date: NaiveDate) -> Self {
        StatementParser {
            lines: text.lines(),
            columns: ColumnSpec::default(),
            calibrated: false,
            reference_date,
            state: State::Idle,
            exhausted: false,
        }
    }

    pub fn with_columns(mut self, columns: ColumnSpec) -> Self {
        self.columns = columns;
        self.calibrated = true;
        self
    }

    fn take_amount(&self, line: &str) -> Option<(TransactionKind, Money)> {
        if let Some(amount) = extract_amount(self.columns.debit_of(line)) {
            return Some((TransactionKind::Debit, amount));
        }
        extract_amount(self.columns.credit_of(line)).map(|amount| (TransactionKind::Credit, amount))
    }

    fn open_head(&self, line: &str, date: NaiveDate, kind: TransactionKind, amount: Money) -> ParsedTransaction {
        let description = normalize(self.columns.details_of(line));
        let balance = extract_amount(self.columns.balance_of(line));
        let service_fee = self.columns.fee_marker_of(line).contains("##");
        ParsedTransaction {
            kind,
            reference: description.clone(),
            description,
            amount,
            date,
            balance,
            service_fee,
        }
    }
}

impl<'a> Iterator for StatementParser<'a> {
    type Item = FinResult<ParsedTransaction>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(line) = self.lines.next() else {
                self.exhausted = true;
                return match std::mem::replace(&mut self.state, State::Idle) {
                    State::HoldingHead(transaction) => Some(Ok(transaction)),
                    State::Idle => None,
                };
            };

            if self.exhausted {
                return None;
            }

            if !self.calibrated && line.to_uppercase().contains("DATE") {
                self.columns = self.columns.calibrate(line);
                self.calibrated = true;
                continue;
            }

            if should_skip(line) {
                continue;
            }

            let date_column = self.columns.date_of(line);
            let date = resolve_date(date_column, self.reference_date);
            let amount = self.take_amount(line);

            match (date, amount) {
                (Some(date), Some((kind, value))) => {
                    let opened = self.open_head(line, date, kind, value);
                    let finished = std::mem::replace(&mut self.state, State::HoldingHead(opened));
                    if let State::HoldingHead(transaction) = finished {
                        return Some(Ok(transaction));
                    }
                }
                (Some(_), None) => {
                    return Some(Err(FinError::ParseNoAmount(line.to_string())));
                }
                (None, Some(_)) if looks_like_date(date_column) => {
                    return Some(Err(FinError::ParseMalformedDate(line.to_string())));
                }
                _ => {
                    if let State::HoldingHead(transaction) = &mut self.state {
                        let extra = normalize(self.columns.details_of(line));
                        if !extra.is_empty() {
                            transaction.description.push(' ');
                            transaction.description.push_str(&extra);
                            transaction.reference = transaction.description.clone();
                        }
                    }
                }
            }
        }
    }
}
