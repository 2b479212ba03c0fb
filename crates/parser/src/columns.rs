use std::ops::Range;

/// Byte-column geometry for the tabular bank statement format. Offsets are
/// character offsets from line start; a per-file calibration step may shift
/// them all by a small delta (headers drift a column or two between
/// statement exports from the same bank).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub details: Range<usize>,
    pub fee_marker: Range<usize>,
    pub debit: Range<usize>,
    pub credit: Range<usize>,
    pub date: Range<usize>,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        ColumnSpec {
            details: 0..78,
            fee_marker: 50..78,
            debit: 78..100,
            credit: 99..110,
            date: 110..120,
        }
    }
}

impl ColumnSpec {
    /// Shifts every column boundary by `delta` characters (may be
    /// negative). Used after calibration detects the header drifted.
    pub fn shifted(self, delta: i32) -> Self {
        let shift = |r: Range<usize>| -> Range<usize> {
            let start = (r.start as i64 + delta as i64).max(0) as usize;
            let end = (r.end as i64 + delta as i64).max(start as i64) as usize;
            start..end
        };
        ColumnSpec {
            details: shift(self.details),
            fee_marker: shift(self.fee_marker),
            debit: shift(self.debit),
            credit: shift(self.credit),
            date: shift(self.date),
        }
    }

    /// Extracts the `balance` column: everything after the date column.
    pub fn balance_start(&self) -> usize {
        self.date.end
    }

    fn slice<'a>(line: &'a str, range: &Range<usize>) -> &'a str {
        let bytes = line.as_bytes();
        let len = bytes.len();
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start >= end {
            return "";
        }
        // Lines are ASCII-ish fixed-width bank statement text; fall back to
        // the whole remainder if a char boundary is crossed rather than
        // panicking on a multi-byte character split.
        line.get(start..end).unwrap_or("")
    }

    pub fn details_of<'a>(&self, line: &'a str) -> &'a str {
        Self::slice(line, &self.details)
    }

    pub fn fee_marker_of<'a>(&self, line: &'a str) -> &'a str {
        Self::slice(line, &self.fee_marker)
    }

    pub fn debit_of<'a>(&self, line: &'a str) -> &'a str {
        Self::slice(line, &self.debit)
    }

    pub fn credit_of<'a>(&self, line: &'a str) -> &'a str {
        Self::slice(line, &self.credit)
    }

    pub fn date_of<'a>(&self, line: &'a str) -> &'a str {
        Self::slice(line, &self.date)
    }

    pub fn balance_of<'a>(&self, line: &'a str) -> &'a str {
        let start = self.balance_start().min(line.len());
        line.get(start..).unwrap_or("")
    }

    /// Calibrates against a header line by locating the literal "DATE"
    /// column heading and shifting the whole geometry to match.
    pub fn calibrate(self, header_line: &str) -> Self {
        let upper = header_line.to_uppercase();
        match upper.find("DATE") {
            Some(found) => {
                let delta = found as i32 - self.date.start as i32;
                if delta.abs() <= 6 {
                    self.shifted(delta)
                } else {
                    self
                }
            }
            None => self,
        }
    }
}
