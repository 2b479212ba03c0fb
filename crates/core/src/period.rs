use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::{CompanyId, FiscalPeriodId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn start(self) -> NaiveDate {
        self.start
    }

    pub fn end(self) -> NaiveDate {
        self.end
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    fn overlaps(self, other: DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// A date window within which posting is permitted for a company.
/// Invariant: `start <= end`. Periods for a company never overlap — callers
/// adding a period to a company's set must go through
/// [`FiscalPeriodSet::add`] to have that invariant enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalPeriod {
    pub id: FiscalPeriodId,
    pub company_id: CompanyId,
    pub name: String,
    pub range: DateRange,
    pub closed: bool,
}

impl FiscalPeriod {
    pub fn new(
        id: FiscalPeriodId,
        company_id: CompanyId,
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, String> {
        if start > end {
            return Err(format!("period start {start} is after end {end}"));
        }
        Ok(FiscalPeriod {
            id,
            company_id,
            name: name.into(),
            range: DateRange::new(start, end),
            closed: false,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.range.contains(date)
    }
}

/// The set of fiscal periods belonging to one company; enforces the
/// non-overlap invariant at insertion time rather than at query time.
#[derive(Debug, Default)]
pub struct FiscalPeriodSet {
    periods: Vec<FiscalPeriod>,
}

impl FiscalPeriodSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, period: FiscalPeriod) -> Result<(), String> {
        if self
            .periods
            .iter()
            .any(|existing| existing.range.overlaps(period.range))
        {
            return Err(format!(
                "fiscal period '{}' overlaps an existing period for company {}",
                period.name, period.company_id
            ));
        }
        self.periods.push(period);
        Ok(())
    }

    pub fn get(&self, id: &FiscalPeriodId) -> Option<&FiscalPeriod> {
        self.periods.iter().find(|p| &p.id == id)
    }

    pub fn get_mut(&mut self, id: &FiscalPeriodId) -> Option<&mut FiscalPeriod> {
        self.periods.iter_mut().find(|p| &p.id == id)
    }

    pub fn all(&self) -> &[FiscalPeriod] {
        &self.periods
    }
}
