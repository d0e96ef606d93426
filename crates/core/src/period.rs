//! Billing period bounds and company filtering for range queries.

use std::str::FromStr;

use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::error::CoreError;
use crate::hierarchy::CompanyRef;
use crate::types::{DbId, Timestamp};

/// An inclusive calendar-date range. `from` is interpreted as that day's
/// start of day, `to` as that day's end of day (both UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingPeriod {
    from: NaiveDate,
    to: NaiveDate,
}

impl BillingPeriod {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, CoreError> {
        if from > to {
            return Err(CoreError::InvalidRange(format!(
                "'from' date {from} is after 'to' date {to}"
            )));
        }
        Ok(Self { from, to })
    }

    /// Parse ISO-8601 calendar dates. Malformed input is rejected before
    /// any processing happens.
    pub fn parse(from: &str, to: &str) -> Result<Self, CoreError> {
        let from = parse_date(from)?;
        let to = parse_date(to)?;
        Self::new(from, to)
    }

    /// Start of the `from` day, UTC.
    pub fn start(&self) -> Timestamp {
        Utc.from_utc_datetime(&self.from.and_hms_opt(0, 0, 0).unwrap_or_default())
    }

    /// Start of the day *after* `to`, UTC. Using an exclusive upper bound
    /// keeps the `to` day fully inclusive without sub-second edge cases.
    pub fn end_exclusive(&self) -> Timestamp {
        let next = self.to.succ_opt().unwrap_or(self.to);
        Utc.from_utc_datetime(&next.and_hms_opt(0, 0, 0).unwrap_or_default())
    }

    /// Whether a timestamp falls inside the period (both days inclusive).
    pub fn contains(&self, ts: Timestamp) -> bool {
        ts >= self.start() && ts < self.end_exclusive()
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::from_str(raw)
        .map_err(|_| CoreError::InvalidRange(format!("'{raw}' is not a valid ISO date")))
}

/// Company filter accepted by the billing query: either the numeric
/// database id or the opaque external identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyFilter {
    Id(DbId),
    External(Uuid),
}

impl CompanyFilter {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if let Ok(id) = raw.parse::<DbId>() {
            return Ok(CompanyFilter::Id(id));
        }
        if let Ok(uuid) = Uuid::from_str(raw) {
            return Ok(CompanyFilter::External(uuid));
        }
        Err(CoreError::InvalidRange(format!(
            "'{raw}' is neither a company id nor an external identifier"
        )))
    }

    pub fn matches(&self, company: &CompanyRef) -> bool {
        match self {
            CompanyFilter::Id(id) => company.id == *id,
            CompanyFilter::External(uuid) => company.external_id == *uuid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::test_support::company;
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    #[test]
    fn parses_iso_dates() {
        let p = BillingPeriod::parse("2025-02-01", "2025-02-28").unwrap();
        assert_eq!(p.start(), Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap());
        assert_eq!(
            p.end_exclusive(),
            Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn rejects_malformed_dates() {
        assert_matches!(
            BillingPeriod::parse("2025-13-01", "2025-02-28"),
            Err(CoreError::InvalidRange(_))
        );
        assert_matches!(
            BillingPeriod::parse("2025-02-01", "not-a-date"),
            Err(CoreError::InvalidRange(_))
        );
    }

    #[test]
    fn rejects_inverted_range() {
        assert_matches!(
            BillingPeriod::parse("2025-03-01", "2025-02-01"),
            Err(CoreError::InvalidRange(_))
        );
    }

    #[test]
    fn bounds_are_inclusive_of_both_days() {
        let p = BillingPeriod::parse("2025-02-01", "2025-02-28").unwrap();
        assert!(p.contains(Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap()));
        assert!(p.contains(Utc.with_ymd_and_hms(2025, 2, 28, 23, 59, 59).unwrap()));
        assert!(!p.contains(Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 59).unwrap()));
        assert!(!p.contains(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn single_day_period() {
        let p = BillingPeriod::parse("2025-02-15", "2025-02-15").unwrap();
        assert!(p.contains(Utc.with_ymd_and_hms(2025, 2, 15, 12, 0, 0).unwrap()));
        assert!(!p.contains(Utc.with_ymd_and_hms(2025, 2, 16, 0, 0, 0).unwrap()));
    }

    #[test]
    fn filter_parses_numeric_id_first() {
        assert_eq!(CompanyFilter::parse("42").unwrap(), CompanyFilter::Id(42));
    }

    #[test]
    fn filter_parses_external_uuid() {
        let uuid = "00000000-0000-0000-0000-000000000007";
        assert_eq!(
            CompanyFilter::parse(uuid).unwrap(),
            CompanyFilter::External(Uuid::from_u128(7))
        );
    }

    #[test]
    fn filter_rejects_garbage() {
        assert_matches!(
            CompanyFilter::parse("acme"),
            Err(CoreError::InvalidRange(_))
        );
    }

    #[test]
    fn filter_matches_by_id_or_external_id() {
        let c = company(5, "Acme", 12.5);
        assert!(CompanyFilter::Id(5).matches(&c));
        assert!(!CompanyFilter::Id(6).matches(&c));
        assert!(CompanyFilter::External(Uuid::from_u128(5)).matches(&c));
        assert!(!CompanyFilter::External(Uuid::from_u128(9)).matches(&c));
    }
}
