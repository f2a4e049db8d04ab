use chrono::{DateTime, NaiveDate, Utc};

/// Clock abstracts access to the current timestamp so callers stay deterministic in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current UTC date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one date, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_its_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 25).unwrap();
        let clock = FixedClock(date);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.now().date_naive(), date);
    }
}
