//! Wall-clock source for date-dependent extraction.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

/// Where "now" comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    /// The system clock in local time.
    #[default]
    System,
    /// A pinned instant.
    Fixed(DateTime<Local>),
}

impl Clock {
    /// Current local time.
    pub fn now(&self) -> DateTime<Local> {
        match self {
            Self::System => Local::now(),
            Self::Fixed(at) => *at,
        }
    }

    /// Current time in UTC.
    pub fn now_utc(&self) -> DateTime<Utc> {
        self.now().with_timezone(&Utc)
    }

    /// Current local calendar day.
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Local midnight starting `date`, as UTC.
///
/// Takes the earlier instant when midnight is ambiguous. Returns `None`
/// when local midnight does not exist on that day.
pub fn local_midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    let local = Local.from_local_datetime(&midnight).earliest()?;
    Some(local.with_timezone(&Utc))
}
