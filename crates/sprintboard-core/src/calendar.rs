//! Week windowing and calendar-day keys.
//!
//! Days are timezone-free [`NaiveDate`]s, so an ISO string such as
//! `2024-03-15` always lands on the 15th regardless of the host offset.
//! The zone only matters for "today" and for the `utc` keying mode.

use chrono::{
  Datelike,
  Duration,
  Local,
  NaiveDate,
  NaiveDateTime,
  NaiveTime,
  TimeZone,
  Utc,
  Weekday
};
use chrono_tz::Tz;
use serde::{
  Deserialize,
  Serialize
};

pub const WEEK_LEN: usize = 7;
pub const WEEK_START: Weekday =
  Weekday::Sun;
pub const ISO_DATE_FORMAT: &str =
  "%Y-%m-%d";

/// Calendar zone used to decide what
/// "today" is.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default,
)]
pub enum Zone {
  #[default]
  System,
  Named(Tz)
}

impl Zone {
  /// Accepts an IANA name, or `local`
  /// / `system` / empty for the host
  /// zone.
  pub fn parse(raw: &str) -> Option<Self> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
      || trimmed.eq_ignore_ascii_case("local")
      || trimmed
        .eq_ignore_ascii_case("system")
    {
      return Some(Self::System);
    }
    trimmed.parse::<Tz>().ok().map(Self::Named)
  }

  pub fn name(self) -> String {
    match self {
      | Self::System => "local".to_string(),
      | Self::Named(tz) => tz.name().to_string()
    }
  }

  pub fn today(self) -> NaiveDate {
    match self {
      | Self::System => Local::now().date_naive(),
      | Self::Named(tz) => {
        Utc::now().with_timezone(&tz).date_naive()
      }
    }
  }

  /// UTC date of `date`'s local midnight
  /// in this zone.
  pub fn midnight_utc_date(
    self,
    date: NaiveDate
  ) -> NaiveDate {
    match self {
      | Self::System => {
        midnight_utc_date_in(&Local, date)
      }
      | Self::Named(tz) => {
        midnight_utc_date_in(&tz, date)
      }
    }
  }
}

/// How a calendar cell's date becomes the
/// string compared with `due_date`.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DateKeying {
  #[default]
  Local,
  /// Serialise local midnight through
  /// UTC. East of UTC this names the
  /// previous day.
  Utc
}

impl DateKeying {
  pub fn as_key(self) -> &'static str {
    match self {
      | Self::Local => "local",
      | Self::Utc => "utc"
    }
  }

  pub fn from_key(
    key: &str
  ) -> Option<Self> {
    match key.trim().to_ascii_lowercase().as_str()
    {
      | "local" => Some(Self::Local),
      | "utc" => Some(Self::Utc),
      | _ => None
    }
  }

  pub fn key(
    self,
    date: NaiveDate,
    zone: Zone
  ) -> String {
    match self {
      | Self::Local => iso_date(date),
      | Self::Utc => {
        iso_date(zone.midnight_utc_date(date))
      }
    }
  }
}

/// Seven consecutive days, Sunday first,
/// containing the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
  reference: NaiveDate
}

impl WeekWindow {
  pub fn new(reference: NaiveDate) -> Self {
    Self { reference }
  }

  pub fn reference(&self) -> NaiveDate {
    self.reference
  }

  pub fn start(&self) -> NaiveDate {
    start_of_week(self.reference, WEEK_START)
  }

  pub fn end(&self) -> NaiveDate {
    add_days(self.start(), WEEK_LEN as i64 - 1)
  }

  pub fn dates(&self) -> [NaiveDate; WEEK_LEN] {
    let start = self.start();
    std::array::from_fn(|offset| {
      add_days(start, offset as i64)
    })
  }

  /// Moves the reference by whole weeks.
  #[must_use]
  pub fn shift(self, weeks: i64) -> Self {
    Self::new(add_days(
      self.reference,
      weeks * WEEK_LEN as i64
    ))
  }

  #[must_use]
  pub fn next(self) -> Self {
    self.shift(1)
  }

  #[must_use]
  pub fn previous(self) -> Self {
    self.shift(-1)
  }

  pub fn contains(
    &self,
    date: NaiveDate
  ) -> bool {
    date >= self.start() && date <= self.end()
  }

  /// Month and year of the first day,
  /// e.g. `March 2024`.
  pub fn title(&self) -> String {
    self.start().format("%B %Y").to_string()
  }
}

pub fn add_days(
  date: NaiveDate,
  days: i64
) -> NaiveDate {
  date
    .checked_add_signed(Duration::days(days))
    .unwrap_or(date)
}

pub fn start_of_week(
  day: NaiveDate,
  week_start: Weekday
) -> NaiveDate {
  let day_idx = day
    .weekday()
    .num_days_from_monday()
    as i64;
  let start_idx = week_start
    .num_days_from_monday()
    as i64;
  let diff = (7 + day_idx - start_idx) % 7;
  add_days(day, -diff)
}

pub fn iso_date(date: NaiveDate) -> String {
  date.format(ISO_DATE_FORMAT).to_string()
}

pub fn parse_iso_date(
  raw: &str
) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(
    raw.trim(),
    ISO_DATE_FORMAT
  )
  .ok()
}

/// Short label for a due date, e.g.
/// `Fri, Mar 15`. Unparseable input is
/// returned unchanged.
pub fn format_due_label(raw: &str) -> String {
  match parse_iso_date(raw) {
    | Some(date) => {
      date.format("%a, %b %-d").to_string()
    }
    | None => raw.to_string()
  }
}

pub fn midnight_utc_date_in<Z: TimeZone>(
  zone: &Z,
  date: NaiveDate
) -> NaiveDate {
  let midnight =
    NaiveDateTime::new(date, NaiveTime::MIN);
  // Midnight can fall into a DST gap;
  // browsers resolve that to 01:00.
  zone
    .from_local_datetime(&midnight)
    .earliest()
    .or_else(|| {
      zone
        .from_local_datetime(
          &(midnight + Duration::hours(1))
        )
        .earliest()
    })
    .map(|local| {
      local.with_timezone(&Utc).date_naive()
    })
    .unwrap_or(date)
}
