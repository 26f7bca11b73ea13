//! Raw values of the `date`, `dateTime` and `instant` primitives.
//!
//! FHIR temporal values may be partial (`2024`, `2024-03`) and keep the
//! precision they were written with. Each value remembers its literal text,
//! which is also what equality, hashing and `Display` use, so `2024-03-01T10:00:00Z`
//! and `2024-03-01T11:00:00+01:00` are different values that compare as the
//! same moment through [`PrecisionDateTime::compare`].

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use chrono::{
    DateTime as ChronoDateTime, Datelike, NaiveDate, NaiveTime, SecondsFormat, TimeDelta, Timelike,
    Utc,
};
use thiserror::Error;

/// A malformed date, dateTime or instant literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} value: '{value}'")]
pub struct ParseDateTimeError {
    kind: &'static str,
    value: String,
}

impl ParseDateTimeError {
    /// `date`, `dateTime` or `instant`.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DatePrecision {
    Year,
    YearMonth,
    Day,
}

/// How much of a dateTime was written, from `YYYY` to fractional seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DateTimePrecision {
    Year,
    YearMonth,
    Day,
    Minute,
    Second,
    Millisecond,
}

/// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
///
/// ```rust
/// use atrius_fhir_model::date_time::{DatePrecision, PrecisionDate};
///
/// let date: PrecisionDate = "2023-03".parse().unwrap();
/// assert_eq!(date.precision(), DatePrecision::YearMonth);
/// assert_eq!(date.to_string(), "2023-03");
/// assert!("2023-02-30".parse::<PrecisionDate>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecisionDate {
    year: i32,
    month: Option<u32>,
    day: Option<u32>,
    text: Arc<str>,
}

/// Fixed-width run of ASCII digits.
fn digits(text: &str, width: usize) -> Option<u32> {
    if text.len() != width || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Compares component lists left to right. Once one side runs out of
/// components before a difference is found the order is unknown.
fn compare_components(lhs: &[Option<u32>], rhs: &[Option<u32>]) -> Option<Ordering> {
    for (a, b) in lhs.iter().zip(rhs) {
        match (a, b) {
            (Some(a), Some(b)) if a != b => return Some(a.cmp(b)),
            (Some(_), Some(_)) => {}
            (None, None) => return Some(Ordering::Equal),
            _ => return None,
        }
    }
    Some(Ordering::Equal)
}

impl PrecisionDate {
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.splitn(3, '-');
        let year = digits(parts.next()?, 4)? as i32;
        let month = match parts.next() {
            Some(m) => Some(digits(m, 2)?),
            None => None,
        };
        let day = match parts.next() {
            Some(d) => Some(digits(d, 2)?),
            None => None,
        };

        match (month, day) {
            (Some(month), Some(day)) => {
                NaiveDate::from_ymd_opt(year, month, day)?;
            }
            (Some(month), None) if !(1..=12).contains(&month) => return None,
            _ => {}
        }
        Some(Self {
            year,
            month,
            day,
            text: Arc::from(text),
        })
    }

    pub fn precision(&self) -> DatePrecision {
        match (self.month, self.day) {
            (None, _) => DatePrecision::Year,
            (Some(_), None) => DatePrecision::YearMonth,
            (Some(_), Some(_)) => DatePrecision::Day,
        }
    }

    pub fn original_string(&self) -> &str {
        &self.text
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn day(&self) -> Option<u32> {
        self.day
    }

    /// `None` when the two values differ only below the coarser precision
    /// (`2024` against `2024-03`).
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match self.year.cmp(&other.year) {
            Ordering::Equal => compare_components(&[self.month, self.day], &[other.month, other.day]),
            unequal => Some(unequal),
        }
    }

    fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month.unwrap_or(1), self.day.unwrap_or(1))
    }
}

/// Time of day of a dateTime: `hh:mm`, `hh:mm:ss` or `hh:mm:ss.fff...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimeOfDay {
    time: NaiveTime,
    precision: DateTimePrecision,
}

impl TimeOfDay {
    fn parse(text: &str) -> Option<Self> {
        let mut parts = text.splitn(3, ':');
        let hour = digits(parts.next()?, 2)?;
        let minute = digits(parts.next()?, 2)?;
        let (second, nanos, precision) = match parts.next() {
            None => (0, 0, DateTimePrecision::Minute),
            Some(seconds) => match seconds.split_once('.') {
                None => (digits(seconds, 2)?, 0, DateTimePrecision::Second),
                Some((whole, fraction)) => {
                    if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
                        return None;
                    }
                    let nanos = format!("{:0<9}", &fraction[..fraction.len().min(9)]).parse().ok()?;
                    (digits(whole, 2)?, nanos, DateTimePrecision::Millisecond)
                }
            },
        };
        let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)?;
        Some(Self { time, precision })
    }
}

/// Offset in minutes from `Z`, `+hh:mm` or `-hh:mm`.
fn parse_offset(text: &str) -> Option<i32> {
    if text == "Z" {
        return Some(0);
    }
    let sign = match text.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let (hours, minutes) = text[1..].split_once(':')?;
    let (hours, minutes) = (digits(hours, 2)? as i32, digits(minutes, 2)? as i32);
    if hours > 14 || minutes > 59 {
        return None;
    }
    Some(sign * (hours * 60 + minutes))
}

/// A partial date, or a full date with a time of day and usually a zone offset.
///
/// ```rust
/// use atrius_fhir_model::date_time::{DateTimePrecision, PrecisionDateTime};
///
/// let at = PrecisionDateTime::parse("2023-03-15T14:30:45.123Z").unwrap();
/// assert_eq!(at.precision(), DateTimePrecision::Millisecond);
/// assert_eq!(at.timezone_offset(), Some(0));
///
/// let month = PrecisionDateTime::parse("2023-03").unwrap();
/// assert_eq!(month.precision(), DateTimePrecision::YearMonth);
/// assert_eq!(at.compare(&month), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecisionDateTime {
    date: PrecisionDate,
    time: Option<TimeOfDay>,
    offset_minutes: Option<i32>,
    text: Arc<str>,
}

impl PrecisionDateTime {
    pub fn parse(text: &str) -> Option<Self> {
        let Some((date, rest)) = text.split_once('T') else {
            return PrecisionDate::parse(text).map(Self::from_date);
        };
        let date = PrecisionDate::parse(date)?;
        if date.precision() != DatePrecision::Day {
            return None;
        }
        let zone_at = rest.find(['Z', '+', '-']).unwrap_or(rest.len());
        let (time, zone) = rest.split_at(zone_at);
        let offset_minutes = if zone.is_empty() { None } else { Some(parse_offset(zone)?) };

        Some(Self {
            date,
            time: Some(TimeOfDay::parse(time)?),
            offset_minutes,
            text: Arc::from(text),
        })
    }

    pub fn from_date(date: PrecisionDate) -> Self {
        Self {
            text: date.text.clone(),
            date,
            time: None,
            offset_minutes: None,
        }
    }

    /// A seconds-precision value in UTC (`2024-01-01T09:00:00Z`).
    pub fn from_utc(value: ChronoDateTime<Utc>) -> Self {
        let (year, month, day) = (value.year(), value.month(), value.day());
        let date = PrecisionDate {
            year,
            month: Some(month),
            day: Some(day),
            text: Arc::from(format!("{year:04}-{month:02}-{day:02}")),
        };
        let time = value.time();
        Self {
            date,
            time: Some(TimeOfDay {
                time: time.with_nanosecond(0).unwrap_or(time),
                precision: DateTimePrecision::Second,
            }),
            offset_minutes: Some(0),
            text: Arc::from(value.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }

    pub fn precision(&self) -> DateTimePrecision {
        match self.time {
            Some(time) => time.precision,
            None => match self.date.precision() {
                DatePrecision::Year => DateTimePrecision::Year,
                DatePrecision::YearMonth => DateTimePrecision::YearMonth,
                DatePrecision::Day => DateTimePrecision::Day,
            },
        }
    }

    pub fn original_string(&self) -> &str {
        &self.text
    }

    pub fn date(&self) -> &PrecisionDate {
        &self.date
    }

    /// Minutes east of UTC; `None` when no zone was written.
    pub fn timezone_offset(&self) -> Option<i32> {
        self.offset_minutes
    }

    /// The earliest moment the value can denote, reading a missing zone as UTC.
    pub fn to_chrono_datetime(&self) -> Option<ChronoDateTime<Utc>> {
        let time = self.time.map_or(NaiveTime::MIN, |t| t.time);
        let local = self.date.first_day()?.and_time(time);
        let utc = local - TimeDelta::minutes(i64::from(self.offset_minutes.unwrap_or(0)));
        Some(utc.and_utc())
    }

    /// Orders two values as points in time. `None` when they are written to
    /// different precisions or only one of them carries a zone.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self.time, other.time) {
            (None, None) => self.date.compare(&other.date),
            (Some(lhs), Some(rhs)) => {
                if self.offset_minutes.is_some() != other.offset_minutes.is_some() {
                    return None;
                }
                let ordering = self.to_chrono_datetime()?.cmp(&other.to_chrono_datetime()?);
                if ordering == Ordering::Equal && lhs.precision != rhs.precision {
                    return None;
                }
                Some(ordering)
            }
            _ => None,
        }
    }
}

/// An instant: seconds precision or finer, always with a zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecisionInstant(PrecisionDateTime);

impl PrecisionInstant {
    pub fn parse(text: &str) -> Option<Self> {
        let value = PrecisionDateTime::parse(text)?;
        (value.precision() >= DateTimePrecision::Second && value.offset_minutes.is_some())
            .then_some(Self(value))
    }

    pub fn from_utc(value: ChronoDateTime<Utc>) -> Self {
        Self(PrecisionDateTime::from_utc(value))
    }

    pub fn original_string(&self) -> &str {
        self.0.original_string()
    }

    pub fn as_datetime(&self) -> &PrecisionDateTime {
        &self.0
    }

    pub fn to_chrono_datetime(&self) -> Option<ChronoDateTime<Utc>> {
        self.0.to_chrono_datetime()
    }

    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        self.0.compare(&other.0)
    }
}

// Equality is on the literal text, so hashing the text agrees with it.
macro_rules! literal_value {
    ($($ty:ty => $kind:literal;)*) => {
        $(
            impl Hash for $ty {
                fn hash<H: Hasher>(&self, state: &mut H) {
                    self.original_string().hash(state);
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.original_string())
                }
            }

            impl FromStr for $ty {
                type Err = ParseDateTimeError;

                fn from_str(text: &str) -> Result<Self, Self::Err> {
                    <$ty>::parse(text).ok_or_else(|| ParseDateTimeError {
                        kind: $kind,
                        value: text.to_string(),
                    })
                }
            }
        )*
    };
}

literal_value! {
    PrecisionDate => "date";
    PrecisionDateTime => "dateTime";
    PrecisionInstant => "instant";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_keep_their_precision() {
        assert_eq!(PrecisionDate::parse("2021").unwrap().precision(), DatePrecision::Year);
        assert_eq!(PrecisionDate::parse("2021-07-04").unwrap().day(), Some(4));
        assert!(PrecisionDate::parse("2021-13").is_none());
        assert!(PrecisionDate::parse("21-02-03").is_none());
        assert!(PrecisionDate::parse("2021-7").is_none());
    }

    #[test]
    fn month_and_day_segments_are_optional_but_strict() {
        let month = PrecisionDate::parse("2021-07").unwrap();
        assert_eq!((month.month(), month.day()), (Some(7), None));
        assert_eq!(month.precision(), DatePrecision::YearMonth);
        for text in ["2021-07-4", "2021-07-x4", "2021-07-04-", "2021-", "2021-02-30"] {
            assert!(PrecisionDate::parse(text).is_none(), "{text}");
        }
    }

    #[test]
    fn partial_dates_compare_only_when_determinate() {
        let march = PrecisionDate::parse("2024-03").unwrap();
        let april_1 = PrecisionDate::parse("2024-04-01").unwrap();
        let year = PrecisionDate::parse("2024").unwrap();
        assert_eq!(march.compare(&april_1), Some(Ordering::Less));
        assert_eq!(year.compare(&march), None);
        assert_eq!(year.compare(&PrecisionDate::parse("2023-12").unwrap()), Some(Ordering::Greater));
    }

    #[test]
    fn offsets_are_normalized_for_comparison() {
        let eastern = PrecisionDateTime::parse("2024-03-01T10:15:00-05:00").unwrap();
        assert_eq!(eastern.timezone_offset(), Some(-300));
        assert_eq!(eastern.precision(), DateTimePrecision::Second);

        let utc = PrecisionDateTime::parse("2024-03-01T15:15:00Z").unwrap();
        assert_eq!(eastern.compare(&utc), Some(Ordering::Equal));
        assert_ne!(eastern, utc);

        let floating = PrecisionDateTime::parse("2024-03-01T15:15:00").unwrap();
        assert_eq!(floating.compare(&utc), None);
    }

    #[test]
    fn rejects_malformed_times() {
        for text in ["2024-03-01T25:00:00Z", "2024-03-01T10", "2024-03T10:00:00Z", "2024-03-01T10:00:00+15:00"] {
            assert!(PrecisionDateTime::parse(text).is_none(), "{text}");
        }
        assert!(PrecisionDateTime::parse("2024-03-01T10:00:00.5+01:00").is_some());
    }

    #[test]
    fn instant_requires_seconds_and_zone() {
        assert!(PrecisionInstant::parse("2024-03-01T10:15:00Z").is_some());
        assert!(PrecisionInstant::parse("2024-03-01T10:15:00").is_none());
        assert!(PrecisionInstant::parse("2024-03-01").is_none());
        let err = "2024-03-01T10:15Z".parse::<PrecisionInstant>().unwrap_err();
        assert_eq!(err.kind(), "instant");
    }

    #[test]
    fn from_utc_round_trips_through_chrono() {
        let at = ChronoDateTime::parse_from_rfc3339("2024-05-06T07:08:09Z")
            .unwrap()
            .with_timezone(&Utc);
        let instant = PrecisionInstant::from_utc(at);
        assert_eq!(instant.original_string(), "2024-05-06T07:08:09Z");
        assert_eq!(instant.to_chrono_datetime(), Some(at));
        assert_eq!(instant, PrecisionInstant::parse("2024-05-06T07:08:09Z").unwrap());
    }
}
