use crate::errors::StatementParseError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer};

/// Raw OFX date/time: `YYYYMMDD[HHMM[SS[.XXX]]][[offset:TZ]]`
#[derive(Debug, Clone)]
pub struct OfxDate(String);

impl<'de> Deserialize<'de> for OfxDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(OfxDate)
    }
}

impl From<&str> for OfxDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

fn field(clean: &str, range: std::ops::Range<usize>, raw: &str) -> Result<u32, StatementParseError> {
    clean
        .get(range)
        .filter(|s| s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| StatementParseError::OfxDateInvalidFormat(raw.to_string()))
}

/// The wall-clock time is kept as written; the timezone suffix is ignored.
impl TryFrom<OfxDate> for NaiveDateTime {
    type Error = StatementParseError;

    fn try_from(date: OfxDate) -> Result<Self, Self::Error> {
        let raw = date.0.as_str();
        let invalid = || StatementParseError::OfxDateInvalidFormat(raw.to_string());

        let clean = raw.split(&['[', '.'][..]).next().unwrap_or_default().trim();

        if !matches!(clean.len(), 8 | 12 | 14) {
            return Err(invalid());
        }

        let year = field(clean, 0..4, raw)? as i32;
        let month = field(clean, 4..6, raw)?;
        let day = field(clean, 6..8, raw)?;
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;

        let (hour, minute, second) = match clean.len() {
            8 => (0, 0, 0),
            12 => (field(clean, 8..10, raw)?, field(clean, 10..12, raw)?, 0),
            _ => (
                field(clean, 8..10, raw)?,
                field(clean, 10..12, raw)?,
                field(clean, 12..14, raw)?,
            ),
        };
        let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(invalid)?;

        Ok(date.and_time(time))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, ss)
            .unwrap()
    }

    #[rstest]
    #[case("20251226120000[0:GMT]", at(2025, 12, 26, 12, 0, 0))]
    #[case("20251224000000.000", at(2025, 12, 24, 0, 0, 0))]
    #[case("20251225", at(2025, 12, 25, 0, 0, 0))]
    #[case("202512251530", at(2025, 12, 25, 15, 30, 0))]
    #[case("20251231235959", at(2025, 12, 31, 23, 59, 59))]
    #[case("20230501093000.000[-5:EST]", at(2023, 5, 1, 9, 30, 0))]
    #[case("20251226[0:GMT]", at(2025, 12, 26, 0, 0, 0))]
    #[case(" 20250228 ", at(2025, 2, 28, 0, 0, 0))]
    fn test_parse_ofx_datetime(#[case] date_str: &str, #[case] expected: NaiveDateTime) {
        let date: OfxDate = date_str.into();
        let parsed: NaiveDateTime = date.try_into().unwrap();
        assert_eq!(parsed, expected);
    }

    #[rstest]
    #[case("short")]
    #[case("1234567")]
    #[case("")]
    #[case("20251301")] // month 13
    #[case("20250229")] // 2025 is not a leap year
    #[case("20250132")]
    #[case("abcd1226")]
    #[case("2025122612")] // hour without minutes
    #[case("20251226250000")]
    #[case("2025+226")]
    fn test_parse_ofx_date_invalid(#[case] date_str: &str) {
        let date: OfxDate = date_str.into();
        let result: Result<NaiveDateTime, _> = date.try_into();
        assert!(matches!(
            result.unwrap_err(),
            StatementParseError::OfxDateInvalidFormat(ref raw) if raw == date_str
        ));
    }
}
