use chrono::{Datelike, NaiveDate};

use crate::NhsError;

/// Split a `month/year` period label into its `(month, year)` parts.
///
/// Whitespace around either part is ignored. The month must be `1..=12`.
///
/// # Errors
/// Returns `Err(NhsError::Format)` if the separator is missing, either part
/// is not an integer, or the month is out of range.
pub fn parse_month_label(label: &str) -> Result<(u32, i32), NhsError> {
    let (month, year) = label
        .split_once('/')
        .ok_or_else(|| NhsError::format(label, "missing '/' separator"))?;
    let month: u32 = month
        .trim()
        .parse()
        .map_err(|_| NhsError::format(label, "month is not an integer"))?;
    let year: i32 = year
        .trim()
        .parse()
        .map_err(|_| NhsError::format(label, "year is not an integer"))?;
    // chrono rejects month 0, month 13+ and years it cannot represent
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| NhsError::format(label, "month or year out of range"))?;
    Ok((month, year))
}

/// Numeric position of a `month/year` label: `year + month / 12`.
///
/// # Errors
/// Same as [`parse_month_label`].
pub fn period_value(label: &str) -> Result<f64, NhsError> {
    let (month, year) = parse_month_label(label)?;
    Ok(f64::from(year) + f64::from(month) / 12.0)
}

/// Convert monthly period labels to a numeric timeline, preserving order.
///
/// ```
/// use howsmynhs_core::to_numeric_timeline;
///
/// let t = to_numeric_timeline(["6/2019", "12/2019", "1/2020"]).unwrap();
/// assert_eq!(t, vec![2019.5, 2020.0, 2020.0 + 1.0 / 12.0]);
/// ```
///
/// The output has one entry per label; downstream code pairs it with table
/// columns by index.
///
/// # Errors
/// Returns `Err(NhsError::Format)` for the first malformed label. No partial
/// timeline is produced.
pub fn to_numeric_timeline<I, S>(labels: I) -> Result<Vec<f64>, NhsError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    labels
        .into_iter()
        .map(|l| period_value(l.as_ref()))
        .collect()
}

/// Convert ISO `YYYY-MM-DD` labels of a daily table to a numeric timeline.
///
/// Each day maps to `year + (day_of_year - 1) / days_in_year`, so the first
/// of January is the integer year and a year spans exactly one unit.
///
/// # Errors
/// Returns `Err(NhsError::Format)` for the first label that is not a valid
/// calendar date.
pub fn to_daily_timeline<I, S>(labels: I) -> Result<Vec<f64>, NhsError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    labels
        .into_iter()
        .map(|l| {
            let label = l.as_ref();
            let date = NaiveDate::parse_from_str(label.trim(), "%Y-%m-%d")
                .map_err(|e| NhsError::format(label, e.to_string()))?;
            let days_in_year = if date.leap_year() { 366.0 } else { 365.0 };
            Ok(f64::from(date.year()) + f64::from(date.ordinal0()) / days_in_year)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_labels_abort_the_whole_conversion() {
        for bad in ["2020", "x/2020", "3/20x", "0/2020", "13/2020", ""] {
            let err = to_numeric_timeline(["1/2020", bad]).unwrap_err();
            match err {
                NhsError::Format { label, .. } => assert_eq!(label, bad),
                other => panic!("unexpected: {other:?}"),
            }
        }
    }

    #[test]
    fn december_and_next_january_are_one_month_apart() {
        let t = to_numeric_timeline(["12/2019", "1/2020"]).unwrap();
        assert!((t[1] - t[0] - 1.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn daily_timeline_starts_years_on_integers() {
        let t = to_daily_timeline(["2020-01-01", "2020-12-31", "2021-01-01"]).unwrap();
        assert_eq!(t[0], 2020.0);
        assert!(t[1] < 2021.0 && t[1] > 2020.99);
        assert_eq!(t[2], 2021.0);
        assert!(to_daily_timeline(["2020-02-30"]).is_err());
    }
}
