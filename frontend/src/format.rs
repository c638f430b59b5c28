use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt;

use crate::models::Expense;

const CURRENCY_SYMBOL: &str = "₹";

/// `title - ₹amount [date]`
pub fn expense_line<Tz: TimeZone>(expense: &Expense, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    format!(
        "{} - {}{} [{}]",
        expense.title,
        CURRENCY_SYMBOL,
        expense.amount,
        display_date(&expense.date, tz)
    )
}

pub fn expense_line_local(expense: &Expense) -> String {
    expense_line(expense, &Local)
}

/// Calendar date as `M/D/YYYY` in `tz`. Unparseable input is returned as is.
///
/// A bare `YYYY-MM-DD` is an instant at UTC midnight, so viewers west of
/// UTC see the previous day, as a browser's `Date` would show it.
pub fn display_date<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return instant.with_timezone(tz).format("%-m/%-d/%Y").to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format("%-m/%-d/%Y").to_string();
    }
    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
    {
        return Utc
            .from_utc_datetime(&midnight)
            .with_timezone(tz)
            .format("%-m/%-d/%Y")
            .to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use rstest::rstest;

    fn expense(title: &str, amount: &str, date: &str) -> Expense {
        Expense {
            id: None,
            title: title.to_string(),
            amount: amount.to_string(),
            date: date.to_string(),
            category_id: Some("c1".to_string()),
        }
    }

    #[test]
    fn renders_title_amount_and_date() {
        let line = expense_line(&expense("Lunch", "250", "2024-01-15T09:30:00.000Z"), &Utc);
        assert_eq!(line, "Lunch - ₹250 [1/15/2024]");
    }

    #[rstest]
    #[case("2024-01-31T20:00:00.000Z", 5 * 3600 + 1800, "2/1/2024")]
    #[case("2024-01-31T20:00:00.000Z", -5 * 3600, "1/31/2024")]
    #[case("2024-12-05", 0, "12/5/2024")]
    #[case("2024-12-05", -5 * 3600, "12/4/2024")]
    #[case("2024-12-05", 9 * 3600, "12/5/2024")]
    #[case("", 0, "")]
    #[case("last tuesday", 0, "last tuesday")]
    fn date_is_shown_in_the_viewer_timezone(
        #[case] raw: &str,
        #[case] offset_secs: i32,
        #[case] expected: &str,
    ) {
        let tz = FixedOffset::east_opt(offset_secs).unwrap();
        assert_eq!(display_date(raw, &tz), expected);
    }
}
