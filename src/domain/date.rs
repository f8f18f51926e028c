use chrono::{Local, NaiveDate};

/// The `chrono` format of dates written in notes (`dd/mm/yyyy`).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Formats a date the way notes write it.
///
/// ```
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// assert_eq!(prontuario::format_date(date), "05/03/2024");
/// ```
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's date in the local timezone, formatted with [`format_date`].
#[must_use]
pub fn today() -> String {
    format_date(Local::now().date_naive())
}
