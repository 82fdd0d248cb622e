//! Date formatting with strftime-style directives.
//!
//! Dates are naive, so `%z` and `%Z` expand to nothing. An unknown
//! directive is emitted without its `%`.

use std::fmt::Write as _;

use ul4_ir::Date;

use super::locale::{self, Locale};

/// Format `date` with `%` directives, using names from `lang`.
pub(crate) fn format_date(date: Date, format: &str, lang: Option<&str>) -> String {
    let locale = locale::resolve(lang);
    let mut out = String::with_capacity(format.len() * 2);
    write_date(&mut out, date, format, locale);
    out
}

/// Weekday with Sunday as 0.
fn sunday_weekday(date: Date) -> usize {
    (usize::from(date.weekday()) + 1) % 7
}

fn write_date(out: &mut String, date: Date, format: &str, locale: &Locale) {
    let month = usize::from(date.month()).saturating_sub(1);
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let Some(directive) = chars.next() else {
            out.push('%');
            break;
        };
        // Writing to a String cannot fail.
        let _ = match directive {
            'a' => write!(out, "{}", locale.short_weekdays[sunday_weekday(date)]),
            'A' => write!(out, "{}", locale.long_weekdays[sunday_weekday(date)]),
            'b' => write!(out, "{}", locale.short_months[month]),
            'B' => write!(out, "{}", locale.long_months[month]),
            'c' => {
                write_date(out, date, locale.datetime_format, locale);
                Ok(())
            }
            'x' => {
                write_date(out, date, locale.date_format, locale);
                Ok(())
            }
            'X' => {
                write_date(out, date, locale.time_format, locale);
                Ok(())
            }
            'd' => write!(out, "{:02}", date.day()),
            'f' => write!(out, "{:06}", date.microsecond()),
            'H' => write!(out, "{:02}", date.hour()),
            'I' => write!(out, "{:02}", (date.hour() + 11) % 12 + 1),
            'j' => write!(out, "{:03}", date.yearday()),
            'm' => write!(out, "{:02}", date.month()),
            'M' => write!(out, "{:02}", date.minute()),
            'p' => out.write_str(if date.hour() < 12 { "AM" } else { "PM" }),
            'S' => write!(out, "{:02}", date.second()),
            'U' => write!(out, "{:02}", date.week(6)),
            'w' => write!(out, "{}", sunday_weekday(date)),
            'W' => write!(out, "{:02}", date.week(0)),
            'y' => write!(out, "{:02}", date.year().rem_euclid(100)),
            'Y' => write!(out, "{}", date.year()),
            'z' | 'Z' => Ok(()),
            other => {
                out.push(other);
                Ok(())
            }
        };
    }
}
