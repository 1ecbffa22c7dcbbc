//! Human readable names for periods.

use time::{Date, Month};

use crate::aggregation::PeriodKey;

/// A label for the period, e.g. "14th March, 2021", "Week 10, 2021" or "March 2021".
///
/// Weeks use the ISO week number and ISO year of their Monday, so the week of Monday 28
/// December 2020 is "Week 53, 2020".
pub fn period_label(period_key: &PeriodKey) -> String {
    match period_key {
        PeriodKey::Day(date) => format!(
            "{}{} {}, {}",
            date.day(),
            ordinal_suffix(date.day()),
            date.month(),
            date.year()
        ),
        PeriodKey::Week(monday) => {
            let (iso_year, week_number, _) = monday.to_iso_week_date();
            format!("Week {week_number}, {iso_year}")
        }
        PeriodKey::Month(first_day) => format!("{} {}", first_day.month(), first_day.year()),
    }
}

/// A compact label for chart axes, e.g. "14 Mar", "W10" or "Mar 21".
pub fn short_period_label(period_key: &PeriodKey) -> String {
    match period_key {
        PeriodKey::Day(date) => format!("{} {}", date.day(), short_month(date)),
        PeriodKey::Week(monday) => format!("W{}", monday.iso_week()),
        PeriodKey::Month(first_day) => {
            format!("{} {:02}", short_month(first_day), first_day.year() % 100)
        }
    }
}

fn ordinal_suffix(day: u8) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn short_month(date: &Date) -> &'static str {
    match date.month() {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}
