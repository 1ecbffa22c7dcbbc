//! Granularities and the keys that identify a single day, week or month.

use std::fmt::Display;

use serde::{Deserialize, Serialize, Serializer};
use time::{Date, Duration};

/// How finely spending is grouped into periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One period per calendar day.
    #[serde(alias = "Daily")]
    Daily,
    /// One period per week, keyed by its Monday. See [PeriodKey::new].
    #[default]
    #[serde(alias = "Weekly")]
    Weekly,
    /// One period per calendar month.
    #[serde(alias = "Monthly")]
    Monthly,
}

impl Granularity {
    /// Every granularity, from finest to coarsest.
    pub const ALL: [Granularity; 3] = [
        Granularity::Daily,
        Granularity::Weekly,
        Granularity::Monthly,
    ];

    /// The value used for this granularity in URL query strings.
    pub fn as_query_value(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        }
    }

    /// A human readable name, e.g. "Weekly".
    pub fn label(&self) -> &'static str {
        match self {
            Granularity::Daily => "Daily",
            Granularity::Weekly => "Weekly",
            Granularity::Monthly => "Monthly",
        }
    }
}

/// Identifies one period of a [Granularity].
///
/// Each variant holds the date that names the period: the date itself for a day, the Monday of
/// the week for a week, and the first of the month for a month. Keys of the same granularity
/// order chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PeriodKey {
    /// A single calendar day.
    Day(Date),
    /// The week running from the Sunday before the given Monday to the Saturday after it.
    Week(Date),
    /// The calendar month starting on the given date.
    Month(Date),
}

impl PeriodKey {
    /// The key of the period of `granularity` that contains `date`.
    ///
    /// A week runs Sunday to Saturday and is keyed by its Monday, so a Sunday belongs to the
    /// week of the Monday that follows it.
    pub fn new(date: Date, granularity: Granularity) -> Self {
        match granularity {
            Granularity::Daily => PeriodKey::Day(date),
            Granularity::Weekly => {
                let days_since_sunday = date.weekday().number_days_from_sunday();
                PeriodKey::Week(date - Duration::days(i64::from(days_since_sunday) - 1))
            }
            Granularity::Monthly => {
                let days_since_first = date.day() - 1;
                PeriodKey::Month(date - Duration::days(days_since_first.into()))
            }
        }
    }

    /// The granularity this key belongs to.
    pub fn granularity(&self) -> Granularity {
        match self {
            PeriodKey::Day(_) => Granularity::Daily,
            PeriodKey::Week(_) => Granularity::Weekly,
            PeriodKey::Month(_) => Granularity::Monthly,
        }
    }

    /// The date that names the period.
    ///
    /// For a week this is its Monday, one day after the Sunday the week starts on.
    pub fn start(&self) -> Date {
        match self {
            PeriodKey::Day(date) | PeriodKey::Week(date) | PeriodKey::Month(date) => *date,
        }
    }

    /// Whether `date` falls within this period.
    pub fn contains(&self, date: Date) -> bool {
        PeriodKey::new(date, self.granularity()) == *self
    }
}

impl Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodKey::Day(date) | PeriodKey::Week(date) => write!(f, "{date}"),
            PeriodKey::Month(date) => write!(f, "{:04}-{:02}", date.year(), u8::from(date.month())),
        }
    }
}

impl Serialize for PeriodKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
