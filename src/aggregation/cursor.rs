//! Stepping through the period buckets one at a time.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::aggregation::{Granularity, PeriodBucket};

/// Which way to move through the periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Towards the oldest period, i.e. a larger index.
    Older,
    /// Towards the most recent period, i.e. a smaller index.
    Newer,
}

/// Why a step could not be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NavigationNotice {
    /// The cursor is already at the oldest period with spending.
    NoOlderPeriods,
    /// The cursor is already at the most recent period with spending.
    NoNewerPeriods,
}

impl NavigationNotice {
    /// A message to show the user.
    pub fn message(&self) -> &'static str {
        match self {
            NavigationNotice::NoOlderPeriods => {
                "No older spending recorded for the selected period."
            }
            NavigationNotice::NoNewerPeriods => "Already showing the most recent period.",
        }
    }
}

impl Display for NavigationNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// The position of the period being viewed.
///
/// Index 0 is the most recent bucket returned by
/// [bucket_by_period](crate::aggregation::bucket_by_period). Because buckets only exist for
/// periods with spending, stepping older moves to the previous period *with spending*, which may
/// skip over empty days, weeks or months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodCursor {
    granularity: Granularity,
    index: usize,
}

impl PeriodCursor {
    /// A cursor at the most recent period of `granularity`.
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            index: 0,
        }
    }

    /// A cursor at `index`, moved back to the oldest bucket if `index` is past the end.
    pub fn at(granularity: Granularity, index: usize, bucket_count: usize) -> Self {
        Self {
            granularity,
            index: index.min(bucket_count.saturating_sub(1)),
        }
    }

    /// The granularity of the periods being viewed.
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// The index of the bucket being viewed.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Switch to `granularity` and go back to the most recent period.
    pub fn select_granularity(&mut self, granularity: Granularity) {
        self.granularity = granularity;
        self.index = 0;
    }

    /// Whether there is an older bucket to step to.
    pub fn has_older(&self, bucket_count: usize) -> bool {
        self.index + 1 < bucket_count
    }

    /// Whether there is a more recent bucket to step to.
    pub fn has_newer(&self) -> bool {
        self.index > 0
    }

    /// Move one bucket towards the oldest period.
    ///
    /// # Errors
    /// Returns [NavigationNotice::NoOlderPeriods] and leaves the cursor where it is if it is
    /// already at the last of `bucket_count` buckets.
    pub fn step_older(&mut self, bucket_count: usize) -> Result<usize, NavigationNotice> {
        if !self.has_older(bucket_count) {
            return Err(NavigationNotice::NoOlderPeriods);
        }

        self.index += 1;
        Ok(self.index)
    }

    /// Move one bucket towards the most recent period.
    ///
    /// # Errors
    /// Returns [NavigationNotice::NoNewerPeriods] and leaves the cursor where it is if it is
    /// already at index 0.
    pub fn step_newer(&mut self) -> Result<usize, NavigationNotice> {
        if !self.has_newer() {
            return Err(NavigationNotice::NoNewerPeriods);
        }

        self.index -= 1;
        Ok(self.index)
    }

    /// Move one bucket in the direction of `step`.
    ///
    /// # Errors
    /// Returns a [NavigationNotice] if there is no bucket in that direction.
    pub fn step(&mut self, step: Step, bucket_count: usize) -> Result<usize, NavigationNotice> {
        match step {
            Step::Older => self.step_older(bucket_count),
            Step::Newer => self.step_newer(),
        }
    }

    /// The bucket under the cursor, or `None` if there are no buckets.
    pub fn current<'a>(&self, buckets: &'a [PeriodBucket]) -> Option<&'a PeriodBucket> {
        buckets.get(self.index)
    }
}
