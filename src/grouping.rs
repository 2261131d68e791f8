//! Groups dated items into labeled calendar-day buckets.
//!
//! Chore views and the monthly transaction view both show their items in
//! per-day sections with a relative header ("Previous", "Monday", ...,
//! "Upcoming"). The keying, labeling and ordering rules live here; the two
//! item shapes plug in through a date extractor and a [`GroupingOptions`]
//! preset.
//!
//! All day boundaries are UTC. Items whose date is missing or unparseable are
//! left out and counted in [`Grouped::skipped`].

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, Utc, Weekday};

use crate::clock::Clock;
use crate::config::WEEK_WINDOW_DAYS;
use crate::models::{AccountChore, TransactionSplit};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// What instant an item's timestamp stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateAnchor {
    /// The timestamp is the day itself.
    StartOfDay,
    /// The timestamp marks the end of the day, i.e. midnight of the next
    /// day. Keys are taken one calendar day earlier.
    EndOfDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupingOptions {
    pub anchor: DateAnchor,
    /// Order of the buckets themselves.
    pub bucket_order: Direction,
    /// Order of items inside each bucket, by exact timestamp.
    pub item_order: Direction,
}

impl GroupingOptions {
    /// Chore views: due dates are end-of-day markers, everything ascending.
    pub const fn chores() -> Self {
        Self {
            anchor: DateAnchor::EndOfDay,
            bucket_order: Direction::Ascending,
            item_order: Direction::Ascending,
        }
    }

    /// Chore views keyed on the raw due date, without the end-of-day shift.
    pub const fn chores_raw() -> Self {
        Self {
            anchor: DateAnchor::StartOfDay,
            ..Self::chores()
        }
    }

    /// Transaction views: most recent day first, most recent split first.
    pub const fn splits() -> Self {
        Self {
            anchor: DateAnchor::StartOfDay,
            bucket_order: Direction::Descending,
            item_order: Direction::Descending,
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketLabel {
    Previous,
    Upcoming,
    Weekday(Weekday),
}

impl BucketLabel {
    /// Label for a bucket dated `date` when today is `today`.
    ///
    /// Dates before today are `Previous`. Today and the following six days
    /// are named by weekday. Anything from `today + 7` on is `Upcoming`.
    ///
    /// The window is half-open: `today + 7` itself is `Upcoming`. Web clients
    /// that compare with `> today + 7` name that day by weekday instead.
    pub fn for_date(date: NaiveDate, today: NaiveDate) -> Self {
        let end_of_week = today
            .checked_add_days(Days::new(WEEK_WINDOW_DAYS))
            .unwrap_or(NaiveDate::MAX);
        if date < today {
            BucketLabel::Previous
        } else if date >= end_of_week {
            BucketLabel::Upcoming
        } else {
            BucketLabel::Weekday(date.weekday())
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BucketLabel::Previous => "Previous",
            BucketLabel::Upcoming => "Upcoming",
            BucketLabel::Weekday(day) => weekday_name(*day),
        }
    }
}

impl fmt::Display for BucketLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// All items that fall on one calendar day. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedBucket<T> {
    pub date_key: NaiveDate,
    pub label: BucketLabel,
    /// Long-form date, e.g. `"June 10, 2024"`.
    pub date_string: String,
    pub items: Vec<T>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grouped<T> {
    pub buckets: Vec<GroupedBucket<T>>,
    /// Items left out because their date was missing or unparseable.
    pub skipped: usize,
}

impl<T> Grouped<T> {
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of items across all buckets.
    pub fn item_count(&self) -> usize {
        self.buckets.iter().map(|b| b.items.len()).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GroupedBucket<T>> {
        self.buckets.iter()
    }

    pub fn bucket(&self, date: NaiveDate) -> Option<&GroupedBucket<T>> {
        self.buckets.iter().find(|b| b.date_key == date)
    }
}

impl<T> Default for Grouped<T> {
    fn default() -> Self {
        Self {
            buckets: Vec::new(),
            skipped: 0,
        }
    }
}

impl<T> IntoIterator for Grouped<T> {
    type Item = GroupedBucket<T>;
    type IntoIter = std::vec::IntoIter<GroupedBucket<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse an API timestamp.
///
/// Accepts RFC 3339 with any offset, a naive `YYYY-MM-DDTHH:MM:SS[.f]`
/// (read as UTC), or a bare `YYYY-MM-DD` (UTC midnight).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn bucket_key(ts: DateTime<Utc>, anchor: DateAnchor) -> Option<NaiveDate> {
    let date = ts.date_naive();
    match anchor {
        DateAnchor::StartOfDay => Some(date),
        DateAnchor::EndOfDay => date.checked_sub_days(Days::new(1)),
    }
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Partition `items` into calendar-day buckets.
///
/// `date_of` extracts each item's raw timestamp. Items are sorted by
/// timestamp (stable for ties), keyed per `options.anchor` in UTC, labeled
/// relative to `clock.today()`, and emitted in `options.bucket_order`.
/// Items with a missing or unparseable date are skipped with a warning.
pub fn group_by_date<T, I, F>(
    items: I,
    date_of: F,
    options: &GroupingOptions,
    clock: &dyn Clock,
) -> Grouped<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> Option<&str>,
{
    let mut skipped = 0;
    let mut dated: Vec<(DateTime<Utc>, NaiveDate, T)> = Vec::new();

    for item in items {
        let parsed = match date_of(&item) {
            None => {
                log::warn!("skipping item with no date");
                None
            }
            Some(raw) => {
                let key = parse_timestamp(raw)
                    .and_then(|ts| bucket_key(ts, options.anchor).map(|key| (ts, key)));
                if key.is_none() {
                    log::warn!("skipping item with unparseable date {:?}", raw);
                }
                key
            }
        };
        match parsed {
            Some((ts, key)) => dated.push((ts, key, item)),
            None => skipped += 1,
        }
    }

    dated.sort_by_key(|(ts, _, _)| *ts);

    let mut by_day: BTreeMap<NaiveDate, Vec<(DateTime<Utc>, T)>> = BTreeMap::new();
    for (ts, key, item) in dated {
        by_day.entry(key).or_default().push((ts, item));
    }

    let today = clock.today();
    let build = |(date_key, mut entries): (NaiveDate, Vec<(DateTime<Utc>, T)>)| {
        if options.item_order == Direction::Descending {
            entries.sort_by(|a, b| b.0.cmp(&a.0));
        }
        GroupedBucket {
            date_key,
            label: BucketLabel::for_date(date_key, today),
            date_string: date_key.format("%B %-d, %Y").to_string(),
            items: entries.into_iter().map(|(_, item)| item).collect(),
        }
    };

    let buckets: Vec<GroupedBucket<T>> = match options.bucket_order {
        Direction::Ascending => by_day.into_iter().map(build).collect(),
        Direction::Descending => by_day.into_iter().rev().map(build).collect(),
    };

    Grouped { buckets, skipped }
}

/// Group chore assignments by their due day.
pub fn group_chores(chores: Vec<AccountChore>, clock: &dyn Clock) -> Grouped<AccountChore> {
    group_by_date(
        chores,
        |c: &AccountChore| c.due_date.as_deref(),
        &GroupingOptions::chores(),
        clock,
    )
}

/// Group money splits by the day they were spent, most recent first.
pub fn group_splits(
    splits: Vec<TransactionSplit>,
    clock: &dyn Clock,
) -> Grouped<TransactionSplit> {
    group_by_date(
        splits,
        |s: &TransactionSplit| s.spent_at.as_deref(),
        &GroupingOptions::splits(),
        clock,
    )
}
