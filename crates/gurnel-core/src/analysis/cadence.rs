/// Journaling cadence: how many of the days since the first entry have one.
use crate::model::AggregateStats;
use chrono::NaiveDate;

/// Entries written against the calendar days they span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cadence {
    /// Date of the earliest entry.
    pub since: NaiveDate,
    /// Calendar days from `since` through today, inclusive. Never zero.
    pub days: u64,
    pub entries: u64,
}

impl Cadence {
    /// Share of days journaled, as a percentage.
    pub fn percent(&self) -> f64 {
        self.entries as f64 / self.days as f64 * 100.0
    }
}

/// Cadence of `stats` as of `today`, or `None` for an empty corpus.
///
/// Counting is on calendar dates, so an entry written today counts as one
/// day and time of day never shifts the result.
pub fn journaling_cadence(stats: &AggregateStats, today: NaiveDate) -> Option<Cadence> {
    if stats.is_empty() {
        return None;
    }
    let since = stats.earliest?;
    let days = (today - since).num_days().saturating_add(1).max(1) as u64;
    Some(Cadence {
        since,
        days,
        entries: stats.entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WordCounts;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn stats_since(entries: u64, days_ago: i64) -> AggregateStats {
        let mut stats = AggregateStats::default();
        for _ in 0..entries {
            stats.absorb_words(WordCounts::new());
        }
        stats.earliest = Some(today() - chrono::Duration::days(days_ago));
        stats
    }

    #[test]
    fn single_entry_today_is_full_cadence() {
        let cadence = journaling_cadence(&stats_since(1, 0), today()).unwrap();
        assert_eq!(cadence.days, 1);
        assert_eq!(cadence.percent(), 100.0);
    }

    #[test]
    fn three_consecutive_days_is_full_cadence() {
        let cadence = journaling_cadence(&stats_since(3, 2), today()).unwrap();
        assert_eq!(cadence.days, 3);
        assert_eq!(cadence.percent(), 100.0);
    }

    /// Entries three days ago and yesterday: 2 of 4 days.
    #[test]
    fn gaps_lower_the_percentage() {
        let cadence = journaling_cadence(&stats_since(2, 3), today()).unwrap();
        assert_eq!(cadence.days, 4);
        assert_eq!(cadence.percent(), 50.0);
    }

    #[test]
    fn empty_corpus_has_no_cadence() {
        assert!(journaling_cadence(&AggregateStats::default(), today()).is_none());
    }

    /// An earliest date after today still divides by at least one day.
    #[test]
    fn future_earliest_clamps_to_one_day() {
        let mut stats = stats_since(1, 0);
        stats.earliest = Some(today() + chrono::Duration::days(5));
        assert_eq!(journaling_cadence(&stats, today()).unwrap().days, 1);
    }
}
