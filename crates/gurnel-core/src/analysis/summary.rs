/// Everything the `stats` command reports, computed from one pipeline run.
use super::{journaling_cadence, Cadence, ReferenceTable, WordRanking};
use crate::model::AggregateStats;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct StatsReport {
    pub stats: AggregateStats,
    /// `None` for an empty corpus.
    pub cadence: Option<Cadence>,
    /// `None` when there is no reference table or no words to rank.
    pub ranking: Option<WordRanking>,
}

impl StatsReport {
    pub fn build(stats: AggregateStats, reference: &ReferenceTable, today: NaiveDate) -> Self {
        let cadence = journaling_cadence(&stats, today);
        let ranking = WordRanking::rank(&stats, reference);
        Self {
            stats,
            cadence,
            ranking,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compact_str::CompactString;

    #[test]
    fn empty_corpus_report() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let report = StatsReport::build(
            AggregateStats::default(),
            &ReferenceTable::bundled().unwrap(),
            today,
        );
        assert!(report.is_empty());
        assert!(report.cadence.is_none());
        assert!(report.ranking.is_none());
    }

    #[test]
    fn populated_report_has_cadence_and_ranking() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let mut stats = AggregateStats::default();
        stats.absorb_words([(CompactString::new("the"), 4)].into_iter().collect());
        stats.earliest = Some(today);

        let reference: ReferenceTable = [("the", 0.05)].into_iter().collect();
        let report = StatsReport::build(stats, &reference, today);
        assert_eq!(report.cadence.unwrap().percent(), 100.0);
        assert_eq!(report.ranking.unwrap().len(), 1);
    }
}
