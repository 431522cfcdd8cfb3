//! Daily trend series.

use crate::ordered::OrderedSet;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;
use trendsense_core::{CoreError, SentimentRecord, TrendPoint, UNKNOWN_KEYWORD_LABEL};

const KEYWORD_SEPARATOR: &str = ", ";

#[derive(Debug, Default)]
struct DayAccumulator {
    score_sum: f64,
    count: usize,
    keywords: OrderedSet,
}

impl DayAccumulator {
    fn add(&mut self, score: f64, keyword: Option<&str>) {
        self.score_sum += score;
        self.count += 1;
        if let Some(keyword) = keyword {
            self.keywords.insert(keyword);
        }
    }

    fn into_point(self, date: NaiveDate) -> TrendPoint {
        let keywords = self.keywords.into_vec();
        let keyword_label = if keywords.is_empty() {
            UNKNOWN_KEYWORD_LABEL.to_string()
        } else {
            keywords.join(KEYWORD_SEPARATOR)
        };

        TrendPoint {
            date,
            keywords,
            keyword_label,
            average_sentiment: self.score_sum / self.count as f64,
            article_count: self.count,
        }
    }
}

/// Buckets records by calendar date and averages each bucket.
///
/// Points come back in ascending date order with one point per date. Records
/// without a keyword still count toward the average but add nothing to the
/// keyword label. A malformed timestamp or out-of-range score is an error,
/// never a silently skewed average.
pub fn aggregate_trend(records: &[SentimentRecord]) -> Result<Vec<TrendPoint>, CoreError> {
    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();

    for record in records {
        let date = record.calendar_date()?;
        let score = record.checked_score()?;
        days.entry(date).or_default().add(score, record.keyword());
    }

    debug!(
        "Aggregated {} records into {} trend points",
        records.len(),
        days.len()
    );

    // BTreeMap iteration is ascending by key, which is the output order.
    Ok(days
        .into_iter()
        .map(|(date, acc)| acc.into_point(date))
        .collect())
}
