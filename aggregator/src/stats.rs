//! Summary statistics and keyword rankings.

use crate::ordered::InsertionOrderedMap;
use tracing::debug;
use trendsense_core::{CoreError, KeywordStat, SentimentRecord, StatsSummary};

#[derive(Debug, Default)]
struct KeywordAccumulator {
    score_sum: f64,
    count: usize,
}

impl KeywordAccumulator {
    fn add(&mut self, score: f64) {
        self.score_sum += score;
        self.count += 1;
    }

    fn into_stat(self, keyword: String) -> KeywordStat {
        KeywordStat {
            keyword,
            avg_sentiment: self.score_sum / self.count as f64,
            article_count: self.count,
        }
    }
}

/// Totals, overall average, and the `top_n` best and worst keywords.
///
/// An empty slice yields a zero count and a neutral 0.0 average. Keywords
/// with equal averages keep the order in which they first appear in
/// `records`, so repeated calls rank identically.
pub fn aggregate_stats(
    records: &[SentimentRecord],
    top_n: usize,
) -> Result<StatsSummary, CoreError> {
    if records.is_empty() {
        return Ok(StatsSummary::empty());
    }

    let mut score_sum = 0.0;
    let mut keywords: InsertionOrderedMap<KeywordAccumulator> = InsertionOrderedMap::new();

    for record in records {
        let score = record.checked_score()?;
        score_sum += score;
        if let Some(keyword) = record.keyword() {
            keywords.entry(keyword).add(score);
        }
    }

    debug!(
        "Ranking {} keywords across {} records",
        keywords.len(),
        records.len()
    );

    let stats: Vec<KeywordStat> = keywords
        .into_entries()
        .into_iter()
        .map(|(keyword, acc)| acc.into_stat(keyword))
        .collect();

    // sort_by is stable: ties stay in first-encountered order.
    let mut descending = stats.clone();
    descending.sort_by(|a, b| b.avg_sentiment.total_cmp(&a.avg_sentiment));
    descending.truncate(top_n);

    let mut ascending = stats;
    ascending.sort_by(|a, b| a.avg_sentiment.total_cmp(&b.avg_sentiment));
    ascending.truncate(top_n);

    Ok(StatsSummary {
        total_count: records.len(),
        average_sentiment: score_sum / records.len() as f64,
        top_keywords: descending,
        bottom_keywords: ascending,
    })
}
