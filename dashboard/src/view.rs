use crate::format::{
    format_count, format_display_date, format_keyword_score, format_score, score_to_color_class,
    score_to_label, score_to_percentage, ColorClass, SentimentLabel,
};
use aggregator::{aggregate_stats, aggregate_trend, newest_first};
use chrono::NaiveDate;
use serde::Serialize;
use trendsense_core::{
    CoreError, DashboardConfig, KeywordStat, OverallStats, SentimentRecord, StatsSummary,
    TrendPoint,
};

const NO_TITLE: &str = "No title";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentBadge {
    pub percentage: String,
    pub score: String,
    pub label: SentimentLabel,
    pub color: ColorClass,
}

impl SentimentBadge {
    pub fn for_score(score: f64) -> Self {
        Self {
            percentage: score_to_percentage(score),
            score: format_score(score),
            label: score_to_label(score),
            color: score_to_color_class(score),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub title: String,
    pub value: String,
    pub subtitle: Option<String>,
    pub sentiment: Option<SentimentBadge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendRow {
    pub date: NaiveDate,
    pub display_date: String,
    pub average_sentiment: f64,
    pub score: String,
    pub article_count: usize,
    pub keyword_label: String,
    pub color: ColorClass,
}

impl From<&TrendPoint> for TrendRow {
    fn from(point: &TrendPoint) -> Self {
        Self {
            date: point.date,
            display_date: format_display_date(point.date),
            average_sentiment: point.average_sentiment,
            score: format_score(point.average_sentiment),
            article_count: point.article_count,
            keyword_label: point.keyword_label.clone(),
            color: score_to_color_class(point.average_sentiment),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordRow {
    pub keyword: String,
    pub score: String,
    pub article_count: usize,
    pub color: ColorClass,
}

impl From<&KeywordStat> for KeywordRow {
    fn from(stat: &KeywordStat) -> Self {
        Self {
            keyword: stat.keyword.clone(),
            score: format_keyword_score(stat.avg_sentiment),
            article_count: stat.article_count,
            color: score_to_color_class(stat.avg_sentiment),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentRow {
    pub title: String,
    pub summary: Option<String>,
    pub source: String,
    pub score: String,
    pub color: ColorClass,
    pub display_date: String,
}

/// Everything the presentation layer needs for one render, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub cards: Vec<SummaryCard>,
    pub trend: Vec<TrendRow>,
    pub top_keywords: Vec<KeywordRow>,
    pub bottom_keywords: Vec<KeywordRow>,
    pub recent: Vec<RecentRow>,
    pub stats: StatsSummary,
}

impl DashboardView {
    /// Builds the view from the filtered `records` and the all-time `overall`
    /// statistics, which come from a separate query.
    pub fn build(
        records: &[SentimentRecord],
        overall: OverallStats,
        config: &DashboardConfig,
    ) -> Result<Self, CoreError> {
        let trend = aggregate_trend(records)?;
        let stats = aggregate_stats(records, config.top_n)?;

        let cards = vec![
            SummaryCard {
                title: "Total Articles".to_string(),
                value: format_count(overall.total_count),
                subtitle: Some("All time".to_string()),
                sentiment: None,
            },
            SummaryCard {
                title: "Average Sentiment".to_string(),
                value: score_to_percentage(overall.average_sentiment),
                subtitle: Some("Overall sentiment".to_string()),
                sentiment: Some(SentimentBadge::for_score(overall.average_sentiment)),
            },
            SummaryCard {
                title: "Filtered Results".to_string(),
                value: format_count(records.len()),
                subtitle: Some("Current view".to_string()),
                sentiment: None,
            },
        ];

        Ok(Self {
            cards,
            trend: trend.iter().map(TrendRow::from).collect(),
            top_keywords: stats.top_keywords.iter().map(KeywordRow::from).collect(),
            bottom_keywords: stats.bottom_keywords.iter().map(KeywordRow::from).collect(),
            recent: recent_rows(records, config.recent_limit)?,
            stats,
        })
    }

    /// False when the trend is empty and the caller should show "no data".
    pub fn has_data(&self) -> bool {
        !self.trend.is_empty()
    }
}

fn recent_rows(records: &[SentimentRecord], limit: usize) -> Result<Vec<RecentRow>, CoreError> {
    newest_first(records)?
        .into_iter()
        .take(limit)
        .map(|record| -> Result<RecentRow, CoreError> {
            Ok(RecentRow {
                title: record.title.clone().unwrap_or_else(|| NO_TITLE.to_string()),
                summary: record.summary.clone(),
                source: record.source.clone(),
                score: format_score(record.sentiment_score),
                color: score_to_color_class(record.sentiment_score),
                display_date: format_display_date(record.calendar_date()?),
            })
        })
        .collect()
}
