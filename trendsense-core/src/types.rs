use crate::error::{FilterError, RecordError};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used for a trend point whose records carry no keyword.
pub const UNKNOWN_KEYWORD_LABEL: &str = "Unknown";

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_FORMAT_LEN: usize = 10;

/// Article identifiers arrive either as integers (database rows) or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

/// One analyzed article or forum post, as emitted by the scoring pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub id: RecordId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    pub source: String,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(alias = "sentiment")]
    pub sentiment_score: f64,
    /// Raw timestamp text. Only the leading `YYYY-MM-DD` is ever interpreted.
    pub created_at: String,
}

impl SentimentRecord {
    pub fn new(
        id: impl Into<RecordId>,
        source: impl Into<String>,
        keyword: Option<&str>,
        sentiment_score: f64,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: None,
            summary: None,
            content: None,
            url: None,
            source: source.into(),
            keyword: keyword.map(str::to_string),
            sentiment_score,
            created_at: created_at.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// The keyword, with an empty string treated as absent.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|k| !k.is_empty())
    }

    /// Calendar date of `created_at`, taken literally from the timestamp text.
    ///
    /// Accepts `YYYY-MM-DDTHH:MM:SS...` and `YYYY-MM-DD HH:MM:SS` as well as a
    /// bare date. The time of day and any offset are discarded, never applied.
    pub fn calendar_date(&self) -> Result<NaiveDate, RecordError> {
        let prefix = self
            .created_at
            .split(|c| c == 'T' || c == ' ')
            .next()
            .unwrap_or("");

        if prefix.len() != DATE_FORMAT_LEN {
            return Err(self.invalid_timestamp());
        }

        NaiveDate::parse_from_str(prefix, DATE_FORMAT).map_err(|_| self.invalid_timestamp())
    }

    /// Date and time of `created_at`, for ordering records within a day.
    ///
    /// Either separator is accepted, a bare date means midnight, and a
    /// trailing offset is dropped like in [`SentimentRecord::calendar_date`].
    pub fn timestamp(&self) -> Result<NaiveDateTime, RecordError> {
        let date = self.calendar_date()?;
        let rest = &self.created_at[DATE_FORMAT_LEN..];
        if rest.is_empty() {
            return Ok(date.and_time(NaiveTime::MIN));
        }

        let clock: String = rest[1..]
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == ':' || *c == '.')
            .collect();
        NaiveTime::parse_from_str(&clock, "%H:%M:%S%.f")
            .or_else(|_| NaiveTime::parse_from_str(&clock, "%H:%M"))
            .map(|time| date.and_time(time))
            .map_err(|_| self.invalid_timestamp())
    }

    /// The score, provided it is finite and within [-1, 1].
    pub fn checked_score(&self) -> Result<f64, RecordError> {
        let score = self.sentiment_score;
        if score.is_finite() && (-1.0..=1.0).contains(&score) {
            Ok(score)
        } else {
            Err(RecordError::ScoreOutOfRange {
                id: self.id.to_string(),
                score,
            })
        }
    }

    pub fn validate(&self) -> Result<(), RecordError> {
        self.checked_score()?;
        if self.source.trim().is_empty() {
            return Err(RecordError::MissingField {
                id: self.id.to_string(),
                field: "source".to_string(),
            });
        }
        self.timestamp()?;
        Ok(())
    }

    fn invalid_timestamp(&self) -> RecordError {
        RecordError::InvalidTimestamp {
            id: self.id.to_string(),
            value: self.created_at.clone(),
        }
    }
}

/// One chart-ready aggregate: every record that fell on `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// Distinct keywords in order of first appearance.
    pub keywords: Vec<String>,
    pub keyword_label: String,
    pub average_sentiment: f64,
    pub article_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordStat {
    pub keyword: String,
    pub avg_sentiment: f64,
    pub article_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total_count: usize,
    pub average_sentiment: f64,
    pub top_keywords: Vec<KeywordStat>,
    pub bottom_keywords: Vec<KeywordStat>,
}

impl StatsSummary {
    pub fn empty() -> Self {
        Self {
            total_count: 0,
            average_sentiment: 0.0,
            top_keywords: Vec::new(),
            bottom_keywords: Vec::new(),
        }
    }
}

/// Total count and average as reported by the statistics query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallStats {
    pub total_count: usize,
    pub average_sentiment: f64,
}

/// Inclusive calendar-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// User-selected constraints. `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub keyword: Option<String>,
    pub source: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl FilterState {
    /// Builds a filter from raw form values, where an empty string means
    /// "unconstrained".
    pub fn from_inputs(
        keyword: &str,
        source: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Self, FilterError> {
        let filter = Self {
            keyword: non_empty_input(keyword),
            source: non_empty_input(source),
            start_date: parse_filter_date("start date", start_date)?,
            end_date: parse_filter_date("end date", end_date)?,
        };
        filter.check_range()?;
        Ok(filter)
    }

    /// Replaces both bounds with `range`, leaving keyword and source intact.
    pub fn with_quick_range(mut self, range: DateRange) -> Self {
        self.start_date = Some(range.start);
        self.end_date = Some(range.end);
        self
    }

    pub fn check_range(&self) -> Result<(), FilterError> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start > end => Err(FilterError::InvertedRange {
                start: start.format(DATE_FORMAT).to_string(),
                end: end.format(DATE_FORMAT).to_string(),
            }),
            _ => Ok(()),
        }
    }

    pub fn has_date_bounds(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Exact keyword and source match, calendar date within the inclusive bounds.
    pub fn matches(&self, record: &SentimentRecord) -> Result<bool, RecordError> {
        if let Some(keyword) = &self.keyword {
            if record.keyword() != Some(keyword.as_str()) {
                return Ok(false);
            }
        }
        if let Some(source) = &self.source {
            if record.source != *source {
                return Ok(false);
            }
        }
        if !self.has_date_bounds() {
            return Ok(true);
        }

        let date = record.calendar_date()?;
        let after_start = self.start_date.map_or(true, |start| date >= start);
        let before_end = self.end_date.map_or(true, |end| date <= end);
        Ok(after_start && before_end)
    }
}

/// Trimmed form value, or `None` when it is blank.
pub fn non_empty_input(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parses a `YYYY-MM-DD` form value; blank means no bound.
pub fn parse_filter_date(field: &str, value: &str) -> Result<Option<NaiveDate>, FilterError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| FilterError::InvalidDate {
            field: field.to_string(),
            value: value.to_string(),
        })
}
