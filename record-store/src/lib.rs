//! In-memory implementation of the sentiment data queries the dashboard
//! consumes: filtered records, overall statistics, and the keyword listing.

use aggregator::{default_range, distinct_keywords, filter_records, newest_first};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use tracing::{debug, info, warn};
use trendsense_core::{CoreError, FilterState, OverallStats, SentimentRecord};

/// Parameters of a records query. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentimentQuery {
    pub keyword: Option<String>,
    pub source: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl SentimentQuery {
    pub fn from_filter(filter: &FilterState) -> Self {
        Self {
            keyword: filter.keyword.clone(),
            source: filter.source.clone(),
            start_date: filter.start_date,
            end_date: filter.end_date,
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn to_filter(&self) -> FilterState {
        FilterState {
            keyword: self.keyword.clone(),
            source: self.source.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// The data-fetch collaborator the dashboard reads from.
pub trait SentimentSource {
    /// Matching records, newest first.
    fn sentiments(&self, query: &SentimentQuery) -> Result<Vec<SentimentRecord>, CoreError>;

    /// Count and average over every record, optionally for one keyword only.
    fn stats(&self, keyword: Option<&str>) -> Result<OverallStats, CoreError>;

    /// Sorted distinct keywords.
    fn keywords(&self) -> Result<Vec<String>, CoreError>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Records(Vec<SentimentRecord>),
    Envelope { data: Vec<SentimentRecord> },
}

pub struct MemoryStore {
    records: Vec<SentimentRecord>,
    urls: HashSet<String>,
    default_range_days: u32,
    reference_date: Option<NaiveDate>,
}

impl MemoryStore {
    pub fn new(default_range_days: u32) -> Self {
        Self {
            records: Vec::new(),
            urls: HashSet::new(),
            default_range_days,
            reference_date: None,
        }
    }

    /// Pins "today" for the default query window instead of reading the clock.
    pub fn with_reference_date(mut self, today: NaiveDate) -> Self {
        self.reference_date = Some(today);
        self
    }

    /// Loads a JSON array of records, or an object with a `data` array.
    pub fn from_json_str(json: &str, default_range_days: u32) -> Result<Self, CoreError> {
        let payload: Payload = serde_json::from_str(json)?;
        Self::from_payload(payload, default_range_days)
    }

    pub fn from_reader<R: Read>(reader: R, default_range_days: u32) -> Result<Self, CoreError> {
        let payload: Payload = serde_json::from_reader(reader)?;
        Self::from_payload(payload, default_range_days)
    }

    fn from_payload(payload: Payload, default_range_days: u32) -> Result<Self, CoreError> {
        let records = match payload {
            Payload::Records(records) | Payload::Envelope { data: records } => records,
        };

        let mut store = Self::new(default_range_days);
        let total = records.len();
        let mut inserted = 0;
        for record in records {
            if store.insert(record)? {
                inserted += 1;
            }
        }
        info!("Loaded {} of {} sentiment records", inserted, total);
        Ok(store)
    }

    /// Adds a validated record. Returns `false` when a record with the same
    /// URL is already stored.
    pub fn insert(&mut self, record: SentimentRecord) -> Result<bool, CoreError> {
        record.validate()?;

        if let Some(url) = &record.url {
            if !self.urls.insert(url.clone()) {
                warn!("Skipping record {} with duplicate url {}", record.id, url);
                return Ok(false);
            }
        }

        self.records.push(record);
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SentimentRecord] {
        &self.records
    }

    fn today(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(|| Utc::now().date_naive())
    }
}

impl SentimentSource for MemoryStore {
    fn sentiments(&self, query: &SentimentQuery) -> Result<Vec<SentimentRecord>, CoreError> {
        let mut filter = query.to_filter();
        if !filter.has_date_bounds() {
            let range = default_range(self.today(), self.default_range_days);
            debug!("No date bounds given, defaulting to {}", range);
            filter = filter.with_quick_range(range);
        }

        let matched = filter_records(&self.records, &filter)?;
        let limit = query.limit.unwrap_or(matched.len());
        Ok(newest_first(&matched)?
            .into_iter()
            .take(limit)
            .cloned()
            .collect())
    }

    fn stats(&self, keyword: Option<&str>) -> Result<OverallStats, CoreError> {
        let mut total_count = 0;
        let mut score_sum = 0.0;
        for record in &self.records {
            if keyword.map_or(true, |k| record.keyword() == Some(k)) {
                total_count += 1;
                score_sum += record.checked_score()?;
            }
        }

        let average_sentiment = if total_count == 0 {
            0.0
        } else {
            round_to_thousandths(score_sum / total_count as f64)
        };

        Ok(OverallStats {
            total_count,
            average_sentiment,
        })
    }

    fn keywords(&self) -> Result<Vec<String>, CoreError> {
        Ok(distinct_keywords(&self.records))
    }
}

fn round_to_thousandths(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
