//! Sentiment aggregation pipeline.
//!
//! Pure, synchronous transformations from raw [`SentimentRecord`]s to a
//! chart-ready trend series and summary statistics. Every function here is a
//! function of its inputs only, so re-running it on the same records yields
//! identical output.
//!
//! [`SentimentRecord`]: trendsense_core::SentimentRecord

pub mod date_range;
pub mod filter;
pub mod stats;
pub mod trend;

mod ordered;

pub use date_range::{default_range, resolve_quick_range, resolve_quick_range_from};
pub use filter::{distinct_keywords, filter_records, newest_first};
pub use stats::aggregate_stats;
pub use trend::aggregate_trend;

#[cfg(test)]
mod tests;
