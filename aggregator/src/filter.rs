use std::collections::BTreeSet;
use tracing::debug;
use trendsense_core::{CoreError, FilterState, SentimentRecord};

/// Records matching `filter`, in input order.
pub fn filter_records(
    records: &[SentimentRecord],
    filter: &FilterState,
) -> Result<Vec<SentimentRecord>, CoreError> {
    filter.check_range()?;

    let mut matched = Vec::new();
    for record in records {
        if filter.matches(record)? {
            matched.push(record.clone());
        }
    }

    debug!("Filter kept {} of {} records", matched.len(), records.len());
    Ok(matched)
}

/// Sorted distinct keywords, for populating a keyword picker.
pub fn distinct_keywords(records: &[SentimentRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record.keyword())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Records ordered by parsed `created_at`, newest first.
///
/// Equal timestamps keep their input order.
pub fn newest_first<'a, I>(records: I) -> Result<Vec<&'a SentimentRecord>, CoreError>
where
    I: IntoIterator<Item = &'a SentimentRecord>,
{
    let mut keyed = records
        .into_iter()
        .map(|record| record.timestamp().map(|ts| (ts, record)))
        .collect::<Result<Vec<_>, _>>()?;
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(keyed.into_iter().map(|(_, record)| record).collect())
}
