#[cfg(test)]
mod tests {
    use crate::{
        aggregate_stats, aggregate_trend, default_range, distinct_keywords, filter_records,
        newest_first, resolve_quick_range, resolve_quick_range_from,
    };
    use chrono::{NaiveDate, Utc};
    use trendsense_core::{CoreError, FilterState, RecordError, SentimentRecord};

    const EPSILON: f64 = 1e-9;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(id: i64, keyword: Option<&str>, score: f64, created_at: &str) -> SentimentRecord {
        SentimentRecord::new(id, "news", keyword, score, created_at)
    }

    fn ranking_fixture() -> Vec<SentimentRecord> {
        vec![
            record(1, Some("A"), 0.8, "2024-01-01T09:00:00"),
            record(2, Some("B"), -0.5, "2024-01-01T10:00:00"),
            record(3, Some("A"), 0.6, "2024-01-02T11:00:00"),
            record(4, Some("C"), 0.1, "2024-01-03T12:00:00"),
        ]
    }

    #[test]
    fn test_quick_range_seven_days() {
        let range = resolve_quick_range_from(date("2024-03-15"), 7);
        assert_eq!(range.start, date("2024-03-08"));
        assert_eq!(range.end, date("2024-03-15"));
        assert_eq!(range.to_string(), "2024-03-08..2024-03-15");
    }

    #[test]
    fn test_quick_range_crosses_month_and_leap_day() {
        let range = resolve_quick_range_from(date("2024-03-01"), 1);
        assert_eq!(range.start, date("2024-02-29"));

        let range = resolve_quick_range_from(date("2024-03-15"), 0);
        assert_eq!(range.start, range.end);
    }

    #[test]
    fn test_quick_range_ends_today() {
        let range = resolve_quick_range(30);
        assert_eq!(range.end, Utc::now().date_naive());
        assert_eq!((range.end - range.start).num_days(), 30);
    }

    #[test]
    fn test_quick_range_saturates() {
        let range = resolve_quick_range_from(NaiveDate::MIN, 5);
        assert_eq!(range.start, NaiveDate::MIN);
    }

    #[test]
    fn test_default_range_is_thirty_days() {
        let range = default_range(date("2024-03-31"), 30);
        assert_eq!(range.start, date("2024-03-01"));
    }

    #[test]
    fn test_trend_empty_input() {
        assert!(aggregate_trend(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_trend_merges_same_day_keywords() {
        let records = vec![
            record(1, Some("AI"), 0.4, "2024-01-01T08:00:00"),
            record(2, Some("Cloud"), 0.8, "2024-01-01T08:00:00"),
        ];

        let trend = aggregate_trend(&records).unwrap();
        assert_eq!(trend.len(), 1);

        let point = &trend[0];
        assert_eq!(point.date, date("2024-01-01"));
        assert!((point.average_sentiment - 0.6).abs() < EPSILON);
        assert_eq!(point.article_count, 2);
        assert_eq!(point.keywords, vec!["AI", "Cloud"]);
        assert_eq!(point.keyword_label, "AI, Cloud");
    }

    #[test]
    fn test_trend_deduplicates_keywords_in_first_seen_order() {
        let records = vec![
            record(1, Some("Rust"), 0.1, "2024-01-01T08:00:00"),
            record(2, None, 0.2, "2024-01-01T09:00:00"),
            record(3, Some("Go"), 0.3, "2024-01-01T10:00:00"),
            record(4, Some("Rust"), 0.4, "2024-01-01T11:00:00"),
        ];

        let trend = aggregate_trend(&records).unwrap();
        assert_eq!(trend[0].keyword_label, "Rust, Go");
        assert_eq!(trend[0].article_count, 4);
        assert!((trend[0].average_sentiment - 0.25).abs() < EPSILON);
    }

    #[test]
    fn test_trend_unknown_label_without_keywords() {
        let records = vec![
            record(1, None, -0.3, "2024-01-05 10:00:00"),
            record(2, Some(""), -0.1, "2024-01-05 11:00:00"),
        ];

        let trend = aggregate_trend(&records).unwrap();
        assert_eq!(trend[0].keyword_label, "Unknown");
        assert!(trend[0].keywords.is_empty());
    }

    #[test]
    fn test_trend_sorted_ascending_regardless_of_input_order() {
        let records = vec![
            record(1, Some("AI"), 0.1, "2024-02-01T00:00:00"),
            record(2, Some("AI"), 0.2, "2023-12-31T23:59:59"),
            record(3, Some("AI"), 0.3, "2024-01-15T12:00:00"),
        ];

        let dates: Vec<NaiveDate> = aggregate_trend(&records)
            .unwrap()
            .into_iter()
            .map(|p| p.date)
            .collect();
        assert_eq!(
            dates,
            vec![date("2023-12-31"), date("2024-01-15"), date("2024-02-01")]
        );
    }

    #[test]
    fn test_trend_uses_literal_date_not_offset() {
        let records = vec![
            record(1, None, 0.5, "2024-01-01T23:30:00-05:00"),
            record(2, None, 0.5, "2024-01-02T00:30:00+09:00"),
        ];

        let trend = aggregate_trend(&records).unwrap();
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].date, date("2024-01-01"));
        assert_eq!(trend[1].date, date("2024-01-02"));
    }

    #[test]
    fn test_trend_rejects_malformed_timestamp() {
        let records = vec![
            record(1, None, 0.5, "2024-01-01T00:00:00"),
            record(2, None, 0.5, "last tuesday"),
        ];

        let result = aggregate_trend(&records);
        assert!(matches!(
            result,
            Err(CoreError::Record(RecordError::InvalidTimestamp { .. }))
        ));
    }

    #[test]
    fn test_trend_rejects_out_of_range_score() {
        let records = vec![record(1, None, 3.0, "2024-01-01T00:00:00")];
        assert!(matches!(
            aggregate_trend(&records),
            Err(CoreError::Record(RecordError::ScoreOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_stats_empty_input() {
        let stats = aggregate_stats(&[], 3).unwrap();
        assert_eq!(stats.total_count, 0);
        assert_eq!(stats.average_sentiment, 0.0);
        assert!(stats.top_keywords.is_empty());
        assert!(stats.bottom_keywords.is_empty());
    }

    #[test]
    fn test_stats_ranking() {
        let stats = aggregate_stats(&ranking_fixture(), 2).unwrap();

        assert_eq!(stats.total_count, 4);
        assert!((stats.average_sentiment - 0.25).abs() < EPSILON);

        let top: Vec<&str> = stats.top_keywords.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(top, vec!["A", "C"]);
        assert!((stats.top_keywords[0].avg_sentiment - 0.7).abs() < EPSILON);
        assert_eq!(stats.top_keywords[0].article_count, 2);
        assert!((stats.top_keywords[1].avg_sentiment - 0.1).abs() < EPSILON);

        let bottom: Vec<&str> = stats
            .bottom_keywords
            .iter()
            .map(|k| k.keyword.as_str())
            .collect();
        assert_eq!(bottom, vec!["B", "C"]);
        assert!((stats.bottom_keywords[0].avg_sentiment + 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_stats_fewer_keywords_than_requested() {
        let stats = aggregate_stats(&ranking_fixture(), 10).unwrap();
        assert_eq!(stats.top_keywords.len(), 3);
        assert_eq!(stats.bottom_keywords.len(), 3);
    }

    #[test]
    fn test_stats_zero_top_n() {
        let stats = aggregate_stats(&ranking_fixture(), 0).unwrap();
        assert_eq!(stats.total_count, 4);
        assert!(stats.top_keywords.is_empty());
        assert!(stats.bottom_keywords.is_empty());
    }

    #[test]
    fn test_stats_ties_keep_first_seen_order() {
        let records = vec![
            record(1, Some("Zig"), 0.5, "2024-01-01T00:00:00"),
            record(2, Some("Ada"), 0.5, "2024-01-01T00:00:00"),
            record(3, Some("Nim"), 0.5, "2024-01-01T00:00:00"),
        ];

        let stats = aggregate_stats(&records, 3).unwrap();
        let top: Vec<&str> = stats.top_keywords.iter().map(|k| k.keyword.as_str()).collect();
        let bottom: Vec<&str> = stats
            .bottom_keywords
            .iter()
            .map(|k| k.keyword.as_str())
            .collect();
        assert_eq!(top, vec!["Zig", "Ada", "Nim"]);
        assert_eq!(bottom, vec!["Zig", "Ada", "Nim"]);
    }

    #[test]
    fn test_stats_keywordless_records_count_toward_totals_only() {
        let records = vec![
            record(1, None, -1.0, "2024-01-01T00:00:00"),
            record(2, Some("AI"), 1.0, "2024-01-01T00:00:00"),
        ];

        let stats = aggregate_stats(&records, 3).unwrap();
        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.average_sentiment, 0.0);
        assert_eq!(stats.top_keywords.len(), 1);
        assert_eq!(stats.top_keywords[0].avg_sentiment, 1.0);
    }

    #[test]
    fn test_stats_rejects_nan_score() {
        let records = vec![record(1, Some("AI"), f64::NAN, "2024-01-01T00:00:00")];
        assert!(aggregate_stats(&records, 3).is_err());
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let records = ranking_fixture();
        assert_eq!(
            aggregate_trend(&records).unwrap(),
            aggregate_trend(&records).unwrap()
        );
        assert_eq!(
            aggregate_stats(&records, 2).unwrap(),
            aggregate_stats(&records, 2).unwrap()
        );
    }

    #[test]
    fn test_filter_records_by_keyword_and_range() {
        let records = ranking_fixture();
        let filter = FilterState {
            keyword: Some("A".to_string()),
            ..FilterState::default()
        }
        .with_quick_range(resolve_quick_range_from(date("2024-01-02"), 0));

        let matched = filter_records(&records, &filter).unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0], records[2]);
    }

    #[test]
    fn test_filter_records_rejects_inverted_range() {
        let filter = FilterState {
            start_date: Some(date("2024-02-01")),
            end_date: Some(date("2024-01-01")),
            ..FilterState::default()
        };
        assert!(matches!(
            filter_records(&ranking_fixture(), &filter),
            Err(CoreError::Filter(_))
        ));
    }

    #[test]
    fn test_distinct_keywords_sorted() {
        let mut records = ranking_fixture();
        records.push(record(5, None, 0.0, "2024-01-04T00:00:00"));
        assert_eq!(distinct_keywords(&records), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_newest_first_keeps_ties_in_input_order() {
        let records = vec![
            record(1, None, 0.0, "2024-01-02T08:00:00"),
            record(2, None, 0.0, "2024-01-02 08:00:00"),
            record(3, None, 0.0, "2024-01-02 21:15:00"),
        ];
        let ordered: Vec<String> = newest_first(&records)
            .unwrap()
            .iter()
            .map(|r| r.id.to_string())
            .collect();
        assert_eq!(ordered, vec!["3", "1", "2"]);

        let broken = vec![record(4, None, 0.0, "2024-01-02Tlate")];
        assert!(matches!(
            newest_first(&broken),
            Err(CoreError::Record(RecordError::InvalidTimestamp { .. }))
        ));
    }
}
