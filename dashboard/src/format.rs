//! Display conversions for sentiment scores, dates, and counts.
//!
//! All functions are total: any `f64` produces some string, including
//! scores outside [-1, 1].

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorClass {
    Green,
    Red,
    NeutralGray,
}

impl ColorClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorClass::Green => "green",
            ColorClass::Red => "red",
            ColorClass::NeutralGray => "neutral-gray",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ColorClass::Green => "text-green-500",
            ColorClass::Red => "text-red-500",
            ColorClass::NeutralGray => "text-slate-400",
        }
    }
}

impl fmt::Display for ColorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps [-1, 1] linearly onto 0..=100 percent.
///
/// Non-negative scores get a `+` prefix. Negative scores get no prefix: the
/// mapped percentage is itself never negative, so `-1.0` renders as `0%`.
pub fn score_to_percentage(score: f64) -> String {
    let percentage = ((score + 1.0) / 2.0) * 100.0;
    let sign = if score >= 0.0 { "+" } else { "" };
    format!("{}{}%", sign, percentage.round() as i64)
}

pub fn score_to_label(score: f64) -> SentimentLabel {
    if score > 0.0 {
        SentimentLabel::Positive
    } else if score < 0.0 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

pub fn score_to_color_class(score: f64) -> ColorClass {
    match score_to_label(score) {
        SentimentLabel::Positive => ColorClass::Green,
        SentimentLabel::Negative => ColorClass::Red,
        SentimentLabel::Neutral => ColorClass::NeutralGray,
    }
}

/// Signed score with two decimals, e.g. `+0.60`.
pub fn format_score(score: f64) -> String {
    format!("{:+.2}", without_negative_zero(score))
}

/// Keyword ranking value with two decimals and no sign, e.g. `0.70`.
pub fn format_keyword_score(avg_sentiment: f64) -> String {
    format!("{:.2}", without_negative_zero(avg_sentiment))
}

fn without_negative_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Short en-US date, e.g. `Mar 15, 2024`.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Count with thousands separators, e.g. `12,345`.
pub fn format_count(count: usize) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
