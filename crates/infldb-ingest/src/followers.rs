//! Follower-count parsing for the mixed formats found in creator exports
//! (`"1.5M"`, `"800K"`, `"12,400"`, plain integers).

use std::sync::LazyLock;

use regex::Regex;

static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("valid float prefix regex")
});

/// A follower cell as it arrives from a source: already numeric, or text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowerValue {
    Count(u64),
    Text(String),
}

impl From<u64> for FollowerValue {
    fn from(value: u64) -> Self {
        Self::Count(value)
    }
}

impl From<&str> for FollowerValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FollowerValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Parses a follower count. Never fails: anything unreadable counts as zero.
///
/// `M`/`K` suffixes scale the leading decimal number and round to the
/// nearest integer. Without a suffix only the ASCII digits are kept, so
/// `"-500"` reads as `500`.
#[must_use]
pub fn parse_followers(value: impl Into<FollowerValue>) -> u64 {
    let text = match value.into() {
        FollowerValue::Count(count) => return count,
        FollowerValue::Text(text) => text,
    };

    let cleaned = text.replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return 0;
    }

    if let Some(number) = cleaned
        .strip_suffix('M')
        .or_else(|| cleaned.strip_suffix('m'))
    {
        return scale(number, 1_000_000.0);
    }
    if let Some(number) = cleaned
        .strip_suffix('K')
        .or_else(|| cleaned.strip_suffix('k'))
    {
        return scale(number, 1_000.0);
    }

    let digits: String = cleaned.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Longest leading decimal number in `text`, skipping leading whitespace.
/// `"3.5%"` reads as `3.5`; text without a leading number is `None`.
pub(crate) fn parse_float_prefix(text: &str) -> Option<f64> {
    let prefix = FLOAT_PREFIX.find(text)?;
    prefix.as_str().trim_start().parse().ok()
}

fn scale(number: &str, factor: f64) -> u64 {
    let Some(parsed) = parse_float_prefix(number) else {
        return 0;
    };
    let scaled = (parsed * factor).round();
    if !scaled.is_finite() || scaled <= 0.0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = scaled as u64;
    count
}

/// Short display form used in listings: `1.5M`, `12.3K`, `950`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_followers(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

#[cfg(test)]
#[path = "followers_test.rs"]
mod tests;
