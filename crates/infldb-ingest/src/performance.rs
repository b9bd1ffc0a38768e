//! Reading the per-platform monthly performance exports.

use infldb_core::sources::is_remote_location;
use infldb_core::{MonthlyPerformance, Platform};

use crate::client::SourceClient;
use crate::error::IngestError;
use crate::followers::parse_float_prefix;

/// File name suffix shared by all monthly exports; the platform slug goes in
/// front.
pub const PERFORMANCE_FILE_SUFFIX: &str = "_Influencer_Monthly_Data_2023_2025.csv";

/// Location of `platform`'s monthly export under `base` (directory or URL).
#[must_use]
pub fn performance_location(base: &str, platform: &Platform) -> String {
    let file = format!("{}{PERFORMANCE_FILE_SUFFIX}", platform.slug());
    if is_remote_location(base) {
        format!("{}/{file}", base.trim_end_matches('/'))
    } else {
        std::path::Path::new(base).join(file).display().to_string()
    }
}

/// Parses a monthly export and keeps the rows for `influencer_name`
/// (exact match), in file order.
///
/// Columns are positional: name, month, followers, average likes, average
/// comments, engagement rate. The first line is a header. Rows with fewer
/// than six fields are skipped. Integer columns keep their digits only and
/// read as `0` when none remain.
///
/// # Errors
///
/// Returns [`IngestError::Csv`] on malformed CSV.
pub fn parse_performance(
    text: &str,
    influencer_name: &str,
    source_label: &str,
) -> Result<Vec<MonthlyPerformance>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut months = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            source_label: source_label.to_owned(),
            source,
        })?;
        if record.len() < 6 {
            continue;
        }
        let name = record[0].trim();
        if name != influencer_name {
            continue;
        }
        months.push(MonthlyPerformance {
            influencer_name: name.to_owned(),
            month: record[1].trim().to_owned(),
            followers: digits_only(&record[2]),
            avg_likes_post: digits_only(&record[3]),
            avg_comments_post: digits_only(&record[4]),
            engagement_rate: parse_float_prefix(&record[5]).unwrap_or(0.0),
        });
    }
    Ok(months)
}

/// Fetches `platform`'s monthly export from `base` and returns
/// `influencer_name`'s series.
///
/// # Errors
///
/// Propagates fetch and CSV errors. A missing export surfaces as
/// [`IngestError::NotFound`] or [`IngestError::Io`].
pub async fn load_performance(
    client: &SourceClient,
    base: &str,
    platform: &Platform,
    influencer_name: &str,
) -> Result<Vec<MonthlyPerformance>, IngestError> {
    let location = performance_location(base, platform);
    let text = client.fetch_text(&location).await?;
    let months = parse_performance(&text, influencer_name, &location)?;
    tracing::debug!(
        platform = %platform,
        influencer = influencer_name,
        months = months.len(),
        "loaded monthly performance"
    );
    Ok(months)
}

fn digits_only(value: &str) -> u64 {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
InfluencerName,Month,Followers,AvgLikesPost,AvgCommentsPost,EngagementRate
Ann,2023-01,\"1,000\",50,5,2.5
Bo,2023-01,200,10,1,1.0
Ann,2023-02,1200,n/a,6,3.1%
Ann,2023-03,1300
Ann,2023-04,1400,70,7,abc
";

    #[test]
    fn keeps_matching_rows_in_order() {
        let months = parse_performance(EXPORT, "Ann", "test").unwrap();
        let labels: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(labels, ["2023-01", "2023-02", "2023-04"]);
    }

    #[test]
    fn cleans_numeric_fields() {
        let months = parse_performance(EXPORT, "Ann", "test").unwrap();
        assert_eq!(months[0].followers, 1_000);
        assert_eq!(months[1].avg_likes_post, 0);
        assert!((months[1].engagement_rate - 3.1).abs() < f64::EPSILON);
        assert!(months[2].engagement_rate.abs() < f64::EPSILON);
    }

    #[test]
    fn name_match_is_exact() {
        assert!(parse_performance(EXPORT, "ann", "test").unwrap().is_empty());
    }

    #[test]
    fn location_joins_local_and_remote_bases() {
        assert_eq!(
            performance_location("https://cdn.example.com/profiledata/", &Platform::TikTok),
            "https://cdn.example.com/profiledata/tiktok_Influencer_Monthly_Data_2023_2025.csv"
        );
        let local = performance_location("./data/profiledata", &Platform::Instagram);
        assert!(local.ends_with("instagram_Influencer_Monthly_Data_2023_2025.csv"));
        assert!(local.starts_with("./data/profiledata"));
    }
}
