//! Monthly performance analytics for a single creator.
//!
//! Input rows come from the per-platform monthly exports, one row per month,
//! oldest first. Summaries compare the two most recent months.

use serde::{Deserialize, Serialize};

/// One month of audience and engagement figures for a creator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPerformance {
    pub influencer_name: String,
    pub month: String,
    pub followers: u64,
    pub avg_likes_post: u64,
    pub avg_comments_post: u64,
    /// Engagement rate in percent.
    pub engagement_rate: f64,
}

/// Headline figures for the profile page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub current_followers: u64,
    /// Month-over-month growth in percent, one decimal. `None` without a
    /// previous month to compare against.
    pub follower_growth_pct: Option<f64>,
    /// Mean engagement rate in percent, two decimals.
    pub avg_engagement_rate: f64,
    pub total_posts: usize,
    pub avg_likes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowerTrend {
    Increasing,
    Decreasing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementTrend {
    Improving,
    Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikesTrend {
    Growing,
    Falling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentsTrend {
    Rising,
    Dropping,
}

/// Direction of each metric between the last two months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trends {
    pub followers: FollowerTrend,
    pub engagement: EngagementTrend,
    pub likes_per_post: LikesTrend,
    pub comments_per_post: CommentsTrend,
}

/// Summarizes a creator's monthly series. Returns `None` for an empty series.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize(months: &[MonthlyPerformance]) -> Option<PerformanceSummary> {
    let latest = months.last()?;
    let count = months.len();

    let follower_growth_pct = months
        .len()
        .checked_sub(2)
        .and_then(|idx| months.get(idx))
        .and_then(|previous| percent_change(previous.followers as f64, latest.followers as f64));

    let engagement_sum: f64 = months.iter().map(|m| m.engagement_rate).sum();
    let likes_sum: f64 = months.iter().map(|m| m.avg_likes_post as f64).sum();

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let avg_likes = (likes_sum / count as f64).round() as u64;

    Some(PerformanceSummary {
        current_followers: latest.followers,
        follower_growth_pct,
        avg_engagement_rate: round_to(engagement_sum / count as f64, 2),
        total_posts: count,
        avg_likes,
    })
}

/// Compares the last two months. Needs at least two months of data.
#[must_use]
pub fn analyze_trends(months: &[MonthlyPerformance]) -> Option<Trends> {
    let [.., previous, latest] = months else {
        return None;
    };

    Some(Trends {
        followers: if latest.followers > previous.followers {
            FollowerTrend::Increasing
        } else {
            FollowerTrend::Decreasing
        },
        engagement: if latest.engagement_rate > previous.engagement_rate {
            EngagementTrend::Improving
        } else {
            EngagementTrend::Declining
        },
        likes_per_post: if latest.avg_likes_post > previous.avg_likes_post {
            LikesTrend::Growing
        } else {
            LikesTrend::Falling
        },
        comments_per_post: if latest.avg_comments_post > previous.avg_comments_post {
            CommentsTrend::Rising
        } else {
            CommentsTrend::Dropping
        },
    })
}

/// Percent change from `first` to `last`, one decimal. `None` when `first`
/// is zero.
#[must_use]
pub fn percent_change(first: f64, last: f64) -> Option<f64> {
    if first == 0.0 {
        return None;
    }
    Some(round_to((last - first) / first * 100.0, 1))
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
