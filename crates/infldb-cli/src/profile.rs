//! `show` and `performance` command handlers.

use infldb_core::{
    analyze_trends, summarize, AppConfig, CompositeId, MonthlyPerformance, PerformanceSummary,
    Profile, ProfileSet, Trends,
};
use infldb_ingest::{format_followers, load_performance, SourceClient};
use serde::Serialize;

use crate::{load_profiles, LookupArgs};

#[derive(Debug, Serialize)]
struct PerformanceReport<'a> {
    profile: &'a Profile,
    months: &'a [MonthlyPerformance],
    summary: Option<PerformanceSummary>,
    trends: Option<Trends>,
}

pub(crate) async fn run_show(config: &AppConfig, args: &LookupArgs) -> anyhow::Result<()> {
    let set = load_profiles(config).await?;
    let profile = find_profile(&set, args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(profile)?);
    } else {
        print!("{}", render_profile(profile));
    }
    Ok(())
}

pub(crate) async fn run_performance(config: &AppConfig, args: &LookupArgs) -> anyhow::Result<()> {
    let set = load_profiles(config).await?;
    let profile = find_profile(&set, args)?;

    let client = SourceClient::from_config(config)?;
    let months = load_performance(
        &client,
        &config.performance_dir,
        &profile.platform,
        &profile.name,
    )
    .await?;

    let report = PerformanceReport {
        profile,
        months: &months,
        summary: summarize(&months),
        trends: analyze_trends(&months),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_performance(&report));
    }
    Ok(())
}

/// Detail-view lookup. The user only ever sees "profile not found"; the
/// details go to the log.
pub(crate) fn find_profile<'a>(set: &'a ProfileSet, args: &LookupArgs) -> anyhow::Result<&'a Profile> {
    let composite = CompositeId(args.id);
    if let Some(profile) = set.find_by_composite(&args.platform, composite) {
        return Ok(profile);
    }
    tracing::warn!(
        id = args.id,
        platform = %args.platform,
        base_id = ?composite.decode_label(&args.platform).map(|key| key.base_id),
        profiles = set.len(),
        "detail lookup found no profile"
    );
    anyhow::bail!("profile not found")
}

pub(crate) fn render_profile(profile: &Profile) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} ({})\n", profile.name, profile.platform));
    if let Some(handle) = &profile.handle {
        out.push_str(&format!("  handle:    {handle}\n"));
    }
    out.push_str(&format!(
        "  followers: {} ({})\n",
        format_followers(profile.followers),
        profile.followers
    ));
    if let Some(location) = &profile.location {
        out.push_str(&format!("  location:  {location}\n"));
    }
    if !profile.tags.is_empty() {
        out.push_str(&format!("  tags:      {}\n", profile.tags.join(", ")));
    }
    if let Some(bio) = &profile.bio {
        out.push_str(&format!("  bio:       {bio}\n"));
    }
    if let Some(image) = &profile.profile_image {
        out.push_str(&format!("  image:     {image}\n"));
    }
    out.push_str(&format!("  key:       {}\n", profile.key()));
    out
}

fn render_performance(report: &PerformanceReport<'_>) -> String {
    let mut out = format!("{} ({})\n", report.profile.name, report.profile.platform);

    let Some(summary) = &report.summary else {
        out.push_str("  no monthly performance data\n");
        return out;
    };

    let growth = summary
        .follower_growth_pct
        .map_or_else(|| "n/a".to_string(), |pct| format!("{pct:+.1}%"));
    out.push_str(&format!(
        "  followers: {} (month over month {growth})\n",
        format_followers(summary.current_followers)
    ));
    out.push_str(&format!(
        "  avg engagement: {:.2}%  avg likes: {}  months: {}\n",
        summary.avg_engagement_rate, summary.avg_likes, summary.total_posts
    ));

    if let Some(trends) = &report.trends {
        out.push_str(&format!(
            "  trends: followers {:?}, engagement {:?}, likes {:?}, comments {:?}\n",
            trends.followers, trends.engagement, trends.likes_per_post, trends.comments_per_post
        ));
    }

    out.push_str(&format!(
        "\n  {:<10} {:>10} {:>8} {:>9} {:>7}\n",
        "MONTH", "FOLLOWERS", "LIKES", "COMMENTS", "ENG %"
    ));
    for month in report.months {
        out.push_str(&format!(
            "  {:<10} {:>10} {:>8} {:>9} {:>7.2}\n",
            month.month,
            month.followers,
            month.avg_likes_post,
            month.avg_comments_post,
            month.engagement_rate
        ));
    }
    out
}
