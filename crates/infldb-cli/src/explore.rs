//! `explore` and `sources` command handlers.

use infldb_core::{AppConfig, Profile};
use infldb_ingest::format_followers;

use crate::{load_profiles, ExploreArgs};

pub(crate) async fn run_explore(config: &AppConfig, args: &ExploreArgs) -> anyhow::Result<()> {
    let set = load_profiles(config).await?;
    let filter = args.to_filter();
    let matches = set.filter(&filter);
    let shown: Vec<&Profile> = matches.iter().copied().take(args.limit).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    println!("{}", header_line());
    for profile in &shown {
        println!("{}", profile_line(profile));
    }
    println!(
        "{} of {} matching profiles ({} loaded)",
        shown.len(),
        matches.len(),
        set.len()
    );
    Ok(())
}

pub(crate) fn run_sources(config: &AppConfig) -> anyhow::Result<()> {
    let file = infldb_core::load_sources_or_default(&config.sources_path)?;
    if !config.sources_path.exists() {
        println!(
            "{} not found; using built-in sources",
            config.sources_path.display()
        );
    }
    for source in &file.sources {
        let overrides = if source.columns == infldb_core::ColumnOverrides::default() {
            ""
        } else {
            "  (column overrides)"
        };
        println!("{:<10} {}{overrides}", source.platform, source.location);
    }
    Ok(())
}

pub(crate) fn header_line() -> String {
    format!(
        "{:>5}  {:<10} {:<28} {:<20} {:>8}  {:<16} {}",
        "ID", "PLATFORM", "NAME", "HANDLE", "FOLLOW", "LOCATION", "TAGS"
    )
}

/// One table row. The id column shows the composite id, or `-` when the
/// base id has no composite form.
pub(crate) fn profile_line(profile: &Profile) -> String {
    let id = profile
        .composite_id()
        .map_or_else(|| "-".to_string(), |c| c.to_string());
    format!(
        "{:>5}  {:<10} {:<28} {:<20} {:>8}  {:<16} {}",
        id,
        profile.platform.label(),
        truncate(&profile.name, 28),
        truncate(profile.handle.as_deref().unwrap_or("-"), 20),
        format_followers(profile.followers),
        truncate(profile.location.as_deref().unwrap_or("-"), 16),
        profile.tags.join(", ")
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
