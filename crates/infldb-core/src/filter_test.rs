use super::*;
use crate::listing::{InfluencerListing, PlatformAccount};
use crate::platform::Platform;

fn profile(
    id: u32,
    name: &str,
    platform: Platform,
    followers: u64,
    location: Option<&str>,
    tags: &[&str],
) -> Profile {
    Profile {
        id,
        name: name.to_string(),
        handle: None,
        platform,
        followers,
        location: location.map(str::to_string),
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
        profile_image: None,
        bio: None,
    }
}

fn sample() -> Vec<Profile> {
    vec![
        profile(
            1,
            "Ann",
            Platform::Instagram,
            1_500_000,
            Some("United States"),
            &["Fashion", "Beauty"],
        ),
        profile(2, "Bo", Platform::TikTok, 2_000, Some("India"), &["Gaming"]),
        profile(3, "Cy", Platform::YouTube, 800_000, None, &["Tech Reviews"]),
        profile(4, "Di", Platform::Threads, 50_000, Some("Brazil"), &[]),
        profile(
            5,
            "Ed",
            Platform::Instagram,
            300_000,
            Some("India"),
            &["Fitness", "Food"],
        ),
    ]
}

fn names<T>(items: &[&T], name: impl Fn(&T) -> &str) -> Vec<String> {
    items.iter().map(|i| name(*i).to_string()).collect()
}

fn profile_names(items: &[&Profile]) -> Vec<String> {
    names(items, |p| p.name.as_str())
}

// -----------------------------------------------------------------------
// single predicates
// -----------------------------------------------------------------------

#[test]
fn empty_filter_keeps_everything_in_order() {
    let data = sample();
    let filter = ProfileFilter::default();
    assert!(filter.is_empty());
    assert_eq!(
        profile_names(&apply_filter(&data, &filter)),
        ["Ann", "Bo", "Cy", "Di", "Ed"]
    );
}

#[test]
fn niche_matches_tag_substring_case_insensitively() {
    let data = sample();
    let filter = ProfileFilter {
        niche: "TECH".to_string(),
        ..ProfileFilter::default()
    };
    assert_eq!(profile_names(&apply_filter(&data, &filter)), ["Cy"]);
}

#[test]
fn niche_never_matches_profiles_without_tags() {
    let data = sample();
    let filter = ProfileFilter {
        niche: "a".to_string(),
        ..ProfileFilter::default()
    };
    let result = profile_names(&apply_filter(&data, &filter));
    assert!(!result.contains(&"Di".to_string()));
}

#[test]
fn tags_filter_uses_substring_semantics() {
    let data = sample();
    let filter = ProfileFilter {
        tags: "foo".to_string(),
        ..ProfileFilter::default()
    };
    assert_eq!(profile_names(&apply_filter(&data, &filter)), ["Ed"]);
}

#[test]
fn location_skips_profiles_without_location() {
    let data = sample();
    let filter = ProfileFilter {
        location: "in".to_string(),
        ..ProfileFilter::default()
    };
    assert_eq!(profile_names(&apply_filter(&data, &filter)), ["Bo", "Ed"]);
}

#[test]
fn follower_range_is_inclusive() {
    let data = sample();
    let filter = ProfileFilter {
        min_followers: 2_000,
        max_followers: 300_000,
        ..ProfileFilter::default()
    };
    assert_eq!(
        profile_names(&apply_filter(&data, &filter)),
        ["Bo", "Di", "Ed"]
    );
}

#[test]
fn follower_range_inactive_at_defaults() {
    let filter = ProfileFilter::default();
    assert!(!filter.follower_range_active());
}

#[test]
fn follower_range_active_with_only_min_uses_default_max() {
    let data = sample();
    let filter = ProfileFilter {
        min_followers: 100_000,
        ..ProfileFilter::default()
    };
    assert!(filter.follower_range_active());
    assert_eq!(profile_names(&apply_filter(&data, &filter)), ["Cy", "Ed"]);
}

#[test]
fn follower_range_active_when_max_moves_off_sentinel() {
    let data = sample();
    let filter = ProfileFilter {
        max_followers: 1_000_000_000,
        ..ProfileFilter::default()
    };
    assert!(filter.follower_range_active());
    assert_eq!(apply_filter(&data, &filter).len(), data.len());
}

#[test]
fn platform_is_trimmed_case_insensitive_equality() {
    let data = sample();
    let filter = ProfileFilter {
        platform: "  instagram ".to_string(),
        ..ProfileFilter::default()
    };
    assert_eq!(profile_names(&apply_filter(&data, &filter)), ["Ann", "Ed"]);
}

#[test]
fn platform_does_not_match_by_substring() {
    let data = sample();
    let filter = ProfileFilter {
        platform: "insta".to_string(),
        ..ProfileFilter::default()
    };
    assert!(apply_filter(&data, &filter).is_empty());
}

// -----------------------------------------------------------------------
// composition
// -----------------------------------------------------------------------

fn single_field_filters() -> Vec<ProfileFilter> {
    vec![
        ProfileFilter {
            niche: "f".to_string(),
            ..ProfileFilter::default()
        },
        ProfileFilter {
            tags: "e".to_string(),
            ..ProfileFilter::default()
        },
        ProfileFilter {
            location: "india".to_string(),
            ..ProfileFilter::default()
        },
        ProfileFilter {
            min_followers: 10_000,
            max_followers: 900_000,
            ..ProfileFilter::default()
        },
        ProfileFilter {
            platform: "Instagram".to_string(),
            ..ProfileFilter::default()
        },
    ]
}

fn combine(a: &ProfileFilter, b: &ProfileFilter) -> ProfileFilter {
    let pick = |x: &String, y: &String| if x.is_empty() { y.clone() } else { x.clone() };
    let (min_followers, max_followers) = if a.follower_range_active() {
        (a.min_followers, a.max_followers)
    } else {
        (b.min_followers, b.max_followers)
    };
    ProfileFilter {
        niche: pick(&a.niche, &b.niche),
        tags: pick(&a.tags, &b.tags),
        location: pick(&a.location, &b.location),
        min_followers,
        max_followers,
        platform: pick(&a.platform, &b.platform),
    }
}

#[test]
fn two_fields_equal_intersection_of_single_results() {
    let data = sample();
    let singles = single_field_filters();
    for (i, a) in singles.iter().enumerate() {
        for b in singles.iter().skip(i + 1) {
            let left = apply_filter(&data, a);
            let right = apply_filter(&data, b);
            let expected: Vec<&Profile> = left
                .iter()
                .copied()
                .filter(|p| right.iter().any(|q| std::ptr::eq(*p, *q)))
                .collect();
            let combined = apply_filter(&data, &combine(a, b));
            assert_eq!(
                profile_names(&combined),
                profile_names(&expected),
                "combining {a:?} and {b:?}"
            );
        }
    }
}

#[test]
fn niche_and_tags_must_both_pass() {
    let data = sample();
    let filter = ProfileFilter {
        niche: "fashion".to_string(),
        tags: "gaming".to_string(),
        ..ProfileFilter::default()
    };
    assert!(apply_filter(&data, &filter).is_empty());
}

#[test]
fn rerunning_same_filter_is_idempotent() {
    let data = sample();
    let filter = ProfileFilter {
        location: "a".to_string(),
        min_followers: 1,
        max_followers: 2_000_000,
        ..ProfileFilter::default()
    };
    let first = apply_filter(&data, &filter);
    let second = apply_filter(&data, &filter);
    assert_eq!(first, second);
}

// -----------------------------------------------------------------------
// multi-platform listings
// -----------------------------------------------------------------------

#[test]
fn listing_range_uses_summed_accounts() {
    let listings = vec![
        InfluencerListing {
            name: "Multi".to_string(),
            accounts: vec![
                PlatformAccount {
                    platform: Platform::Instagram,
                    handle: None,
                    followers: 600_000,
                },
                PlatformAccount {
                    platform: Platform::YouTube,
                    handle: None,
                    followers: 600_000,
                },
            ],
            ..InfluencerListing::default()
        },
        InfluencerListing {
            name: "Small".to_string(),
            metrics_followers: Some(5_000),
            ..InfluencerListing::default()
        },
    ];
    let filter = ProfileFilter {
        min_followers: 1_000_000,
        max_followers: 2_000_000,
        ..ProfileFilter::default()
    };
    let result = apply_filter(&listings, &filter);
    assert_eq!(names(&result, |l| l.name.as_str()), ["Multi"]);
}

#[test]
fn listing_without_platform_never_matches_platform_filter() {
    let listings = vec![InfluencerListing {
        name: "Nowhere".to_string(),
        ..InfluencerListing::default()
    }];
    let filter = ProfileFilter {
        platform: "instagram".to_string(),
        ..ProfileFilter::default()
    };
    assert!(apply_filter(&listings, &filter).is_empty());
}
