use serde::{Deserialize, Serialize};

use crate::filter::Filterable;
use crate::platform::Platform;
use crate::profile::Profile;

/// One account of a creator on a single platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformAccount {
    pub platform: Platform,
    pub handle: Option<String>,
    pub followers: u64,
}

/// A creator listed with several platform accounts.
///
/// `metrics_followers` is a precomputed audience size; when it is absent the
/// audience is the sum of the accounts' followers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfluencerListing {
    pub name: String,
    pub location: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Platform the listing is primarily shown under.
    pub platform: Option<Platform>,
    pub metrics_followers: Option<u64>,
    #[serde(default)]
    pub accounts: Vec<PlatformAccount>,
}

impl InfluencerListing {
    /// Total audience across every account.
    #[must_use]
    pub fn total_followers(&self) -> u64 {
        self.accounts
            .iter()
            .fold(0u64, |sum, a| sum.saturating_add(a.followers))
    }
}

impl Filterable for InfluencerListing {
    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    fn follower_count(&self) -> u64 {
        self.metrics_followers
            .unwrap_or_else(|| self.total_followers())
    }

    fn platform_label(&self) -> Option<&str> {
        self.platform.as_ref().map(Platform::label)
    }
}

impl From<&Profile> for InfluencerListing {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            location: profile.location.clone(),
            tags: profile.tags.clone(),
            platform: Some(profile.platform.clone()),
            metrics_followers: Some(profile.followers),
            accounts: vec![PlatformAccount {
                platform: profile.platform.clone(),
                handle: profile.handle.clone(),
                followers: profile.followers,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(platform: Platform, followers: u64) -> PlatformAccount {
        PlatformAccount {
            platform,
            handle: None,
            followers,
        }
    }

    #[test]
    fn follower_count_prefers_precomputed_metrics() {
        let listing = InfluencerListing {
            metrics_followers: Some(42),
            accounts: vec![account(Platform::Instagram, 1_000)],
            ..InfluencerListing::default()
        };
        assert_eq!(listing.follower_count(), 42);
    }

    #[test]
    fn follower_count_sums_accounts_without_metrics() {
        let listing = InfluencerListing {
            accounts: vec![
                account(Platform::Instagram, 1_000),
                account(Platform::YouTube, 2_500),
            ],
            ..InfluencerListing::default()
        };
        assert_eq!(listing.follower_count(), 3_500);
    }

    #[test]
    fn from_profile_carries_single_account() {
        let profile = Profile {
            id: 1,
            name: "Ann".to_string(),
            handle: Some("ann".to_string()),
            platform: Platform::Threads,
            followers: 900,
            location: Some("Norway".to_string()),
            tags: vec!["travel".to_string()],
            profile_image: None,
            bio: None,
        };
        let listing = InfluencerListing::from(&profile);
        assert_eq!(listing.accounts.len(), 1);
        assert_eq!(listing.follower_count(), 900);
        assert_eq!(listing.platform_label(), Some("Threads"));
    }
}
