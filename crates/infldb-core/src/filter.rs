//! Explore filters over the merged profile sequence.
//!
//! Every set field adds one independent predicate; a profile is kept when it
//! passes all of them. The pass is a pure function of its inputs and keeps
//! source order, so callers simply re-run it whenever the filter or the
//! underlying set changes.

use serde::{Deserialize, Serialize};

use crate::profile::Profile;

/// Upper follower bound that leaves the range predicate switched off when
/// `min_followers` is also 0.
pub const DEFAULT_MAX_FOLLOWERS: u64 = 1_000_000;

/// Anything the explore filters can be evaluated against.
pub trait Filterable {
    fn tags(&self) -> &[String];
    fn location(&self) -> Option<&str>;
    /// Audience size used by the follower range predicate.
    fn follower_count(&self) -> u64;
    fn platform_label(&self) -> Option<&str>;
}

impl Filterable for Profile {
    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    fn follower_count(&self) -> u64 {
        self.followers
    }

    fn platform_label(&self) -> Option<&str> {
        Some(self.platform.label())
    }
}

/// Explore filter criteria. Empty strings count as unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileFilter {
    pub niche: String,
    pub tags: String,
    pub location: String,
    pub min_followers: u64,
    pub max_followers: u64,
    pub platform: String,
}

impl Default for ProfileFilter {
    fn default() -> Self {
        Self {
            niche: String::new(),
            tags: String::new(),
            location: String::new(),
            min_followers: 0,
            max_followers: DEFAULT_MAX_FOLLOWERS,
            platform: String::new(),
        }
    }
}

impl ProfileFilter {
    /// Whether the follower range predicate takes part in the pass.
    #[must_use]
    pub fn follower_range_active(&self) -> bool {
        self.min_followers > 0 || self.max_followers != DEFAULT_MAX_FOLLOWERS
    }

    /// `true` when no predicate is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.niche.is_empty()
            && self.tags.is_empty()
            && self.location.is_empty()
            && self.platform.is_empty()
            && !self.follower_range_active()
    }

    /// Evaluates every set predicate against `item`.
    pub fn matches<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        if !self.niche.is_empty() && !any_tag_contains(item.tags(), &self.niche) {
            return false;
        }
        if !self.tags.is_empty() && !any_tag_contains(item.tags(), &self.tags) {
            return false;
        }
        if !self.location.is_empty() {
            let wanted = self.location.to_lowercase();
            let located = item
                .location()
                .is_some_and(|loc| loc.to_lowercase().contains(&wanted));
            if !located {
                return false;
            }
        }
        if self.follower_range_active() {
            let followers = item.follower_count();
            if followers < self.min_followers || followers > self.max_followers {
                return false;
            }
        }
        if !self.platform.is_empty() {
            let wanted = self.platform.trim().to_lowercase();
            let same = item
                .platform_label()
                .is_some_and(|label| label.trim().to_lowercase() == wanted);
            if !same {
                return false;
            }
        }
        true
    }
}

/// Returns the items that pass `filter`, in their original order.
pub fn apply_filter<'a, T: Filterable>(items: &'a [T], filter: &ProfileFilter) -> Vec<&'a T> {
    items.iter().filter(|item| filter.matches(*item)).collect()
}

fn any_tag_contains(tags: &[String], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
