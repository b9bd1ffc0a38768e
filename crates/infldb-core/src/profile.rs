use serde::{Deserialize, Serialize};

use crate::filter::{apply_filter, ProfileFilter};
use crate::platform::{Platform, PLATFORM_ID_SPAN};

/// Base URL of the seeded placeholder image service used when a source row
/// carries no profile picture.
pub const PLACEHOLDER_IMAGE_BASE: &str = "https://picsum.photos/seed";

/// A creator account on one platform, normalized from a source export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Base id, unique within the platform's row set.
    pub id: u32,
    pub name: String,
    pub handle: Option<String>,
    pub platform: Platform,
    pub followers: u64,
    pub location: Option<String>,
    /// Niches / topics, trimmed and non-empty.
    pub tags: Vec<String>,
    pub profile_image: Option<String>,
    pub bio: Option<String>,
}

impl Profile {
    #[must_use]
    pub fn key(&self) -> ProfileKey {
        ProfileKey::new(self.platform.clone(), self.id)
    }

    /// Legacy numeric id; `None` when the base id is past the platform's range.
    #[must_use]
    pub fn composite_id(&self) -> Option<CompositeId> {
        CompositeId::encode(&self.platform, self.id)
    }
}

/// Explicit identity of a profile within a merged set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileKey {
    pub platform: Platform,
    pub base_id: u32,
}

impl ProfileKey {
    #[must_use]
    pub fn new(platform: Platform, base_id: u32) -> Self {
        Self { platform, base_id }
    }

    /// Seed for the placeholder image service.
    ///
    /// Uses the composite id when one exists so that existing placeholder URLs
    /// stay stable, and the slug form (`"tiktok-1204"`) otherwise.
    #[must_use]
    pub fn image_seed(&self) -> String {
        match CompositeId::encode(&self.platform, self.base_id) {
            Some(composite) => composite.to_string(),
            None => format!("{}-{}", self.platform.slug(), self.base_id),
        }
    }

    /// Deterministic placeholder image URL for this identity.
    #[must_use]
    pub fn placeholder_image(&self) -> String {
        format!("{PLACEHOLDER_IMAGE_BASE}/{}/200", self.image_seed())
    }
}

impl std::fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.platform.slug(), self.base_id)
    }
}

/// Platform-offset encoded profile id (`offset(platform) + base_id`).
///
/// Only base ids in `1..=PLATFORM_ID_SPAN` are encodable; anything larger
/// would run into the next platform's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompositeId(pub u32);

impl CompositeId {
    #[must_use]
    pub fn encode(platform: &Platform, base_id: u32) -> Option<Self> {
        if base_id == 0 || base_id > PLATFORM_ID_SPAN {
            return None;
        }
        Some(Self(platform.id_offset() + base_id))
    }

    /// Recovers the base id by subtracting the platform's offset.
    #[must_use]
    pub fn decode(self, platform: &Platform) -> Option<u32> {
        let base_id = self.0.checked_sub(platform.id_offset())?;
        (1..=PLATFORM_ID_SPAN).contains(&base_id).then_some(base_id)
    }

    /// [`Self::decode`] against a free-text platform label (query parameter).
    #[must_use]
    pub fn decode_label(self, platform: &str) -> Option<ProfileKey> {
        let platform = Platform::parse(platform);
        let base_id = self.decode(&platform)?;
        Some(ProfileKey::new(platform, base_id))
    }
}

impl std::fmt::Display for CompositeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The merged sequence of profiles from every source, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileSet {
    profiles: Vec<Profile>,
}

impl ProfileSet {
    #[must_use]
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    /// Concatenates per-source sequences, preserving their order.
    #[must_use]
    pub fn merge<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = Vec<Profile>>,
    {
        Self {
            profiles: parts.into_iter().flatten().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Profile> {
        self.profiles.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Profile] {
        &self.profiles
    }

    #[must_use]
    pub fn find(&self, key: &ProfileKey) -> Option<&Profile> {
        self.profiles
            .iter()
            .find(|p| p.id == key.base_id && p.platform.matches_label(key.platform.label()))
    }

    /// Detail-view lookup: inverts the composite id for `platform` and finds
    /// the matching row.
    #[must_use]
    pub fn find_by_composite(&self, platform: &str, composite: CompositeId) -> Option<&Profile> {
        let key = composite.decode_label(platform)?;
        self.find(&key)
    }

    #[must_use]
    pub fn filter(&self, filter: &ProfileFilter) -> Vec<&Profile> {
        apply_filter(&self.profiles, filter)
    }
}

impl<'a> IntoIterator for &'a ProfileSet {
    type Item = &'a Profile;
    type IntoIter = std::slice::Iter<'a, Profile>;

    fn into_iter(self) -> Self::IntoIter {
        self.profiles.iter()
    }
}
