use serde::{Deserialize, Serialize};

/// Width of the numeric id range reserved for each platform in the legacy
/// composite id encoding.
pub const PLATFORM_ID_SPAN: u32 = 1000;

/// Social platform a creator account lives on.
///
/// Labels are matched case-insensitively after trimming. Anything that is not
/// a known platform is kept verbatim as [`Platform::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Instagram,
    Threads,
    TikTok,
    YouTube,
    LinkedIn,
    Facebook,
    Twitch,
    Other(String),
}

impl Platform {
    /// Parses a platform label, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_lowercase().as_str() {
            "instagram" => Platform::Instagram,
            "threads" => Platform::Threads,
            "tiktok" => Platform::TikTok,
            "youtube" => Platform::YouTube,
            "linkedin" => Platform::LinkedIn,
            "facebook" => Platform::Facebook,
            "twitch" => Platform::Twitch,
            _ => Platform::Other(trimmed.to_string()),
        }
    }

    /// Canonical display label, e.g. `"TikTok"`.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Threads => "Threads",
            Platform::TikTok => "TikTok",
            Platform::YouTube => "YouTube",
            Platform::LinkedIn => "LinkedIn",
            Platform::Facebook => "Facebook",
            Platform::Twitch => "Twitch",
            Platform::Other(label) => label,
        }
    }

    /// Lower-cased label used in file names and URL paths, e.g. `"tiktok"`.
    #[must_use]
    pub fn slug(&self) -> String {
        self.label().to_lowercase()
    }

    /// Offset added to a base id to form the legacy composite id.
    ///
    /// Only the four original export platforms have a reserved range; every
    /// other platform shares offset 0 with Instagram.
    #[must_use]
    pub fn id_offset(&self) -> u32 {
        match self {
            Platform::Threads => PLATFORM_ID_SPAN,
            Platform::TikTok => 2 * PLATFORM_ID_SPAN,
            Platform::YouTube => 3 * PLATFORM_ID_SPAN,
            _ => 0,
        }
    }

    /// Trimmed, case-insensitive comparison against a free-text label.
    #[must_use]
    pub fn matches_label(&self, label: &str) -> bool {
        self.label().trim().to_lowercase() == label.trim().to_lowercase()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

impl From<String> for Platform {
    fn from(label: String) -> Self {
        Platform::parse(&label)
    }
}

impl From<&str> for Platform {
    fn from(label: &str) -> Self {
        Platform::parse(label)
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.label().to_string()
    }
}
