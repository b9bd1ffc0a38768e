//! Declarative column mapping from heterogeneous export headers to profile
//! fields.

use infldb_core::{ColumnOverrides, SourceConfig};

use crate::table::CsvRow;

/// Canonical profile fields a source column can feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Handle,
    Followers,
    Location,
    Tags,
    Image,
    Bio,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Id,
        Field::Name,
        Field::Handle,
        Field::Followers,
        Field::Location,
        Field::Tags,
        Field::Image,
        Field::Bio,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn builtin_candidates(self) -> &'static [&'static str] {
        match self {
            Field::Id => &["id", "ID"],
            Field::Name => &["NAME", "INFLUENCER NAME", "Creator Name", "creator_name"],
            Field::Handle => &["HANDLE", "USERNAME", "creator_username", "Creator Username"],
            Field::Followers => &["FOLLOWERS", "Followers", "followers", "Followers Count"],
            Field::Location => &["COUNTRY", "Location", "country"],
            Field::Tags => &["TAGS", "NICHES", "niches", "TOPIC OF INFLUENCE"],
            Field::Image => &["PROFILE PIC", "Profile Pic", "profile_pic"],
            Field::Bio => &["BIO", "bio"],
        }
    }

    fn overridden(self, overrides: &ColumnOverrides) -> Option<&Vec<String>> {
        match self {
            Field::Id => overrides.id.as_ref(),
            Field::Name => overrides.name.as_ref(),
            Field::Handle => overrides.handle.as_ref(),
            Field::Followers => overrides.followers.as_ref(),
            Field::Location => overrides.location.as_ref(),
            Field::Tags => overrides.tags.as_ref(),
            Field::Image => overrides.image.as_ref(),
            Field::Bio => overrides.bio.as_ref(),
        }
    }
}

/// Ordered candidate column names for every [`Field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSchema {
    candidates: [Vec<String>; 8],
}

impl Default for SourceSchema {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SourceSchema {
    /// The mapping shared by the bundled Instagram, Threads, TikTok, and
    /// YouTube exports.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            candidates: Field::ALL.map(|field| {
                field
                    .builtin_candidates()
                    .iter()
                    .map(|c| (*c).to_string())
                    .collect()
            }),
        }
    }

    /// Replaces the candidate list of every field the overrides name.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &ColumnOverrides) -> Self {
        for field in Field::ALL {
            if let Some(columns) = field.overridden(overrides) {
                self.candidates[field.index()].clone_from(columns);
            }
        }
        self
    }

    /// Built-in mapping plus the source's overrides.
    #[must_use]
    pub fn for_source(source: &SourceConfig) -> Self {
        Self::builtin().with_overrides(&source.columns)
    }

    #[must_use]
    pub fn candidates(&self, field: Field) -> &[String] {
        &self.candidates[field.index()]
    }

    /// Keeps only the candidates present in `headers`, preserving order.
    #[must_use]
    pub fn resolve(&self, headers: &[String]) -> ResolvedSchema {
        let candidates = self.candidates.clone().map(|columns| {
            columns
                .into_iter()
                .filter(|column| headers.iter().any(|h| h == column))
                .collect()
        });
        ResolvedSchema { candidates }
    }
}

/// A [`SourceSchema`] narrowed to one file's header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSchema {
    candidates: [Vec<String>; 8],
}

impl ResolvedSchema {
    #[must_use]
    pub fn columns(&self, field: Field) -> &[String] {
        &self.candidates[field.index()]
    }

    /// `true` when at least one column in the file can feed `field`.
    #[must_use]
    pub fn has(&self, field: Field) -> bool {
        !self.columns(field).is_empty()
    }

    /// First non-empty value among the field's columns, trimmed.
    #[must_use]
    pub fn value<'r>(&self, field: Field, row: &'r CsvRow) -> Option<&'r str> {
        self.columns(field)
            .iter()
            .filter_map(|column| row.get(column))
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
    }
}
