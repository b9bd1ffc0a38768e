//! Row normalization from a parsed export into [`infldb_core::Profile`]s.
//!
//! Column lookup is delegated to [`crate::schema`]; this module decides what
//! each field means once a value has been found.

use std::collections::HashSet;

use infldb_core::{Platform, Profile, ProfileKey};

use crate::followers::parse_followers;
use crate::schema::{Field, ResolvedSchema};
use crate::table::{CsvRow, CsvTable};

/// Profiles kept from one table plus the number of rows dropped on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedTable {
    pub profiles: Vec<Profile>,
    pub dropped: usize,
}

/// Normalizes one data row. Returns `None` when no name can be resolved.
///
/// `row_index` is the zero-based position of the row among all data rows of
/// its file; it becomes the base id (`row_index + 1`) unless the row carries
/// its own positive `id`.
#[must_use]
pub fn normalize_row(
    row: &CsvRow,
    row_index: usize,
    platform: &Platform,
    schema: &ResolvedSchema,
) -> Option<Profile> {
    let raw_name = schema.value(Field::Name, row)?;

    // Some exports pack the handle into the name cell: "Ann Lee @annlee".
    let (name, split_handle) = match raw_name.split_once(" @") {
        Some((name, handle)) => (name.trim(), non_empty(handle)),
        None => (raw_name, None),
    };
    if name.is_empty() {
        return None;
    }

    let handle = schema
        .value(Field::Handle, row)
        .map(str::to_owned)
        .or(split_handle);

    let id = schema
        .value(Field::Id, row)
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|id| *id > 0)
        .unwrap_or_else(|| u32::try_from(row_index + 1).unwrap_or(u32::MAX));

    let tags = schema
        .value(Field::Tags, row)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();

    let followers = schema
        .value(Field::Followers, row)
        .map_or(0, parse_followers);

    let profile_image = schema
        .value(Field::Image, row)
        .map_or_else(
            || ProfileKey::new(platform.clone(), id).placeholder_image(),
            str::to_owned,
        );

    Some(Profile {
        id,
        name: name.to_owned(),
        handle,
        platform: platform.clone(),
        followers,
        location: schema.value(Field::Location, row).map(str::to_owned),
        tags,
        profile_image: Some(profile_image),
        bio: schema.value(Field::Bio, row).map(str::to_owned),
    })
}

/// Normalizes every row of `table`, keeping source order.
///
/// Base ids are unique within the result: a row whose id was already taken
/// by an earlier row is dropped and counted in `dropped`.
#[must_use]
pub fn normalize_table(
    table: &CsvTable,
    platform: &Platform,
    schema: &ResolvedSchema,
) -> NormalizedTable {
    let mut out = NormalizedTable {
        profiles: Vec::with_capacity(table.rows.len()),
        dropped: 0,
    };
    let mut seen = HashSet::with_capacity(table.rows.len());
    for (index, row) in table.rows.iter().enumerate() {
        match normalize_row(row, index, platform, schema) {
            Some(profile) if seen.insert(profile.id) => out.profiles.push(profile),
            Some(profile) => {
                tracing::warn!(
                    %platform,
                    id = profile.id,
                    row = index + 1,
                    name = %profile.name,
                    "duplicate base id, row dropped"
                );
                out.dropped += 1;
            }
            None => out.dropped += 1,
        }
    }
    out
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
