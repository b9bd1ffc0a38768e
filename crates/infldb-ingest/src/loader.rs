//! Concurrent, all-or-nothing loading of every configured source into one
//! merged [`ProfileSet`].

use std::future::Future;

use futures::future::try_join_all;
use infldb_core::{Profile, ProfileSet, SourceConfig};

use crate::client::SourceClient;
use crate::error::IngestError;
use crate::normalize::normalize_table;
use crate::schema::{Field, SourceSchema};
use crate::table::CsvTable;

/// Loads and merges the configured sources.
#[derive(Debug, Clone)]
pub struct ProfileLoader {
    client: SourceClient,
    sources: Vec<SourceConfig>,
}

impl ProfileLoader {
    #[must_use]
    pub fn new(client: SourceClient, sources: Vec<SourceConfig>) -> Self {
        Self { client, sources }
    }

    #[must_use]
    pub fn sources(&self) -> &[SourceConfig] {
        &self.sources
    }

    /// Fetches every source concurrently and concatenates the normalized
    /// profiles in source order. Profiles are not de-duplicated.
    ///
    /// **All-or-nothing**: the first source to fail aborts the batch. Fetches
    /// still in flight are dropped and nothing from the sources that did
    /// succeed is returned.
    ///
    /// # Errors
    ///
    /// Returns the first [`IngestError`] produced by any source.
    pub async fn load_all(&self) -> Result<ProfileSet, IngestError> {
        let parts = try_join_all(self.sources.iter().map(|source| self.load_source(source))).await?;
        let set = ProfileSet::merge(parts);
        tracing::info!(
            sources = self.sources.len(),
            profiles = set.len(),
            "merged profile sources"
        );
        Ok(set)
    }

    /// Like [`ProfileLoader::load_all`], but gives up as soon as `cancel`
    /// completes. In-flight fetches are dropped on cancellation.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Cancelled`] if `cancel` finishes first,
    /// otherwise whatever [`ProfileLoader::load_all`] returns.
    pub async fn load_all_until<C>(&self, cancel: C) -> Result<ProfileSet, IngestError>
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            () = cancel => {
                tracing::info!("profile load cancelled");
                Err(IngestError::Cancelled)
            }
            result = self.load_all() => result,
        }
    }

    async fn load_source(&self, source: &SourceConfig) -> Result<Vec<Profile>, IngestError> {
        let text = self.client.fetch_text(&source.location).await.inspect_err(|e| {
            tracing::error!(platform = %source.platform, location = %source.location, error = %e, "source fetch failed");
        })?;
        let table = CsvTable::parse(&text, &source.location)?;

        let schema = SourceSchema::for_source(source).resolve(&table.headers);
        if !schema.has(Field::Name) && !table.is_empty() {
            tracing::warn!(
                platform = %source.platform,
                location = %source.location,
                "no name column found; every row will be dropped"
            );
        }

        let normalized = normalize_table(&table, &source.platform, &schema);
        tracing::info!(
            platform = %source.platform,
            rows = table.len(),
            kept = normalized.profiles.len(),
            dropped = normalized.dropped,
            "loaded source"
        );
        Ok(normalized.profiles)
    }
}
