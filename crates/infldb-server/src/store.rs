//! In-memory profile snapshot shared by every request handler.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use infldb_core::ProfileSet;
use infldb_ingest::{IngestError, ProfileLoader};
use tokio::sync::{Mutex, RwLock};

/// One complete, immutable load of every source.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub profiles: Arc<ProfileSet>,
    pub loaded_at: DateTime<Utc>,
}

/// Holds the current [`Snapshot`]. Readers clone the `Arc` and release the
/// lock straight away; a reload builds the new set before taking the write
/// lock.
///
/// Reloads run one at a time, so a slow load can never overwrite the result
/// of a load that started after it.
#[derive(Debug, Default)]
pub struct ProfileStore {
    current: RwLock<Option<Snapshot>>,
    reload_guard: Mutex<()>,
}

impl ProfileStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn preloaded(profiles: ProfileSet) -> Self {
        Self {
            current: RwLock::new(Some(Snapshot {
                profiles: Arc::new(profiles),
                loaded_at: Utc::now(),
            })),
            reload_guard: Mutex::new(()),
        }
    }

    /// The current snapshot, or `None` before the first successful load.
    pub async fn snapshot(&self) -> Option<Snapshot> {
        self.current.read().await.clone()
    }

    pub async fn replace(&self, profiles: ProfileSet) {
        let snapshot = Snapshot {
            profiles: Arc::new(profiles),
            loaded_at: Utc::now(),
        };
        *self.current.write().await = Some(snapshot);
    }

    /// Loads every source and swaps the result in. On failure the previous
    /// snapshot stays in place. A reload requested while another is running
    /// waits for it and then loads again.
    ///
    /// # Errors
    ///
    /// Returns the loader's [`IngestError`] after logging it.
    pub async fn reload(&self, loader: &ProfileLoader) -> Result<usize, IngestError> {
        let _running = self.reload_guard.lock().await;
        match loader.load_all().await {
            Ok(profiles) => {
                let count = profiles.len();
                self.replace(profiles).await;
                tracing::info!(profiles = count, "profile snapshot replaced");
                Ok(count)
            }
            Err(e) => {
                let kept = self
                    .snapshot()
                    .await
                    .map_or(0, |snapshot| snapshot.profiles.len());
                tracing::error!(error = %e, kept, "profile reload failed; keeping previous snapshot");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use infldb_core::{Platform, Profile, SourceConfig};
    use infldb_ingest::SourceClient;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn profile(name: &str) -> Profile {
        Profile {
            id: 1,
            name: name.to_string(),
            handle: None,
            platform: Platform::Instagram,
            followers: 10,
            location: None,
            tags: Vec::new(),
            profile_image: None,
            bio: None,
        }
    }

    fn loader(location: &str) -> ProfileLoader {
        let client = SourceClient::new(5, "infldb-test/0.1", 0, 0).expect("client");
        ProfileLoader::new(client, vec![SourceConfig::new(Platform::Instagram, location)])
    }

    #[tokio::test]
    async fn empty_store_has_no_snapshot() {
        assert!(ProfileStore::new().snapshot().await.is_none());
    }

    #[tokio::test]
    async fn failed_reload_keeps_previous_snapshot() {
        let store = ProfileStore::preloaded(ProfileSet::new(vec![profile("Ann")]));
        let err = store
            .reload(&loader("./definitely/not/here.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));

        let snapshot = store.snapshot().await.expect("snapshot kept");
        assert_eq!(snapshot.profiles.len(), 1);
        assert_eq!(snapshot.profiles.as_slice()[0].name, "Ann");
    }

    #[tokio::test]
    async fn successful_reload_swaps_snapshot() {
        let dir = std::env::temp_dir().join(format!("infldb-server-store-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let file = dir.join("instagram.csv");
        std::fs::write(&file, "NAME,FOLLOWERS\nBo,2K\nCy,3K\n").expect("write csv");

        let store = ProfileStore::preloaded(ProfileSet::new(vec![profile("Ann")]));
        let count = store
            .reload(&loader(&file.display().to_string()))
            .await
            .expect("reload succeeds");
        assert_eq!(count, 2);

        let snapshot = store.snapshot().await.expect("snapshot");
        let names: Vec<&str> = snapshot.profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Bo", "Cy"]);
    }

    #[tokio::test]
    async fn overlapping_reloads_finish_with_the_later_load() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/instagram.csv"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("NAME\nOld\n")
                    .set_delay(Duration::from_millis(300)),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/instagram.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string("NAME\nNew\n"))
            .mount(&server)
            .await;

        let store = ProfileStore::new();
        let loader = loader(&format!("{}/instagram.csv", server.uri()));
        let (first, second) = tokio::join!(store.reload(&loader), store.reload(&loader));
        first.expect("first reload");
        second.expect("second reload");

        let snapshot = store.snapshot().await.expect("snapshot");
        assert_eq!(snapshot.profiles.as_slice()[0].name, "New");
        assert_eq!(server.received_requests().await.expect("recorded").len(), 2);
    }

    #[tokio::test]
    async fn readers_keep_their_snapshot_across_a_swap() {
        let store = ProfileStore::preloaded(ProfileSet::new(vec![profile("Ann")]));
        let before = store.snapshot().await.expect("snapshot");
        store.replace(ProfileSet::default()).await;
        assert_eq!(before.profiles.len(), 1);
        assert!(store.snapshot().await.expect("snapshot").profiles.is_empty());
    }
}
