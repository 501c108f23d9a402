use crate::client::WikiArtClient;
use crate::config::FetchConfig;
use crate::padder::RequestPadder;
use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use wikiart_model::{Artist, Painting};

/// On-disk JSON cache for artist and painting metadata, keyed by artist
/// URL slug.
///
/// Both load operations are best-effort: a network or IO failure is logged
/// and degrades to an empty result so the surrounding artist loop keeps
/// going. Cache hits perform zero network requests.
#[derive(Debug)]
pub struct MetadataStore {
    meta_dir: PathBuf,
    commit: bool,
    override_existing: bool,
}

impl MetadataStore {
    pub fn new(config: &FetchConfig) -> Self {
        MetadataStore {
            meta_dir: config.meta_dir(),
            commit: config.commit,
            override_existing: config.override_existing,
        }
    }

    /// Path of the cached artist listing.
    pub fn artists_path(&self) -> PathBuf {
        self.meta_dir.join("artists.json")
    }

    /// Path of the cached painting list for one artist slug.
    pub fn paintings_path(&self, artist_url: &str) -> PathBuf {
        self.meta_dir.join(format!("{artist_url}.json"))
    }

    /// Read the cached artist listing only. No network fallback, nothing
    /// written; a missing or unreadable cache is an empty result.
    pub fn load_cached_artists(&self) -> Vec<Artist> {
        read_cached(&self.artists_path())
    }

    /// Read one artist's cached painting list only. No network fallback,
    /// nothing written.
    pub fn load_cached_paintings(&self, artist_url: &str) -> Vec<Painting> {
        read_cached(&self.paintings_path(artist_url))
    }

    /// Load the artist listing from cache, or fetch and (in commit mode)
    /// persist it.
    pub async fn load_or_fetch_artists(&self, client: &WikiArtClient) -> Vec<Artist> {
        let path = self.artists_path();

        if path.exists() && !self.override_existing {
            match read_json::<Vec<Artist>>(&path) {
                Ok(artists) => {
                    tracing::info!(path = %path.display(), count = artists.len(), "Loaded artists from cache");
                    return artists;
                }
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "Unreadable artists cache; refetching");
                }
            }
        }

        let started = Instant::now();
        match client.artists_alphabet().await {
            Ok(artists) => {
                if self.commit {
                    if let Err(error) = write_json(&path, &artists) {
                        tracing::error!(path = %path.display(), %error, "Failed to persist artists");
                    }
                }
                tracing::info!(
                    count = artists.len(),
                    elapsed_secs = format!("{:.2}", started.elapsed().as_secs_f64()),
                    "Fetched artists"
                );
                artists
            }
            Err(error) => {
                tracing::error!(%error, "Artist listing fetch failed");
                Vec::new()
            }
        }
    }

    /// Load one artist's merged painting list from cache, or fetch it:
    /// summary list first, then a paced detail request per painting, the
    /// detail overlaid onto the summary record.
    pub async fn load_or_fetch_paintings(
        &self,
        client: &WikiArtClient,
        padder: &mut RequestPadder,
        artist: &Artist,
    ) -> Vec<Painting> {
        let path = self.paintings_path(&artist.url);

        if path.exists() && !self.override_existing {
            match read_json::<Vec<Painting>>(&path) {
                Ok(paintings) => {
                    tracing::debug!(artist = %artist.url, count = paintings.len(), "Loaded paintings from cache");
                    return paintings;
                }
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "Unreadable paintings cache; refetching");
                }
            }
        }

        let started = Instant::now();
        match self.fetch_paintings(client, padder, artist).await {
            Ok(paintings) => {
                if self.commit {
                    if let Err(error) = write_json(&path, &paintings) {
                        tracing::error!(path = %path.display(), %error, "Failed to persist paintings");
                    }
                }
                tracing::info!(
                    artist = %artist.artist_name,
                    count = paintings.len(),
                    elapsed_secs = format!("{:.2}", started.elapsed().as_secs_f64()),
                    "Fetched paintings"
                );
                paintings
            }
            Err(error) => {
                tracing::error!(artist = %artist.url, %error, "Painting fetch failed");
                Vec::new()
            }
        }
    }

    async fn fetch_paintings(
        &self,
        client: &WikiArtClient,
        padder: &mut RequestPadder,
        artist: &Artist,
    ) -> Result<Vec<Painting>> {
        let mut paintings = client.paintings_by_artist(&artist.url).await?;

        for painting in &mut paintings {
            padder.request_start().await;
            let detail = client.painting_detail(painting.content_id).await;
            padder.request_finished();

            // An error status keeps the summary record; a transport error
            // aborts the whole artist so the caller degrades it to empty.
            if let Some(detail) = detail? {
                painting.merge_detail(detail);
            }
        }

        Ok(paintings)
    }
}

fn read_cached<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Vec<T> {
    if !path.exists() {
        return Vec::new();
    }
    match read_json::<Vec<T>>(path) {
        Ok(values) => values,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "Unreadable cache file");
            Vec::new()
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<T> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn write_json<T: serde::Serialize>(path: &std::path::Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(tmp: &TempDir, override_existing: bool) -> (MetadataStore, WikiArtClient) {
        // Unroutable endpoint: any accidental network call fails fast
        let config = FetchConfig {
            base_url: "http://127.0.0.1:9/App".to_string(),
            base_dir: tmp.path().to_path_buf(),
            override_existing,
            ..FetchConfig::default()
        };
        let client = WikiArtClient::new(&config).unwrap();
        (MetadataStore::new(&config), client)
    }

    fn seed_cache(path: &std::path::Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[tokio::test]
    async fn test_artists_cache_hit_skips_network() {
        let tmp = TempDir::new().unwrap();
        let (store, client) = store_in(&tmp, false);
        seed_cache(
            &store.artists_path(),
            r#"[{"artistName":"Claude Monet","url":"claude-monet"}]"#,
        );

        let artists = store.load_or_fetch_artists(&client).await;
        assert_eq!(artists.len(), 1);
        assert_eq!(artists[0].artist_name, "Claude Monet");
    }

    #[tokio::test]
    async fn test_artists_fetch_failure_degrades_to_empty() {
        let tmp = TempDir::new().unwrap();
        let (store, client) = store_in(&tmp, false);

        let artists = store.load_or_fetch_artists(&client).await;
        assert!(artists.is_empty());
        // Nothing persisted for a failed fetch
        assert!(!store.artists_path().exists());
    }

    #[tokio::test]
    async fn test_corrupt_artists_cache_is_treated_as_miss() {
        let tmp = TempDir::new().unwrap();
        let (store, client) = store_in(&tmp, false);
        seed_cache(&store.artists_path(), "not json at all");

        // Falls through to the (unreachable) network and degrades to empty
        let artists = store.load_or_fetch_artists(&client).await;
        assert!(artists.is_empty());
    }

    #[tokio::test]
    async fn test_paintings_cache_hit_skips_network() {
        let tmp = TempDir::new().unwrap();
        let (store, client) = store_in(&tmp, false);
        let artist: Artist = serde_json::from_str(
            r#"{"artistName":"Claude Monet","url":"claude-monet"}"#,
        )
        .unwrap();
        seed_cache(
            &store.paintings_path(&artist.url),
            r#"[{"contentId":1,"title":"Water Lilies"}]"#,
        );

        let mut padder = RequestPadder::new(std::time::Duration::ZERO);
        let paintings = store
            .load_or_fetch_paintings(&client, &mut padder, &artist)
            .await;
        assert_eq!(paintings.len(), 1);
        assert_eq!(paintings[0].content_id, 1);
        // Cache hit paced nothing
        assert_eq!(padder.completed(), 0);
    }

    #[tokio::test]
    async fn test_paintings_fetch_failure_degrades_to_empty() {
        let tmp = TempDir::new().unwrap();
        let (store, client) = store_in(&tmp, false);
        let artist: Artist = serde_json::from_str(
            r#"{"artistName":"Claude Monet","url":"claude-monet"}"#,
        )
        .unwrap();

        let mut padder = RequestPadder::new(std::time::Duration::ZERO);
        let paintings = store
            .load_or_fetch_paintings(&client, &mut padder, &artist)
            .await;
        assert!(paintings.is_empty());
    }

    #[test]
    fn test_cache_only_reads_never_touch_network_or_disk() {
        let tmp = TempDir::new().unwrap();
        let (store, _client) = store_in(&tmp, false);
        seed_cache(
            &store.artists_path(),
            r#"[{"artistName":"Claude Monet","url":"claude-monet"}]"#,
        );

        let artists = store.load_cached_artists();
        assert_eq!(artists.len(), 1);

        // Missing cache is an empty result, not a fetch
        assert!(store.load_cached_paintings("claude-monet").is_empty());
        assert!(!store.paintings_path("claude-monet").exists());
    }

    #[tokio::test]
    async fn test_override_ignores_existing_cache() {
        let tmp = TempDir::new().unwrap();
        let (store, client) = store_in(&tmp, true);
        seed_cache(
            &store.artists_path(),
            r#"[{"artistName":"Claude Monet","url":"claude-monet"}]"#,
        );

        // Override forces a refetch, which fails against the unroutable
        // endpoint instead of returning the cached record
        let artists = store.load_or_fetch_artists(&client).await;
        assert!(artists.is_empty());
    }
}
