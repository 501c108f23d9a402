use crate::client::WikiArtClient;
use crate::config::FetchConfig;
use crate::download::{dataset_relative_path, DownloadOutcome, ImageDownloader};
use crate::error::FetchError;
use crate::padder::RequestPadder;
use crate::store::MetadataStore;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use wikiart_model::{Artist, PaintingGroup};

/// Which part of the fetched data a [`Fetcher::check`] audit covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckScope {
    Artists,
    Paintings,
    All,
}

/// Missing files found by a [`Fetcher::check`] audit. Reports only; nothing
/// is fixed.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// `meta/artists.json` is absent.
    pub artists_index_missing: bool,
    /// Artist slugs whose `meta/<slug>.json` is absent.
    pub missing_painting_meta: Vec<String>,
    /// Dataset image paths that should exist but do not.
    pub missing_images: Vec<PathBuf>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        !self.artists_index_missing
            && self.missing_painting_meta.is_empty()
            && self.missing_images.is_empty()
    }
}

/// Counters from a [`Fetcher::copy_everything`] pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DownloadStats {
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Drives the end-to-end pipeline: artist listing, per-artist painting
/// metadata, then every painting image, strictly in sequence.
///
/// The steps build on each other's in-memory state, so they must be invoked
/// in order; calling one before its precondition holds is a [`FetchError`].
pub struct Fetcher {
    config: FetchConfig,
    client: WikiArtClient,
    padder: RequestPadder,
    store: MetadataStore,
    downloader: ImageDownloader,
    artists: Vec<Artist>,
    painting_groups: Vec<PaintingGroup>,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = WikiArtClient::new(&config)?;
        let padder = RequestPadder::new(config.pacing);
        let store = MetadataStore::new(&config);
        let downloader = ImageDownloader::new(&config);
        Ok(Fetcher {
            config,
            client,
            padder,
            store,
            downloader,
            artists: Vec::new(),
            painting_groups: Vec::new(),
        })
    }

    /// Create the output directory scaffolding.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.config.base_dir).context("Failed to create base dir")?;
        fs::create_dir_all(self.config.meta_dir()).context("Failed to create meta dir")?;
        fs::create_dir_all(self.config.dataset_dir()).context("Failed to create dataset dir")?;
        Ok(())
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn painting_groups(&self) -> &[PaintingGroup] {
        &self.painting_groups
    }

    /// Load the artist listing (cache-first). An empty result is not fatal
    /// here; the later steps fail their precondition instead.
    pub async fn fetch_artists(&mut self) {
        tracing::info!("Fetching artists...");
        self.artists = self.store.load_or_fetch_artists(&self.client).await;
    }

    /// Rebuild run state from the on-disk metadata caches. Nothing is
    /// fetched or persisted, so an audit observes the disk as it is.
    pub fn load_cached_state(&mut self) {
        self.artists = self.store.load_cached_artists();
        let groups: Vec<PaintingGroup> = self
            .artists
            .iter()
            .map(|artist| self.store.load_cached_paintings(&artist.url))
            .collect();
        self.painting_groups = groups;
        tracing::info!(
            artists = self.artists.len(),
            groups = self.painting_groups.len(),
            "Loaded state from cache"
        );
    }

    /// Fetch painting metadata for every artist whose name contains
    /// `name` (case-insensitive).
    pub async fn fetch_artist(&mut self, name: &str) -> Result<(), FetchError> {
        tracing::info!(name, "Fetching paintings for matching artists");
        if self.artists.is_empty() {
            return Err(FetchError::NoArtistsLoaded);
        }

        // Groups are reset up front so a not-found name cannot leave a
        // previous call's groups behind for copy_everything.
        self.painting_groups.clear();

        let matches: Vec<Artist> = self
            .artists
            .iter()
            .filter(|a| a.name_matches(name))
            .cloned()
            .collect();
        if matches.is_empty() {
            return Err(FetchError::ArtistNotFound(name.to_string()));
        }

        for artist in &matches {
            let group = self
                .store
                .load_or_fetch_paintings(&self.client, &mut self.padder, artist)
                .await;
            self.painting_groups.push(group);
        }
        Ok(())
    }

    /// Fetch painting metadata for every artist, logging progress at
    /// roughly 10% increments.
    pub async fn fetch_all_paintings(&mut self) -> Result<(), FetchError> {
        tracing::info!("Fetching paintings for every artist");
        if self.artists.is_empty() {
            return Err(FetchError::NoArtistsLoaded);
        }

        self.painting_groups.clear();
        let artists = self.artists.clone();
        let progress_every = (artists.len() / 10).max(1);

        for (i, artist) in artists.iter().enumerate() {
            let group = self
                .store
                .load_or_fetch_paintings(&self.client, &mut self.padder, artist)
                .await;
            self.painting_groups.push(group);

            if i % progress_every == 0 {
                tracing::info!(percent = 100 * (i + 1) / artists.len(), "Progress");
            }
        }
        Ok(())
    }

    /// Download every painting image in every loaded group. Per-item
    /// failures are counted, not propagated.
    pub async fn copy_everything(&mut self) -> Result<DownloadStats, FetchError> {
        tracing::info!("Copying paintings");
        if self.painting_groups.is_empty() {
            return Err(FetchError::NoPaintingGroups);
        }

        let mut stats = DownloadStats::default();
        let groups = self.painting_groups.clone();
        for group in &groups {
            for painting in group {
                match self
                    .downloader
                    .download(&self.client, &mut self.padder, painting)
                    .await
                {
                    DownloadOutcome::Saved(_) => stats.saved += 1,
                    DownloadOutcome::SkippedRaw | DownloadOutcome::SkippedExisting => {
                        stats.skipped += 1
                    }
                    DownloadOutcome::Failed => stats.failed += 1,
                }
            }
        }

        tracing::info!(
            saved = stats.saved,
            skipped = stats.skipped,
            failed = stats.failed,
            "Copy pass finished"
        );
        Ok(stats)
    }

    /// Full pipeline: artists, then all painting metadata, then all images.
    pub async fn fetch_all(&mut self) -> Result<DownloadStats, FetchError> {
        self.fetch_artists().await;
        self.fetch_all_paintings().await?;
        self.copy_everything().await
    }

    /// Audit the on-disk state for the currently loaded artists and
    /// painting groups, logging a warning per missing file.
    pub fn check(&self, scope: CheckScope) -> CheckReport {
        tracing::info!(?scope, "Checking downloaded data");
        let mut report = CheckReport::default();

        if matches!(scope, CheckScope::Artists | CheckScope::All)
            && !self.store.artists_path().exists()
        {
            tracing::warn!("artists.json is missing");
            report.artists_index_missing = true;
        }

        if matches!(scope, CheckScope::Paintings | CheckScope::All) {
            for artist in &self.artists {
                if !self.store.paintings_path(&artist.url).exists() {
                    tracing::warn!(artist = %artist.url, "Paintings file is missing");
                    report.missing_painting_meta.push(artist.url.clone());
                }
            }

            let dataset_dir = self.config.dataset_dir();
            for group in &self.painting_groups {
                for painting in group {
                    let path = dataset_dir.join(dataset_relative_path(painting));
                    if !path.exists() {
                        tracing::warn!(content_id = painting.content_id, path = %path.display(), "Painting image is missing");
                        report.missing_images.push(path);
                    }
                }
            }
        }

        report
    }
}
