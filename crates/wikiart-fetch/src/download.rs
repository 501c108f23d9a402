use crate::client::WikiArtClient;
use crate::config::FetchConfig;
use crate::naming;
use crate::padder::RequestPadder;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use wikiart_model::Painting;

/// Header of the download manifest; one row appended per saved image.
const MANIFEST_HEADER: &str = "path,style,artist,title";

/// Result of one download attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Image streamed to disk and recorded in the manifest.
    Saved(PathBuf),
    /// An equivalent file already exists in the pre-seeded raw dataset.
    SkippedRaw,
    /// The target file already exists and override mode is off.
    SkippedExisting,
    /// Download failed; any partial file was removed. The run continues.
    Failed,
}

/// Streams painting images into the `dataset/<style>/<artist>/<title>.jpg`
/// tree and keeps the CSV manifest in step with the files on disk.
#[derive(Debug)]
pub struct ImageDownloader {
    dataset_dir: PathBuf,
    raw_dir: PathBuf,
    manifest_path: PathBuf,
    override_existing: bool,
}

/// Derive the sanitized `<style>/<artist>/<title>.jpg` path for a painting,
/// relative to the dataset root.
///
/// Missing or empty fields fall back to `unknownStyle`, `unknownArtist`,
/// and the numeric content id.
pub fn dataset_relative_path(painting: &Painting) -> PathBuf {
    let style = non_empty(painting.style.as_deref()).unwrap_or("unknownStyle");
    let artist = non_empty(painting.artist_name.as_deref())
        .or_else(|| non_empty(painting.artist_url.as_deref()))
        .unwrap_or("unknownArtist");
    let title = non_empty(painting.title.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| painting.content_id.to_string());

    let style = naming::sanitize(style);
    let artist = naming::sanitize(artist);
    let title = naming::sanitize_title(&title);

    Path::new(&style).join(&artist).join(format!("{title}.jpg"))
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

impl ImageDownloader {
    pub fn new(config: &FetchConfig) -> Self {
        ImageDownloader {
            dataset_dir: config.dataset_dir(),
            raw_dir: config.raw_dir.clone(),
            manifest_path: config.manifest_path(),
            override_existing: config.override_existing,
        }
    }

    /// Download one painting image, skipping work already on disk.
    pub async fn download(
        &self,
        client: &WikiArtClient,
        padder: &mut RequestPadder,
        painting: &Painting,
    ) -> DownloadOutcome {
        let Some(image) = non_empty(painting.image.as_deref()) else {
            tracing::warn!(content_id = painting.content_id, "Painting has no image URL");
            return DownloadOutcome::Failed;
        };
        let url = naming::full_resolution_url(image);
        let relative = dataset_relative_path(painting);

        // A matching file in the curated raw dataset satisfies the entry
        // without a download or a manifest row.
        let raw = self.raw_dir.join(&relative);
        if raw.exists() {
            tracing::debug!(path = %relative.display(), "Already in raw dataset");
            return DownloadOutcome::SkippedRaw;
        }

        let target = self.dataset_dir.join(&relative);
        if target.exists() && !self.override_existing {
            tracing::debug!(path = %relative.display(), "Already downloaded");
            return DownloadOutcome::SkippedExisting;
        }

        if let Err(error) = self.prepare_target(&target) {
            tracing::error!(path = %target.display(), %error, "Failed to prepare target");
            return DownloadOutcome::Failed;
        }

        match self.stream_and_record(client, padder, url, &target, &relative).await {
            Ok(()) => {
                tracing::info!(path = %relative.display(), "Saved");
                DownloadOutcome::Saved(target)
            }
            Err(error) => {
                tracing::error!(url, %error, "Download failed");
                // Never leave a partial file behind
                if target.exists() {
                    if let Err(error) = fs::remove_file(&target) {
                        tracing::error!(path = %target.display(), %error, "Failed to remove partial file");
                    }
                }
                DownloadOutcome::Failed
            }
        }
    }

    fn prepare_target(&self, target: &Path) -> Result<()> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        self.ensure_manifest()?;
        Ok(())
    }

    async fn stream_and_record(
        &self,
        client: &WikiArtClient,
        padder: &mut RequestPadder,
        url: &str,
        target: &Path,
        relative: &Path,
    ) -> Result<()> {
        padder.request_start().await;
        let mut response = client.get_image(url).await?;
        padder.request_finished();

        let mut file = tokio::fs::File::create(target).await?;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        self.append_manifest_row(target, relative)?;
        Ok(())
    }

    /// Write the manifest header if the file does not exist yet.
    fn ensure_manifest(&self) -> Result<()> {
        if self.manifest_path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.manifest_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.manifest_path, format!("{MANIFEST_HEADER}\n"))?;
        Ok(())
    }

    /// Append one row for a saved image. Fields are sanitize()-restricted,
    /// so no CSV quoting is needed.
    fn append_manifest_row(&self, target: &Path, relative: &Path) -> Result<()> {
        use std::io::Write;

        let mut components = relative.iter().map(|c| c.to_string_lossy());
        let style = components.next().unwrap_or_default().to_string();
        let artist = components.next().unwrap_or_default().to_string();
        let title = relative
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(&self.manifest_path)?;
        writeln!(file, "{},{},{},{}", target.display(), style, artist, title)?;
        Ok(())
    }
}
