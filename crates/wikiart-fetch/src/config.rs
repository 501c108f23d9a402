use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for a fetch run.
///
/// Everything the components used to get from ambient module state is
/// carried here explicitly and passed in at construction.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Root of the WikiArt App API (listing, paintings, detail endpoints).
    pub base_url: String,
    /// Login endpoint for the one-shot session key exchange.
    pub login_url: String,
    /// Root output directory; `meta/`, `dataset/` and `metadata.csv` live under it.
    pub base_dir: PathBuf,
    /// Pre-seeded curated dataset; a matching file here suppresses a download.
    pub raw_dir: PathBuf,
    /// Persist fetched metadata to disk.
    pub commit: bool,
    /// Ignore caches and existing files; re-fetch and re-download unconditionally.
    pub override_existing: bool,
    /// Minimum delay between consecutive outbound requests.
    pub pacing: Duration,
    /// Timeout for JSON metadata requests.
    pub metadata_timeout: Duration,
    /// Timeout for image binary downloads.
    pub image_timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            base_url: "https://www.wikiart.org/en/App".to_string(),
            login_url: "https://www.wikiart.org/en/Api/2/login".to_string(),
            base_dir: PathBuf::from("wikiart"),
            raw_dir: PathBuf::from("raw"),
            commit: true,
            override_existing: false,
            pacing: Duration::from_millis(1000),
            metadata_timeout: Duration::from_secs(30),
            image_timeout: Duration::from_secs(120),
            user_agent: "wikiart/0.1 (dataset fetch tool)".to_string(),
        }
    }
}

impl FetchConfig {
    /// Directory holding `artists.json` and the per-artist painting files.
    pub fn meta_dir(&self) -> PathBuf {
        self.base_dir.join("meta")
    }

    /// Root of the organized `style/artist/title.jpg` image tree.
    pub fn dataset_dir(&self) -> PathBuf {
        self.base_dir.join("dataset")
    }

    /// CSV manifest listing every downloaded image.
    pub fn manifest_path(&self) -> PathBuf {
        self.base_dir.join("metadata.csv")
    }

    /// Config rooted at the given output directory, defaults elsewhere.
    pub fn with_base_dir(base_dir: impl AsRef<Path>) -> Self {
        FetchConfig {
            base_dir: base_dir.as_ref().to_path_buf(),
            ..FetchConfig::default()
        }
    }
}
