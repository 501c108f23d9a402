use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An artist record from the alphabetical listing endpoint.
///
/// Only the fields the fetcher acts on are typed; everything else the API
/// returns is preserved verbatim in `extra` so cached files round-trip the
/// full upstream record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    /// Display name (e.g., "Claude Monet").
    #[serde(rename = "artistName")]
    pub artist_name: String,
    /// URL-safe slug, the unique identifier (e.g., "claude-monet").
    pub url: String,
    /// Remaining raw metadata fields from the API.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Artist {
    /// Case-insensitive substring match against the display name.
    pub fn name_matches(&self, needle: &str) -> bool {
        self.artist_name
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}
