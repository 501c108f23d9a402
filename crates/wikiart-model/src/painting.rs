use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A painting record, merged from the per-artist listing endpoint and the
/// per-painting detail endpoint.
///
/// The listing gives a summary record; [`Painting::merge_detail`] overlays
/// the detail response on top of it (detail fields win). Untyped fields are
/// kept in `extra` so persisted metadata loses nothing the API returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Painting {
    /// Unique numeric identifier for the painting.
    #[serde(rename = "contentId")]
    pub content_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(rename = "artistName", default, skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,
    #[serde(rename = "artistUrl", default, skip_serializing_if = "Option::is_none")]
    pub artist_url: Option<String>,
    /// Image URL as given by the API, usually carrying a `!<size>.jpg` suffix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Remaining raw metadata fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// All paintings belonging to one artist within a run.
pub type PaintingGroup = Vec<Painting>;

impl Painting {
    /// Overlay a detail record onto this summary record.
    ///
    /// Fields present in the detail response replace the summary values;
    /// fields the detail omits are left alone.
    pub fn merge_detail(&mut self, detail: Painting) {
        if detail.title.is_some() {
            self.title = detail.title;
        }
        if detail.style.is_some() {
            self.style = detail.style;
        }
        if detail.artist_name.is_some() {
            self.artist_name = detail.artist_name;
        }
        if detail.artist_url.is_some() {
            self.artist_url = detail.artist_url;
        }
        if detail.image.is_some() {
            self.image = detail.image;
        }
        for (key, value) in detail.extra {
            self.extra.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> Painting {
        serde_json::from_str(
            r#"{
                "contentId": 1,
                "title": "Water Lilies",
                "artistName": "Claude Monet",
                "artistUrl": "claude-monet",
                "image": "http://x/img.jpg!Large.jpg",
                "year": "1906"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_merge_detail_overrides_and_augments() {
        let mut painting = summary();
        let detail: Painting = serde_json::from_str(
            r#"{
                "contentId": 1,
                "title": "Water Lilies",
                "style": "Impressionism",
                "image": "http://x/img-full.jpg!Large.jpg",
                "height": 400
            }"#,
        )
        .unwrap();

        painting.merge_detail(detail);

        assert_eq!(painting.style.as_deref(), Some("Impressionism"));
        assert_eq!(painting.image.as_deref(), Some("http://x/img-full.jpg!Large.jpg"));
        // Summary-only fields survive the merge
        assert_eq!(painting.artist_name.as_deref(), Some("Claude Monet"));
        assert_eq!(painting.extra["year"], "1906");
        assert_eq!(painting.extra["height"], 400);
    }

    #[test]
    fn test_merge_detail_keeps_summary_when_detail_silent() {
        let mut painting = summary();
        let detail: Painting = serde_json::from_str(r#"{"contentId": 1}"#).unwrap();

        painting.merge_detail(detail);

        assert_eq!(painting.title.as_deref(), Some("Water Lilies"));
        assert_eq!(painting.artist_url.as_deref(), Some("claude-monet"));
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let painting: Painting = serde_json::from_str(r#"{"contentId": 7}"#).unwrap();
        let json = serde_json::to_string(&painting).unwrap();
        assert!(json.contains("\"contentId\":7"));
        assert!(!json.contains("title"));
        assert!(!json.contains("style"));
    }
}
