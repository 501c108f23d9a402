use thiserror::Error;

/// Caller-fatal conditions from the fetch pipeline.
///
/// These halt the step that raised them. Per-item network failures are not
/// represented here: those are logged and absorbed so the batch continues.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no artists loaded; run fetch_artists first")]
    NoArtistsLoaded,

    #[error("no painting groups loaded; fetch paintings first")]
    NoPaintingGroups,

    #[error("artist name {0:?} not found")]
    ArtistNotFound(String),
}
