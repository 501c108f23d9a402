pub mod client;
pub mod config;
pub mod download;
pub mod error;
pub mod fetcher;
pub mod naming;
pub mod padder;
pub mod store;

pub use client::WikiArtClient;
pub use config::FetchConfig;
pub use download::{DownloadOutcome, ImageDownloader};
pub use error::FetchError;
pub use fetcher::{CheckReport, CheckScope, DownloadStats, Fetcher};
pub use padder::RequestPadder;
pub use store::MetadataStore;
