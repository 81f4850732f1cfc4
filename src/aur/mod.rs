pub mod client;
pub mod download;
pub mod package;
pub mod page;

pub use client::AurClient;
pub use page::{DetailsLineParser, LatestVersion, VersionParser};
