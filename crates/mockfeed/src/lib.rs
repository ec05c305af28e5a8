pub mod dataset;
pub mod logic;
pub mod overlay;
pub mod timestamp;

pub use crate::dataset::Snapshot;
pub use crate::logic::FeedService;

use anyhow::Result;
use std::path::Path;

/// モックデータを読み込んでサービスを組み立てる。パス指定がなければ埋め込みデータを使う。
pub fn load_service(mock_data_path: Option<&Path>) -> Result<FeedService> {
    let snapshot = match mock_data_path {
        Some(path) => {
            tracing::info!("Loading mock data from {}", path.display());
            Snapshot::from_path(path)?
        }
        None => {
            tracing::info!("Loading embedded mock data");
            Snapshot::embedded()?
        }
    };

    tracing::info!(
        "Mock data loaded: {} posts, {} authors, {} sources",
        snapshot.posts.len(),
        snapshot.authors.len(),
        snapshot.sources.len()
    );

    Ok(FeedService::new(snapshot))
}
