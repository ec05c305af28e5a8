use mockfeed::FeedService;
use std::path::PathBuf;
use std::sync::Arc;

pub type SharedState = AppState;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub feed: Arc<FeedService>,
}

impl AppState {
    pub fn new(config: AppConfig, feed: FeedService) -> Self {
        Self {
            config,
            feed: Arc::new(feed),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    /// 未指定なら埋め込みのモックデータを使う
    pub mock_data_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            mock_data_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let mock_data_path = std::env::var("MOCK_DATA_PATH")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Self {
            port,
            mock_data_path,
        }
    }
}
