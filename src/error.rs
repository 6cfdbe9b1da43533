use thiserror::Error;

/// lolbuilds統一エラー型
#[derive(Debug, Error)]
pub enum LbError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{site} responded with {status}: {message}")]
    SiteApi {
        site: String,
        status: u16,
        message: String,
    },

    #[error("Unexpected page layout on {source_name}: {message}")]
    Scrape {
        source_name: String,
        message: String,
    },

    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Not a League of Legends installation folder: {0}")]
    InvalidInstallPath(String),

    #[error("Unsupported operating system: {0}. Use --path to point to the League of Legends folder")]
    UnsupportedPlatform(String),

    #[error("Input error: {0}")]
    Prompt(String),

    #[error("Worker error: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, LbError>;

impl LbError {
    /// スクレイピングの構造変化エラーを生成
    pub fn scrape(source_name: &str, message: impl Into<String>) -> Self {
        LbError::Scrape {
            source_name: source_name.to_string(),
            message: message.into(),
        }
    }
}
