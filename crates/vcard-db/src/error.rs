use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("record serialization: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("remote table request: {0}")]
    Http(#[from] reqwest::Error),
}
