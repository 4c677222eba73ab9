use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog `{0}` not found")]
    NotFound(String),
    #[error("catalog `{0}` contains no images")]
    Empty(String),
    #[error("unable to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog file is not valid UTF-8")]
    Encoding,
    #[error("unable to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("config serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
