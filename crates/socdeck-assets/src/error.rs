use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("asset at {url} exceeds the {limit} byte limit")]
    TooLarge { url: String, limit: usize },

    #[error("unsupported asset URL \"{0}\"")]
    UnsupportedUrl(String),

    #[error("asset fetch timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("could not decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("could not re-encode image as PNG: {0}")]
    Encode(#[source] image::ImageError),
}
