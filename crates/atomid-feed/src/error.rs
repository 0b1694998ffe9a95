use thiserror::Error;

pub type FeedResult<T> = Result<T, FeedError>;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed config: {0}")]
    Config(String),

    #[error("invalid feed url: {0}")]
    Url(#[from] url::ParseError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed returned {status}: {body}")]
    Status { status: u16, body: String },
}
