use atomid_core::validate::ValidationError;
use atomid_core::AtomIdError;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("config error: {0}")]
    Config(#[from] AtomIdError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid address for {field}: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("account decode failed: {0}")]
    Decode(String),

    #[error("instruction encode failed: {0}")]
    Encode(String),

    #[error("rpc error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),
}

impl ClientError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}
