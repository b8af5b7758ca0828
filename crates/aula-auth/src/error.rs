use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated, run `aula auth login`")]
    NotAuthenticated,

    #[error("session store error: {0}")]
    Store(String),

    #[error("cached user could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}
