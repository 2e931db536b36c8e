use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvlensError {
    #[error("Request could not be completed: {0}")]
    Fetch(String),

    #[error("Unexpected HTTP status: {0}")]
    HttpStatus(u16),

    #[error("Malformed response body: {0}")]
    Parse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl EvlensError {
    /// Classify a transport error: anything reqwest reports while decoding a
    /// body is a parse failure, the rest is a network-level fetch failure.
    pub fn from_request(err: reqwest::Error) -> Self {
        if err.is_decode() {
            EvlensError::Parse(err.to_string())
        } else {
            EvlensError::Fetch(err.to_string())
        }
    }

    /// True when a failed /user_ids fetch should schedule a retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            EvlensError::HttpStatus(code) => (500..=599).contains(code),
            EvlensError::Fetch(_) => true,
            _ => false,
        }
    }
}

pub type EvlensResult<T> = Result<T, EvlensError>;

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> EvlensResult<T>;
    fn with_context<F>(self, f: F) -> EvlensResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> EvlensResult<T> {
        self.map_err(|e| EvlensError::Unknown(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> EvlensResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| EvlensError::Unknown(format!("{}: {}", f(), e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, msg: &str) -> EvlensResult<T> {
        self.ok_or_else(|| EvlensError::Unknown(msg.to_string()))
    }

    fn with_context<F>(self, f: F) -> EvlensResult<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| EvlensError::Unknown(f()))
    }
}
