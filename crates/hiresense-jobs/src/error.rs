use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,

    #[error("completion response contained no text")]
    EmptyCompletion,
}
