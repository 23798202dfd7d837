#[derive(Debug)]
pub enum SiteClientError {
    Http(reqwest::Error),
    InvalidSession,
    ServerError(String),
}

impl std::fmt::Display for SiteClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(e) => write!(f, "HTTP error: {}", e),
            Self::InvalidSession => write!(f, "Session id is not a valid cookie value"),
            Self::ServerError(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for SiteClientError {}

impl From<reqwest::Error> for SiteClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}
