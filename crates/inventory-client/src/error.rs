use std::fmt;

/// Ways a call to the inventory service can fail
#[derive(Debug)]
pub enum InventoryError {
    /// The request did not complete within the client timeout
    Timeout,
    /// Connection, TLS, or request construction failure
    Transport(reqwest::Error),
    /// The service answered with a non-success status
    Status(u16),
    /// The body was not a JSON array of asset records
    Decode(serde_json::Error),
}

impl InventoryError {
    /// Short label for structured log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Transport(_) => "transport",
            Self::Status(_) => "status",
            Self::Decode(_) => "decode",
        }
    }
}

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "Inventory request timed out"),
            Self::Transport(e) => write!(f, "Inventory HTTP error: {e}"),
            Self::Status(code) => write!(f, "Inventory service returned status {code}"),
            Self::Decode(e) => write!(f, "Inventory response parse error: {e}"),
        }
    }
}

impl std::error::Error for InventoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for InventoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}

impl From<serde_json::Error> for InventoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
