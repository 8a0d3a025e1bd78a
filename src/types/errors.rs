use std::fmt;

// === TrackerError ===

/// Errors returned by the visitor tracker's query surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// A query argument was outside its valid range.
    InvalidArgument(String),
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for TrackerError {}

// === FetchError ===

/// Errors raised while retrieving the viewer page over HTTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The configured target URL could not be used.
    InvalidUrl(String),
    /// The request failed before a response was received.
    Network(String),
    /// The server answered with a non-success status code.
    Status(u16),
    /// The response body could not be read.
    Body(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::InvalidUrl(url) => write!(f, "Invalid target URL: {}", url),
            FetchError::Network(msg) => write!(f, "Fetch network error: {}", msg),
            FetchError::Status(code) => write!(f, "Fetch returned HTTP status {}", code),
            FetchError::Body(msg) => write!(f, "Failed to read response body: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

// === ParseError ===

/// Errors raised when the page no longer matches the expected structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No viewer list with the configured class was found on the page.
    ListNotFound(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::ListNotFound(class) => {
                write!(f, "Viewer list not found (class=\"{}\")", class)
            }
        }
    }
}

impl std::error::Error for ParseError {}

// === ScanError ===

/// Any failure that can end or skip a scan cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    Fetch(FetchError),
    Parse(ParseError),
    Tracker(TrackerError),
    /// The rendered summary could not be written out.
    Output(String),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Fetch(e) => write!(f, "{}", e),
            ScanError::Parse(e) => write!(f, "{}", e),
            ScanError::Tracker(e) => write!(f, "{}", e),
            ScanError::Output(msg) => write!(f, "Failed to write output: {}", msg),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::Fetch(e) => Some(e),
            ScanError::Parse(e) => Some(e),
            ScanError::Tracker(e) => Some(e),
            ScanError::Output(_) => None,
        }
    }
}

impl From<FetchError> for ScanError {
    fn from(e: FetchError) -> Self {
        ScanError::Fetch(e)
    }
}

impl From<ParseError> for ScanError {
    fn from(e: ParseError) -> Self {
        ScanError::Parse(e)
    }
}

impl From<TrackerError> for ScanError {
    fn from(e: TrackerError) -> Self {
        ScanError::Tracker(e)
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
