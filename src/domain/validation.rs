use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum ValidationError {
    Empty {
        field: &'static str,
    },
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    InvalidCharacters {
        field: &'static str,
        input: String,
    },
    InvalidTimestamp {
        field: &'static str,
        input: String,
    },
    MissingContent,
    UnsupportedBulkAction {
        action: String,
    },
    InvalidUrl {
        input: String,
    },
    UnknownLocale {
        input: String,
    },
    EmptyRegion {
        name: String,
    },
    InvalidPhoneNumber {
        input: String,
    },
    Io {
        path: PathBuf,
        source: Arc<std::io::Error>,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooLong { field, max, actual } => {
                write!(f, "{field} is too long: {actual} characters (max {max})")
            }
            Self::InvalidCharacters { field, input } => {
                write!(f, "{field} contains invalid characters: {input}")
            }
            Self::InvalidTimestamp { field, input } => write!(
                f,
                "{field} is neither an ISO-8601 instant nor an ISO-8601 duration: {input}"
            ),
            Self::MissingContent => {
                write!(f, "document needs either inline data or a reference URL")
            }
            Self::UnsupportedBulkAction { action } => {
                write!(f, "bulk action must be GET or DELETE, got {action}")
            }
            Self::InvalidUrl { input } => write!(f, "invalid URL: {input}"),
            Self::UnknownLocale { input } => write!(f, "unknown region or location: {input}"),
            Self::EmptyRegion { name } => write!(f, "region {name} has no locations"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::Io { path, source } => {
                write!(f, "cannot read file {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
