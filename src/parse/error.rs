use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    DateFormat(String),
    MalformedBadge(String),
    MalformedPrice(String),
    MissingElement(String),
}

impl Error {
    pub fn date_format_error(date: &str) -> Self {
        Self::DateFormat(format!("`{date}` is not a YYYYMMDD date"))
    }
    pub fn malformed_badge_error(msg: &str) -> Self {
        Self::MalformedBadge(msg.to_string())
    }
    pub fn missing_element_error(msg: &str) -> Self {
        Self::MissingElement(msg.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateFormat(msg) => write!(f, "Date Format Error: {msg}"),
            Self::MalformedBadge(msg) => write!(f, "Malformed Badge Error: {msg}"),
            Self::MalformedPrice(msg) => write!(f, "Malformed Price Error: {msg}"),
            Self::MissingElement(msg) => write!(f, "Missing Element Error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
