//! Crate-level error types.

use std::fmt;

/// A focus, hover, or navigation request named a building that is not in
/// the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBuildingError {
    /// The id that failed to resolve.
    pub id: String,
}

impl UnknownBuildingError {
    /// Error for the given unresolved id.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self { id: id.to_owned() }
    }
}

impl fmt::Display for UnknownBuildingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown building '{}'", self.id)
    }
}

impl std::error::Error for UnknownBuildingError {}

/// Errors produced by the campus-map crate.
#[derive(Debug)]
pub enum CampusError {
    /// Lookup of a building id failed.
    UnknownBuilding(UnknownBuildingError),
    /// Two buildings in a layout share the same id.
    DuplicateBuilding(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Options parsed but hold values the map cannot run with.
    InvalidOptions(String),
}

impl fmt::Display for CampusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBuilding(e) => write!(f, "{e}"),
            Self::DuplicateBuilding(id) => {
                write!(f, "duplicate building id '{id}'")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidOptions(msg) => write!(f, "invalid options: {msg}"),
        }
    }
}

impl std::error::Error for CampusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnknownBuilding(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<UnknownBuildingError> for CampusError {
    fn from(e: UnknownBuildingError) -> Self {
        Self::UnknownBuilding(e)
    }
}

impl From<std::io::Error> for CampusError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
