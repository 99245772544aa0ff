//! Centralized validation of user-supplied names and query sizes.

use crate::core::location::GenomicLocation;

/// Maximum number of bins a single query may return (`DoS` protection for the
/// web and CLI surfaces)
pub const MAX_QUERY_BINS: u64 = 10_000_000;

/// Security-related constants for input validation
pub const MAX_COMPONENT_LENGTH: usize = 255;

/// Security validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name too long: exceeds {MAX_COMPONENT_LENGTH} characters")]
    NameTooLong,
    #[error("Invalid name: contains path separators, traversal or control characters")]
    InvalidName,
    #[error("Empty name provided")]
    EmptyName,
    #[error("Query spans {0} bins, more than the maximum of {MAX_QUERY_BINS}")]
    TooManyBins(u64),
}

/// Validate that `name` can be used as a single path component below the
/// storage root.
///
/// Platform, genome, sample and chromosome names all end up in file paths, so
/// separators, `..` and control characters are rejected outright rather than
/// sanitised.
///
/// # Examples
///
/// ```
/// use track_server::utils::validation::validate_path_component;
///
/// assert!(validate_path_component("chr1").is_ok());
/// assert!(validate_path_component("../etc").is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::EmptyName` if the name is empty,
/// `ValidationError::NameTooLong` if it exceeds the limit, or
/// `ValidationError::InvalidName` if it contains invalid characters.
pub fn validate_path_component(name: &str) -> Result<&str, ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if name.len() > MAX_COMPONENT_LENGTH {
        return Err(ValidationError::NameTooLong);
    }

    if name == "." || name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(ValidationError::InvalidName);
    }

    if name.chars().any(char::is_control) {
        return Err(ValidationError::InvalidName);
    }

    Ok(name)
}

/// Number of bins a query over `location` would return at `bin_width`.
#[must_use]
pub fn query_bin_count(location: &GenomicLocation, bin_width: u32) -> u64 {
    if bin_width == 0 {
        return 0;
    }
    let start_bin = u64::from(location.start.saturating_sub(1)) / u64::from(bin_width);
    let end_bin = u64::from(location.end.saturating_sub(1)) / u64::from(bin_width);
    end_bin.saturating_sub(start_bin) + 1
}

/// Check that a query stays under [`MAX_QUERY_BINS`].
///
/// # Errors
///
/// Returns `ValidationError::TooManyBins` if the query is too large.
pub fn check_bin_limit(location: &GenomicLocation, bin_width: u32) -> Result<(), ValidationError> {
    let bins = query_bin_count(location, bin_width);
    if bins > MAX_QUERY_BINS {
        Err(ValidationError::TooManyBins(bins))
    } else {
        Ok(())
    }
}
