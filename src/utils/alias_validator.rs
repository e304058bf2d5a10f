//! Custom alias validation.
//!
//! Format rules that depend only on the alias itself live here. The reserved
//! namespace and uniqueness checks need the allocator's state and run in
//! [`crate::application::services::UrlShortener`], but report through the same
//! error type so callers see one taxonomy.

/// Longest custom alias accepted.
pub const MAX_CUSTOM_ALIAS_LENGTH: usize = 100;

/// Reasons a custom alias is rejected, in the order the checks are applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AliasValidationError {
    #[error("The custom short URL cannot be empty.")]
    Empty,

    #[error("The custom short URL must be no longer than {max} characters.")]
    TooLong { length: usize, max: usize },

    #[error(
        "The custom short URL must only contain letters A ... Z, numbers 0 ... 9 or \
         dash (-), underscore (_), dot (.), or tilde (~)"
    )]
    InvalidCharacter { found: char },

    #[error("The custom short URL cannot end with a dot (.)")]
    TrailingDot,

    #[error("That custom short URL is not available.")]
    Reserved { segment: String },

    #[error("The given custom short URL is already in use.")]
    AlreadyInUse { alias: String },
}

impl AliasValidationError {
    /// Short stable identifier for the failed rule.
    pub fn reason(&self) -> &'static str {
        match self {
            AliasValidationError::Empty => "empty",
            AliasValidationError::TooLong { .. } => "too_long",
            AliasValidationError::InvalidCharacter { .. } => "invalid_character",
            AliasValidationError::TrailingDot => "trailing_dot",
            AliasValidationError::Reserved { .. } => "reserved",
            AliasValidationError::AlreadyInUse { .. } => "already_in_use",
        }
    }
}

/// Returns true for the RFC 3986 "unreserved" characters.
pub fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

/// Validates the format of a custom alias.
///
/// # Rules
///
/// - Not empty or whitespace-only
/// - At most [`MAX_CUSTOM_ALIAS_LENGTH`] characters
/// - Only unreserved characters (`A-Z a-z 0-9 - . _ ~`)
/// - Does not end with `.`
///
/// Leading and repeated dots are accepted as long as the alias does not end
/// with one.
///
/// # Errors
///
/// Returns the first rule violated, checked in the order above.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_alias_format("a.b_c~9").is_ok());
/// assert!(validate_alias_format(".1").is_ok());
///
/// assert!(validate_alias_format("").is_err());
/// assert!(validate_alias_format("ab?").is_err());
/// assert!(validate_alias_format("a.").is_err());
/// ```
pub fn validate_alias_format(alias: &str) -> Result<(), AliasValidationError> {
    if alias.trim().is_empty() {
        return Err(AliasValidationError::Empty);
    }

    let length = alias.chars().count();
    if length > MAX_CUSTOM_ALIAS_LENGTH {
        return Err(AliasValidationError::TooLong {
            length,
            max: MAX_CUSTOM_ALIAS_LENGTH,
        });
    }

    if let Some(found) = alias.chars().find(|&c| !is_unreserved(c)) {
        return Err(AliasValidationError::InvalidCharacter { found });
    }

    if alias.ends_with('.') {
        return Err(AliasValidationError::TrailingDot);
    }

    Ok(())
}

/// Returns the leading path segment of `path`, ignoring empty segments.
///
/// `"/auth/basic"` and `"auth"` both yield `"auth"`. Returns `None` when the
/// path has no non-empty segment.
pub fn leading_segment(path: &str) -> Option<&str> {
    path.split('/').find(|segment| !segment.is_empty())
}
