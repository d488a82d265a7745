//! Short code generation and custom alias validation.
//!
//! Generated codes come from OS entropy encoded as URL-safe base64 without
//! padding. Uniqueness is probabilistic; the store's unique index decides.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Default number of random bytes per generated code (8 characters).
pub const DEFAULT_CODE_LENGTH_BYTES: usize = 6;

/// Shortest accepted custom alias, in characters.
pub const MIN_ALIAS_LENGTH: usize = 4;

/// Longest accepted code, in characters. Matches the width of the `code` column.
pub const MAX_CODE_LENGTH: usize = 64;

/// Characters that end or split the URL path segment a code is served from.
pub const RESERVED_ALIAS_CHARS: &[char] = &['/', '?', '#'];

/// Produces candidate short codes.
///
/// Implementations are pure generators and never talk to the store.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Cryptographically random code generator.
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    length_bytes: usize,
}

impl RandomCodeGenerator {
    /// Creates a generator drawing `length_bytes` random bytes per code.
    ///
    /// The resulting code is `ceil(length_bytes * 4 / 3)` characters long.
    pub fn new(length_bytes: usize) -> Self {
        Self { length_bytes }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH_BYTES)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    /// # Panics
    ///
    /// Panics if the system random number generator fails (extremely rare).
    fn generate(&self) -> String {
        let mut buffer = vec![0u8; self.length_bytes];

        getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
    }
}

/// Validates a caller-supplied alias that has already been trimmed.
///
/// # Rules
///
/// - At least [`MIN_ALIAS_LENGTH`] characters
/// - At most [`MAX_CODE_LENGTH`] characters
/// - None of [`RESERVED_ALIAS_CHARS`], which would stop `GET /{code}` from
///   ever matching the alias
///
/// Anything else (case, other punctuation) is accepted verbatim.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if a rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    let length = code.chars().count();

    if length < MIN_ALIAS_LENGTH {
        return Err(AppError::bad_request(
            format!(
                "Custom alias must be at least {} characters long",
                MIN_ALIAS_LENGTH
            ),
            json!({ "provided_length": length }),
        ));
    }

    if length > MAX_CODE_LENGTH {
        return Err(AppError::bad_request(
            format!(
                "Custom alias must be at most {} characters long",
                MAX_CODE_LENGTH
            ),
            json!({ "provided_length": length }),
        ));
    }

    if let Some(reserved) = code.chars().find(|c| RESERVED_ALIAS_CHARS.contains(c)) {
        return Err(AppError::bad_request(
            "Custom alias must not contain '/', '?' or '#'",
            json!({ "invalid_character": reserved.to_string() }),
        ));
    }

    Ok(())
}
