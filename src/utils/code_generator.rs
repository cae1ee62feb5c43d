//! Short code generation and alias validation utilities.
//!
//! Provides cryptographically secure random code generation and validation
//! for caller-chosen aliases.

use crate::domain::repositories::StoreError;
use base64::Engine as _;

/// Number of random bytes drawn per generated code.
const CODE_LENGTH_BYTES: usize = 6;

/// Length of a generated short code.
pub const CODE_LENGTH: usize = 8;

/// Minimum alias length accepted by [`validate_alias`].
pub const ALIAS_MIN_LEN: usize = 3;

/// Maximum alias length accepted by [`validate_alias`].
pub const ALIAS_MAX_LEN: usize = 20;

/// Generates a cryptographically secure random short code.
///
/// Draws 6 bytes from the OS random source and encodes them as URL-safe
/// base64, which yields exactly 8 characters from `[A-Za-z0-9_-]`.
///
/// # Errors
///
/// Returns [`StoreError::CodeGeneration`] if the system random number
/// generator is unavailable.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code()?;
/// assert_eq!(code.len(), 8);
/// ```
pub fn generate_code() -> Result<String, StoreError> {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| StoreError::CodeGeneration(e.to_string()))?;

    let mut code = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer);
    code.truncate(CODE_LENGTH);

    Ok(code)
}

/// Validates a caller-chosen alias.
///
/// # Rules
///
/// - Length: 3-20 characters
/// - Allowed characters: ASCII letters and digits
///
/// No reserved-word filtering is applied.
///
/// # Errors
///
/// Returns [`StoreError::InvalidAlias`] if any rule is violated.
pub fn validate_alias(alias: &str) -> Result<(), StoreError> {
    if alias.len() < ALIAS_MIN_LEN || alias.len() > ALIAS_MAX_LEN {
        return Err(StoreError::InvalidAlias);
    }

    if !alias.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(StoreError::InvalidAlias);
    }

    Ok(())
}
