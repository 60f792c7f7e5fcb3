//! # DEF Names
//!
//! Turns arbitrary part and material names into VRML identifiers.

use crate::error::{SceneError, SceneResult};

/// Words with a fixed meaning in VRML 2.0 files.
const RESERVED: &[&str] = &[
    "DEF",
    "EXTERNPROTO",
    "FALSE",
    "IS",
    "NULL",
    "PROTO",
    "ROUTE",
    "TO",
    "TRUE",
    "USE",
    "eventIn",
    "eventOut",
    "exposedField",
    "field",
];

/// Prefix applied to names that would otherwise be rejected by a reader.
const PREFIX: &str = "X_";

/// Returns a DEF-safe version of `raw`.
///
/// Characters other than ASCII letters, digits and `_` become `_`. Names
/// starting with a digit and reserved words get an `X_` prefix.
///
/// # Errors
///
/// Returns [`SceneError::InvalidName`] for a name that is empty or blank.
///
/// # Example
///
/// ```rust
/// use vrml_scene::sanitize_name;
///
/// assert_eq!(sanitize_name("PinHeader 2x6.54").unwrap(), "PinHeader_2x6_54");
/// assert_eq!(sanitize_name("1N4148").unwrap(), "X_1N4148");
/// assert_eq!(sanitize_name("USE").unwrap(), "X_USE");
/// ```
pub fn sanitize_name(raw: &str) -> SceneResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SceneError::InvalidName {
            name: raw.to_string(),
        });
    }

    let body: String = trimmed
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    let needs_prefix = body.starts_with(|c: char| c.is_ascii_digit()) || RESERVED.contains(&body.as_str());
    if needs_prefix {
        Ok(format!("{PREFIX}{body}"))
    } else {
        Ok(body)
    }
}

/// True if `name` is already usable as a DEF identifier.
pub fn is_valid_name(name: &str) -> bool {
    sanitize_name(name).is_ok_and(|clean| clean == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_unchanged() {
        assert_eq!(sanitize_name("Case").unwrap(), "Case");
        assert_eq!(sanitize_name("PIN_HDR_2x6_PIN_11").unwrap(), "PIN_HDR_2x6_PIN_11");
    }

    #[test]
    fn test_invalid_characters_replaced() {
        assert_eq!(sanitize_name("a.b-c d{e}").unwrap(), "a_b_c_d_e_");
        assert_eq!(sanitize_name("  padded  ").unwrap(), "padded");
        assert_eq!(sanitize_name("µ").unwrap(), "_");
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(sanitize_name("0805").unwrap(), "X_0805");
        assert_eq!(sanitize_name("TRUE").unwrap(), "X_TRUE");
        // Reserved words are case sensitive
        assert_eq!(sanitize_name("true").unwrap(), "true");
    }

    #[test]
    fn test_blank_rejected() {
        assert!(matches!(sanitize_name(""), Err(SceneError::InvalidName { .. })));
        assert!(sanitize_name("   ").is_err());
    }

    #[test]
    fn test_is_valid_name() {
        assert!(is_valid_name("Body"));
        assert!(!is_valid_name("2Body"));
        assert!(!is_valid_name("a b"));
    }
}
