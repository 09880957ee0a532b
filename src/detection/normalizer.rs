//! Whitespace normalization ahead of classification

use crate::error::{LangIdError, Result};

/// Collapse every run of whitespace into a single space and trim the ends.
///
/// Case, punctuation and Unicode form are left alone: the n-gram model is
/// sensitive to raw token shapes. Absent or all-whitespace input yields
/// [`LangIdError::EmptyInput`].
pub fn normalize(text: Option<&str>) -> Result<String> {
    let text = text.ok_or(LangIdError::EmptyInput)?;

    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if normalized.is_empty() {
        return Err(LangIdError::EmptyInput);
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_mixed_whitespace() {
        assert_eq!(normalize(Some("  a   b\n\tc  ")).unwrap(), "a b c");
    }

    #[test]
    fn test_is_idempotent() {
        let once = normalize(Some("Hello,\r\n\n   World!\u{00A0}\u{3000}Ünïcode ")).unwrap();
        let twice = normalize(Some(&once)).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once, "Hello, World! Ünïcode");
    }

    #[test]
    fn test_preserves_case_and_punctuation() {
        assert_eq!(
            normalize(Some("  Ça VA?  Très-bien!! ")).unwrap(),
            "Ça VA? Très-bien!!"
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert!(matches!(normalize(None), Err(LangIdError::EmptyInput)));
        assert!(matches!(normalize(Some("")), Err(LangIdError::EmptyInput)));
        assert!(matches!(
            normalize(Some(" \n\t\r ")),
            Err(LangIdError::EmptyInput)
        ));
    }
}
