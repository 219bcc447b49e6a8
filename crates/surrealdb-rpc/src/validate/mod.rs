//! Checks on `table:id` and table-name strings before they are parsed.
//!
//! These only look at the delimiter-aware shape of the text. They do not
//! check that the id side is a well-formed literal; [`crate::Thing::parse`]
//! accepts any non-empty id and keeps unparseable ids as text.

use crate::error::ThingError;
use crate::model::record_id::split_top_level;

/// Returns true if `text` has a top-level `:` with non-empty text on both sides.
pub fn is_record_id_str(text: &str) -> bool {
    matches!(split_top_level(text), Some((table, id)) if !table.is_empty() && !id.is_empty())
}

/// Like [`is_record_id_str`], but returns the error `RecordId::from_text` would.
pub fn validate_record_id_str(text: &str) -> Result<(), ThingError> {
    if is_record_id_str(text) {
        Ok(())
    } else {
        Err(ThingError::InvalidRecordIdString {
            input: text.to_string(),
        })
    }
}

/// Returns true if `text` is non-empty and names a table rather than a record.
pub fn is_table_name_str(text: &str) -> bool {
    !text.is_empty() && split_top_level(text).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_str() {
        assert!(is_record_id_str("table:id"));
        assert!(is_record_id_str("⟨a:b⟩:c:d"));
        assert!(!is_record_id_str("table"));
        assert!(!is_record_id_str("table:"));
        assert!(!is_record_id_str(":id"));
        assert!(!is_record_id_str("`a:b`"));
    }

    #[test]
    fn test_validate_record_id_str() {
        assert_eq!(validate_record_id_str("a:1"), Ok(()));
        assert_eq!(
            validate_record_id_str("a"),
            Err(ThingError::InvalidRecordIdString {
                input: "a".to_string()
            })
        );
    }

    #[test]
    fn test_table_name_str() {
        assert!(is_table_name_str("person"));
        assert!(is_table_name_str("⟨a:b⟩"));
        assert!(!is_table_name_str(""));
        assert!(!is_table_name_str("person:1"));
    }
}
