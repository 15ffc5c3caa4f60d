use serde::{Deserialize, Serialize};

/// Validation error bound to a single form field.
///
/// Fields of nested collections are addressed as `destinations[0].origin_city`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// First error message reported for `field`, if any
pub fn error_for<'a>(errors: &'a [FieldError], field: &str) -> Option<&'a str> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.as_str())
}

/// Field name of a collection item: `collection[index].field`
pub fn indexed_field(collection: &str, index: usize, field: &str) -> String {
    format!("{}[{}].{}", collection, index, field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_for_returns_first_match() {
        let errors = vec![
            FieldError::new("motive", "first"),
            FieldError::new("motive", "second"),
            FieldError::new("priority", "other"),
        ];
        assert_eq!(error_for(&errors, "motive"), Some("first"));
        assert_eq!(error_for(&errors, "priority"), Some("other"));
        assert_eq!(error_for(&errors, "missing"), None);
    }

    #[test]
    fn test_indexed_field() {
        assert_eq!(
            indexed_field("destinations", 2, "origin_city"),
            "destinations[2].origin_city"
        );
    }
}
