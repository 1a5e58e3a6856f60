//! # Validation Entities

use serde::{Deserialize, Serialize};

/// Outcome of validating one field value.
///
/// Replaced wholesale on every validation; nothing carries over from the
/// previous result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: None,
            suggestions: Vec::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
            suggestions: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn has_suggestions(&self) -> bool {
        !self.suggestions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let ok = ValidationResult::valid();
        assert!(ok.is_valid());
        assert_eq!(ok.message, None);
        assert!(!ok.has_suggestions());

        let bad = ValidationResult::invalid("Too short").with_suggestions(["a", "b"]);
        assert!(!bad.is_valid());
        assert_eq!(bad.message.as_deref(), Some("Too short"));
        assert_eq!(bad.suggestions, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ValidationResult::valid()).unwrap();
        assert_eq!(json, serde_json::json!({"valid": true, "suggestions": []}));

        let parsed: ValidationResult = serde_json::from_str(r#"{"valid": false}"#).unwrap();
        assert_eq!(parsed.message, None);
        assert!(parsed.suggestions.is_empty());
    }
}
