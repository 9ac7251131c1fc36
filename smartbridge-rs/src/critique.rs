// smartbridge-rs/src/critique.rs
// Structured critique of a Japanese reply, as returned by the model

use serde::{Deserialize, Serialize};

/// One alternative phrasing suggested by the model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_translation: Option<String>,
}

impl Suggestion {
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or_default()
    }

    pub fn back_translation(&self) -> &str {
        self.back_translation.as_deref().unwrap_or_default()
    }
}

/// Analysis of a reply. The model may omit any field, so every field is
/// optional and the accessors fall back to empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CritiqueResult {
    /// The reply that was analysed; filled in locally, not by the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_translation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_appropriate: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critique: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<Suggestion>>,
}

impl CritiqueResult {
    pub fn original_text(&self) -> &str {
        self.original_text.as_deref().unwrap_or_default()
    }

    pub fn translated_text(&self) -> &str {
        self.translated_text.as_deref().unwrap_or_default()
    }

    pub fn back_translation(&self) -> &str {
        self.back_translation.as_deref().unwrap_or_default()
    }

    /// Missing verdict counts as "needs improvement"
    pub fn is_appropriate(&self) -> bool {
        self.is_appropriate.unwrap_or(false)
    }

    pub fn critique(&self) -> &str {
        self.critique.as_deref().unwrap_or_default()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        self.suggestions.as_deref().unwrap_or_default()
    }

    pub(crate) fn with_original_text(mut self, reply: &str) -> Self {
        self.original_text = Some(reply.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_payload_deserializes() {
        let result: CritiqueResult = serde_json::from_value(json!({
            "translatedText": "Sure.",
            "backTranslation": "了解です。",
            "isAppropriate": true,
            "critique": "丁寧です",
            "suggestions": [
                {"text": "Certainly.", "label": "より丁寧", "backTranslation": "かしこまりました。"}
            ]
        }))
        .unwrap();

        assert!(result.is_appropriate());
        assert_eq!(result.translated_text(), "Sure.");
        assert_eq!(result.suggestions().len(), 1);
        assert_eq!(result.suggestions()[0].label(), "より丁寧");
        assert_eq!(result.original_text(), "");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let result: CritiqueResult = serde_json::from_value(json!({"critique": "短すぎます"})).unwrap();

        assert_eq!(result.translated_text(), "");
        assert_eq!(result.back_translation(), "");
        assert!(!result.is_appropriate());
        assert!(result.suggestions().is_empty());

        let suggestion: Suggestion = serde_json::from_value(json!({})).unwrap();
        assert_eq!(suggestion.text(), "");
    }

    #[test]
    fn test_serializes_camel_case_with_original_text() {
        let result = CritiqueResult {
            is_appropriate: Some(false),
            ..CritiqueResult::default()
        }
        .with_original_text("了解");

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"originalText": "了解", "isAppropriate": false})
        );
    }
}
