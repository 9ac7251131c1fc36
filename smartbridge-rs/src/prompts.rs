// smartbridge-rs/src/prompts.rs
// Prompt text sent to the model for both flows

use serde_json::{json, Value};

/// True when `text` is empty or only whitespace
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Prompt asking for a natural Japanese rendering of an English message
pub fn build_translation_prompt(english: &str) -> String {
    format!(
        "Translate the following English message into natural, conversational Japanese.\n\
         Maintain any paragraph breaks and the original tone (e.g., formal/informal).\n\
         Text: \"{}\"",
        english
    )
}

/// Prompt pair for the reply critique
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CritiquePrompt {
    pub prompt: String,
    pub system_instruction: String,
}

const CRITIQUE_SYSTEM_INSTRUCTION: &str = "You are a professional cross-cultural communication expert.
Your task is to:
1. Translate the Japanese reply into natural, high-quality English that fits the context. Preserve line breaks.
2. Provide a \"Back-translation\" (戻し翻訳): Translate your English translation back into Japanese literally so the user can verify the nuance.
3. Evaluate if the reply is socially appropriate and polite.
4. Provide a critique in Japanese.
5. Provide 2-3 alternative English suggestions with Japanese labels explaining when they are appropriate (e.g., \"より丁寧\", \"よりカジュアル\", \"ビジネス向け\").
6. For each suggestion, also provide a \"Back-translation\" (戻し翻訳) in Japanese so the user can see exactly how the nuance changes.";

/// Prompt carrying the partner's message and the user's reply, plus the
/// instruction describing the expected analysis
pub fn build_critique_prompt(reply: &str, context: &str) -> CritiquePrompt {
    CritiquePrompt {
        prompt: format!(
            "Context (Partner's message in English): \"{}\"\nMy Reply (in Japanese): \"{}\"",
            context, reply
        ),
        system_instruction: CRITIQUE_SYSTEM_INSTRUCTION.to_string(),
    }
}

/// Response schema for the critique, in the API's OpenAPI subset
pub fn critique_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "translatedText": {"type": "STRING", "description": "The primary English translation"},
            "backTranslation": {"type": "STRING", "description": "Japanese literal translation of the English result"},
            "isAppropriate": {"type": "BOOLEAN", "description": "True if appropriate"},
            "critique": {"type": "STRING", "description": "Explanation in Japanese"},
            "suggestions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "text": {"type": "STRING", "description": "The alternative English text"},
                        "label": {"type": "STRING", "description": "Japanese label for the context, e.g., 'より丁寧'"},
                        "backTranslation": {"type": "STRING", "description": "Japanese literal translation of this specific suggestion"}
                    },
                    "required": ["text", "label", "backTranslation"]
                }
            }
        },
        "required": ["translatedText", "backTranslation", "isAppropriate", "critique", "suggestions"]
    })
}
