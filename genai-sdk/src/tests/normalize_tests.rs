//! Tests for response normalization

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use crate::error::GenerationError;
    use crate::normalize::{parse_json_payload, parse_structured, strip_code_fence};

    #[test]
    fn test_fenced_json_parses_to_inner_value() {
        let raw = "```json\n{\"isAppropriate\": true, \"suggestions\": []}\n```";
        let bare = "{\"isAppropriate\": true, \"suggestions\": []}";

        assert_eq!(parse_json_payload(raw).unwrap(), parse_json_payload(bare).unwrap());
        assert_eq!(
            parse_json_payload(raw).unwrap(),
            json!({"isAppropriate": true, "suggestions": []})
        );
    }

    #[test]
    fn test_bare_fence_and_whitespace() {
        assert_eq!(strip_code_fence("  ```\n[1, 2]\n```  "), "[1, 2]");
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_malformed_json_is_reported() {
        for raw in ["{\"a\": 1,}", "{\"translatedText\": \"Sure", "", "```json\n```"] {
            let err = parse_json_payload(raw).unwrap_err();
            assert!(matches!(err, GenerationError::MalformedResponse(_)), "input {:?}", raw);
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Verdict {
        ok: bool,
    }

    #[test]
    fn test_shape_mismatch_is_malformed() {
        assert_eq!(parse_structured::<Verdict>("{\"ok\": true}").unwrap(), Verdict { ok: true });
        assert!(matches!(
            parse_structured::<Verdict>("[1, 2, 3]"),
            Err(GenerationError::MalformedResponse(_))
        ));
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Loose {
        #[serde(default)]
        ok: Option<bool>,
    }

    #[test]
    fn test_non_object_payload_is_malformed() {
        assert!(matches!(parse_structured::<Loose>("[]"), Err(GenerationError::MalformedResponse(_))));
        assert!(matches!(parse_structured::<Loose>("null"), Err(GenerationError::MalformedResponse(_))));
        assert_eq!(parse_structured::<Loose>("{}").unwrap(), Loose::default());
    }
}
