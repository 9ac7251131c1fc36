//! Tests for configuration providers and the Gemini config

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::config::{
        CompositeConfigProvider, ConfigProvider, ConfigProviderExt, GeminiConfig, MemoryConfigProvider,
        ServiceConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_MODEL_CANDIDATES,
    };
    use crate::error::ServiceError;
    use crate::fallback::ModelCandidate;

    fn provider(pairs: &[(&str, &str)]) -> MemoryConfigProvider {
        MemoryConfigProvider::with_values(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn test_memory_provider_typed_access() {
        let mut p = MemoryConfigProvider::new();
        p.set("port", 8501);
        p.set("ratio", "0.25");
        p.set("models", "a, b,,c ");

        assert_eq!(p.get_int("port").unwrap(), 8501);
        assert_eq!(p.get_float("ratio").unwrap(), 0.25);
        assert_eq!(p.get_list("models").unwrap(), vec!["a", "b", "c"]);
        assert!(p.get_string("missing").is_err());
        assert_eq!(p.get_string_or("missing", "dflt"), "dflt");
    }

    #[test]
    fn test_composite_provider_prefers_first() {
        let composite = CompositeConfigProvider::with_providers(vec![
            provider(&[("api_key", "prefixed")]),
            provider(&[("api_key", "bare"), ("model_candidates", "x")]),
        ]);

        assert_eq!(composite.get_string("api_key").unwrap(), "prefixed");
        assert_eq!(composite.get_string("model_candidates").unwrap(), "x");
        assert!(composite.get_string("nothing").is_err());
    }

    #[test]
    fn test_gemini_config_defaults() {
        let config = GeminiConfig::from_provider(&provider(&[("api_key", "secret")])).unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(config.timeout_seconds, 60);
        assert!((config.translation_temperature - 0.1).abs() < f32::EPSILON);

        let ids: Vec<&str> = config.model_candidates.iter().map(ModelCandidate::as_str).collect();
        assert_eq!(ids, DEFAULT_MODEL_CANDIDATES.to_vec());
        assert_eq!(config.service_name(), "gemini");
    }

    #[test]
    fn test_gemini_config_overrides() {
        let config = GeminiConfig::from_provider(&provider(&[
            ("api_key", "secret"),
            ("gemini_base_url", "http://localhost:9000/v1beta/"),
            ("gemini_timeout_seconds", "5"),
            ("model_candidates", "gemini-2.5-flash, gemini-1.5-flash"),
            ("translation_temperature", "0.3"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:9000/v1beta");
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.model_candidates.len(), 2);
        assert_eq!(config.model_candidates.first().as_str(), "gemini-2.5-flash");
    }

    #[test]
    fn test_missing_api_key_is_configuration_error() {
        let err = GeminiConfig::from_provider(&provider(&[])).unwrap_err();
        assert!(matches!(err, ServiceError::Configuration(_)));
    }

    #[test]
    fn test_blank_candidate_list_is_rejected() {
        let err = GeminiConfig::from_provider(&provider(&[("api_key", "k"), ("model_candidates", " , ")]))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Configuration(_)));
    }

    #[test]
    fn test_repeated_model_candidates_collapse() {
        let config = GeminiConfig::from_provider(&provider(&[
            ("api_key", "k"),
            ("model_candidates", "gemini-2.5-flash, gemini-2.5-flash"),
        ]))
        .unwrap();

        let ids: Vec<&str> = config.model_candidates.iter().map(ModelCandidate::as_str).collect();
        assert_eq!(ids, vec!["gemini-2.5-flash"]);
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let result = GeminiConfig::from_provider(&provider(&[("api_key", "k"), ("gemini_timeout_seconds", "0")]));
        assert!(result.is_err());
    }
}
