//! Configuration validation rules.

use super::schema::Config;

/// Validate configuration and return aggregated validation errors.
pub fn validate_config(config: &Config) -> crate::Result<()> {
    let mut errors = Vec::new();

    if config.personas.workspace.trim().is_empty() {
        errors.push("personas.workspace must not be empty".to_string());
    }
    if config.provider.model.trim().is_empty() {
        errors.push("provider.model must not be empty".to_string());
    }
    if config.provider.max_tokens == 0 {
        errors.push("provider.max_tokens must be > 0".to_string());
    }
    if !(0.0..=2.0).contains(&config.provider.temperature) {
        errors.push("provider.temperature must be in [0.0, 2.0]".to_string());
    }
    if config.provider.api_key.trim().is_empty()
        && config
            .provider
            .api_base
            .as_deref()
            .map(|b| b.trim().is_empty())
            .unwrap_or(true)
    {
        errors.push(
            "provider.api_key is required when provider.api_base is not set".to_string(),
        );
    }
    if config.server.port == 0 {
        errors.push("server.port must be > 0".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::Error::Validation(errors.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_defaults_with_key() {
        let mut config = Config::default();
        config.provider.api_key = "test-key".to_string();
        validate_config(&config).unwrap();
    }

    #[test]
    fn test_validate_accepts_local_api_base_without_key() {
        let mut config = Config::default();
        config.provider.api_base = Some("http://localhost:4000".to_string());
        validate_config(&config).unwrap();
    }

    #[test]
    fn test_validate_requires_credential() {
        let config = Config::default();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("provider.api_key"));
    }

    #[test]
    fn test_validate_rejects_zero_max_tokens() {
        let mut config = Config::default();
        config.provider.api_key = "test-key".to_string();
        config.provider.max_tokens = 0;

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("max_tokens"));
    }
}
