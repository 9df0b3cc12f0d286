use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Quota limits leave room for at least one call
/// - Per-call costs are non-zero
/// - Cache freshness window is non-zero
/// - Search maxResults is non-zero
///
/// Credentials are checked by the components that need them.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let quota = &config.quota;

    if quota.daily_limit == 0 {
        return Err(ConfigError::ValidationError(
            "quota.daily_limit cannot be 0".to_string(),
        ));
    }

    if quota.safety_buffer >= quota.daily_limit {
        return Err(ConfigError::ValidationError(format!(
            "quota.safety_buffer ({}) must be lower than quota.daily_limit ({})",
            quota.safety_buffer, quota.daily_limit
        )));
    }

    if quota.search_cost == 0 || quota.playlist_add_cost == 0 {
        return Err(ConfigError::ValidationError(
            "quota costs must be greater than 0".to_string(),
        ));
    }

    if config.cache.freshness_days == 0 {
        return Err(ConfigError::ValidationError(
            "cache.freshness_days cannot be 0".to_string(),
        ));
    }

    if config.youtube.max_results == 0 {
        return Err(ConfigError::ValidationError(
            "youtube.max_results cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_zero_daily_limit_fails() {
        let mut config = Config::default();
        config.quota.daily_limit = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_buffer_swallowing_limit_fails() {
        let mut config = Config::default();
        config.quota.daily_limit = 500;
        config.quota.safety_buffer = 500;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("safety_buffer"));
    }

    #[test]
    fn test_validate_zero_cost_fails() {
        let mut config = Config::default();
        config.quota.playlist_add_cost = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_freshness_fails() {
        let mut config = Config::default();
        config.cache.freshness_days = 0;
        assert!(validate_config(&config).is_err());
    }
}
