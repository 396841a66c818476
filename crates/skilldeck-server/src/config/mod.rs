use serde::Serialize;
use std::time::Duration;

pub const CONFIG_SCHEMA_VERSION: &str = "1";

#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    pub slow_request_threshold: Duration,
    pub enable_request_log: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 16 * 1024,
            slow_request_threshold: Duration::from_millis(200),
            enable_request_log: true,
        }
    }
}

pub fn validate_startup_config_contract(api: &ApiConfig) -> Result<(), String> {
    if api.max_body_bytes == 0 {
        return Err("max_body_bytes must be > 0".to_string());
    }
    if api.slow_request_threshold.is_zero() {
        return Err("slow_request_threshold must be > 0".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_config_validation_rejects_zero_limits() {
        let api = ApiConfig {
            max_body_bytes: 0,
            ..ApiConfig::default()
        };
        let err = validate_startup_config_contract(&api).expect_err("zero body limit");
        assert!(err.contains("max_body_bytes"));

        let api = ApiConfig {
            slow_request_threshold: Duration::ZERO,
            ..ApiConfig::default()
        };
        let err = validate_startup_config_contract(&api).expect_err("zero threshold");
        assert!(err.contains("slow_request_threshold"));
    }

    #[test]
    fn startup_config_defaults_pass_validation() {
        assert!(validate_startup_config_contract(&ApiConfig::default()).is_ok());
    }
}
