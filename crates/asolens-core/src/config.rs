use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if an env var holds an unparseable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files, for callers
/// that manage env setup themselves.
///
/// # Errors
///
/// Returns `ConfigError` if an env var holds an unparseable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Core parsing/validation logic, decoupled from the process environment so
/// tests can drive it with a plain `HashMap` lookup instead of `set_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let bind_addr = parse_addr("ASOLENS_BIND_ADDR", "0.0.0.0:8080")?;
    let log_level = or_default("ASOLENS_LOG_LEVEL", "info");

    let openai_api_key = lookup("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
    let pexels_api_key = lookup("PEXELS_API_KEY").ok().filter(|k| !k.is_empty());
    let openai_base_url = or_default("ASOLENS_OPENAI_BASE_URL", "https://api.openai.com/v1");
    let openai_model = or_default("ASOLENS_OPENAI_MODEL", "gpt-4o");
    let pexels_base_url = or_default("ASOLENS_PEXELS_BASE_URL", "https://api.pexels.com");

    let fetch_timeout_secs = parse_u64("ASOLENS_FETCH_TIMEOUT_SECS", "10")?;
    let max_concurrent_extractions = parse_usize("ASOLENS_MAX_CONCURRENT_EXTRACTIONS", "4")?;
    let enrich_delay_ms = parse_u64("ASOLENS_ENRICH_DELAY_MS", "2000")?;

    Ok(AppConfig {
        bind_addr,
        log_level,
        openai_api_key,
        pexels_api_key,
        openai_base_url,
        openai_model,
        pexels_base_url,
        fetch_timeout_secs,
        max_concurrent_extractions,
        enrich_delay_ms,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.openai_api_key.is_none());
        assert!(cfg.pexels_api_key.is_none());
        assert_eq!(cfg.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(cfg.openai_model, "gpt-4o");
        assert_eq!(cfg.pexels_base_url, "https://api.pexels.com");
        assert_eq!(cfg.fetch_timeout_secs, 10);
        assert_eq!(cfg.max_concurrent_extractions, 4);
        assert_eq!(cfg.enrich_delay_ms, 2000);
    }

    #[test]
    fn build_app_config_reads_api_keys() {
        let mut map = HashMap::new();
        map.insert("OPENAI_API_KEY", "sk-test");
        map.insert("PEXELS_API_KEY", "px-test");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.pexels_api_key.as_deref(), Some("px-test"));
    }

    #[test]
    fn build_app_config_treats_empty_keys_as_unset() {
        let mut map = HashMap::new();
        map.insert("OPENAI_API_KEY", "");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.openai_api_key.is_none());
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = HashMap::new();
        map.insert("ASOLENS_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ASOLENS_BIND_ADDR"),
            "expected InvalidEnvVar(ASOLENS_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fetch_timeout_override() {
        let mut map = HashMap::new();
        map.insert("ASOLENS_FETCH_TIMEOUT_SECS", "3");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.fetch_timeout_secs, 3);
    }

    #[test]
    fn build_app_config_fetch_timeout_invalid() {
        let mut map = HashMap::new();
        map.insert("ASOLENS_FETCH_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ASOLENS_FETCH_TIMEOUT_SECS"),
            "expected InvalidEnvVar(ASOLENS_FETCH_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_max_concurrent_override() {
        let mut map = HashMap::new();
        map.insert("ASOLENS_MAX_CONCURRENT_EXTRACTIONS", "8");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.max_concurrent_extractions, 8);
    }

    #[test]
    fn build_app_config_enrich_delay_override() {
        let mut map = HashMap::new();
        map.insert("ASOLENS_ENRICH_DELAY_MS", "0");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.enrich_delay_ms, 0);
    }

    #[test]
    fn debug_redacts_api_keys() {
        let mut map = HashMap::new();
        map.insert("OPENAI_API_KEY", "sk-secret-value");
        map.insert("PEXELS_API_KEY", "px-secret-value");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("sk-secret-value"));
        assert!(!rendered.contains("px-secret-value"));
        assert!(rendered.contains("[redacted]"));
    }
}
