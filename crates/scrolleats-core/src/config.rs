use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Accepted per-request timeouts for the places client and the proxy.
const REQUEST_TIMEOUT_RANGE_SECS: std::ops::RangeInclusive<u64> = 10..=15;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can feed a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
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

    let env = parse_environment(&or_default("SCROLLEATS_ENV", "development"))?;
    let bind_addr = parse_addr("SCROLLEATS_BIND_ADDR", "0.0.0.0:3001")?;
    let log_level = or_default("SCROLLEATS_LOG_LEVEL", "info");
    let google_places_api_key = optional("GOOGLE_PLACES_API_KEY");
    let upstream_base_url = or_default(
        "SCROLLEATS_UPSTREAM_BASE_URL",
        "https://maps.googleapis.com/maps/api/",
    );
    let proxy_base_url = or_default("SCROLLEATS_PROXY_BASE_URL", "http://localhost:3001/api/");

    let request_timeout_secs = parse_u64("SCROLLEATS_REQUEST_TIMEOUT_SECS", "15")?;
    if !REQUEST_TIMEOUT_RANGE_SECS.contains(&request_timeout_secs) {
        return Err(ConfigError::InvalidEnvVar {
            var: "SCROLLEATS_REQUEST_TIMEOUT_SECS".to_string(),
            reason: format!(
                "must be between {} and {} seconds",
                REQUEST_TIMEOUT_RANGE_SECS.start(),
                REQUEST_TIMEOUT_RANGE_SECS.end()
            ),
        });
    }

    let static_dir = optional("SCROLLEATS_STATIC_DIR").map(PathBuf::from);
    let rate_limit_max_requests = parse_usize("SCROLLEATS_RATE_LIMIT_MAX_REQUESTS", "120")?;
    let rate_limit_window_secs = parse_u64("SCROLLEATS_RATE_LIMIT_WINDOW_SECS", "60")?;
    let state_path = PathBuf::from(or_default(
        "SCROLLEATS_STATE_PATH",
        "./scrolleats-state.json",
    ));

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        google_places_api_key,
        upstream_base_url,
        proxy_base_url,
        request_timeout_secs,
        static_dir,
        rate_limit_max_requests,
        rate_limit_window_secs,
        state_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SCROLLEATS_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
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
    fn parse_environment_accepts_known_values() {
        assert_eq!(
            parse_environment("development").unwrap(),
            Environment::Development
        );
        assert_eq!(parse_environment("test").unwrap(), Environment::Test);
        assert_eq!(
            parse_environment("production").unwrap(),
            Environment::Production
        );
    }

    #[test]
    fn parse_environment_unknown_fails() {
        let err = parse_environment("staging").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SCROLLEATS_ENV"));
    }

    #[test]
    fn build_app_config_uses_defaults_for_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.port(), 3001);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.request_timeout_secs, 15);
        assert_eq!(cfg.proxy_base_url, "http://localhost:3001/api/");
        assert!(cfg.google_places_api_key.is_none());
        assert!(cfg.static_dir.is_none());
        assert_eq!(cfg.rate_limit_max_requests, 120);
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = HashMap::new();
        map.insert("SCROLLEATS_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SCROLLEATS_BIND_ADDR"),
            "expected InvalidEnvVar(SCROLLEATS_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_timeout_outside_range() {
        for raw in ["0", "9", "16", "300"] {
            let mut map = HashMap::new();
            map.insert("SCROLLEATS_REQUEST_TIMEOUT_SECS", raw);
            let result = build_app_config(lookup_from_map(&map));
            assert!(
                matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SCROLLEATS_REQUEST_TIMEOUT_SECS"),
                "{raw}: got {result:?}"
            );
        }
    }

    #[test]
    fn build_app_config_accepts_timeout_bounds() {
        for (raw, expected) in [("10", 10), ("15", 15)] {
            let mut map = HashMap::new();
            map.insert("SCROLLEATS_REQUEST_TIMEOUT_SECS", raw);
            let cfg = build_app_config(lookup_from_map(&map)).expect("valid");
            assert_eq!(cfg.request_timeout_secs, expected);
        }
    }

    #[test]
    fn blank_api_key_is_treated_as_absent() {
        let mut map = HashMap::new();
        map.insert("GOOGLE_PLACES_API_KEY", "   ");
        let cfg = build_app_config(lookup_from_map(&map)).expect("valid");
        assert!(cfg.google_places_api_key.is_none());
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let mut map = HashMap::new();
        map.insert("GOOGLE_PLACES_API_KEY", "super-secret");
        let cfg = build_app_config(lookup_from_map(&map)).expect("valid");
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[redacted]"));
    }
}
