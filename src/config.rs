/*
 * Responsibility
 * - 環境変数の読み込み (PORT, SUPABASE_URL, SUPABASE_JWT_KEY, ALLOWED_ORIGINS など)
 * - 設定値のバリデーション (必須値が欠けていれば起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

const REQUIRED_VARS: [&str; 2] = ["SUPABASE_URL", "SUPABASE_JWT_KEY"];

const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Every required variable that was unset or empty, in declaration order.
    Missing(Vec<&'static str>),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(keys) => {
                write!(f, "missing required configuration: {}", keys.join(","))
            }
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // Issuer origin. Only reported at startup, tokens are not checked against it.
    pub supabase_url: String,
    // Shared secret text, optionally base64url without padding.
    pub supabase_jwt_key: String,

    pub allowed_origins: Vec<String>,

    pub request_timeout_seconds: u64,
    pub request_body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<&'static str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|key| present(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let port: u16 = match present("PORT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(present("APP_ENV").or_else(|| present("ENVIRONMENT")));

        let supabase_url = present("SUPABASE_URL").ok_or(ConfigError::Invalid("SUPABASE_URL"))?;
        let supabase_jwt_key =
            present("SUPABASE_JWT_KEY").ok_or(ConfigError::Invalid("SUPABASE_JWT_KEY"))?;

        let mut allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();
        if allowed_origins.is_empty() {
            allowed_origins.push(DEFAULT_ALLOWED_ORIGIN.to_string());
        }

        let request_timeout_seconds: u64 =
            positive(present("REQUEST_TIMEOUT_SECONDS"), "REQUEST_TIMEOUT_SECONDS", 30)?;

        let request_body_limit_bytes: usize = positive(
            present("REQUEST_BODY_LIMIT_BYTES"),
            "REQUEST_BODY_LIMIT_BYTES",
            1024 * 1024,
        )?;

        Ok(Self {
            addr,
            app_env,
            supabase_url,
            supabase_jwt_key,
            allowed_origins,
            request_timeout_seconds,
            request_body_limit_bytes,
        })
    }
}

// Unset means `default`; zero or anything unparsable is rejected.
fn positive<T>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Default + PartialEq,
{
    let Some(value) = value else {
        return Ok(default);
    };

    match value.trim().parse::<T>() {
        Ok(parsed) if parsed != T::default() => Ok(parsed),
        _ => Err(ConfigError::Invalid(key)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn reports_every_missing_required_variable() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "8080")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing(vec!["SUPABASE_URL", "SUPABASE_JWT_KEY"])
        );
        assert_eq!(
            err.to_string(),
            "missing required configuration: SUPABASE_URL,SUPABASE_JWT_KEY"
        );
    }

    #[test]
    fn empty_secret_counts_as_missing() {
        let err = Config::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_JWT_KEY", "  "),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing(vec!["SUPABASE_JWT_KEY"]));
    }

    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_JWT_KEY", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.request_timeout_seconds, 30);
        assert_eq!(config.request_body_limit_bytes, 1024 * 1024);
    }

    #[test]
    fn parses_origins_and_environment() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "8081"),
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_JWT_KEY", "secret"),
            ("ALLOWED_ORIGINS", " https://a.example , ,https://b.example"),
            ("ENVIRONMENT", "Production"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 8081);
        assert!(config.app_env.is_production());
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn rejects_non_numeric_port() {
        let err = Config::from_lookup(lookup_from(&[
            ("PORT", "http"),
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_JWT_KEY", "secret"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Invalid("PORT"));
    }

    #[test]
    fn rejects_zero_or_unparsable_limits() {
        for (key, value) in [
            ("REQUEST_TIMEOUT_SECONDS", "0"),
            ("REQUEST_TIMEOUT_SECONDS", "30s"),
            ("REQUEST_BODY_LIMIT_BYTES", "0"),
            ("REQUEST_BODY_LIMIT_BYTES", "-1"),
        ] {
            let err = Config::from_lookup(lookup_from(&[
                ("SUPABASE_URL", "https://demo.supabase.co"),
                ("SUPABASE_JWT_KEY", "secret"),
                (key, value),
            ]))
            .unwrap_err();
            assert_eq!(err, ConfigError::Invalid(key), "{key}={value}");
        }
    }

    #[test]
    fn parses_explicit_limits() {
        let config = Config::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_JWT_KEY", "secret"),
            ("REQUEST_TIMEOUT_SECONDS", " 5 "),
            ("REQUEST_BODY_LIMIT_BYTES", "2048"),
        ]))
        .unwrap();

        assert_eq!(config.request_timeout_seconds, 5);
        assert_eq!(config.request_body_limit_bytes, 2048);
    }
}
