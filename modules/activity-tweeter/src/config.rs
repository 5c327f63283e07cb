use std::collections::HashSet;
use std::time::Duration;

use regex::Regex;
use twitter_client::Credentials;

use crate::error::{Result, TweeterError};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // GitHub
    pub github_username: String,
    pub github_token: Option<String>,
    pub github_api_url: Option<String>,

    // Window
    pub interval: Duration,

    // Filtering
    pub exclusions: ExclusionRules,

    // Twitter
    pub credentials: Credentials,
    pub twitter_api_url: Option<String>,

    // HTTP
    pub http_timeout: Option<Duration>,
}

/// Which events must never be announced.
#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    pub event_types: HashSet<String>,
    pub repo_pattern: Option<Regex>,
}

impl ExclusionRules {
    pub fn excludes_repo(&self, repo_name: &str) -> bool {
        self.repo_pattern
            .as_ref()
            .is_some_and(|re| re.is_match(repo_name))
    }

    pub fn excludes_event_type(&self, event_type: &str) -> bool {
        self.event_types.contains(event_type)
    }
}

impl Config {
    /// Load configuration from the process environment, after reading a
    /// `.env` file if one exists.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.log_redacted();
        Ok(config)
    }

    /// Load configuration through an arbitrary key lookup. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let required = |key: &str| {
            optional(key).ok_or_else(|| {
                TweeterError::ConfigurationMissing(format!("{key} environment variable is required"))
            })
        };

        let github_username = required("USER_NAME")?;

        let raw_interval = required("INTERVAL")?;
        let interval = parse_interval(&raw_interval).ok_or_else(|| {
            TweeterError::ConfigurationMissing(format!(
                "INTERVAL must be a positive duration like 1h30m, got {raw_interval:?}"
            ))
        })?;

        let credentials = Credentials {
            consumer_key: required("CONSUMER_KEY")?,
            consumer_secret: required("CONSUMER_SECRET")?,
            access_token: required("ACCESS_TOKEN")?,
            access_token_secret: required("ACCESS_TOKEN_SECRET")?,
        };

        let repo_pattern = match optional("EXCLUDE_REPO") {
            Some(pattern) => Some(Regex::new(&pattern).map_err(|e| {
                TweeterError::ConfigurationMissing(format!("compile regexp on EXCLUDE_REPO: {e}"))
            })?),
            None => None,
        };

        let event_types = optional("EXCLUDE_EVENT")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let http_timeout = match optional("HTTP_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(raw.parse().map_err(|_| {
                TweeterError::ConfigurationMissing(format!(
                    "HTTP_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}"
                ))
            })?)),
            None => None,
        };

        Ok(Self {
            github_username,
            github_token: optional("GITHUB_TOKEN"),
            github_api_url: optional("GITHUB_API_URL"),
            interval,
            exclusions: ExclusionRules {
                event_types,
                repo_pattern,
            },
            credentials,
            twitter_api_url: optional("TWITTER_API_URL"),
            http_timeout,
        })
    }

    fn log_redacted(&self) {
        fn preview(val: &str) -> String {
            let n = val.char_indices().nth(5).map_or(val.len(), |(i, _)| i);
            format!("{}...({} chars)", &val[..n], val.len())
        }

        tracing::info!("Config loaded:");
        tracing::info!("  USER_NAME: {}", self.github_username);
        tracing::info!("  INTERVAL: {:?}", self.interval);
        tracing::info!(
            "  EXCLUDE_REPO: {}",
            self.exclusions
                .repo_pattern
                .as_ref()
                .map_or("<not set>", |re| re.as_str())
        );
        tracing::info!("  EXCLUDE_EVENT: {:?}", self.exclusions.event_types);
        tracing::info!("  CONSUMER_KEY: {}", preview(&self.credentials.consumer_key));
        tracing::info!("  ACCESS_TOKEN: {}", preview(&self.credentials.access_token));
        tracing::info!(
            "  GITHUB_TOKEN: {}",
            self.github_token.as_deref().map_or("<not set>".to_string(), preview)
        );
    }
}

/// Parse a Go-style duration: one or more `<number><unit>` terms, units
/// `h`, `m`, `s`, `ms`, `us`/`µs`, `ns` (e.g. `1h30m`, `90m`, `1.5h`).
/// Zero and unparseable input yield `None`.
pub fn parse_interval(raw: &str) -> Option<Duration> {
    let term = Regex::new(r"(\d+(?:\.\d+)?)(ns|us|µs|ms|h|m|s)").ok()?;

    let mut consumed = 0;
    let mut total_nanos = 0.0_f64;
    for caps in term.captures_iter(raw) {
        let whole = caps.get(0)?;
        if whole.start() != consumed {
            return None;
        }
        consumed = whole.end();

        let value: f64 = caps[1].parse().ok()?;
        let unit_nanos = match &caps[2] {
            "h" => 3_600_000_000_000.0,
            "m" => 60_000_000_000.0,
            "s" => 1_000_000_000.0,
            "ms" => 1_000_000.0,
            "us" | "µs" => 1_000.0,
            "ns" => 1.0,
            _ => return None,
        };
        total_nanos += value * unit_nanos;
    }

    if consumed == 0 || consumed != raw.len() || total_nanos < 1.0 {
        return None;
    }
    Some(Duration::from_nanos(total_nanos.round() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("USER_NAME", "alice"),
            ("INTERVAL", "2h"),
            ("CONSUMER_KEY", "ck-1234567"),
            ("CONSUMER_SECRET", "cs"),
            ("ACCESS_TOKEN", "at"),
            ("ACCESS_TOKEN_SECRET", "ats"),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> Result<Config> {
        Config::from_lookup(|key| env.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn loads_required_settings() {
        let config = load(&base_env()).unwrap();
        assert_eq!(config.github_username, "alice");
        assert_eq!(config.interval, Duration::from_secs(7200));
        assert!(config.exclusions.repo_pattern.is_none());
        assert!(config.exclusions.event_types.is_empty());
        assert!(config.github_token.is_none());
    }

    #[test]
    fn missing_user_name_is_configuration_error() {
        let mut env = base_env();
        env.remove("USER_NAME");
        let err = load(&env).unwrap_err();
        assert!(matches!(err, TweeterError::ConfigurationMissing(m) if m.contains("USER_NAME")));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut env = base_env();
        env.insert("ACCESS_TOKEN_SECRET", "");
        assert!(matches!(
            load(&env),
            Err(TweeterError::ConfigurationMissing(_))
        ));
    }

    #[test]
    fn parses_exclusions() {
        let mut env = base_env();
        env.insert("EXCLUDE_REPO", "^acme/");
        env.insert("EXCLUDE_EVENT", "IssuesEvent, ReleaseEvent,");
        let config = load(&env).unwrap();

        assert!(config.exclusions.excludes_repo("acme/widget"));
        assert!(!config.exclusions.excludes_repo("other/acme"));
        assert!(config.exclusions.excludes_event_type("IssuesEvent"));
        assert!(config.exclusions.excludes_event_type("ReleaseEvent"));
        assert_eq!(config.exclusions.event_types.len(), 2);
    }

    #[test]
    fn invalid_regex_is_configuration_error() {
        let mut env = base_env();
        env.insert("EXCLUDE_REPO", "(unclosed");
        assert!(matches!(
            load(&env),
            Err(TweeterError::ConfigurationMissing(m)) if m.contains("EXCLUDE_REPO")
        ));
    }

    #[test]
    fn invalid_interval_is_configuration_error() {
        let mut env = base_env();
        env.insert("INTERVAL", "two hours");
        assert!(matches!(
            load(&env),
            Err(TweeterError::ConfigurationMissing(m)) if m.contains("INTERVAL")
        ));
    }

    #[test]
    fn interval_formats() {
        assert_eq!(parse_interval("1h"), Some(Duration::from_secs(3600)));
        assert_eq!(parse_interval("90m"), Some(Duration::from_secs(5400)));
        assert_eq!(parse_interval("1h30m"), Some(Duration::from_secs(5400)));
        assert_eq!(parse_interval("1.5h"), Some(Duration::from_secs(5400)));
        assert_eq!(parse_interval("45s"), Some(Duration::from_secs(45)));
        assert_eq!(parse_interval("500ms"), Some(Duration::from_millis(500)));
        assert_eq!(parse_interval("0s"), None);
        assert_eq!(parse_interval("1h x"), None);
        assert_eq!(parse_interval("h"), None);
        assert_eq!(parse_interval("60"), None);
        assert_eq!(parse_interval(""), None);
    }
}
